use std::sync::{
    Arc, Weak,
    atomic::{AtomicBool, AtomicU64, Ordering},
};

use tokio::{sync::watch, task::JoinHandle};

use crate::{
    errors::{CatalogError, SearchError},
    language::Language,
    management::{
        CredentialBroker, artist,
        state::{RefreshGate, RefreshPhase, TrendState},
        trending::TrendingAggregator,
    },
    spotify::CatalogApi,
    types::SearchResult,
};

/// What happened to a submitted search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Results replaced the active search result.
    Applied,
    /// Empty query, the active search result was dropped without a network call.
    Cleared,
    /// The search failed, the previous result was kept and the error published.
    Failed,
    /// A newer query was submitted meanwhile, or the manager was detached.
    Discarded,
}

struct Inner {
    catalog: Arc<dyn CatalogApi>,
    broker: Arc<CredentialBroker>,
    aggregator: TrendingAggregator,
    roster: Vec<String>,
    state: watch::Sender<TrendState>,
    tracks_gate: RefreshGate,
    artists_gate: RefreshGate,
    compound_gate: RefreshGate,
    search_seq: AtomicU64,
    detached: AtomicBool,
}

/// Single owner of the trending and artist state.
///
/// All writes go through the methods below and are published on a `watch`
/// channel; the presentation layer only holds receivers. Cloning is cheap and
/// shares the same state.
#[derive(Clone)]
pub struct TrendManager {
    inner: Arc<Inner>,
}

/// Handle that does not keep the manager alive, used by timers and debouncers.
#[derive(Clone)]
pub struct WeakTrendManager {
    inner: Weak<Inner>,
}

impl WeakTrendManager {
    pub fn upgrade(&self) -> Option<TrendManager> {
        self.inner.upgrade().map(|inner| TrendManager { inner })
    }
}

impl TrendManager {
    pub fn new(
        catalog: Arc<dyn CatalogApi>,
        broker: Arc<CredentialBroker>,
        language: Language,
        roster: Vec<String>,
    ) -> Self {
        let (state, _) = watch::channel(TrendState::new(language));
        Self {
            inner: Arc::new(Inner {
                aggregator: TrendingAggregator::new(Arc::clone(&catalog), Arc::clone(&broker)),
                catalog,
                broker,
                roster,
                state,
                tracks_gate: RefreshGate::default(),
                artists_gate: RefreshGate::default(),
                compound_gate: RefreshGate::default(),
                search_seq: AtomicU64::new(0),
                detached: AtomicBool::new(false),
            }),
        }
    }

    /// Receiver that sees every published [`TrendState`].
    pub fn subscribe(&self) -> watch::Receiver<TrendState> {
        self.inner.state.subscribe()
    }

    /// Clone of the current state.
    pub fn snapshot(&self) -> TrendState {
        self.inner.state.borrow().clone()
    }

    /// Credential holder shared with the aggregator.
    pub fn broker(&self) -> &Arc<CredentialBroker> {
        &self.inner.broker
    }

    pub fn downgrade(&self) -> WeakTrendManager {
        WeakTrendManager {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Stops publishing. Operations still in flight run to completion but
    /// their results are dropped.
    pub fn detach(&self) {
        self.inner.detached.store(true, Ordering::Release);
    }

    pub fn is_detached(&self) -> bool {
        self.inner.detached.load(Ordering::Acquire)
    }

    /// `Refreshing` while any track or compound refresh is in flight.
    pub fn phase(&self) -> RefreshPhase {
        if self.inner.compound_gate.phase() == RefreshPhase::Refreshing {
            return RefreshPhase::Refreshing;
        }
        self.inner.tracks_gate.phase()
    }

    /// Refreshes the trending set for the current language.
    ///
    /// Returns `false` when another track refresh was already in flight and
    /// this trigger was dropped.
    pub async fn refresh_trending(&self) -> bool {
        let Some(_guard) = self.inner.tracks_gate.try_enter() else {
            tracing::debug!("track refresh already running, dropping trigger");
            return false;
        };
        let language = self.inner.state.borrow().language;
        self.run_trending(language, true).await;
        true
    }

    /// Looks up the roster artists again.
    pub async fn refresh_popular_artists(&self) -> bool {
        self.refresh_popular_artists_inner(true).await
    }

    /// Manual and timer entry point: tracks and roster together.
    ///
    /// Returns `false` when a compound or track refresh was already running.
    pub async fn refresh(&self) -> bool {
        self.refresh_compound(None).await
    }

    /// Switches language, clears the search and refreshes tracks and roster.
    ///
    /// Dropped as a whole, leaving language and search untouched, when a
    /// compound or track refresh is already running.
    pub async fn change_language(&self, language: Language) -> bool {
        self.refresh_compound(Some(language)).await
    }

    /// Runs a search inline. See [`TrendManager::submit_search`].
    pub async fn search(&self, query: &str) -> SearchOutcome {
        let ticket = self.next_search_ticket();
        self.run_search(ticket, query.to_string()).await
    }

    /// Spawns a search for `query`.
    ///
    /// The sequence number is taken before spawning, so only the most
    /// recently submitted query may publish results, whatever order the
    /// requests complete in. An empty query clears the active result without
    /// touching the network.
    pub fn submit_search(&self, query: String) -> JoinHandle<SearchOutcome> {
        let ticket = self.next_search_ticket();
        let manager = self.clone();
        tokio::spawn(async move { manager.run_search(ticket, query).await })
    }

    /// Tracks and roster together. With `switch_to` set the language is
    /// changed and the search cleared, but only once both the compound and
    /// the track gate are held.
    async fn refresh_compound(&self, switch_to: Option<Language>) -> bool {
        let Some(_compound) = self.inner.compound_gate.try_enter() else {
            tracing::debug!("refresh already running, dropping trigger");
            return false;
        };
        let Some(tracks_guard) = self.inner.tracks_gate.try_enter() else {
            tracing::debug!("track refresh already running, dropping trigger");
            return false;
        };

        if switch_to.is_some() {
            self.next_search_ticket();
        }
        let language = switch_to.unwrap_or_else(|| self.inner.state.borrow().language);
        self.publish(|s| {
            s.is_refreshing = true;
            s.error_message = None;
            if switch_to.is_some() {
                s.language = language;
                s.search = None;
                s.search_query.clear();
                s.is_searching = false;
            }
        });

        tokio::join!(
            async move {
                let _tracks = tracks_guard;
                self.run_trending(language, false).await;
            },
            self.refresh_popular_artists_inner(false)
        );

        self.publish(|s| s.is_refreshing = false);
        true
    }

    /// Fan-out for `language`. The caller holds the track gate.
    async fn run_trending(&self, language: Language, clear_error: bool) {
        self.publish(|s| {
            s.is_refreshing_tracks = true;
            if clear_error {
                s.error_message = None;
            }
        });

        let result = self.inner.aggregator.refresh_for_language(language).await;
        let refreshed_at = self.inner.aggregator.last_updated().await;

        self.publish(|s| {
            s.is_refreshing_tracks = false;
            match result {
                Ok(set) => {
                    s.trending_tracks = set.into_tracks();
                    s.last_updated = refreshed_at;
                    rederive_artists(s);
                }
                Err(e) => s.error_message = Some(format!("Failed to load trending tracks: {e}")),
            }
        });
    }

    async fn refresh_popular_artists_inner(&self, clear_error: bool) -> bool {
        let Some(_guard) = self.inner.artists_gate.try_enter() else {
            tracing::debug!("artist refresh already running, dropping trigger");
            return false;
        };

        self.publish(|s| {
            s.is_refreshing_artists = true;
            if clear_error {
                s.error_message = None;
            }
        });

        let result = self.inner.aggregator.refresh_roster(&self.inner.roster).await;

        self.publish(|s| {
            s.is_refreshing_artists = false;
            match result {
                Ok(artists) => {
                    s.popular_artists = artists;
                    rederive_artists(s);
                }
                Err(e) => s.error_message = Some(format!("Failed to load popular artists: {e}")),
            }
        });
        true
    }

    async fn run_search(&self, ticket: u64, query: String) -> SearchOutcome {
        let query = query.trim();
        if !self.is_current_search(ticket) {
            return SearchOutcome::Discarded;
        }

        if query.is_empty() {
            let applied = self.publish(|s| {
                s.search = None;
                s.search_query.clear();
                s.is_searching = false;
            });
            return if applied {
                SearchOutcome::Cleared
            } else {
                SearchOutcome::Discarded
            };
        }

        self.publish(|s| {
            s.is_searching = true;
            s.error_message = None;
            s.search_query = query.to_string();
        });

        let result = self.combined_search(query).await;
        if !self.is_current_search(ticket) {
            tracing::debug!(query, "discarding stale search result");
            return SearchOutcome::Discarded;
        }

        let outcome = match &result {
            Ok(_) => SearchOutcome::Applied,
            Err(_) => SearchOutcome::Failed,
        };
        let applied = self.publish(|s| {
            s.is_searching = false;
            match result {
                Ok(found) => s.search = Some(found),
                Err(e) => s.error_message = Some(e.to_string()),
            }
        });

        if applied {
            outcome
        } else {
            SearchOutcome::Discarded
        }
    }

    async fn combined_search(&self, query: &str) -> Result<SearchResult, SearchError> {
        let credential = self.inner.broker.current_or_acquire().await?;
        match self
            .inner
            .catalog
            .combined_search(&credential.token, query)
            .await
        {
            Err(CatalogError::AuthExpired) => {
                // the user re-issues the search once the new token is stored
                if let Err(e) = self.inner.broker.acquire().await {
                    tracing::warn!(error = %e, "token refresh after 401 failed");
                }
                Err(CatalogError::AuthExpired.into())
            }
            other => Ok(other?),
        }
    }

    fn next_search_ticket(&self) -> u64 {
        self.inner.search_seq.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current_search(&self, ticket: u64) -> bool {
        self.inner.search_seq.load(Ordering::SeqCst) == ticket
    }

    fn publish(&self, modify: impl FnOnce(&mut TrendState)) -> bool {
        if self.is_detached() {
            return false;
        }
        self.inner.state.send_modify(modify);
        true
    }
}

fn rederive_artists(state: &mut TrendState) {
    let (artists, images) =
        artist::language_driven_artists(&state.trending_tracks, &state.popular_artists);
    state.language_artists = artists;
    state.artist_images = images;
}
