use std::{collections::HashSet, sync::Arc};

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::{
    errors::{AggregationError, CatalogError},
    language::Language,
    management::CredentialBroker,
    spotify::CatalogApi,
    types::{Artist, Credential, Track},
};

/// Tracks requested per trending keyword.
pub const QUERY_LIMIT: u32 = 10;
/// Tracks kept from each keyword's result.
pub const TRACKS_PER_QUERY: usize = 5;
/// Upper bound of a [`TrendingSet`].
pub const TRENDING_CAPACITY: usize = 20;

/// Ordered, duplicate-free, capacity-bounded list of trending tracks.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TrendingSet {
    tracks: Vec<Track>,
    seen: HashSet<String>,
}

impl TrendingSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `track` unless its id is already present. Returns whether it was added.
    pub fn push(&mut self, track: Track) -> bool {
        if !self.seen.insert(track.id.clone()) {
            return false;
        }
        self.tracks.push(track);
        true
    }

    /// Cuts the set to [`TRENDING_CAPACITY`], keeping the earliest tracks.
    ///
    /// Dropped ids are forgotten, so a later push may add them again.
    pub fn truncate(&mut self) {
        for dropped in self.tracks.drain(TRENDING_CAPACITY.min(self.tracks.len())..) {
            self.seen.remove(&dropped.id);
        }
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Tracks in insertion order.
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn into_tracks(self) -> Vec<Track> {
        self.tracks
    }
}

/// One fan-out run against the catalog.
///
/// Implements the forgiving side of the catalog contract: a failed lookup
/// contributes nothing and is logged. The first 401 of the run triggers one
/// credential refresh, later calls use the new token; the failed call itself
/// is not repeated.
pub struct FanOut<'a> {
    catalog: &'a dyn CatalogApi,
    broker: &'a CredentialBroker,
    credential: Credential,
    refreshed: bool,
}

impl<'a> FanOut<'a> {
    /// Starts a run with `credential`; it is replaced at most once, on the first 401.
    pub fn new(catalog: &'a dyn CatalogApi, broker: &'a CredentialBroker, credential: Credential) -> Self {
        Self {
            catalog,
            broker,
            credential,
            refreshed: false,
        }
    }

    /// Up to `limit` tracks for `query`; empty on any failure.
    pub async fn search_tracks(&mut self, query: &str, limit: u32) -> Vec<Track> {
        match self
            .catalog
            .search_tracks(&self.credential.token, query, limit)
            .await
        {
            Ok(tracks) => tracks,
            Err(e) => {
                tracing::warn!(query, error = %e, "track search failed, skipping keyword");
                self.recover(&e).await;
                Vec::new()
            }
        }
    }

    /// First artist named `name`; `None` on any failure.
    pub async fn search_artist(&mut self, name: &str) -> Option<Artist> {
        match self
            .catalog
            .search_artist(&self.credential.token, name)
            .await
        {
            Ok(artist) => artist,
            Err(e) => {
                tracing::warn!(artist = name, error = %e, "artist lookup failed");
                self.recover(&e).await;
                None
            }
        }
    }

    async fn recover(&mut self, error: &CatalogError) {
        if *error != CatalogError::AuthExpired || self.refreshed {
            return;
        }
        self.refreshed = true;
        if let Ok(credential) = self.broker.acquire().await {
            self.credential = credential;
        }
    }
}

/// Builds trending sets and roster lookups out of keyword fan-outs.
pub struct TrendingAggregator {
    catalog: Arc<dyn CatalogApi>,
    broker: Arc<CredentialBroker>,
    last_updated: RwLock<Option<DateTime<Utc>>>,
}

impl TrendingAggregator {
    pub fn new(catalog: Arc<dyn CatalogApi>, broker: Arc<CredentialBroker>) -> Self {
        Self {
            catalog,
            broker,
            last_updated: RwLock::new(None),
        }
    }

    /// Runs every trending keyword of `language` in order and merges the results.
    ///
    /// Each keyword contributes at most [`TRACKS_PER_QUERY`] tracks; a track
    /// already contributed by an earlier keyword is skipped. The merged set
    /// is cut to [`TRENDING_CAPACITY`]. Only a missing credential fails the run.
    pub async fn refresh_for_language(
        &self,
        language: Language,
    ) -> Result<TrendingSet, AggregationError> {
        let credential = self.broker.current_or_acquire().await?;
        let mut fan_out = FanOut::new(self.catalog.as_ref(), &self.broker, credential);
        let mut set = TrendingSet::new();

        for keyword in language.trending_queries() {
            let tracks = fan_out.search_tracks(keyword, QUERY_LIMIT).await;
            for track in tracks.into_iter().take(TRACKS_PER_QUERY) {
                set.push(track);
            }
        }
        set.truncate();

        let now = Utc::now();
        *self.last_updated.write().await = Some(now);
        tracing::info!(%language, tracks = set.len(), "refreshed trending tracks");
        Ok(set)
    }

    /// Looks up every roster name, keeping the artists found in roster order.
    pub async fn refresh_roster(&self, names: &[String]) -> Result<Vec<Artist>, AggregationError> {
        let credential = self.broker.current_or_acquire().await?;
        let mut fan_out = FanOut::new(self.catalog.as_ref(), &self.broker, credential);
        let mut artists: Vec<Artist> = Vec::with_capacity(names.len());

        for name in names {
            if let Some(artist) = fan_out.search_artist(name).await {
                // two roster names may resolve to the same catalog artist
                if !artists.iter().any(|known| known.id == artist.id) {
                    artists.push(artist);
                }
            }
        }

        tracing::info!(found = artists.len(), requested = names.len(), "refreshed popular artists");
        Ok(artists)
    }

    /// Completion time of the last successful [`Self::refresh_for_language`].
    pub async fn last_updated(&self) -> Option<DateTime<Utc>> {
        *self.last_updated.read().await
    }
}
