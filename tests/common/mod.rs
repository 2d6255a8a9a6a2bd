#![allow(dead_code)]

use std::{
    collections::{HashMap, HashSet},
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use sportrend::{
    errors::{AuthError, CatalogError},
    language::Language,
    management::{CredentialBroker, TrendManager},
    spotify::{CatalogApi, TokenProvider},
    types::{Artist, Image, SearchResult, Track},
};
use tokio::sync::Semaphore;

/// Hands out `token-1`, `token-2`, ... and counts requests.
#[derive(Default)]
pub struct FakeTokens {
    calls: AtomicUsize,
    failing: AtomicBool,
}

impl FakeTokens {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn fail(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl TokenProvider for FakeTokens {
    async fn request_token(&self) -> Result<String, AuthError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.failing.load(Ordering::SeqCst) {
            return Err(AuthError::Rejected { status: 400 });
        }
        Ok(format!("token-{n}"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Tracks { query: String, token: String },
    Artist { name: String, token: String },
    Search { query: String, token: String },
}

/// In-memory catalog. Unknown queries answer with empty results.
#[derive(Default)]
pub struct FakeCatalog {
    tracks: Mutex<HashMap<String, Result<Vec<Track>, CatalogError>>>,
    artists: Mutex<HashMap<String, Result<Option<Artist>, CatalogError>>>,
    searches: Mutex<HashMap<String, Result<SearchResult, CatalogError>>>,
    expired: Mutex<HashSet<String>>,
    calls: Mutex<Vec<Call>>,
    gate: Option<Arc<Semaphore>>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every request waits for a permit on the returned semaphore.
    pub fn gated(mut self) -> (Self, Arc<Semaphore>) {
        let gate = Arc::new(Semaphore::new(0));
        self.gate = Some(Arc::clone(&gate));
        (self, gate)
    }

    pub fn with_tracks(self, query: &str, tracks: Vec<Track>) -> Self {
        self.tracks
            .lock()
            .unwrap()
            .insert(query.to_string(), Ok(tracks));
        self
    }

    pub fn failing_tracks(self, query: &str, error: CatalogError) -> Self {
        self.tracks
            .lock()
            .unwrap()
            .insert(query.to_string(), Err(error));
        self
    }

    pub fn with_artist(self, name: &str, artist: Artist) -> Self {
        self.artists
            .lock()
            .unwrap()
            .insert(name.to_string(), Ok(Some(artist)));
        self
    }

    pub fn failing_artist(self, name: &str, error: CatalogError) -> Self {
        self.artists
            .lock()
            .unwrap()
            .insert(name.to_string(), Err(error));
        self
    }

    pub fn with_search(self, query: &str, result: SearchResult) -> Self {
        self.searches
            .lock()
            .unwrap()
            .insert(query.to_string(), Ok(result));
        self
    }

    pub fn failing_search(self, query: &str, error: CatalogError) -> Self {
        self.searches
            .lock()
            .unwrap()
            .insert(query.to_string(), Err(error));
        self
    }

    /// Requests carrying `token` answer 401.
    pub fn expire(&self, token: &str) {
        self.expired.lock().unwrap().insert(token.to_string());
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn track_queries(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Tracks { query, .. } => Some(query),
                _ => None,
            })
            .collect()
    }

    pub fn artist_lookups(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Artist { name, .. } => Some(name),
                _ => None,
            })
            .collect()
    }

    pub fn search_queries(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Search { query, .. } => Some(query),
                _ => None,
            })
            .collect()
    }

    async fn enter(&self, call: Call, token: &str) -> Result<(), CatalogError> {
        self.calls.lock().unwrap().push(call);
        if let Some(gate) = &self.gate {
            if let Ok(permit) = gate.acquire().await {
                permit.forget();
            }
        }
        if self.expired.lock().unwrap().contains(token) {
            return Err(CatalogError::AuthExpired);
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogApi for FakeCatalog {
    async fn search_artist(&self, token: &str, name: &str) -> Result<Option<Artist>, CatalogError> {
        let call = Call::Artist {
            name: name.to_string(),
            token: token.to_string(),
        };
        self.enter(call, token).await?;
        self.artists
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .unwrap_or(Ok(None))
    }

    async fn search_tracks(
        &self,
        token: &str,
        query: &str,
        limit: u32,
    ) -> Result<Vec<Track>, CatalogError> {
        let call = Call::Tracks {
            query: query.to_string(),
            token: token.to_string(),
        };
        self.enter(call, token).await?;
        self.tracks
            .lock()
            .unwrap()
            .get(query)
            .cloned()
            .unwrap_or(Ok(Vec::new()))
            .map(|tracks| tracks.into_iter().take(limit as usize).collect())
    }

    async fn combined_search(
        &self,
        token: &str,
        query: &str,
    ) -> Result<SearchResult, CatalogError> {
        let call = Call::Search {
            query: query.to_string(),
            token: token.to_string(),
        };
        self.enter(call, token).await?;
        self.searches
            .lock()
            .unwrap()
            .get(query)
            .cloned()
            .unwrap_or(Ok(SearchResult::default()))
    }
}

pub fn artist(id: &str, name: &str) -> Artist {
    Artist {
        id: id.to_string(),
        name: name.to_string(),
        ..Artist::default()
    }
}

pub fn artist_with_image(id: &str, name: &str, image: &str) -> Artist {
    Artist {
        image_url: Some(image.to_string()),
        popularity: Some(90),
        follower_count: Some(1_000_000),
        ..artist(id, name)
    }
}

/// Track credited to `artist_ids` in order, with an optional cover.
pub fn track(id: &str, artist_ids: &[&str], cover: Option<&str>) -> Track {
    Track {
        id: id.to_string(),
        name: format!("Song {id}"),
        popularity: Some(50),
        artists: artist_ids
            .iter()
            .map(|a| artist(a, &format!("Artist {a}")))
            .collect(),
        album_id: format!("album-{id}"),
        album_images: cover
            .map(|url| Image {
                url: url.to_string(),
                height: Some(640),
                width: Some(640),
            })
            .into_iter()
            .collect(),
        preview_url: None,
        external_url: Some(format!("https://open.spotify.com/track/{id}")),
    }
}

/// `count` distinct tracks whose ids are prefixed with `prefix`.
pub fn tracks(prefix: &str, count: usize) -> Vec<Track> {
    (0..count)
        .map(|i| {
            let id = format!("{prefix}-{i}");
            let artist_id = format!("{prefix}-artist-{i}");
            let cover = format!("https://img/{id}");
            track(&id, &[artist_id.as_str()], Some(cover.as_str()))
        })
        .collect()
}

/// Catalog answering 10 distinct tracks for every trending keyword of `language`.
pub fn catalog_for(language: Language) -> FakeCatalog {
    language
        .trending_queries()
        .iter()
        .fold(FakeCatalog::new(), |catalog, keyword| {
            catalog.with_tracks(keyword, tracks(keyword, 10))
        })
}

pub struct Harness {
    pub manager: TrendManager,
    pub catalog: Arc<FakeCatalog>,
    pub tokens: Arc<FakeTokens>,
    pub broker: Arc<CredentialBroker>,
}

pub fn harness(catalog: FakeCatalog, language: Language, roster: &[&str]) -> Harness {
    let catalog = Arc::new(catalog);
    let tokens = Arc::new(FakeTokens::default());
    let broker = Arc::new(CredentialBroker::new(tokens.clone()));
    let manager = TrendManager::new(
        catalog.clone(),
        Arc::clone(&broker),
        language,
        roster.iter().map(|name| name.to_string()).collect(),
    );
    Harness {
        manager,
        catalog,
        tokens,
        broker,
    }
}

/// Lets every runnable task make progress. Relies on the paused test clock.
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(1)).await;
}
