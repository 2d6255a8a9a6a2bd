use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::{
    errors::CatalogError,
    types::{
        Artist, ArtistSearchResponse, CombinedSearchResponse, SearchResult, Track,
        TrackSearchResponse,
    },
    utils::{self, SearchKind},
};

/// Results requested per type by the interactive combined search.
pub const COMBINED_SEARCH_LIMIT: u32 = 10;

/// Typed calls against the catalog search endpoint.
///
/// Every call takes the bearer token explicitly, implementations keep no
/// credential state of their own. A 401 surfaces as
/// [`CatalogError::AuthExpired`] and is never retried here.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// First artist matching `name`, if any.
    async fn search_artist(&self, token: &str, name: &str) -> Result<Option<Artist>, CatalogError>;

    /// Up to `limit` tracks matching `query`, in catalog order.
    async fn search_tracks(
        &self,
        token: &str,
        query: &str,
        limit: u32,
    ) -> Result<Vec<Track>, CatalogError>;

    /// Artists and tracks matching a non-empty free-text `query`.
    async fn combined_search(&self, token: &str, query: &str)
    -> Result<SearchResult, CatalogError>;
}

pub struct SpotifyCatalog {
    client: Client,
    api_url: String,
}

impl SpotifyCatalog {
    pub fn new(client: Client, api_url: String) -> Self {
        Self { client, api_url }
    }

    async fn search<T: DeserializeOwned>(
        &self,
        token: &str,
        query: &str,
        kind: SearchKind,
        limit: u32,
    ) -> Result<T, CatalogError> {
        let api_url = utils::search_url(&self.api_url, query, kind, limit);
        let response = self.client.get(&api_url).bearer_auth(token).send().await?;

        match response.status() {
            StatusCode::UNAUTHORIZED => Err(CatalogError::AuthExpired),
            status if !status.is_success() => Err(CatalogError::Status(status.as_u16())),
            _ => {
                let body = response.bytes().await?;
                Ok(serde_json::from_slice::<T>(&body)?)
            }
        }
    }
}

#[async_trait]
impl CatalogApi for SpotifyCatalog {
    async fn search_artist(&self, token: &str, name: &str) -> Result<Option<Artist>, CatalogError> {
        let res: ArtistSearchResponse = self.search(token, name, SearchKind::Artist, 1).await?;
        Ok(res.artists.items.into_iter().next().map(Artist::from))
    }

    async fn search_tracks(
        &self,
        token: &str,
        query: &str,
        limit: u32,
    ) -> Result<Vec<Track>, CatalogError> {
        let res: TrackSearchResponse = self.search(token, query, SearchKind::Track, limit).await?;
        Ok(res
            .tracks
            .items
            .into_iter()
            .take(limit as usize)
            .map(Track::from)
            .collect())
    }

    async fn combined_search(
        &self,
        token: &str,
        query: &str,
    ) -> Result<SearchResult, CatalogError> {
        let res: CombinedSearchResponse = self
            .search(
                token,
                query,
                SearchKind::ArtistAndTrack,
                COMBINED_SEARCH_LIMIT,
            )
            .await?;

        let mut result = SearchResult::from(res);
        utils::remove_duplicate_tracks(&mut result.tracks);
        Ok(result)
    }
}
