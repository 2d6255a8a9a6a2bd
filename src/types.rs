use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Bearer credential handed out by the client-credentials grant.
///
/// Never mutated, only replaced. There is no expiry bookkeeping, a 401 from
/// the catalog is the only signal that it went stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub token: String,
    pub obtained_at: DateTime<Utc>,
}

impl Credential {
    pub fn new(token: String) -> Self {
        Self {
            token,
            obtained_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    pub popularity: Option<u8>,
    pub image_url: Option<String>,
    pub follower_count: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    pub height: Option<u32>,
    pub width: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub popularity: Option<u8>,
    /// Credited artists, primary first.
    pub artists: Vec<Artist>,
    pub album_id: String,
    pub album_images: Vec<Image>,
    pub preview_url: Option<String>,
    pub external_url: Option<String>,
}

impl Track {
    pub fn primary_artist(&self) -> Option<&Artist> {
        self.artists.first()
    }

    /// Largest album image; the catalog lists them widest first.
    pub fn cover_url(&self) -> Option<&str> {
        self.album_images.first().map(|image| image.url.as_str())
    }

    pub fn artist_names(&self) -> String {
        self.artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Result of one interactive search. Replaced wholesale, never merged.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchResult {
    pub artists: Vec<Artist>,
    pub tracks: Vec<Track>,
}

impl SearchResult {
    pub fn is_empty(&self) -> bool {
        self.artists.is_empty() && self.tracks.is_empty()
    }
}

/// Maps artist id to the image chosen by the fallback tiers.
pub type ArtistImages = HashMap<String, String>;

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: Option<String>,
    pub token_type: Option<String>,
    pub expires_in: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Paging<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtistSearchResponse {
    pub artists: Paging<ApiArtist>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackSearchResponse {
    pub tracks: Paging<ApiTrack>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CombinedSearchResponse {
    pub artists: Option<Paging<ApiArtist>>,
    pub tracks: Option<Paging<ApiTrack>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiArtist {
    pub id: String,
    pub name: String,
    pub popularity: Option<u8>,
    #[serde(default)]
    pub images: Vec<Image>,
    pub followers: Option<Followers>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Followers {
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiTrack {
    pub id: String,
    pub name: String,
    pub popularity: Option<u8>,
    #[serde(default)]
    pub artists: Vec<ApiArtist>,
    pub album: ApiAlbum,
    pub preview_url: Option<String>,
    #[serde(default)]
    pub external_urls: HashMap<String, String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiAlbum {
    pub id: String,
    #[serde(default)]
    pub images: Vec<Image>,
}

impl From<ApiArtist> for Artist {
    fn from(artist: ApiArtist) -> Self {
        Artist {
            id: artist.id,
            name: artist.name,
            popularity: artist.popularity,
            image_url: artist.images.into_iter().next().map(|image| image.url),
            follower_count: artist.followers.and_then(|f| f.total),
        }
    }
}

impl From<ApiTrack> for Track {
    fn from(mut track: ApiTrack) -> Self {
        Track {
            id: track.id,
            name: track.name,
            popularity: track.popularity,
            artists: track.artists.into_iter().map(Artist::from).collect(),
            album_id: track.album.id,
            album_images: track.album.images,
            preview_url: track.preview_url,
            external_url: track.external_urls.remove("spotify"),
        }
    }
}

impl From<CombinedSearchResponse> for SearchResult {
    fn from(response: CombinedSearchResponse) -> Self {
        SearchResult {
            artists: response
                .artists
                .map(|page| page.items.into_iter().map(Artist::from).collect())
                .unwrap_or_default(),
            tracks: response
                .tracks
                .map(|page| page.items.into_iter().map(Track::from).collect())
                .unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
pub struct TrackTableRow {
    #[tabled(rename = "#")]
    pub rank: usize,
    pub name: String,
    pub artists: String,
    pub popularity: String,
}

#[derive(Tabled)]
pub struct ArtistTableRow {
    pub name: String,
    pub popularity: String,
    pub followers: String,
    pub image: String,
}

#[derive(Tabled)]
pub struct LanguageTableRow {
    pub code: String,
    pub label: String,
    pub queries: String,
}
