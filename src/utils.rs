use std::collections::HashSet;

use base64::{Engine, engine::general_purpose::STANDARD};

use crate::{
    language::Language,
    types::{Artist, ArtistImages, ArtistTableRow, LanguageTableRow, Track, TrackTableRow},
};

/// Value for the `type` parameter of the catalog search endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    Artist,
    Track,
    ArtistAndTrack,
}

impl SearchKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SearchKind::Artist => "artist",
            SearchKind::Track => "track",
            SearchKind::ArtistAndTrack => "artist,track",
        }
    }
}

pub fn search_url(base: &str, query: &str, kind: SearchKind, limit: u32) -> String {
    format!(
        "{base}/search?q={q}&type={kind}&limit={limit}",
        base = base.trim_end_matches('/'),
        q = urlencoding::encode(query),
        kind = urlencoding::encode(kind.as_str()),
        limit = limit
    )
}

/// `Authorization` header value for the client-credentials grant.
pub fn basic_auth(client_id: &str, client_secret: &str) -> String {
    format!(
        "Basic {}",
        STANDARD.encode(format!("{client_id}:{client_secret}"))
    )
}

/// Keeps the first occurrence of every track id, preserving order.
pub fn remove_duplicate_tracks(tracks: &mut Vec<Track>) {
    let mut seen_ids = HashSet::new();
    tracks.retain(|track| seen_ids.insert(track.id.clone()));
}

pub fn format_popularity(popularity: Option<u8>) -> String {
    popularity.map_or_else(|| "-".to_string(), |p| p.to_string())
}

pub fn format_followers(count: Option<u64>) -> String {
    match count {
        None => "-".to_string(),
        Some(n) if n >= 1_000_000 => format!("{:.1}M", n as f64 / 1_000_000.0),
        Some(n) if n >= 1_000 => format!("{:.1}K", n as f64 / 1_000.0),
        Some(n) => n.to_string(),
    }
}

pub fn track_rows(tracks: &[Track]) -> Vec<TrackTableRow> {
    tracks
        .iter()
        .enumerate()
        .map(|(i, track)| TrackTableRow {
            rank: i + 1,
            name: track.name.clone(),
            artists: track.artist_names(),
            popularity: format_popularity(track.popularity),
        })
        .collect()
}

pub fn artist_rows(artists: &[Artist], images: &ArtistImages) -> Vec<ArtistTableRow> {
    artists
        .iter()
        .map(|artist| ArtistTableRow {
            name: artist.name.clone(),
            popularity: format_popularity(artist.popularity),
            followers: format_followers(artist.follower_count),
            image: artist
                .image_url
                .clone()
                .or_else(|| images.get(&artist.id).cloned())
                .unwrap_or_else(|| "-".to_string()),
        })
        .collect()
}

pub fn language_rows() -> Vec<LanguageTableRow> {
    Language::ALL
        .into_iter()
        .map(|language| LanguageTableRow {
            code: language.code().to_string(),
            label: language.label().to_string(),
            queries: language.trending_queries().join(", "),
        })
        .collect()
}
