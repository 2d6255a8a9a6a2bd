use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};

use crate::{
    language::Language,
    types::{Artist, ArtistImages, SearchResult, Track},
};

/// Everything the presentation layer can observe.
///
/// Published through a `watch` channel by [`crate::management::TrendManager`];
/// receivers only ever see clones.
#[derive(Debug, Clone, Default)]
pub struct TrendState {
    pub language: Language,
    pub trending_tracks: Vec<Track>,
    pub popular_artists: Vec<Artist>,
    pub language_artists: Vec<Artist>,
    pub artist_images: ArtistImages,
    pub search: Option<SearchResult>,
    pub search_query: String,
    /// Compound refresh (tracks and roster together) in flight.
    pub is_refreshing: bool,
    pub is_refreshing_tracks: bool,
    pub is_refreshing_artists: bool,
    pub is_searching: bool,
    pub error_message: Option<String>,
    pub last_updated: Option<DateTime<Utc>>,
}

impl TrendState {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            ..Self::default()
        }
    }

    /// Search tracks when a search is active, the trending baseline otherwise.
    pub fn visible_tracks(&self) -> &[Track] {
        match &self.search {
            Some(result) => &result.tracks,
            None => &self.trending_tracks,
        }
    }

    /// Search artists when a search is active, the language-driven list otherwise.
    pub fn visible_artists(&self) -> &[Artist] {
        match &self.search {
            Some(result) => &result.artists,
            None => &self.language_artists,
        }
    }

    /// The artist's own image, else the one resolved from trending tracks.
    pub fn image_for<'a>(&'a self, artist: &'a Artist) -> Option<&'a str> {
        artist
            .image_url
            .as_deref()
            .or_else(|| self.artist_images.get(&artist.id).map(String::as_str))
    }
}

/// Whether a refresh of some kind is currently in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshPhase {
    Idle,
    Refreshing,
}

/// Admits at most one operation of a kind at a time.
///
/// Entering while busy fails instead of waiting, so triggers that arrive
/// during a refresh are dropped rather than queued.
#[derive(Debug, Default)]
pub struct RefreshGate {
    busy: AtomicBool,
}

impl RefreshGate {
    /// Marks the gate busy, or returns `None` when it already is.
    ///
    /// The gate stays busy until the returned guard is dropped.
    pub fn try_enter(&self) -> Option<GateGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| GateGuard { gate: self })
    }

    /// `Refreshing` while a guard is alive.
    pub fn phase(&self) -> RefreshPhase {
        if self.busy.load(Ordering::Acquire) {
            RefreshPhase::Refreshing
        } else {
            RefreshPhase::Idle
        }
    }
}

/// Returns the gate to `Idle` when dropped.
#[derive(Debug)]
pub struct GateGuard<'a> {
    gate: &'a RefreshGate,
}

impl Drop for GateGuard<'_> {
    fn drop(&mut self) {
        self.gate.busy.store(false, Ordering::Release);
    }
}
