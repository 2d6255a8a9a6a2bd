//! Derives the language-driven artist list from trending tracks.
//!
//! Pure functions of `(tracks, roster)`; no network, no clock.

use std::collections::{HashMap, HashSet};

use crate::types::{Artist, ArtistImages, Track};

/// Deduplicated artists credited on `tracks`, in first-seen order.
///
/// Artists are visited track by track, primary artist first. When the roster
/// knows an artist id its record is used, otherwise the one embedded in the
/// track. With no tracks at all the roster is returned as is.
pub fn resolve_artists(tracks: &[Track], roster: &[Artist]) -> Vec<Artist> {
    let by_id: HashMap<&str, &Artist> = roster.iter().map(|a| (a.id.as_str(), a)).collect();
    let mut seen = HashSet::new();
    let mut artists = Vec::new();

    for artist in tracks.iter().flat_map(|track| track.artists.iter()) {
        if !seen.insert(artist.id.as_str()) {
            continue;
        }
        let record = by_id.get(artist.id.as_str()).copied().unwrap_or(artist);
        artists.push(record.clone());
    }

    if artists.is_empty() {
        return roster.to_vec();
    }
    artists
}

/// Picks an image for every artist id reachable from `tracks` or `roster`.
///
/// First match wins, in this order:
/// 1. the roster artist's own image
/// 2. album art of a track where the artist is the only credit
/// 3. album art of a track where the artist is the primary credit
/// 4. album art of any track crediting the artist
///
/// Within a tier the earliest track wins.
pub fn resolve_artist_images(tracks: &[Track], roster: &[Artist]) -> ArtistImages {
    let mut sole: Vec<(&str, &str)> = Vec::new();
    let mut primary: Vec<(&str, &str)> = Vec::new();
    let mut any: Vec<(&str, &str)> = Vec::new();

    for track in tracks {
        let Some(cover) = track.cover_url() else {
            continue;
        };
        if let [only] = track.artists.as_slice() {
            sole.push((only.id.as_str(), cover));
        }
        if let Some(first) = track.primary_artist() {
            primary.push((first.id.as_str(), cover));
        }
        for artist in &track.artists {
            any.push((artist.id.as_str(), cover));
        }
    }

    let mut images: ArtistImages = roster
        .iter()
        .filter_map(|a| a.image_url.clone().map(|url| (a.id.clone(), url)))
        .collect();

    for (id, url) in sole.into_iter().chain(primary).chain(any) {
        images
            .entry(id.to_string())
            .or_insert_with(|| url.to_string());
    }
    images
}

/// [`resolve_artists`] with missing images filled from [`resolve_artist_images`].
pub fn language_driven_artists(tracks: &[Track], roster: &[Artist]) -> (Vec<Artist>, ArtistImages) {
    let images = resolve_artist_images(tracks, roster);
    let mut artists = resolve_artists(tracks, roster);
    for artist in artists.iter_mut().filter(|a| a.image_url.is_none()) {
        artist.image_url = images.get(&artist.id).cloned();
    }
    (artists, images)
}
