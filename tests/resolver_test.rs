mod common;

use std::collections::HashSet;

use common::{artist, artist_with_image, track};
use sportrend::management::{language_driven_artists, resolve_artist_images, resolve_artists};

#[test]
fn test_resolve_artists_dedups_in_track_order() {
    let tracks = vec![
        track("t1", &["a", "b"], None),
        track("t2", &["c", "a"], None),
        track("t3", &["b", "d"], None),
    ];

    let artists = resolve_artists(&tracks, &[]);
    let ids: Vec<&str> = artists.iter().map(|a| a.id.as_str()).collect();

    // primary first, then features, first sighting wins
    assert_eq!(ids, vec!["a", "b", "c", "d"]);

    let unique: HashSet<&str> = ids.iter().copied().collect();
    assert_eq!(unique.len(), ids.len());
}

#[test]
fn test_resolve_artists_prefers_roster_record() {
    let roster = vec![artist_with_image("b", "Roster B", "https://img/roster-b")];
    let tracks = vec![track("t1", &["a", "b"], None)];

    let artists = resolve_artists(&tracks, &roster);

    assert_eq!(artists.len(), 2);
    assert_eq!(artists[0].name, "Artist a");
    assert_eq!(artists[1].name, "Roster B");
    assert_eq!(artists[1].follower_count, Some(1_000_000));
}

#[test]
fn test_resolve_artists_falls_back_to_roster_without_tracks() {
    let roster = vec![artist("x", "X"), artist("y", "Y")];

    let artists = resolve_artists(&[], &roster);

    assert_eq!(artists, roster);
}

#[test]
fn test_roster_artists_not_on_tracks_are_left_out() {
    let roster = vec![artist("x", "X")];
    let tracks = vec![track("t1", &["a"], None)];

    let artists = resolve_artists(&tracks, &roster);

    assert_eq!(artists.len(), 1);
    assert_eq!(artists[0].id, "a");
}

#[test]
fn test_roster_image_wins_over_sole_artist_cover() {
    let roster = vec![artist_with_image("a", "A", "https://img/roster-a")];
    let tracks = vec![track("t1", &["a"], Some("https://img/cover-t1"))];

    let images = resolve_artist_images(&tracks, &roster);

    assert_eq!(images.get("a").map(String::as_str), Some("https://img/roster-a"));
}

#[test]
fn test_sole_artist_cover_beats_primary_and_featured() {
    let tracks = vec![
        track("t1", &["b", "a"], Some("https://img/featured")),
        track("t2", &["a", "c"], Some("https://img/primary")),
        track("t3", &["a"], Some("https://img/sole")),
    ];

    let images = resolve_artist_images(&tracks, &[]);

    assert_eq!(images.get("a").map(String::as_str), Some("https://img/sole"));
}

#[test]
fn test_primary_cover_beats_featured_cover() {
    let tracks = vec![
        track("t1", &["b", "a"], Some("https://img/featured")),
        track("t2", &["a", "c"], Some("https://img/primary")),
    ];

    let images = resolve_artist_images(&tracks, &[]);

    assert_eq!(images.get("a").map(String::as_str), Some("https://img/primary"));
    // c is only ever featured
    assert_eq!(images.get("c").map(String::as_str), Some("https://img/primary"));
    assert_eq!(images.get("b").map(String::as_str), Some("https://img/featured"));
}

#[test]
fn test_ties_within_a_tier_go_to_the_earliest_track() {
    let tracks = vec![
        track("t1", &["a"], Some("https://img/first")),
        track("t2", &["a"], Some("https://img/second")),
    ];

    let images = resolve_artist_images(&tracks, &[]);

    assert_eq!(images.get("a").map(String::as_str), Some("https://img/first"));
}

#[test]
fn test_tracks_without_covers_are_skipped() {
    let tracks = vec![
        track("t1", &["a"], None),
        track("t2", &["b", "a"], Some("https://img/t2")),
    ];

    let images = resolve_artist_images(&tracks, &[]);

    assert_eq!(images.get("a").map(String::as_str), Some("https://img/t2"));
}

#[test]
fn test_language_driven_artists_fill_missing_images() {
    let roster = vec![artist_with_image("a", "A", "https://img/roster-a")];
    let tracks = vec![
        track("t1", &["a", "b"], Some("https://img/t1")),
        track("t2", &["c"], None),
    ];

    let (artists, images) = language_driven_artists(&tracks, &roster);

    assert_eq!(artists.len(), 3);
    assert_eq!(artists[0].image_url.as_deref(), Some("https://img/roster-a"));
    assert_eq!(artists[1].image_url.as_deref(), Some("https://img/t1"));
    assert_eq!(artists[2].image_url, None);
    assert!(!images.contains_key("c"));
}
