use tabled::Table;

use crate::{error, info, language::Language, success, utils, warning};

pub async fn artists(language: Option<Language>) {
    let settings = super::load_settings();
    let language = language.unwrap_or(settings.language);
    let manager = super::build_manager(&settings, language);

    let pb = super::spinner(format!("Resolving artists for {}...", language.label()));
    manager.refresh().await;
    pb.finish_and_clear();

    let state = manager.snapshot();
    if let Some(message) = &state.error_message {
        error!("{}", message);
    }

    if state.language_artists.is_empty() {
        warning!("No artists found for {}", language.label());
        return;
    }

    let missing = settings.roster.len().saturating_sub(state.popular_artists.len());
    if missing > 0 {
        info!("{} roster artists could not be looked up", missing);
    }

    println!(
        "{}",
        Table::new(utils::artist_rows(
            &state.language_artists,
            &state.artist_images
        ))
    );
    success!(
        "{} artists from {} trending tracks",
        state.language_artists.len(),
        state.trending_tracks.len()
    );
}
