use tabled::Table;

use crate::{error, language::Language, success, utils, warning};

/// Fetches and prints the trending set for `language`.
///
/// Falls back to the configured language when none is given. Keywords that
/// fail only shrink the table; an unavailable token ends the command.
pub async fn trending(language: Option<Language>) {
    let settings = super::load_settings();
    let language = language.unwrap_or(settings.language);
    let manager = super::build_manager(&settings, language);

    let pb = super::spinner(format!("Fetching trending tracks for {}...", language.label()));
    manager.refresh_trending().await;
    pb.finish_and_clear();

    let state = manager.snapshot();
    if let Some(message) = &state.error_message {
        error!("{}", message);
    }

    if state.trending_tracks.is_empty() {
        warning!("No trending tracks found for {}", language.label());
        return;
    }

    println!("{}", Table::new(utils::track_rows(&state.trending_tracks)));
    success!(
        "{} trending tracks for {}",
        state.trending_tracks.len(),
        language.label()
    );
}
