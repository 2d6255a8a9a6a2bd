use tabled::Table;

use crate::{error, management::SearchOutcome, success, utils, warning};

pub async fn search(query: String) {
    let settings = super::load_settings();
    let manager = super::build_manager(&settings, settings.language);

    let pb = super::spinner(format!("Searching for '{}'...", query.trim()));
    let outcome = manager.search(&query).await;
    pb.finish_and_clear();

    let state = manager.snapshot();
    match outcome {
        SearchOutcome::Applied => {}
        SearchOutcome::Cleared | SearchOutcome::Discarded => {
            warning!("Nothing to search for.");
            return;
        }
        SearchOutcome::Failed => {
            error!(
                "{}",
                state.error_message.as_deref().unwrap_or("Search failed")
            );
        }
    }

    let Some(result) = state.search.as_ref() else {
        return;
    };
    if result.is_empty() {
        warning!("No results for '{}'", state.search_query);
        return;
    }

    if !result.artists.is_empty() {
        println!(
            "{}",
            Table::new(utils::artist_rows(&result.artists, &state.artist_images))
        );
    }
    if !result.tracks.is_empty() {
        println!("{}", Table::new(utils::track_rows(&result.tracks)));
    }
    success!(
        "{} artists and {} tracks for '{}'",
        result.artists.len(),
        result.tracks.len(),
        state.search_query
    );
}
