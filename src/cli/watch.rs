use std::time::Duration;

use chrono::{DateTime, Local, Utc};
use tabled::Table;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::{
    config, info,
    language::Language,
    management::{RefreshScheduler, SearchSession, TrendState},
    success, utils, warning,
};

/// One line of input while watching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchCommand {
    Language(Language),
    Refresh,
    Interval(Duration),
    Quit,
    /// Anything else is search box input; empty text clears the search.
    Search(String),
    Invalid(String),
}

pub fn parse_command(line: &str) -> WatchCommand {
    let line = line.trim();
    let Some(command) = line.strip_prefix(':') else {
        return WatchCommand::Search(line.to_string());
    };

    let mut parts = command.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some("lang"), Some(code)) => match code.parse() {
            Ok(language) => WatchCommand::Language(language),
            Err(e) => WatchCommand::Invalid(e),
        },
        (Some("refresh"), None) => WatchCommand::Refresh,
        (Some("interval"), Some(secs)) => match config::parse_interval(secs) {
            Some(period) => WatchCommand::Interval(period),
            None => WatchCommand::Invalid(format!("invalid interval '{}'", secs)),
        },
        (Some("quit"), None) | (Some("q"), None) => WatchCommand::Quit,
        _ => WatchCommand::Invalid(format!("unknown command '{}'", line)),
    }
}

/// Parts of the state whose change is worth printing.
#[derive(Debug, Default, PartialEq)]
struct Digest {
    language: Option<Language>,
    last_updated: Option<DateTime<Utc>>,
    search_query: Option<String>,
    search_len: Option<usize>,
    error_message: Option<String>,
}

impl Digest {
    fn of(state: &TrendState) -> Self {
        Self {
            language: Some(state.language),
            last_updated: state.last_updated,
            search_query: state.search.as_ref().map(|_| state.search_query.clone()),
            search_len: state.search.as_ref().map(|s| s.artists.len() + s.tracks.len()),
            error_message: state.error_message.clone(),
        }
    }
}

/// Keeps the trending view alive until `:quit`, end of input or Ctrl-C.
pub async fn watch(language: Option<Language>, interval: Option<Duration>) {
    let settings = super::load_settings();
    let language = language.unwrap_or(settings.language);
    let period = interval.unwrap_or(settings.refresh_interval);
    let manager = super::build_manager(&settings, language);

    let mut scheduler = RefreshScheduler::start(&manager, period);
    let session = SearchSession::new(&manager);
    let mut updates = manager.subscribe();

    info!(
        "Watching {} (refresh every {}s). Commands: :lang <code>, :refresh, :interval <secs>, :quit",
        language.label(),
        period.as_secs()
    );

    let initial = manager.clone();
    tokio::spawn(async move {
        initial.refresh().await;
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    let mut shown = Digest::default();

    loop {
        tokio::select! {
            _ = &mut ctrl_c => break,
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = updates.borrow_and_update().clone();
                let digest = Digest::of(&state);
                if digest != shown {
                    render(&state, &shown, &digest);
                    shown = digest;
                }
            }
            line = lines.next_line() => match line {
                Ok(Some(line)) => match parse_command(&line) {
                    WatchCommand::Language(language) => {
                        info!("Switching to {}...", language.label());
                        scheduler.select_language(language);
                    }
                    WatchCommand::Refresh => {
                        scheduler.refresh_now();
                    }
                    WatchCommand::Interval(period) => {
                        scheduler.set_interval(period);
                        info!("Refreshing every {}s", period.as_secs());
                    }
                    WatchCommand::Quit => break,
                    WatchCommand::Search(text) => session.input(text),
                    WatchCommand::Invalid(message) => warning!("{}", message),
                },
                Ok(None) => break,
                Err(e) => {
                    warning!("Cannot read input: {}", e);
                    break;
                }
            },
        }
    }

    scheduler.shutdown();
}

fn render(state: &TrendState, before: &Digest, now: &Digest) {
    if now.error_message != before.error_message {
        if let Some(message) = &state.error_message {
            warning!("{}", message);
        }
    }

    if let Some(result) = &state.search {
        if now.search_query != before.search_query || now.search_len != before.search_len {
            if !result.artists.is_empty() {
                println!(
                    "{}",
                    Table::new(utils::artist_rows(&result.artists, &state.artist_images))
                );
            }
            println!("{}", Table::new(utils::track_rows(&result.tracks)));
            success!("Results for '{}'", state.search_query);
        }
        return;
    }

    if now.last_updated != before.last_updated || now.search_query != before.search_query {
        println!("{}", Table::new(utils::track_rows(state.visible_tracks())));
        let updated = state
            .last_updated
            .map(|at| at.with_timezone(&Local).format("%H:%M:%S").to_string())
            .unwrap_or_else(|| "-".to_string());
        success!(
            "{} trending tracks, {} artists for {} (updated {})",
            state.trending_tracks.len(),
            state.language_artists.len(),
            state.language.label(),
            updated
        );
    }
}
