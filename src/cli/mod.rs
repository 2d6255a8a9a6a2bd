//! # CLI Module
//!
//! User-facing commands of sportrend. Each command builds a
//! [`TrendManager`] from the loaded [`Settings`], drives it through one of its
//! entry points and renders the published state as tables.
//!
//! ## Commands
//!
//! - [`trending`] - one refresh of the trending set for a language
//! - [`artists`] - language-driven artists with resolved images
//! - [`search`] - one combined artist and track search
//! - [`watch`] - long-running view: timer refreshes, language switching and
//!   debounced search read from stdin
//! - [`languages`] - supported languages and their trending keywords
//!
//! ```text
//! CLI Layer (User Interface)
//!     ↓
//! Management Layer (state, scheduling, aggregation)
//!     ↓
//! Spotify Layer (token endpoint, catalog search)
//! ```
//!
//! Fatal problems such as missing credentials end the process through
//! [`crate::error!`]; partial failures inside a refresh only show up as the
//! manager's error message.

mod artists;
mod languages;
mod search;
mod trending;
mod watch;

use std::{sync::Arc, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;

use crate::{
    config::Settings,
    error,
    language::Language,
    management::{CredentialBroker, TrendManager},
    spotify::{ClientCredentials, SpotifyCatalog},
};

pub use artists::artists;
pub use languages::languages;
pub use search::search;
pub use trending::trending;
pub use watch::{WatchCommand, parse_command, watch};

fn load_settings() -> Settings {
    match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => error!("Cannot load configuration. Err: {}", e),
    }
}

fn build_manager(settings: &Settings, language: Language) -> TrendManager {
    let client = Client::new();
    let provider = ClientCredentials::new(
        client.clone(),
        settings.token_url.clone(),
        settings.client_id.clone(),
        settings.client_secret.clone(),
    );
    let broker = Arc::new(CredentialBroker::new(Arc::new(provider)));
    let catalog = Arc::new(SpotifyCatalog::new(client, settings.api_url.clone()));

    TrendManager::new(catalog, broker, language, settings.roster.clone())
}

fn spinner(message: impl Into<String>) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.into());
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}
