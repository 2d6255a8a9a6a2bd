use std::time::Duration;

use crate::management::{debounce::Debouncer, manager::TrendManager};

/// Quiet period before typed text is sent to the catalog.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(400);

/// Debounced free-text search on top of a [`TrendManager`].
///
/// Settled text is submitted to the manager, which takes care of clearing on
/// empty input and of ignoring results that a newer query has superseded.
pub struct SearchSession {
    input: Debouncer<String>,
}

impl SearchSession {
    pub fn new(manager: &TrendManager) -> Self {
        Self::with_debounce(manager, SEARCH_DEBOUNCE)
    }

    pub fn with_debounce(manager: &TrendManager, quiet: Duration) -> Self {
        let target = manager.downgrade();
        let input = Debouncer::spawn(quiet, move |query: String| {
            if let Some(manager) = target.upgrade() {
                manager.submit_search(query);
            }
        });
        Self { input }
    }

    /// Feeds the latest contents of the search box.
    pub fn input(&self, text: impl Into<String>) {
        self.input.push(text.into());
    }
}
