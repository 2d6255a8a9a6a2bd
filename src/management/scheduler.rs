use std::time::Duration;

use tokio::{
    task::JoinHandle,
    time::{self, Instant, MissedTickBehavior},
};

use crate::{
    language::Language,
    management::{
        debounce::Debouncer,
        manager::{TrendManager, WeakTrendManager},
        state::RefreshPhase,
    },
};

/// Quiet period applied to language selections before they trigger a refresh.
pub const LANGUAGE_DEBOUNCE: Duration = Duration::from_millis(300);

/// Drives refreshes from a recurring timer, manual requests and language changes.
///
/// All three funnel into the manager's refresh entry points, which drop a
/// trigger that arrives while a refresh of the same kind is in flight. The
/// scheduler holds the manager weakly; once the manager is gone the timer
/// stops on its next tick.
pub struct RefreshScheduler {
    manager: WeakTrendManager,
    period: Duration,
    timer: Option<JoinHandle<()>>,
    languages: Debouncer<Language>,
}

impl RefreshScheduler {
    pub fn start(manager: &TrendManager, period: Duration) -> Self {
        Self::with_debounce(manager, period, LANGUAGE_DEBOUNCE)
    }

    pub fn with_debounce(manager: &TrendManager, period: Duration, debounce: Duration) -> Self {
        let weak = manager.downgrade();
        let language_target = weak.clone();
        let languages = Debouncer::spawn(debounce, move |language: Language| {
            if let Some(manager) = language_target.upgrade() {
                tracing::debug!(%language, "language selection settled");
                tokio::spawn(async move {
                    manager.change_language(language).await;
                });
            }
        });

        Self {
            timer: Some(spawn_timer(weak.clone(), period)),
            manager: weak,
            period,
            languages,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn phase(&self) -> RefreshPhase {
        self.manager
            .upgrade()
            .map_or(RefreshPhase::Idle, |manager| manager.phase())
    }

    /// Manual refresh. Resolves to `false` when the trigger was dropped
    /// because a refresh was already running.
    pub fn refresh_now(&self) -> Option<JoinHandle<bool>> {
        let manager = self.manager.upgrade()?;
        Some(tokio::spawn(async move { manager.refresh().await }))
    }

    pub fn select_language(&self, language: Language) {
        self.languages.push(language);
    }

    /// Reschedules the timer. A refresh already in flight is not affected.
    pub fn set_interval(&mut self, period: Duration) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
        self.period = period;
        self.timer = Some(spawn_timer(self.manager.clone(), period));
        tracing::info!(secs = period.as_secs(), "refresh interval changed");
    }

    /// Stops the timer and detaches the manager so that results of requests
    /// still in flight are never published.
    pub fn shutdown(mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
        if let Some(manager) = self.manager.upgrade() {
            manager.detach();
        }
    }
}

impl Drop for RefreshScheduler {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

fn spawn_timer(manager: WeakTrendManager, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            let Some(manager) = manager.upgrade() else {
                break;
            };
            // spawned so that aborting the timer never cancels a refresh
            tokio::spawn(async move {
                manager.refresh().await;
            });
        }
    })
}
