mod artist;
mod auth;
mod debounce;
mod manager;
mod scheduler;
mod search;
mod state;
mod trending;

pub use artist::language_driven_artists;
pub use artist::resolve_artist_images;
pub use artist::resolve_artists;
pub use auth::CredentialBroker;
pub use debounce::Debouncer;
pub use manager::SearchOutcome;
pub use manager::TrendManager;
pub use manager::WeakTrendManager;
pub use scheduler::LANGUAGE_DEBOUNCE;
pub use scheduler::RefreshScheduler;
pub use search::SEARCH_DEBOUNCE;
pub use search::SearchSession;
pub use state::RefreshGate;
pub use state::RefreshPhase;
pub use state::TrendState;
pub use trending::FanOut;
pub use trending::QUERY_LIMIT;
pub use trending::TRACKS_PER_QUERY;
pub use trending::TRENDING_CAPACITY;
pub use trending::TrendingAggregator;
pub use trending::TrendingSet;
