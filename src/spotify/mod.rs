//! # Spotify Integration Module
//!
//! HTTP layer between sportrend and the Spotify Web API. It knows how to talk
//! to two endpoints and nothing else:
//!
//! - [`auth`] - the accounts service token endpoint, using the
//!   client-credentials grant (no user login, no refresh tokens).
//! - [`search`] - the catalog search endpoint, for artist, track and combined
//!   artist+track lookups.
//!
//! Both sides sit behind traits ([`auth::TokenProvider`],
//! [`search::CatalogApi`]) so the stateful core in [`crate::management`] can
//! be driven by in-memory fakes.
//!
//! ## Error Handling
//!
//! Nothing in this module retries. A 401 from the catalog is reported as
//! [`crate::errors::CatalogError::AuthExpired`]; deciding whether to fetch a
//! new token and whether to re-issue the request belongs to the caller.
//! Transport timeouts are reqwest's defaults.

pub mod auth;
pub mod search;

pub use auth::{ClientCredentials, TokenProvider};
pub use search::{CatalogApi, SpotifyCatalog};
