//! In-memory runtime configuration loaded from a JSON document.
//! - `ConfigurationStore` fetches a document through an injected `Fetch`
//!   collaborator and publishes it atomically as the current `Snapshot`.
//! - Lookups never fail; missing data is reported as `None`.
//! - `HttpFetcher` is the reqwest-backed collaborator, `fetch::mock` the
//!   in-memory one for tests.

pub mod errors;
pub mod fetch;
pub mod http;
pub mod observability;
pub mod snapshot;
pub mod store;

pub use errors::LoadError;
pub use fetch::{Fetch, FetchError, FetchResponse};
pub use http::HttpFetcher;
pub use snapshot::Snapshot;
pub use store::ConfigurationStore;
