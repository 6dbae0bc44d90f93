//! Concrete collaborators for the Insights client state layer.
//!
//! Implements the contracts defined in `insights-core`: the HTTP session
//! API client, a static cookie store, a tracing-backed notifier, and an
//! observable page reloader.

mod cookie_store;
mod http_session_api;
mod notifier;
mod reloader;

pub use cookie_store::StaticCookieStore;
pub use http_session_api::HttpSessionApi;
pub use notifier::TracingNotifier;
pub use reloader::NoopReloader;
