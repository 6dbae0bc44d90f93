//! Remote session API contract.
//!
//! Defines the asynchronous surface the session manager calls on the server:
//! profile fetch, login/logout, usage pings, and preference updates. The
//! concrete HTTP client lives in the infrastructure crate.

use async_trait::async_trait;

use super::model::SessionUser;
use crate::error::Result;

/// Remote collaborator for session operations.
///
/// All calls are asynchronous and return plain data or an error. Apart from
/// [`SessionApi::login`], the session manager treats them as
/// fire-and-forget for identity purposes.
#[async_trait]
pub trait SessionApi: Send + Sync {
    /// Fetches the full profile of the currently authenticated user.
    async fn fetch_user_info(&self) -> Result<SessionUser>;

    /// Attempts to authenticate.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(user))`: credentials accepted, full identity returned
    /// - `Ok(None)`: credentials rejected
    /// - `Err(_)`: transport or server failure
    async fn login(&self, email: &str, password: &str) -> Result<Option<SessionUser>>;

    /// Ends the server-side session.
    async fn logout(&self) -> Result<()>;

    /// Records a visit to the active site (usage telemetry).
    async fn track_active_site(&self) -> Result<()>;

    /// Records that the user viewed a document (e.g. a chart or dashboard).
    async fn create_last_viewed_log(&self, record_type: &str, name: &str) -> Result<()>;

    /// Persists the user's preferred default interface version.
    async fn update_default_version(&self, version: &str) -> Result<()>;
}
