//! Process-wide session state.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::RwLock;

use insights_core::error::Result;
use insights_core::reload::PageReloader;
use insights_core::session::{CookieStore, SessionApi, SessionUser};

/// Holds the current user's identity and the operations that change it.
///
/// `SessionManager` is responsible for:
/// - Bootstrapping identity from cookies on startup
/// - Refreshing the profile from the remote API for logged-in users
/// - Login and logout, each ending in a full page reload
/// - Persisting the preferred default version
///
/// Concurrent calls are not serialized; apart from `login`, remote calls are
/// fire-and-forget as far as identity is concerned.
pub struct SessionManager {
    user: RwLock<SessionUser>,
    initialized: AtomicBool,
    api: Arc<dyn SessionApi>,
    cookies: Arc<dyn CookieStore>,
    reloader: Arc<dyn PageReloader>,
}

impl SessionManager {
    /// Creates a manager with injected collaborators. Identity starts as the
    /// logged-out sentinel until [`SessionManager::initialize`] runs.
    pub fn new(
        api: Arc<dyn SessionApi>,
        cookies: Arc<dyn CookieStore>,
        reloader: Arc<dyn PageReloader>,
    ) -> Self {
        Self {
            user: RwLock::new(SessionUser::empty()),
            initialized: AtomicBool::new(false),
            api,
            cookies,
            reloader,
        }
    }

    /// Populates identity from cookies and, for logged-in users, from the
    /// remote profile.
    ///
    /// Idempotent unless `force` is set: the session mutates exactly once
    /// per process lifetime. A logged-in bootstrap also fires the
    /// active-site ping. Remote failures are logged, never propagated:
    /// the cookie-derived identity stands.
    pub async fn initialize(&self, force: bool) {
        if self.initialized.swap(true, Ordering::SeqCst) && !force {
            return;
        }

        let bootstrap = SessionUser::from_cookies(self.cookies.as_ref());
        let logged_in = bootstrap.is_logged_in();
        *self.user.write().await = bootstrap;

        if !logged_in {
            return;
        }

        match self.api.fetch_user_info().await {
            Ok(profile) => *self.user.write().await = profile,
            Err(err) => tracing::warn!("failed to fetch user info: {err}"),
        }
        if let Err(err) = self.api.track_active_site().await {
            tracing::debug!("failed to track active site: {err}");
        }
    }

    /// Attempts to sign in.
    ///
    /// The current session is cleared first. On success the new identity
    /// replaces it and a full page reload is triggered (a full state reset,
    /// not a partial update). On rejection the session stays cleared and
    /// `false` is returned.
    pub async fn login(&self, email: &str, password: &str) -> Result<bool> {
        *self.user.write().await = SessionUser::empty();

        let Some(user) = self.api.login(email, password).await? else {
            return Ok(false);
        };

        *self.user.write().await = user;
        self.reloader.reload();
        Ok(true)
    }

    /// Signs out: clears the session, notifies the server, reloads.
    ///
    /// The remote call is fire-and-forget; a failure is logged and the
    /// reload still happens.
    pub async fn logout(&self) {
        *self.user.write().await = SessionUser::empty();
        if let Err(err) = self.api.logout().await {
            tracing::warn!("logout call failed: {err}");
        }
        self.reloader.reload();
    }

    /// Updates the preferred default version, optimistically.
    ///
    /// Local state changes first; the remote persist follows. A remote
    /// failure propagates to the caller with no local rollback.
    pub async fn update_default_version(&self, version: &str) -> Result<()> {
        {
            let mut user = self.user.write().await;
            user.default_version = version.to_string();
            user.is_v2 = version == "v2";
        }
        self.api.update_default_version(version).await
    }

    /// Records that the user viewed a document. Fire-and-forget.
    pub async fn log_last_viewed(&self, record_type: &str, name: &str) {
        if let Err(err) = self.api.create_last_viewed_log(record_type, name).await {
            tracing::debug!("failed to create last viewed log: {err}");
        }
    }

    /// Snapshot of the current identity.
    pub async fn user(&self) -> SessionUser {
        self.user.read().await.clone()
    }

    /// Whether `initialize` has run.
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
#[path = "manager_test.rs"]
mod tests;
