//! Session identity domain model.
//!
//! `SessionUser` is the identity record for the currently signed-in user.
//! It is bootstrapped from cookies and completed by a remote profile fetch.

use serde::{Deserialize, Serialize};

use super::cookies::CookieStore;

/// The email the server assigns to anonymous visitors.
pub const GUEST_EMAIL: &str = "Guest";

/// Identity record for the current user.
///
/// Initialized once per process from cookie-derived defaults, refreshed by a
/// remote fetch when a logged-in identity is detected, and reset to
/// [`SessionUser::empty`] on logout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    /// Primary identity key (the `user_id` cookie, renamed)
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub full_name: String,
    /// Avatar reference (URL or file path)
    #[serde(default)]
    pub user_image: String,
    #[serde(default)]
    pub is_admin: bool,
    /// True for users without system-manager privileges
    #[serde(default)]
    pub is_basic_user: bool,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub locale: String,
    /// Whether the user has opted into the v2 interface
    #[serde(default)]
    pub is_v2: bool,
    /// Default interface version ("v2" or "v3")
    #[serde(default)]
    pub default_version: String,
}

impl SessionUser {
    /// The logged-out sentinel: every field empty or false.
    pub fn empty() -> Self {
        Self {
            email: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            full_name: String::new(),
            user_image: String::new(),
            is_admin: false,
            is_basic_user: false,
            country: String::new(),
            locale: String::new(),
            is_v2: false,
            default_version: String::new(),
        }
    }

    /// Bootstraps an identity from the cookie store.
    ///
    /// The `user_id` cookie is renamed to `email`; `full_name` and
    /// `user_image` are read directly. A `system_user=yes` cookie clears the
    /// basic-user flag.
    pub fn from_cookies(cookies: &dyn CookieStore) -> Self {
        let mut user = Self::empty();
        if let Some(user_id) = cookies.get("user_id") {
            user.email = user_id;
        }
        if let Some(full_name) = cookies.get("full_name") {
            user.full_name = full_name;
        }
        if let Some(user_image) = cookies.get("user_image") {
            user.user_image = user_image;
        }
        user.is_basic_user = cookies.get("system_user").as_deref() != Some("yes");
        user
    }

    /// True iff the identity is a real signed-in user (non-empty, non-guest).
    pub fn is_logged_in(&self) -> bool {
        !self.email.is_empty() && self.email != GUEST_EMAIL
    }
}

impl Default for SessionUser {
    fn default() -> Self {
        Self::empty()
    }
}
