//! Session domain module.
//!
//! # Module Structure
//!
//! - `model`: identity record (`SessionUser`)
//! - `cookies`: read-only cookie source contract (`CookieStore`)
//! - `remote`: remote session API contract (`SessionApi`)

mod cookies;
mod model;
mod remote;

pub use cookies::CookieStore;
pub use model::{GUEST_EMAIL, SessionUser};
pub use remote::SessionApi;
