//! Session orchestration.
//!
//! - `manager`: the current user's identity and its lifecycle operations

mod manager;

pub use manager::SessionManager;
