//! Core domain layer for the Insights client state.
//!
//! This crate holds the domain models (session identity, chart documents,
//! query operations), the collaborator contracts (remote API, query engine,
//! cookies, notifications, page reload), the undo/redo history buffer, and
//! the pure utility layer. Orchestration lives in `insights-application`;
//! concrete collaborators live in `insights-infrastructure`.

pub mod chart;
pub mod error;
pub mod history;
pub mod notify;
pub mod query;
pub mod reload;
pub mod session;
pub mod util;

// Re-export common error type
pub use error::{InsightsError, Result};
