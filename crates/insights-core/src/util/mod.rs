//! Utility layer: pure helpers with no state and no collaborators.

pub mod compare;
pub mod debounce;
pub mod format;
pub mod json;
pub mod search;
pub mod table;

pub use compare::{deep_equal, values_equal};
pub use debounce::Debouncer;
pub use format::{format_compact, format_number, ordinal};
pub use json::parse_json_or;
pub use search::{fuzzy_search, match_score};
pub use table::{HeaderNode, group_table_headers};
