//! Decoded replay records: typed model, name lookup and disk loading.

pub mod loader;
pub mod names;
pub mod types;

pub use loader::{load_record, load_records};
pub use types::*;
