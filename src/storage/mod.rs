//! Storage layer for Budget Buddy
//!
//! One flat JSON file per budget, written atomically with automatic
//! directory creation.

pub mod file_io;

pub use file_io::{read_json_required, write_json_atomic};
