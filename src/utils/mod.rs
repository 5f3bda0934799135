//! Utility modules shared across the generator and the checker.

pub mod date;
pub mod json;
pub mod plural;
pub mod url;

pub use plural::{plural_count, plural_s};
