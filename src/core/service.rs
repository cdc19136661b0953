//! Business logic.

pub mod import;
