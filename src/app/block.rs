//! Workflow block implementations.

pub mod drive_images;
