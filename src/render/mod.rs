//! Listing document rendering.

pub mod readme;

pub use readme::{category_anchor, truncate_description, write_readme, ReadmeRenderer};
