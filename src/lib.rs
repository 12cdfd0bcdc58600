//! Curator: curated listings of agents published across repositories
//!
//! Fetches repository lists from configured sources, downloads each
//! repository's agent markdown files, and aggregates them into an ordered
//! catalog ready for rendering.

pub mod aggregator;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod fetch;
pub mod logging;
pub mod markdown;
pub mod render;
pub mod tooling;
pub mod types;
