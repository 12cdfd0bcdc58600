//! Config sources, one module per layer.

pub mod environment;
pub mod global_file;
pub mod local_file;
