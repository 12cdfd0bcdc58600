//! Integration tests for the curator pipeline and CLI

mod cli_parse;
mod config_loading;
mod pipeline;
mod support;
