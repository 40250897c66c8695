//! PDF page extraction: parse a 1-based page spec string, copy the selected
//! pages into a new document, and serve the result over HTTP.
//!
//! The binary in `main.rs` wires these modules to a clap CLI; integration
//! tests drive the router in `server` directly.

pub mod commands;
pub mod config;
pub mod error;
pub mod page_range;
pub mod pdf;
pub mod server;

pub mod cli;
