//! Command-line client for the Art Crime Archive.
//!
//! Each subcommand opens one screen's view model from `aca-core`, drives it
//! until no call is pending and prints what the screen would show.

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod summary;
