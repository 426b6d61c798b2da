//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the twain binary.

mod commands;
mod curate;
mod server;

pub use commands::{Cli, Commands};
pub use curate::{batch, delete, generate, list, move_group, probe, watch};
pub use server::run_server;
