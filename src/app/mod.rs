//! Application layer: CLI surface, command execution, logging setup.

pub mod cli;
pub mod commands;
mod logging;
