//! Command-line front end for jobring.
//!
//! Provides commands for:
//! - One-shot assignment of a job list over a server list
//! - Dumping the replicas of a ring
//! - An interactive prompt that reassigns on every round

pub mod commands;
pub mod config;
pub mod input;
pub mod render;

pub use commands::{Command, CommandResult};
pub use config::{CliConfig, OutputFormat};
