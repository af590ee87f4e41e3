//! CLI subcommands.

pub mod chart;
pub mod common;
pub mod config;
pub mod devices;
pub mod play;
pub mod render;
pub mod resolve;
