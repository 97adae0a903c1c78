//! CLI library components for tabclean.

pub mod cli;
pub mod config;
pub mod logging;
