//! CLI library components for drawpack.

pub mod config;
pub mod logging;
