//! Command-line front end for `lintmux-tools`.

pub mod commands;
pub mod config;
pub mod merge;
pub mod output;

pub use merge::Merge;
