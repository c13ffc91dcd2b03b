//! vcprep library crate
//!
//! This crate provides both a CLI binary and a library API for programmatic use

pub mod cli;
pub mod config;
pub mod error;
pub mod flags;
pub mod hints;
pub mod output;
pub mod probe;
pub mod progress;
pub mod search_path;
pub mod shim;
pub mod theme;
pub mod toolchain;
