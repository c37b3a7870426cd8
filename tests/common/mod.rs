//! Common test utilities for the zkev CLI.
//!
//! This module provides infrastructure for end-to-end CLI testing with:
//! - `cli`: CLI runner with output verification and fluent assertions
//! - `env`: Serialized environment variable overrides
//! - `fixtures`: Scripted fake backend and config file generation
#![allow(dead_code)]

pub mod env;
pub mod fixtures;

use tracing_subscriber::EnvFilter;

/// Payload shaped like a backend table dump: three header lines, two rows.
pub const FIVE_LINE_TABLE: &str = "Event\ntime,door,card\n----\nrowA\nrowB\n";

pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
