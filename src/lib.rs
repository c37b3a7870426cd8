//! zkev library - fetch access-control events from door controllers.
//!
//! This library exposes the core functionality of the `zkev` CLI for use in
//! tests and potentially other applications.
//!
//! # Modules
//!
//! - `device`: Device addresses and the shared credentials
//! - `backend`: Invocation of the external device-communication backend
//! - `events`: Client-side post-processing of event tables
//! - `router`: Event query to backend sub-command mapping
//! - `dispatch`: Per-device fan-out with ordered reporting
//! - `config`: Configuration file and precedence handling
//! - `output`: Output mode abstraction (robot/human)
//! - `error`: Error types with user-recoverable hints
#![forbid(unsafe_code)]

pub mod backend;
pub mod cli;
pub mod config;
pub mod device;
pub mod dispatch;
pub mod error;
pub mod events;
pub mod logging;
pub mod output;
pub mod router;
pub mod theme;
