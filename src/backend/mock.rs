//! Mock backend for unit testing.
//!
//! Records every invocation and answers with scripted per-device results,
//! so coordinator and router behavior can be asserted without a device or
//! a backend executable.
//!
//! # Example
//!
//! ```rust,ignore
//! use zkev::backend::mock::MockBackend;
//!
//! let mock = MockBackend::new()
//!     .with_success("10.0.0.1", "h1\nh2\nh3\nrowA\n")
//!     .with_failure("10.0.0.2", "connection refused");
//! ```

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Mutex, PoisonError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tracing::{debug, trace};

use super::{Backend, BackendInvocation, BackendResult};
use crate::error::{Result, ZkError};

/// Scripted answer for one device.
#[derive(Debug, Clone)]
enum Reply {
    Result(BackendResult),
    SpawnError(String),
}

/// Recording backend with scripted replies.
///
/// Devices without a scripted reply get an empty success payload.
#[derive(Debug, Default)]
pub struct MockBackend {
    replies: HashMap<String, Reply>,
    delays: HashMap<String, Duration>,
    invocations: Mutex<Vec<BackendInvocation>>,
    completed: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `device` with a success payload.
    #[must_use]
    pub fn with_success(mut self, device: &str, payload: &str) -> Self {
        self.replies.insert(
            device.to_string(),
            Reply::Result(BackendResult::Success(payload.to_string())),
        );
        self
    }

    /// Answer `device` with an error payload.
    #[must_use]
    pub fn with_failure(mut self, device: &str, message: &str) -> Self {
        self.replies.insert(
            device.to_string(),
            Reply::Result(BackendResult::Failure(message.to_string())),
        );
        self
    }

    /// Fail to start the backend for `device`.
    #[must_use]
    pub fn with_spawn_error(mut self, device: &str, reason: &str) -> Self {
        self.replies
            .insert(device.to_string(), Reply::SpawnError(reason.to_string()));
        self
    }

    /// Hold the reply for `device` back for `delay`.
    #[must_use]
    pub fn with_delay(mut self, device: &str, delay: Duration) -> Self {
        self.delays.insert(device.to_string(), delay);
        self
    }

    /// All invocations received so far, in call order.
    pub fn invocations(&self) -> Vec<BackendInvocation> {
        self.invocations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Devices in the order their calls finished.
    pub fn completed(&self) -> Vec<String> {
        self.completed.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Highest number of calls that were outstanding at the same time.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// Assert the devices that were called, in order.
    pub fn assert_devices(&self, expected: &[&str]) {
        let actual: Vec<String> = self
            .invocations()
            .iter()
            .map(|inv| inv.device().to_string())
            .collect();
        assert_eq!(actual, expected, "unexpected device call order");
    }

    fn reply_for(&self, device: &str) -> Result<BackendResult> {
        match self.replies.get(device) {
            Some(Reply::Result(result)) => Ok(result.clone()),
            Some(Reply::SpawnError(reason)) => Err(ZkError::BackendSpawn {
                executable: "mock".to_string(),
                reason: reason.clone(),
            }),
            None => Ok(BackendResult::Success(String::new())),
        }
    }
}

impl Backend for MockBackend {
    fn run(
        &self,
        invocation: &BackendInvocation,
    ) -> impl Future<Output = Result<BackendResult>> + Send {
        let device = invocation.device().to_string();
        debug!(%device, args = ?invocation.args(), "Mock backend invoked");
        self.invocations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(invocation.clone());

        let reply = self.reply_for(&device);
        let delay = self.delays.get(&device).copied();

        async move {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);

            if let Some(delay) = delay {
                trace!(%device, ?delay, "Mock backend delaying reply");
                tokio::time::sleep(delay).await;
            }

            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            self.completed
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(device);
            reply
        }
    }
}
