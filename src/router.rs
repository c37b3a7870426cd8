//! Maps user-facing event queries onto backend sub-commands.
//!
//! | Query | Backend sub-command | Post-processing |
//! |-------|---------------------|-----------------|
//! | unread | `events poll` | none |
//! | all | `table Event` | none |
//! | last N | `table Transaction` | tail-N slice |
//! | search | `table Event where --time>=.. --time<=..` | none |

use serde::Serialize;
use tracing::{debug, instrument};

use crate::backend::{Backend, BackendResult, Invoker};
use crate::device::DeviceAddress;
use crate::events::{DateRange, tail_rows};

/// One logical event query, run once per device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventQuery {
    /// Poll the realtime event buffer.
    Unread,
    /// Dump the full event table.
    All,
    /// Last `count` transactions, sliced client-side.
    Last { count: i64 },
    /// Events within an inclusive date range, filtered by the backend.
    Search(DateRange),
}

impl EventQuery {
    /// Short command name, as typed on the command line.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Unread => "unread",
            Self::All => "all",
            Self::Last { .. } => "last",
            Self::Search(_) => "search",
        }
    }

    /// Backend arguments following `connect ENV`.
    pub fn backend_args(&self) -> Vec<String> {
        match self {
            Self::Unread => vec!["events".into(), "poll".into()],
            Self::All => vec!["table".into(), "Event".into()],
            Self::Last { .. } => vec!["table".into(), "Transaction".into()],
            Self::Search(range) => {
                let mut args: Vec<String> = vec!["table".into(), "Event".into(), "where".into()];
                args.extend(range.backend_filters());
                args
            }
        }
    }

    /// Turn a successful payload into what gets shown for the device.
    fn present(&self, payload: &str) -> Outcome {
        match self {
            Self::Unread if payload.trim().is_empty() => Outcome::Empty {
                notice: "no new events".into(),
            },
            Self::Unread => Outcome::Output {
                title: "EVENTS".into(),
                body: payload.to_string(),
            },
            Self::All | Self::Search(_) if payload.trim().is_empty() => Outcome::Empty {
                notice: "backend returned no output".into(),
            },
            Self::All | Self::Search(_) => Outcome::Output {
                title: "RESULT".into(),
                body: payload.to_string(),
            },
            Self::Last { count } => match tail_rows(payload, *count) {
                Ok(body) => Outcome::Output {
                    title: format!("LAST {count} EVENTS"),
                    body,
                },
                Err(e) => Outcome::Failed {
                    message: e.to_string(),
                },
            },
        }
    }
}

/// What happened for one device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// Text to display under a title.
    Output { title: String, body: String },
    /// Success with nothing to display.
    Empty { notice: String },
    /// Backend error, start failure, or unusable payload.
    Failed { message: String },
}

/// Per-device result of one query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceReport {
    pub device: DeviceAddress,
    pub command: &'static str,
    pub ok: bool,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl DeviceReport {
    pub fn new(device: DeviceAddress, command: &'static str, outcome: Outcome) -> Self {
        Self {
            device,
            command,
            ok: !matches!(outcome, Outcome::Failed { .. }),
            outcome,
        }
    }

    pub const fn is_ok(&self) -> bool {
        self.ok
    }
}

/// Run `query` against one device and classify the result.
///
/// Never fails: every problem becomes an [`Outcome::Failed`] report so the
/// remaining devices are still processed.
#[instrument(skip(invoker, query), fields(command = query.name()))]
pub async fn query_device<B: Backend>(
    invoker: &Invoker<B>,
    device: DeviceAddress,
    query: &EventQuery,
) -> DeviceReport {
    let outcome = match invoker.invoke(&device, &query.backend_args()).await {
        Ok(BackendResult::Success(payload)) => query.present(&payload),
        Ok(BackendResult::Failure(message)) => Outcome::Failed { message },
        Err(e) => Outcome::Failed {
            message: e.to_string(),
        },
    };
    debug!(device = %device, ok = !matches!(outcome, Outcome::Failed { .. }), "Device query finished");
    DeviceReport::new(device, query.name(), outcome)
}
