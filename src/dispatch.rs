//! Fan-out of one query across a list of devices.
//!
//! Devices are processed in the order given. With `jobs = 1` each device's
//! backend call finishes before the next one starts. With `jobs > 1` up to
//! that many calls run at once, but reports are still delivered in list
//! order. A failing device never stops the remaining ones.

use std::future::Future;
use std::num::NonZeroUsize;

use futures::StreamExt;
use futures::stream;
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::device::DeviceAddress;
use crate::router::DeviceReport;

/// Totals for one fan-out pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub total: usize,
    pub success: usize,
    pub failed: usize,
}

impl RunSummary {
    fn record(&mut self, report: &DeviceReport) {
        self.total += 1;
        if report.is_ok() {
            self.success += 1;
        } else {
            self.failed += 1;
        }
    }

    pub const fn is_success(&self) -> bool {
        self.failed == 0
    }
}

/// Run `operation` once per device and hand each report to `on_report`.
///
/// `on_report` is called in device-list order as soon as that device (and
/// every device before it) has finished. Nothing is cached: calling this
/// twice with the same list performs two full passes.
#[instrument(skip_all, fields(devices = devices.len(), jobs = jobs.get()))]
pub async fn for_each_device<Op, Fut, Sink>(
    devices: &[DeviceAddress],
    jobs: NonZeroUsize,
    operation: Op,
    mut on_report: Sink,
) -> RunSummary
where
    Op: Fn(DeviceAddress) -> Fut,
    Fut: Future<Output = DeviceReport>,
    Sink: FnMut(&DeviceReport),
{
    let mut summary = RunSummary::default();
    let mut reports = stream::iter(devices.iter().cloned().map(|device| {
        debug!(device = %device, "Queueing device");
        operation(device)
    }))
    .buffered(jobs.get());

    while let Some(report) = reports.next().await {
        summary.record(&report);
        on_report(&report);
    }

    info!(
        total = summary.total,
        success = summary.success,
        failed = summary.failed,
        "Fan-out complete"
    );
    summary
}
