//! End-to-end command pipeline: resolve, encode, build, then either write the
//! report or render it for a dry run.

use crate::error::Result;
use crate::protocol::ProtocolVariant;
use crate::report::{self, Report};
use crate::resolve::CommandRequest;
use crate::transport::{send_report, ReportTransport};
use tracing::{debug, info};

/// What to do with a built report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchMode {
    /// Render the report without touching the device.
    DryRun,
    /// Write the report to the device.
    Write,
}

/// Result of dispatching a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatched {
    /// Hex dump of the report that would have been sent.
    DryRun(String),
    /// Number of bytes written.
    Written(usize),
}

/// Resolve and encode a request into a complete report.
///
/// Fails before any I/O if the request does not validate.
pub fn prepare(request: &CommandRequest, variant: ProtocolVariant) -> Result<Report> {
    let resolved = request.resolve()?;
    let command = resolved.encode(variant);
    debug!(
        %variant,
        preamble = format_args!("{:02X?}", command.preamble),
        message = format_args!("{:02X?}", command.message),
        "Encoded command"
    );
    report::build(&command)
}

/// Deliver a report.
///
/// `open` is only called in [`DispatchMode::Write`], and at most once.
pub fn dispatch<T, F>(report: &Report, mode: DispatchMode, open: F) -> Result<Dispatched>
where
    T: ReportTransport,
    F: FnOnce() -> Result<T>,
{
    match mode {
        DispatchMode::DryRun => {
            info!("Dry run, not writing to device");
            Ok(Dispatched::DryRun(report.hex_dump()))
        }
        DispatchMode::Write => {
            let transport = open()?;
            let written = send_report(&transport, report)?;
            info!(bytes = written, "Report written");
            Ok(Dispatched::Written(written))
        }
    }
}
