//! Report transport abstraction.
//!
//! Real HID devices and the test mock share the same trait, so the dispatch
//! path is exercised without hardware.

use crate::error::{Error, Result};
use crate::report::Report;
use tracing::trace;

/// Abstraction over a raw HID output-report write.
pub trait ReportTransport: Send {
    /// Write one report, returning the number of bytes the device accepted.
    fn write_report(&self, data: &[u8]) -> Result<usize>;
}

impl<T: ReportTransport + Sync + ?Sized> ReportTransport for &T {
    fn write_report(&self, data: &[u8]) -> Result<usize> {
        (**self).write_report(data)
    }
}

/// Write a report exactly once.
///
/// A failed or partial write is returned as an error and never retried: the
/// monitor does not acknowledge commands, so a repeat is not known to be safe.
pub fn send_report(transport: &dyn ReportTransport, report: &Report) -> Result<usize> {
    let bytes = report.as_bytes();
    trace!(
        len = bytes.len(),
        report_hex = format_args!("{:02X?}", bytes),
        "OSD report TX"
    );

    let written = transport.write_report(bytes)?;
    if written < bytes.len() {
        return Err(Error::ShortWrite {
            written,
            expected: bytes.len(),
        });
    }
    Ok(written)
}
