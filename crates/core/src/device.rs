//! Device selection and opening.

use crate::error::{Error, Result};
use crate::transport::ReportTransport;
use crate::{PRODUCT_ID, VENDOR_ID};
use tracing::{debug, info};

/// USB IDs identifying the target monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceSelector {
    pub vid: u16,
    pub pid: u16,
}

impl Default for DeviceSelector {
    fn default() -> Self {
        Self {
            vid: VENDOR_ID,
            pid: PRODUCT_ID,
        }
    }
}

impl std::fmt::Display for DeviceSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "VID=0x{:04X} PID=0x{:04X}", self.vid, self.pid)
    }
}

/// An opened HID device.
pub struct HidReportTransport {
    device: hidapi::HidDevice,
}

impl ReportTransport for HidReportTransport {
    fn write_report(&self, data: &[u8]) -> Result<usize> {
        self.device
            .write(data)
            .map_err(|e| Error::Hid(format!("write: {e}")))
    }
}

/// Open the first HID device matching `selector`.
pub fn open_first(selector: DeviceSelector) -> Result<HidReportTransport> {
    debug!(%selector, "Starting HID device enumeration");
    let api = hidapi::HidApi::new().map_err(|e| Error::Hid(format!("hidapi init: {e}")))?;

    let info = api
        .device_list()
        .find(|d| d.vendor_id() == selector.vid && d.product_id() == selector.pid)
        .ok_or(Error::DeviceNotFound {
            vid: selector.vid,
            pid: selector.pid,
        })?;

    info!(
        vid = format_args!("0x{:04X}", info.vendor_id()),
        pid = format_args!("0x{:04X}", info.product_id()),
        path = %info.path().to_string_lossy(),
        "Found monitor"
    );

    let device = info
        .open_device(&api)
        .map_err(|e| Error::Hid(format!("open HID device ({selector}): {e}")))?;
    Ok(HidReportTransport { device })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_selector_targets_monitor() {
        let sel = DeviceSelector::default();
        assert_eq!(sel.vid, 0x0BDA);
        assert_eq!(sel.pid, 0x1100);
        assert_eq!(sel.to_string(), "VID=0x0BDA PID=0x1100");
    }
}
