//! monctl-core: OSD property registry, command encoding, and HID report
//! building for USB-HID monitors.
//!
//! The pipeline is resolve → encode → build → write. Everything before the
//! write is pure; the only I/O happens behind [`transport::ReportTransport`].

pub mod device;
pub mod dispatch;
pub mod error;
pub mod protocol;
pub mod registry;
pub mod report;
pub mod resolve;
pub mod transport;

/// Realtek USB Vendor ID used by the monitor's HID bridge.
pub const VENDOR_ID: u16 = 0x0BDA;

/// Product ID of the monitor's OSD control interface.
pub const PRODUCT_ID: u16 = 0x1100;
