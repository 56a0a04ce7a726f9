//! Error types for monctl-core.

use thiserror::Error;

/// Core library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Property name not present in the registry.
    #[error("unknown property: {0}")]
    UnknownProperty(String),

    /// Requested value falls outside the property's declared range.
    #[error("value {value} for property {property} is not within range: {min}-{max}")]
    ValueOutOfRange {
        property: String,
        value: i64,
        min: u16,
        max: u16,
    },

    /// Caller supplied an inconsistent set of request parameters.
    #[error("malformed request: {0}")]
    MalformedRequest(String),

    /// Encoded command does not fit in the report body.
    #[error("command of {len} bytes overflows report ({available} bytes available)")]
    ReportOverflow { len: usize, available: usize },

    /// HID device communication failure.
    #[error("HID error: {0}")]
    Hid(String),

    /// No HID device matched the selector.
    #[error("device not found (VID=0x{vid:04X} PID=0x{pid:04X})")]
    DeviceNotFound { vid: u16, pid: u16 },

    /// Device accepted only part of the report.
    #[error("short write: {written} of {expected} bytes")]
    ShortWrite { written: usize, expected: usize },
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, Error>;
