//! Static table of OSD properties the monitor firmware understands.
//!
//! Addresses up to 0xFF are short-form codes. Anything above that is an
//! extended code in the `0xE0xx` page and is sent with its high byte.

use crate::error::{Error, Result};
use serde::Serialize;

/// A settable OSD property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Property {
    /// Lookup key, matched case-sensitively.
    pub name: &'static str,
    /// Human-readable notes on what the values mean.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
    /// Inclusive lower bound.
    pub min: u16,
    /// Inclusive upper bound.
    pub max: u16,
    /// Protocol address code.
    pub address: u16,
}

impl Property {
    const fn new(name: &'static str, min: u16, max: u16, address: u16) -> Self {
        Self {
            name,
            description: None,
            min,
            max,
            address,
        }
    }

    const fn described(
        name: &'static str,
        description: &'static str,
        min: u16,
        max: u16,
        address: u16,
    ) -> Self {
        Self {
            name,
            description: Some(description),
            min,
            max,
            address,
        }
    }

    /// Whether the address needs the two-byte extended encoding.
    pub fn is_extended(&self) -> bool {
        self.address > 0xFF
    }

    /// Whether `value` lies within `min..=max`.
    pub fn accepts(&self, value: i64) -> bool {
        (i64::from(self.min)..=i64::from(self.max)).contains(&value)
    }
}

/// Every property known to the tool.
pub const PROPERTIES: &[Property] = &[
    Property::new("brightness", 0, 100, 0x10),
    Property::new("contrast", 0, 100, 0x12),
    Property::new("sharpness", 0, 10, 0x87),
    Property::new("volume", 0, 100, 0x62),
    Property::described(
        "low-blue-light",
        "Blue light reduction. 0 means no reduction.",
        0,
        10,
        0xE00B,
    ),
    Property::described("kvm-switch", "Switch KVM to device 0 or 1", 0, 1, 0xE069),
    Property::described(
        "colour-mode",
        "0 is cool, 1 is normal, 2 is warm, 3 is user-defined.",
        0,
        3,
        0xE003,
    ),
    Property::described("count", "Set counter to specific value", 0, 99, 0xE02A),
    Property::described(
        "counter",
        "1 to show gaming counter on screen, 0 to hide it",
        0,
        1,
        0xE028,
    ),
    Property::described(
        "crosshair",
        "0 is off, 1-4 switches between crosshairs",
        0,
        4,
        0xE037,
    ),
    Property::described(
        "refresh",
        "0 is off, 1 shows refresh rate on screen",
        0,
        1,
        0xE022,
    ),
    Property::described(
        "rgb-red",
        "Red value -- only works if colour-mode is set to 3",
        0,
        100,
        0xE004,
    ),
    Property::described(
        "rgb-green",
        "Green value -- only works if colour-mode is set to 3",
        0,
        100,
        0xE005,
    ),
    Property::described(
        "rgb-blue",
        "Blue value -- only works if colour-mode is set to 3",
        0,
        100,
        0xE006,
    ),
    Property::described(
        "timer",
        "0 is off, 1 starts the timer, 2 starts countdown",
        0,
        2,
        0xE023,
    ),
    Property::described(
        "timer-location",
        "1st byte can be 0 (left) or 1 (right), 2nd -- 0 (top), 1 (center) or 2 (bottom)",
        0x0000,
        0x0102,
        0xE02B,
    ),
    Property::described("timer-pause", "0 is pause, 1 resume", 0, 1, 0xE027),
    Property::described(
        "timer-set",
        "First byte - minutes, 2nd byte - seconds",
        0,
        0x633C,
        0xE026,
    ),
];

/// Look up a property by exact name.
pub fn lookup(name: &str) -> Result<&'static Property> {
    PROPERTIES
        .iter()
        .find(|p| p.name == name)
        .ok_or_else(|| Error::UnknownProperty(name.to_string()))
}

/// Render the property table for help output.
pub fn help_text() -> String {
    PROPERTIES
        .iter()
        .map(|p| {
            let mut line = format!("\t{} ({}-{})", p.name, p.min, p.max);
            if let Some(desc) = p.description {
                line.push_str("\n\t\t");
                line.push_str(desc);
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}
