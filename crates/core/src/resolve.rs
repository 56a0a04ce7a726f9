//! Request resolution: turns a property name or raw address plus a value
//! into a validated `(address, value)` pair.
//!
//! Validation happens here, before anything is encoded, so an out-of-range
//! value never reaches the report builder.
//!
//! The raw-address path skips validation entirely. It exists for undocumented
//! properties; the caller owns whatever the monitor does with the value.

use crate::error::{Error, Result};
use crate::protocol::{self, EncodedCommand, ProtocolVariant, ValueWidth};
use crate::registry;
use tracing::debug;

/// A validated address and value, ready for encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved {
    pub address: u16,
    pub value: u16,
    pub width: ValueWidth,
}

impl Resolved {
    /// Encode as a write command for the given protocol generation.
    pub fn encode(&self, variant: ProtocolVariant) -> EncodedCommand {
        protocol::encode(self.address, self.value, self.width, variant)
    }
}

/// Resolve a registry property and check `value` against its range.
pub fn resolve_by_name(name: &str, value: i64) -> Result<Resolved> {
    let property = registry::lookup(name)?;
    if !property.accepts(value) {
        return Err(Error::ValueOutOfRange {
            property: property.name.to_string(),
            value,
            min: property.min,
            max: property.max,
        });
    }

    debug!(
        property = property.name,
        address = format_args!("0x{:04X}", property.address),
        value,
        "Resolved property"
    );

    Ok(Resolved {
        address: property.address,
        // accepts() bounds the value to u16
        value: value as u16,
        width: ValueWidth::for_max(property.max),
    })
}

/// Accept a raw address without validation.
pub fn resolve_by_address(address: u16, value: u16) -> Resolved {
    debug!(
        address = format_args!("0x{:04X}", address),
        value, "Using raw property address"
    );
    Resolved {
        address,
        value,
        width: ValueWidth::for_max(value),
    }
}

/// What a request addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Registry property name.
    Name(String),
    /// Raw protocol address.
    Address(u16),
}

/// A single "set property" request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRequest {
    pub target: Target,
    pub value: i64,
}

impl CommandRequest {
    /// Request to set a registry property.
    pub fn by_name(name: impl Into<String>, value: i64) -> Self {
        Self {
            target: Target::Name(name.into()),
            value,
        }
    }

    /// Request to set a raw address.
    pub fn by_address(address: u16, value: i64) -> Self {
        Self {
            target: Target::Address(address),
            value,
        }
    }

    /// Build a request from optional command-line parts.
    ///
    /// Exactly one of `prop` and `prop_num` must be given, and `val` must be
    /// present. An empty `prop` counts as absent.
    pub fn from_parts(prop: Option<&str>, prop_num: Option<u16>, val: Option<i64>) -> Result<Self> {
        let prop = prop.filter(|p| !p.is_empty());
        let target = match (prop, prop_num) {
            (Some(_), Some(_)) => {
                return Err(Error::MalformedRequest(
                    "specify only one of --prop or --prop-num".to_string(),
                ))
            }
            (None, None) => {
                return Err(Error::MalformedRequest(
                    "--prop or --prop-num is required".to_string(),
                ))
            }
            (Some(name), None) => Target::Name(name.to_string()),
            (None, Some(address)) => Target::Address(address),
        };
        let value =
            val.ok_or_else(|| Error::MalformedRequest("--val is required".to_string()))?;
        Ok(Self { target, value })
    }

    /// Resolve against the registry, or pass a raw address through.
    ///
    /// A raw-address value must still fit the 16-bit value field.
    pub fn resolve(&self) -> Result<Resolved> {
        match &self.target {
            Target::Name(name) => resolve_by_name(name, self.value),
            Target::Address(address) => {
                let value = u16::try_from(self.value).map_err(|_| {
                    Error::MalformedRequest(format!(
                        "value {} for raw address 0x{address:04X} does not fit the 16-bit value field",
                        self.value
                    ))
                })?;
                Ok(resolve_by_address(*address, value))
            }
        }
    }
}
