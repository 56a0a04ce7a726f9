//! OSD command encoding.
//!
//! A command is a preamble followed by a message:
//! - Preamble: `[0x51, 0x81 + message_len, mode, mode_tag?]`
//! - Message: `[address_hi?, address_lo, value_hi, value_lo, checksum?]`
//!
//! The firmware generations differ only in whether a checksum trailer is
//! appended and whether a mode tag follows the mode byte. [`ProtocolVariant`]
//! names each generation.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Command opcode.
pub const OPCODE: u8 = 0x51;
/// Base of the length byte; the message length is added to it.
pub const LENGTH_BASE: u8 = 0x81;
/// Mode tag used by the extended generation.
pub const EXTENDED_MODE_TAG: u8 = 0xE0;

/// Mode byte values.
pub mod mode {
    /// Read the current value.
    pub const READ: u8 = 0x01;
    /// Write a new value.
    pub const WRITE: u8 = 0x03;
}

const CHECKSUM_SEED: u8 = 0x06;

/// Width of the value field on the wire.
///
/// The field is always two bytes. `Byte` keeps the high byte reserved (zero),
/// `Word` sends the value big-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueWidth {
    Byte,
    Word,
}

impl ValueWidth {
    /// Width needed to carry values up to `max` without truncation.
    pub fn for_max(max: u16) -> Self {
        if max > 0xFF {
            Self::Word
        } else {
            Self::Byte
        }
    }

    fn field(self, value: u16) -> [u8; 2] {
        match self {
            Self::Byte => [0x00, (value & 0xFF) as u8],
            Self::Word => value.to_be_bytes(),
        }
    }
}

/// Firmware protocol generation.
///
/// Every generation uses the same address rule: the high byte is part of the
/// message whenever the address exceeds 0xFF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProtocolVariant {
    /// No checksum, no mode tag.
    #[default]
    ShortPlain,
    /// Legacy generation with an XOR checksum trailer.
    ShortWithChecksum,
    /// Secondary-mode generation; same bytes on the wire as `ShortPlain`.
    ShortWithSecondaryMode,
    /// `0xE0` mode tag always follows the mode byte.
    Extended,
}

#[derive(Debug, Clone, Copy)]
struct VariantConfig {
    checksum: bool,
    mode_tag: Option<u8>,
}

impl ProtocolVariant {
    /// All supported variants.
    pub const ALL: &'static [ProtocolVariant] = &[
        ProtocolVariant::ShortPlain,
        ProtocolVariant::ShortWithChecksum,
        ProtocolVariant::ShortWithSecondaryMode,
        ProtocolVariant::Extended,
    ];

    /// Kebab-case name used on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ShortPlain => "short-plain",
            Self::ShortWithChecksum => "short-checksum",
            Self::ShortWithSecondaryMode => "short-secondary-mode",
            Self::Extended => "extended",
        }
    }

    /// Whether this generation appends a checksum trailer.
    pub fn has_checksum(&self) -> bool {
        self.config().checksum
    }

    fn config(&self) -> VariantConfig {
        match self {
            Self::ShortPlain | Self::ShortWithSecondaryMode => VariantConfig {
                checksum: false,
                mode_tag: None,
            },
            Self::ShortWithChecksum => VariantConfig {
                checksum: true,
                mode_tag: None,
            },
            Self::Extended => VariantConfig {
                checksum: false,
                mode_tag: Some(EXTENDED_MODE_TAG),
            },
        }
    }
}

impl fmt::Display for ProtocolVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ProtocolVariant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.name() == s)
            .ok_or_else(|| {
                let names: Vec<_> = Self::ALL.iter().map(|v| v.name()).collect();
                Error::MalformedRequest(format!(
                    "unknown protocol variant '{s}' (expected one of: {})",
                    names.join(", ")
                ))
            })
    }
}

/// Checksum trailer of the legacy generation.
///
/// The low nibble is the XOR of a 0x06 seed with every byte; the high nibble
/// comes from the last byte XOR 0xC0. `msg` must not be empty; an empty
/// slice is treated as ending in 0x00.
pub fn checksum(msg: &[u8]) -> u8 {
    let low = msg.iter().fold(CHECKSUM_SEED, |acc, b| acc ^ b) & 0x0F;
    let last = msg.last().copied().unwrap_or_default();
    low + ((last ^ 0xC0) & 0xF0)
}

/// An encoded command, ready to be placed into a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedCommand {
    /// Opcode, length byte, mode byte and optional mode tag.
    pub preamble: Vec<u8>,
    /// Address, value field and optional checksum.
    pub message: Vec<u8>,
}

impl EncodedCommand {
    /// Preamble followed by message.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.len());
        out.extend_from_slice(&self.preamble);
        out.extend_from_slice(&self.message);
        out
    }

    /// Total encoded length.
    pub fn len(&self) -> usize {
        self.preamble.len() + self.message.len()
    }
}

/// Encode a write of `value` to `address`.
pub fn encode(
    address: u16,
    value: u16,
    width: ValueWidth,
    variant: ProtocolVariant,
) -> EncodedCommand {
    encode_with_mode(address, value, width, variant, mode::WRITE)
}

/// Encode a command with an explicit mode byte.
pub fn encode_with_mode(
    address: u16,
    value: u16,
    width: ValueWidth,
    variant: ProtocolVariant,
    mode_byte: u8,
) -> EncodedCommand {
    let config = variant.config();
    let [address_hi, address_lo] = address.to_be_bytes();

    let mut message = Vec::with_capacity(5);
    if address > 0xFF {
        message.push(address_hi);
    }
    message.push(address_lo);
    message.extend_from_slice(&width.field(value));
    if config.checksum {
        message.push(checksum(&message));
    }

    let mut preamble = vec![OPCODE, LENGTH_BASE + message.len() as u8, mode_byte];
    if let Some(tag) = config.mode_tag {
        preamble.push(tag);
    }

    EncodedCommand { preamble, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checksum_known_vectors() {
        assert_eq!(checksum(&[0x10, 0x00, 0x48]), 0x8E);
        assert_eq!(checksum(&[0x12, 0x00, 0x33]), 0xF7);
    }

    #[test]
    fn checksum_empty_message_does_not_panic() {
        assert_eq!(checksum(&[]), 0x06 + 0xC0);
    }

    #[test]
    fn encode_short_plain() {
        let cmd = encode(0x10, 72, ValueWidth::Byte, ProtocolVariant::ShortPlain);
        assert_eq!(cmd.message, vec![0x10, 0x00, 0x48]);
        assert_eq!(cmd.preamble, vec![0x51, 0x84, 0x03]);
        assert_eq!(cmd.to_bytes(), vec![0x51, 0x84, 0x03, 0x10, 0x00, 0x48]);
    }

    #[test]
    fn encode_extended_address_in_plain_variant() {
        let cmd = encode(0xE00B, 5, ValueWidth::Byte, ProtocolVariant::ShortPlain);
        assert_eq!(cmd.message, vec![0xE0, 0x0B, 0x00, 0x05]);
        assert_eq!(cmd.preamble, vec![0x51, 0x85, 0x03]);
    }

    #[test]
    fn encode_with_checksum() {
        let cmd = encode(0x12, 0x33, ValueWidth::Byte, ProtocolVariant::ShortWithChecksum);
        assert_eq!(cmd.message, vec![0x12, 0x00, 0x33, 0xF7]);
        assert_eq!(cmd.preamble, vec![0x51, 0x85, 0x03]);
    }

    #[test]
    fn encode_extended_variant_adds_mode_tag() {
        let cmd = encode(0x10, 72, ValueWidth::Byte, ProtocolVariant::Extended);
        assert_eq!(cmd.preamble, vec![0x51, 0x84, 0x03, EXTENDED_MODE_TAG]);
        assert_eq!(cmd.message, vec![0x10, 0x00, 0x48]);
    }

    #[test]
    fn secondary_mode_matches_plain_encoding() {
        for (address, value) in [(0xE069, 1), (0xE00B, 5), (0x62, 50)] {
            let secondary = encode(
                address,
                value,
                ValueWidth::Byte,
                ProtocolVariant::ShortWithSecondaryMode,
            );
            let plain = encode(address, value, ValueWidth::Byte, ProtocolVariant::ShortPlain);
            assert_eq!(secondary, plain, "0x{address:04X}");
        }

        let cmd = encode(
            0xE00B,
            5,
            ValueWidth::Byte,
            ProtocolVariant::ShortWithSecondaryMode,
        );
        assert_eq!(cmd.preamble, vec![0x51, 0x85, 0x03]);
        assert_eq!(cmd.message, vec![0xE0, 0x0B, 0x00, 0x05]);
    }

    #[test]
    fn byte_width_truncates_to_low_byte() {
        let cmd = encode(0x10, 0x1234, ValueWidth::Byte, ProtocolVariant::ShortPlain);
        assert_eq!(cmd.message, vec![0x10, 0x00, 0x34]);
    }

    #[test]
    fn word_width_is_big_endian() {
        let cmd = encode(0xE026, 0x0A1E, ValueWidth::Word, ProtocolVariant::ShortPlain);
        assert_eq!(cmd.message, vec![0xE0, 0x26, 0x0A, 0x1E]);
        assert_eq!(cmd.preamble[1], 0x85);
    }

    #[test]
    fn read_mode_byte() {
        let cmd = encode_with_mode(
            0x10,
            0,
            ValueWidth::Byte,
            ProtocolVariant::ShortPlain,
            mode::READ,
        );
        assert_eq!(cmd.preamble, vec![0x51, 0x84, 0x01]);
    }

    #[test]
    fn length_byte_tracks_message_for_every_variant() {
        for &variant in ProtocolVariant::ALL {
            for address in [0x00, 0x10, 0xFF, 0x100, 0xE00B, 0xFFFF] {
                for value in [0, 0xFF, 0x100, 0xFFFF] {
                    for width in [ValueWidth::Byte, ValueWidth::Word] {
                        let cmd = encode(address, value, width, variant);
                        assert_eq!(
                            cmd.preamble[1] as usize,
                            LENGTH_BASE as usize + cmd.message.len(),
                            "{variant} 0x{address:04X}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn short_addresses_never_emit_high_byte() {
        for &variant in ProtocolVariant::ALL {
            for address in 0..=0xFFu16 {
                let cmd = encode(address, 1, ValueWidth::Byte, variant);
                let expected = if variant.has_checksum() { 4 } else { 3 };
                assert_eq!(cmd.message.len(), expected);
                assert_eq!(cmd.message[0], address as u8);
            }
        }
    }

    #[test]
    fn extended_addresses_always_emit_high_byte() {
        for &variant in ProtocolVariant::ALL {
            let cmd = encode(0xE003, 2, ValueWidth::Byte, variant);
            assert_eq!(&cmd.message[..2], &[0xE0, 0x03], "{variant}");
        }
    }

    #[test]
    fn encoding_is_deterministic() {
        for &variant in ProtocolVariant::ALL {
            let a = encode(0xE02B, 0x0102, ValueWidth::Word, variant);
            let b = encode(0xE02B, 0x0102, ValueWidth::Word, variant);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn variant_names_roundtrip() {
        for &variant in ProtocolVariant::ALL {
            assert_eq!(variant.name().parse::<ProtocolVariant>().unwrap(), variant);
            assert_eq!(variant.to_string(), variant.name());
        }
        assert!("legacy".parse::<ProtocolVariant>().is_err());
    }

    #[test]
    fn value_width_for_max() {
        assert_eq!(ValueWidth::for_max(100), ValueWidth::Byte);
        assert_eq!(ValueWidth::for_max(0xFF), ValueWidth::Byte);
        assert_eq!(ValueWidth::for_max(0x0102), ValueWidth::Word);
    }
}
