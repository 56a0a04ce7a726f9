//! HID output report construction.
//!
//! The monitor takes 192-byte output reports. With the leading report ID the
//! buffer handed to the transport is 193 bytes:
//!
//! | Offset    | Contents                  |
//! |-----------|---------------------------|
//! | 0x00      | report ID (0x00)          |
//! | 0x01-0x02 | `40 C6`                   |
//! | 0x07-0x0B | `20 00 6E 00 80`          |
//! | 0x41..    | encoded command           |
//!
//! Everything else is zero.

use crate::error::{Error, Result};
use crate::protocol::EncodedCommand;

/// Report ID prepended to every report.
pub const REPORT_ID: u8 = 0x00;
/// Report body length, excluding the report ID.
pub const REPORT_BODY_LEN: usize = 192;
/// Full buffer length including the report ID.
pub const REPORT_LEN: usize = REPORT_BODY_LEN + 1;

/// Header magic at offset 0x01.
pub const HEADER_MAGIC: [u8; 2] = [0x40, 0xC6];
const HEADER_OFFSET: usize = 0x01;

/// Mid-section magic at offset 0x07.
pub const MID_MAGIC: [u8; 5] = [0x20, 0x00, 0x6E, 0x00, 0x80];
const MID_OFFSET: usize = 0x07;

/// Offset where the encoded command starts.
pub const COMMAND_OFFSET: usize = 0x41;

/// A complete, immutable output report.
#[derive(Clone, PartialEq, Eq)]
pub struct Report([u8; REPORT_LEN]);

impl Report {
    /// Build a report around raw command bytes.
    pub fn from_command_bytes(command: &[u8]) -> Result<Self> {
        let available = REPORT_LEN - COMMAND_OFFSET;
        if command.len() > available {
            return Err(Error::ReportOverflow {
                len: command.len(),
                available,
            });
        }

        let mut buf = [0u8; REPORT_LEN];
        buf[0] = REPORT_ID;
        buf[HEADER_OFFSET..HEADER_OFFSET + HEADER_MAGIC.len()].copy_from_slice(&HEADER_MAGIC);
        buf[MID_OFFSET..MID_OFFSET + MID_MAGIC.len()].copy_from_slice(&MID_MAGIC);
        buf[COMMAND_OFFSET..COMMAND_OFFSET + command.len()].copy_from_slice(command);
        Ok(Self(buf))
    }

    /// Raw bytes, report ID first.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Render as a hex dump: offset, 16 hex bytes, ASCII gutter.
    pub fn hex_dump(&self) -> String {
        hex_dump(&self.0)
    }
}

impl std::fmt::Debug for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Report")
            .field(&format_args!("{:02X?}", &self.0[COMMAND_OFFSET..]))
            .finish()
    }
}

/// Build the report for an encoded command.
pub fn build(command: &EncodedCommand) -> Result<Report> {
    Report::from_command_bytes(&command.to_bytes())
}

/// Hex dump in the classic `hexdump -C` layout.
pub fn hex_dump(data: &[u8]) -> String {
    let mut out = String::new();
    for (i, chunk) in data.chunks(16).enumerate() {
        out.push_str(&format!("{:08x}  ", i * 16));
        for col in 0..16 {
            match chunk.get(col) {
                Some(b) => out.push_str(&format!("{b:02x} ")),
                None => out.push_str("   "),
            }
            if col == 7 {
                out.push(' ');
            }
        }
        let ascii: String = chunk
            .iter()
            .map(|&b| {
                if b.is_ascii_graphic() || b == b' ' {
                    b as char
                } else {
                    '.'
                }
            })
            .collect();
        out.push_str(&format!(" |{ascii}|\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{encode, ProtocolVariant, ValueWidth};

    fn is_fixed(offset: usize) -> bool {
        offset == 0
            || (HEADER_OFFSET..HEADER_OFFSET + HEADER_MAGIC.len()).contains(&offset)
            || (MID_OFFSET..MID_OFFSET + MID_MAGIC.len()).contains(&offset)
    }

    #[test]
    fn report_is_193_bytes_with_magic() {
        let report = Report::from_command_bytes(&[]).unwrap();
        let bytes = report.as_bytes();
        assert_eq!(bytes.len(), 193);
        assert_eq!(bytes[0], 0x00);
        assert_eq!(&bytes[1..3], &[0x40, 0xC6]);
        assert_eq!(&bytes[7..12], &[0x20, 0x00, 0x6E, 0x00, 0x80]);
    }

    #[test]
    fn command_lands_at_0x41() {
        let cmd = encode(0x10, 72, ValueWidth::Byte, ProtocolVariant::ShortPlain);
        let report = build(&cmd).unwrap();
        assert_eq!(
            &report.as_bytes()[0x41..0x47],
            &[0x51, 0x84, 0x03, 0x10, 0x00, 0x48]
        );
    }

    #[test]
    fn untouched_bytes_are_zero() {
        let cmd = encode(0xE00B, 5, ValueWidth::Byte, ProtocolVariant::Extended);
        let len = cmd.len();
        let report = build(&cmd).unwrap();
        for (offset, &b) in report.as_bytes().iter().enumerate() {
            let in_command = (COMMAND_OFFSET..COMMAND_OFFSET + len).contains(&offset);
            if !is_fixed(offset) && !in_command {
                assert_eq!(b, 0, "byte 0x{offset:02X} not zero");
            }
        }
    }

    #[test]
    fn command_may_fill_remaining_space() {
        let max = vec![0xAA; REPORT_LEN - COMMAND_OFFSET];
        let report = Report::from_command_bytes(&max).unwrap();
        assert_eq!(report.as_bytes()[REPORT_LEN - 1], 0xAA);
    }

    #[test]
    fn oversized_command_rejected() {
        let too_long = vec![0u8; REPORT_LEN - COMMAND_OFFSET + 1];
        assert!(matches!(
            Report::from_command_bytes(&too_long),
            Err(Error::ReportOverflow { len: 129, available: 128 })
        ));
    }

    #[test]
    fn hex_dump_layout() {
        let dump = hex_dump(&[0x00, 0x40, 0xC6, 0x41]);
        assert_eq!(
            dump,
            "00000000  00 40 c6 41                                       |.@.A|\n"
        );
    }

    #[test]
    fn report_hex_dump_covers_every_byte() {
        let cmd = encode(0x10, 72, ValueWidth::Byte, ProtocolVariant::ShortPlain);
        let dump = build(&cmd).unwrap().hex_dump();
        assert_eq!(dump.lines().count(), 13);
        assert!(dump.starts_with("00000000  00 40 c6 00 00 00 00 20  00 6e 00 80"));
        assert!(dump.contains("00000040  00 51 84 03 10 00 48 00"));
        assert!(dump.ends_with("000000c0  00                                                |.|\n"));
    }
}
