//! Frame envelope parsing. A DC-09 frame on the wire is
//!
//! ```text
//! <LF>CCCCLLLL"[*]TYPE"SSSS[Rxxxxxx]Lxxxxxx[#ACCT][BODY]<CR>
//! ```
//!
//! where `CCCC` is the CRC over everything from the opening quote onward,
//! either four hex digits or two raw bytes (auto-detected), and `LLLL` is the
//! body length in hex. Legacy Osborne-Hoffman heartbeats are a bare text line
//! and are matched as a fallback.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::crc;
use crate::errors::EventError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MessageType {
    SiaDcs,
    AdmCid,
    Null,
    Oh,
}

impl MessageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::SiaDcs => "SIA-DCS",
            MessageType::AdmCid => "ADM-CID",
            MessageType::Null => "NULL",
            MessageType::Oh => "OH",
        }
    }

    fn from_tag(tag: &str) -> Option<MessageType> {
        match tag {
            "SIA-DCS" => Some(MessageType::SiaDcs),
            "ADM-CID" => Some(MessageType::AdmCid),
            "NULL" => Some(MessageType::Null),
            _ => None,
        }
    }
}

impl std::fmt::Display for MessageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the CRC was framed on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CrcFormat {
    Hex,
    Binary,
}

/// A parsed but not yet content-validated DC-09 frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub crc_sent: u16,
    pub crc_format: CrcFormat,
    pub length_sent: String,
    pub encrypted: bool,
    pub message_type: MessageType,
    pub sequence: String,
    pub receiver: Option<String>,
    pub line: String,
    pub account: Option<String>,
    /// Everything after the opening `[`: plaintext body or hex ciphertext.
    pub body: String,
    /// The substring the panel computed its CRC over.
    pub full_message: String,
}

impl Envelope {
    /// CRC over the received text, for comparison with `crc_sent`.
    pub fn crc_calc(&self) -> u16 {
        crc::checksum(&self.full_message)
    }

    /// Whether the sent and calculated CRC agree.
    pub fn valid_crc(&self) -> bool {
        self.crc_sent == self.crc_calc()
    }

    /// Whether the length field agrees with the message length. Advisory:
    /// real panels get this wrong, so it is never enforced.
    pub fn valid_length(&self) -> bool {
        match u32::from_str_radix(&self.length_sent, 16) {
            Ok(length) => length as usize == self.full_message.len(),
            Err(_) => false,
        }
    }
}

/// A legacy Osborne-Hoffman heartbeat line, e.g.
/// `SR0001L0001    006969XX    [ID00000000]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OhHeartbeat {
    pub receiver: String,
    pub line: String,
    pub account: String,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParsedFrame {
    Dc09(Envelope),
    Oh(OhHeartbeat),
}

static TAIL_MATCHER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^"(?P<encrypted_flag>\*)?(?P<message_type>SIA-DCS|ADM-CID|NULL)"(?P<sequence>[0-9]{4})(?:R(?P<receiver>[A-Fa-f0-9]{1,6}))?L(?P<line>[A-Fa-f0-9]{1,6})(?:#(?P<account>[A-Fa-f0-9]{3,16}))?\[(?P<rest>.*)$"#,
    )
    .unwrap()
});

static OH_MATCHER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^SR(?P<receiver>\d{4})L(?P<line>\d{4})\s+(?P<account>\w{8})\s+\[(?P<id>\w+)\]$")
        .unwrap()
});

fn is_ascii_hex(bytes: &[u8]) -> bool {
    bytes.iter().all(u8::is_ascii_hexdigit)
}

/// Split one frame (LF/CR already stripped) into its envelope, or recognize
/// an OH heartbeat.
pub fn parse_frame(raw: &[u8]) -> Result<ParsedFrame, EventError> {
    let quote = raw.iter().position(|&b| b == b'"');
    // CRC framing auto-detection: 8 hex bytes before the first quote mean a
    // hex CRC + hex length, exactly 6 bytes whose tail is hex mean a 2-byte
    // raw CRC + hex length.
    let parsed = match quote {
        Some(8) if is_ascii_hex(&raw[..8]) => {
            let crc_sent = u16::from_str_radix(&String::from_utf8_lossy(&raw[..4]), 16)
                .map_err(|_| format_error(raw))?;
            Some((crc_sent, CrcFormat::Hex, &raw[4..8], &raw[8..]))
        }
        Some(6) if is_ascii_hex(&raw[2..6]) => {
            let crc_sent = u16::from_be_bytes([raw[0], raw[1]]);
            Some((crc_sent, CrcFormat::Binary, &raw[2..6], &raw[6..]))
        }
        _ => None,
    };

    if let Some((crc_sent, crc_format, length, tail)) = parsed {
        let full_message = String::from_utf8_lossy(tail).into_owned();
        if let Some(captures) = TAIL_MATCHER.captures(&full_message) {
            let message_type = MessageType::from_tag(&captures["message_type"])
                .ok_or_else(|| format_error(raw))?;
            return Ok(ParsedFrame::Dc09(Envelope {
                crc_sent,
                crc_format,
                length_sent: String::from_utf8_lossy(length).into_owned(),
                encrypted: captures.name("encrypted_flag").is_some(),
                message_type,
                sequence: captures["sequence"].to_string(),
                receiver: captures.name("receiver").map(|m| m.as_str().to_string()),
                line: captures["line"].to_string(),
                account: captures
                    .name("account")
                    .map(|m| m.as_str().to_ascii_uppercase()),
                body: captures["rest"].to_string(),
                full_message: full_message.clone(),
            }));
        }
    }

    let text = String::from_utf8_lossy(raw);
    if let Some(captures) = OH_MATCHER.captures(&text) {
        return Ok(ParsedFrame::Oh(OhHeartbeat {
            receiver: captures["receiver"].to_string(),
            line: captures["line"].to_string(),
            account: captures["account"].to_string(),
            id: captures["id"].to_string(),
        }));
    }

    Err(format_error(raw))
}

fn format_error(raw: &[u8]) -> EventError {
    EventError::Format(String::from_utf8_lossy(raw).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_frame() {
        let line = br#"E5D50078"SIA-DCS"6002L0#AAA[|Nri1/CL501]_14:12:04,09-25-2019"#;
        let ParsedFrame::Dc09(envelope) = parse_frame(line).unwrap() else {
            panic!("expected a DC-09 envelope");
        };
        assert_eq!(envelope.crc_sent, 0xE5D5);
        assert_eq!(envelope.crc_format, CrcFormat::Hex);
        assert_eq!(envelope.length_sent, "0078");
        assert!(!envelope.encrypted);
        assert_eq!(envelope.message_type, MessageType::SiaDcs);
        assert_eq!(envelope.sequence, "6002");
        assert_eq!(envelope.receiver, None);
        assert_eq!(envelope.line, "0");
        assert_eq!(envelope.account.as_deref(), Some("AAA"));
        assert_eq!(envelope.body, "|Nri1/CL501]_14:12:04,09-25-2019");
        assert!(envelope.valid_crc());
    }

    #[test]
    fn test_parse_receiver_and_inline_account() {
        let line = br#"39D50046"SIA-DCS"4738R0001L0001[#006969|Nri04/OP001NM]"#;
        let ParsedFrame::Dc09(envelope) = parse_frame(line).unwrap() else {
            panic!("expected a DC-09 envelope");
        };
        assert_eq!(envelope.receiver.as_deref(), Some("0001"));
        assert_eq!(envelope.line, "0001");
        // no #ACCT between Lxxxx and the bracket; it lives in the body
        assert_eq!(envelope.account, None);
        assert_eq!(envelope.body, "#006969|Nri04/OP001NM]");
        assert!(envelope.valid_crc());
    }

    #[test]
    fn test_parse_encrypted_flag() {
        let line = br#"60AB0078"*SIA-DCS"5994L0#AAA[5AB718E008C616BF16F6468033A11326"#;
        let ParsedFrame::Dc09(envelope) = parse_frame(line).unwrap() else {
            panic!("expected a DC-09 envelope");
        };
        assert!(envelope.encrypted);
        assert_eq!(envelope.account.as_deref(), Some("AAA"));
        assert_eq!(envelope.body, "5AB718E008C616BF16F6468033A11326");
    }

    #[test]
    fn test_binary_crc_mode() {
        let tail = r#""NULL"0000L0#AAA[]"#;
        let mut line = Vec::new();
        line.extend_from_slice(&crc::checksum_bytes(tail));
        line.extend_from_slice(format!("{:04X}", tail.len()).as_bytes());
        line.extend_from_slice(tail.as_bytes());
        let ParsedFrame::Dc09(envelope) = parse_frame(&line).unwrap() else {
            panic!("expected a DC-09 envelope");
        };
        assert_eq!(envelope.crc_format, CrcFormat::Binary);
        assert!(envelope.valid_crc());
        assert!(envelope.valid_length());
    }

    #[test]
    fn test_oh_heartbeat() {
        let line = b"SR0001L0001    006969XX    [ID00000000]";
        let ParsedFrame::Oh(oh) = parse_frame(line).unwrap() else {
            panic!("expected an OH heartbeat");
        };
        assert_eq!(oh.receiver, "0001");
        assert_eq!(oh.line, "0001");
        assert_eq!(oh.account, "006969XX");
        assert_eq!(oh.id, "ID00000000");
    }

    #[test]
    fn test_garbage_is_a_format_error() {
        assert!(matches!(
            parse_frame(b"This is not a SIA Event."),
            Err(EventError::Format(_))
        ));
        assert!(matches!(parse_frame(b""), Err(EventError::Format(_))));
    }

    #[test]
    fn test_crc_mismatch_is_still_parsed() {
        // stale CRC from a real capture; the envelope parses, validity is a
        // separate question for the classifier
        let line = br#"90820051"SIA-DCS"4738R0001L0001[#006969|Nri04/OP001NM]"#;
        let ParsedFrame::Dc09(envelope) = parse_frame(line).unwrap() else {
            panic!("expected a DC-09 envelope");
        };
        assert!(!envelope.valid_crc());
    }

    #[test]
    fn test_length_field_is_advisory() {
        let line = br#"E5D50078"SIA-DCS"6002L0#AAA[|Nri1/CL501]_14:12:04,09-25-2019"#;
        let ParsedFrame::Dc09(envelope) = parse_frame(line).unwrap() else {
            panic!("expected a DC-09 envelope");
        };
        // 0x78 != 52; panels in the field write a nonstandard value here
        assert!(!envelope.valid_length());
        assert!(envelope.valid_crc());
    }
}
