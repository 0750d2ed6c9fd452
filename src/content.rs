//! Body grammars. Once an envelope is (optionally) decrypted, the text
//! between the opening `[` and the end of the frame is parsed with one of two
//! grammars, selected by the message type. Encrypted bodies carry left
//! padding which the encrypted variants discard.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDateTime, Utc};
use log::warn;
use regex::Regex;
use serde::Serialize;

use crate::codes::{self, XDataInfo};
use crate::envelope::MessageType;
use crate::errors::EventError;

pub const TIMESTAMP_FORMAT: &str = "%H:%M:%S,%m-%d-%Y";

/// One `[..]` extended-data block with its resolved descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct XData {
    pub info: &'static XDataInfo,
    pub value: String,
}

/// Fields extracted from a frame body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Content {
    pub account: Option<String>,
    pub ti: Option<String>,
    pub id: Option<String>,
    pub ri: Option<String>,
    pub code: Option<String>,
    pub message: Option<String>,
    pub xdata: Vec<XData>,
    pub timestamp: Option<DateTime<Utc>>,
    // ADM-CID only
    pub event_qualifier: Option<String>,
    pub event_type: Option<String>,
    pub partition: Option<String>,
}

const SIA_CONTENT: &str = r"(?:#(?P<account>[A-Fa-f0-9]{3,16}))?\|?N?(?:ti(?P<ti>\d{2}:\d{2})/?)?(?:id(?P<id>\d*)/?)?(?:ri(?P<ri>\d*)/?)?(?P<code>[a-zA-Z]{2})?(?P<message>[^\[\]]*)\](?:\[(?P<xdata>.*)\])?_?(?P<timestamp>[0-9:,-]*)$";

const ADM_CONTENT: &str = r"(?:#(?P<account>[A-F0-9]{3,16}))?\|?(?P<event_qualifier>\d)(?P<event_type>\d{3}) (?P<partition>\d{2}) (?P<ri>\d{3})\](?:\[(?P<xdata>.*)\])?_?(?P<timestamp>[0-9:,-]*)$";

// The encrypted variants eat the left padding up to an optional '|'.
const ENCRYPTED_PREFIX: &str = r"[^|\[\]]*\|?";

static SIA_CONTENT_MATCHER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("^{SIA_CONTENT}")).unwrap());
static ENCR_SIA_CONTENT_MATCHER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("^{ENCRYPTED_PREFIX}{SIA_CONTENT}")).unwrap());
static ADM_CONTENT_MATCHER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("^{ADM_CONTENT}")).unwrap());
static ENCR_ADM_CONTENT_MATCHER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("^{ENCRYPTED_PREFIX}{ADM_CONTENT}")).unwrap());

fn matcher(message_type: MessageType, encrypted: bool) -> &'static Regex {
    match (message_type, encrypted) {
        (MessageType::AdmCid, false) => &ADM_CONTENT_MATCHER,
        (MessageType::AdmCid, true) => &ENCR_ADM_CONTENT_MATCHER,
        (_, false) => &SIA_CONTENT_MATCHER,
        (_, true) => &ENCR_SIA_CONTENT_MATCHER,
    }
}

/// Parse a (decrypted) body. NULL frames without a code are synthesized to an
/// automatic test report on zone 0.
pub fn parse_content(
    message_type: MessageType,
    encrypted: bool,
    content: &str,
) -> Result<Content, EventError> {
    let captures = matcher(message_type, encrypted)
        .captures(content)
        .ok_or_else(|| EventError::Format(content.to_string()))?;

    let capture = |name: &str| {
        captures
            .name(name)
            .map(|m| m.as_str().to_string())
            .filter(|s| !s.is_empty())
    };

    let mut parsed = Content {
        account: capture("account"),
        ri: capture("ri"),
        timestamp: capture("timestamp").and_then(|ts| parse_timestamp(&ts)),
        ..Content::default()
    };
    if let Some(raw) = capture("xdata") {
        parsed.xdata = parse_xdata(&raw);
    }

    if message_type == MessageType::AdmCid {
        parsed.event_qualifier = capture("event_qualifier");
        parsed.event_type = capture("event_type");
        parsed.partition = capture("partition");
    } else {
        parsed.code = capture("code");
        parsed.ti = capture("ti");
        parsed.id = capture("id");
        parsed.message = capture("message");
    }

    if message_type == MessageType::Null && parsed.code.is_none() {
        parsed.code = Some("RP".to_string());
        parsed.ri = Some("0".to_string());
    }
    Ok(parsed)
}

/// Translate ADM-CID qualifier and event type to a SIA code, if mapped.
pub fn translate_adm(content: &Content) -> Option<String> {
    let qualifier = content.event_qualifier.as_ref()?.chars().next()?;
    let event_type = content.event_type.as_ref()?;
    codes::adm_code(event_type, qualifier).map(str::to_string)
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    match NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT) {
        Ok(naive) => Some(naive.and_utc()),
        Err(_) => {
            warn!("unparseable timestamp in frame body: {raw}");
            None
        }
    }
}

/// Split `K123][M001122` style payloads into resolved blocks; unknown
/// identifiers are dropped.
fn parse_xdata(raw: &str) -> Vec<XData> {
    raw.split("][")
        .filter_map(|block| {
            let mut chars = block.chars();
            let identifier = chars.next()?;
            codes::xdata_info(identifier).map(|info| XData {
                info,
                value: chars.as_str().to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_sia_closing_report() {
        let content = parse_content(
            MessageType::SiaDcs,
            false,
            "|Nri1/CL501]_14:12:04,09-25-2019",
        )
        .unwrap();
        assert_eq!(content.ri.as_deref(), Some("1"));
        assert_eq!(content.code.as_deref(), Some("CL"));
        assert_eq!(content.message.as_deref(), Some("501"));
        let ts = content.timestamp.unwrap();
        assert_eq!((ts.hour(), ts.minute(), ts.second()), (14, 12, 4));
        assert_eq!((ts.month(), ts.day(), ts.year()), (9, 25, 2019));
    }

    #[test]
    fn test_sia_account_in_body() {
        let content =
            parse_content(MessageType::SiaDcs, false, "#006969|Nri04/OP001NM]").unwrap();
        assert_eq!(content.account.as_deref(), Some("006969"));
        assert_eq!(content.ri.as_deref(), Some("04"));
        assert_eq!(content.code.as_deref(), Some("OP"));
        assert_eq!(content.message.as_deref(), Some("001NM"));
        assert_eq!(content.timestamp, None);
    }

    #[test]
    fn test_sia_ti_and_id_segments() {
        let content = parse_content(
            MessageType::SiaDcs,
            false,
            "|Nti12:34/id1/ri5/BA000]_08:40:47,07-08-2020",
        )
        .unwrap();
        assert_eq!(content.ti.as_deref(), Some("12:34"));
        assert_eq!(content.id.as_deref(), Some("1"));
        assert_eq!(content.ri.as_deref(), Some("5"));
        assert_eq!(content.code.as_deref(), Some("BA"));
    }

    #[test]
    fn test_encrypted_padding_is_discarded() {
        let content = parse_content(
            MessageType::SiaDcs,
            true,
            "0000000000|Nri1/RP000]_14:12:04,09-25-2019",
        )
        .unwrap();
        assert_eq!(content.code.as_deref(), Some("RP"));
        assert_eq!(content.ri.as_deref(), Some("1"));
    }

    #[test]
    fn test_null_synthesizes_automatic_test() {
        let content =
            parse_content(MessageType::Null, true, "00000000000]_14:12:04,09-25-2019").unwrap();
        assert_eq!(content.code.as_deref(), Some("RP"));
        assert_eq!(content.ri.as_deref(), Some("0"));
        assert!(content.timestamp.is_some());
    }

    #[test]
    fn test_adm_contact_id() {
        let content = parse_content(
            MessageType::AdmCid,
            false,
            "#AAA|1130 01 015]_14:12:04,09-25-2019",
        )
        .unwrap();
        assert_eq!(content.account.as_deref(), Some("AAA"));
        assert_eq!(content.event_qualifier.as_deref(), Some("1"));
        assert_eq!(content.event_type.as_deref(), Some("130"));
        assert_eq!(content.partition.as_deref(), Some("01"));
        assert_eq!(content.ri.as_deref(), Some("015"));
        assert_eq!(translate_adm(&content).as_deref(), Some("BA"));
    }

    #[test]
    fn test_xdata_blocks() {
        let content = parse_content(
            MessageType::SiaDcs,
            false,
            "|Nri1/CL501][KAAAAAAAAAAAAAAAA][M001122334455]_14:12:04,09-25-2019",
        )
        .unwrap();
        assert_eq!(content.xdata.len(), 2);
        assert_eq!(content.xdata[0].info.identifier, 'K');
        assert_eq!(content.xdata[0].value, "AAAAAAAAAAAAAAAA");
        assert_eq!(content.xdata[1].info.identifier, 'M');
        assert!(content.timestamp.is_some());
    }

    #[test]
    fn test_bad_timestamp_is_dropped_not_fatal() {
        let content =
            parse_content(MessageType::SiaDcs, false, "|Nri1/CL501]_99:99:99,13-45-2019").unwrap();
        assert_eq!(content.code.as_deref(), Some("CL"));
        assert_eq!(content.timestamp, None);
    }

    #[test]
    fn test_garbage_decrypt_is_a_format_error() {
        assert!(parse_content(MessageType::Null, true, "\u{fffd}\u{fffd}]]x[[").is_err());
    }
}
