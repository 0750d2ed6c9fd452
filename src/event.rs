//! Typed events and their acknowledgements. Every inbound frame becomes one
//! of three variants: a fully interpreted `SiaEvent`, a legacy `OhEvent`
//! heartbeat, or a `NakEvent` standing in for a frame that never made it past
//! the envelope. Each variant knows its verdict and its exact wire response.

use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use log::error;
use serde::Serialize;

use crate::account::SiaAccount;
use crate::codes::{self, SiaCode, RSP_XDATA};
use crate::content::{self, Content, XData, TIMESTAMP_FORMAT};
use crate::crc;
use crate::crypto;
use crate::envelope::{self, CrcFormat, Envelope, MessageType, OhHeartbeat, ParsedFrame};
use crate::errors::EventError;
use crate::registry::AccountMap;

/// Acknowledgement classes of DC-09.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ResponseType {
    Ack,
    Duh,
    Nak,
    Rsp,
}

impl ResponseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseType::Ack => "ACK",
            ResponseType::Duh => "DUH",
            ResponseType::Nak => "NAK",
            ResponseType::Rsp => "RSP",
        }
    }
}

/// A frame interpreted all the way down to its SIA code.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiaEvent {
    pub full_message: String,
    pub crc_sent: u16,
    pub crc_calc: u16,
    pub crc_format: CrcFormat,
    pub length_sent: String,
    pub encrypted: bool,
    pub message_type: MessageType,
    pub sequence: String,
    pub receiver: Option<String>,
    pub line: String,
    pub account: Option<String>,
    /// Plaintext body (decrypted when the frame was encrypted).
    pub content: String,
    /// The hex ciphertext as received, for encrypted frames.
    pub encrypted_content: Option<String>,
    pub ti: Option<String>,
    pub id: Option<String>,
    pub ri: Option<String>,
    pub code: Option<String>,
    pub message: Option<String>,
    pub xdata: Vec<XData>,
    pub timestamp: Option<DateTime<Utc>>,
    pub event_qualifier: Option<String>,
    pub event_type: Option<String>,
    pub partition: Option<String>,
    pub sia_code: Option<&'static SiaCode>,
    #[serde(skip)]
    account_record: Option<SiaAccount>,
}

/// A legacy Osborne-Hoffman heartbeat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OhEvent {
    pub receiver: String,
    pub line: String,
    pub account: String,
    pub id: String,
}

/// Stands in for a frame whose envelope or content never parsed; carries only
/// the NAK discipline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NakEvent;

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Sia(SiaEvent),
    Oh(OhEvent),
    Nak(NakEvent),
}

impl Event {
    /// Parse one frame against the current account snapshot.
    pub fn parse(raw: &[u8], accounts: &AccountMap) -> Result<Event, EventError> {
        match envelope::parse_frame(raw)? {
            ParsedFrame::Oh(oh) => Ok(Event::Oh(OhEvent::from(oh))),
            ParsedFrame::Dc09(env) => SiaEvent::from_envelope(env, accounts).map(Event::Sia),
        }
    }

    pub fn response_type(&self) -> Option<ResponseType> {
        match self {
            Event::Sia(event) => event.response_type(),
            Event::Oh(_) => Some(ResponseType::Ack),
            Event::Nak(_) => Some(ResponseType::Nak),
        }
    }

    /// The exact bytes to put on the wire, or `None` for a silent discard.
    pub fn create_response(&self) -> Option<Vec<u8>> {
        match self {
            Event::Sia(event) => event.create_response(),
            Event::Oh(event) => Some(event.create_response()),
            Event::Nak(event) => Some(event.create_response()),
        }
    }

    /// The event to hand to the user callback, present only when the verdict
    /// is ACK. OH heartbeats dispatch as a synthesized automatic test.
    pub fn dispatchable(&self) -> Option<SiaEvent> {
        match self {
            Event::Sia(event) if event.response_type() == Some(ResponseType::Ack) => {
                Some(event.clone())
            }
            Event::Oh(event) => Some(event.to_sia_event()),
            _ => None,
        }
    }
}

impl SiaEvent {
    fn from_envelope(envelope: Envelope, accounts: &AccountMap) -> Result<SiaEvent, EventError> {
        let mut account_record = envelope
            .account
            .as_ref()
            .and_then(|id| accounts.get(id))
            .cloned();

        let (content_text, encrypted_content) = if envelope.encrypted {
            let key = account_record
                .as_ref()
                .and_then(SiaAccount::key_bytes)
                .ok_or_else(|| EventError::NoAccount(envelope.full_message.clone()))?;
            let plain = crypto::decrypt_hex(key, &envelope.body)
                .map_err(|err| EventError::Format(err.to_string()))?;
            (plain, Some(envelope.body.clone()))
        } else {
            (envelope.body.clone(), None)
        };

        let parsed: Content =
            content::parse_content(envelope.message_type, envelope.encrypted, &content_text)?;

        // the account may live in the body rather than the envelope
        let account = envelope.account.clone().or_else(|| {
            parsed
                .account
                .as_ref()
                .map(|id| id.to_ascii_uppercase())
        });
        if account_record.is_none() {
            account_record = account.as_ref().and_then(|id| accounts.get(id)).cloned();
        }

        let code = if envelope.message_type == MessageType::AdmCid {
            content::translate_adm(&parsed)
        } else {
            parsed.code
        };
        let sia_code = code.as_deref().and_then(codes::sia_code);

        Ok(SiaEvent {
            crc_calc: envelope.crc_calc(),
            full_message: envelope.full_message,
            crc_sent: envelope.crc_sent,
            crc_format: envelope.crc_format,
            length_sent: envelope.length_sent,
            encrypted: envelope.encrypted,
            message_type: envelope.message_type,
            sequence: envelope.sequence,
            receiver: envelope.receiver,
            line: envelope.line,
            account,
            content: content_text,
            encrypted_content,
            ti: parsed.ti,
            id: parsed.id,
            ri: parsed.ri,
            code,
            message: parsed.message,
            xdata: parsed.xdata,
            timestamp: parsed.timestamp,
            event_qualifier: parsed.event_qualifier,
            event_type: parsed.event_type,
            partition: parsed.partition,
            sia_code,
            account_record,
        })
    }

    /// The account record matched against the registry, if any.
    pub fn account_record(&self) -> Option<&SiaAccount> {
        self.account_record.as_ref()
    }

    /// Sent and calculated CRC agree.
    pub fn valid_message(&self) -> bool {
        self.crc_sent == self.crc_calc
    }

    /// Length field agrees with the message length; advisory only.
    pub fn valid_length(&self) -> bool {
        match u32::from_str_radix(&self.length_sent, 16) {
            Ok(length) => length as usize == self.full_message.len(),
            Err(_) => false,
        }
    }

    /// The two-letter code did not resolve against the code table.
    pub fn code_not_found(&self) -> bool {
        self.sia_code.is_none()
    }

    /// The timestamp, when present, falls inside the account's timeband.
    pub fn valid_timestamp(&self) -> bool {
        let Some(record) = &self.account_record else {
            return true;
        };
        let Some((before, after)) = record.allowed_timeband() else {
            return true;
        };
        let Some(timestamp) = self.timestamp else {
            return true;
        };
        let now = Utc::now();
        now - Duration::seconds(i64::from(before)) <= timestamp
            && timestamp <= now + Duration::seconds(i64::from(after))
    }

    fn rsp_requested(&self) -> bool {
        self.xdata
            .iter()
            .any(|x| RSP_XDATA.contains(&x.info.identifier))
    }

    /// Classify the event. Rows are checked in order and the first hit wins;
    /// `None` means the frame is dropped without a reply.
    pub fn response_type(&self) -> Option<ResponseType> {
        if self.account_record.is_none() {
            return Some(ResponseType::Nak);
        }
        if !self.valid_message() {
            return None;
        }
        if !self.valid_timestamp() {
            return Some(ResponseType::Nak);
        }
        if self.code_not_found() && self.message_type == MessageType::SiaDcs {
            return Some(ResponseType::Duh);
        }
        if self.rsp_requested() {
            return Some(ResponseType::Rsp);
        }
        Some(ResponseType::Ack)
    }

    /// Build the wire acknowledgement for this event, or `None` when the
    /// verdict calls for silence.
    pub fn create_response(&self) -> Option<Vec<u8>> {
        let response_type = self.response_type()?;
        if response_type == ResponseType::Nak {
            return Some(nak_response());
        }

        let record = self.account_record.as_ref()?;
        let verdict = response_type.as_str();
        let sequence = &self.sequence;
        let receiver = self.receiver.as_deref().unwrap_or("0");
        let line = &self.line;
        let account = self.account.as_deref().unwrap_or(record.account_id());
        let key_echo = match (self.rsp_requested(), record.key()) {
            (true, Some(key)) => format!("[K{key}]"),
            _ => String::new(),
        };

        let body = if !self.encrypted || response_type == ResponseType::Duh {
            format!(r#""{verdict}"{sequence}R{receiver}L{line}#{account}[]{key_echo}"#)
        } else {
            let key = record.key_bytes()?;
            let plain = format!("]{key_echo}{}", timestamp_suffix(record.timezone()));
            let ciphertext = match crypto::encrypt_hex(key, &plain) {
                Ok(ciphertext) => ciphertext,
                Err(err) => {
                    error!("failed to encrypt response for {account}: {err}");
                    return Some(nak_response());
                }
            };
            format!(r#""*{verdict}"{sequence}R{receiver}L{line}#{account}[{ciphertext}"#)
        };
        Some(frame_response(&body))
    }
}

impl std::fmt::Display for SiaEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} event from account {}: code {}, zone {}, message {:?}, timestamp {:?}",
            self.message_type,
            self.account.as_deref().unwrap_or("-"),
            self.code.as_deref().unwrap_or("-"),
            self.ri.as_deref().unwrap_or("-"),
            self.message.as_deref().unwrap_or(""),
            self.timestamp,
        )
    }
}

impl From<OhHeartbeat> for OhEvent {
    fn from(oh: OhHeartbeat) -> OhEvent {
        OhEvent {
            receiver: oh.receiver,
            line: oh.line,
            account: oh.account,
            id: oh.id,
        }
    }
}

impl OhEvent {
    /// OH receivers answer heartbeats with the literal quoted ACK, unframed.
    pub fn create_response(&self) -> Vec<u8> {
        b"\"ACK\"".to_vec()
    }

    /// Synthesize the automatic-test event handed to the callback.
    pub fn to_sia_event(&self) -> SiaEvent {
        SiaEvent {
            full_message: String::new(),
            crc_sent: 0,
            crc_calc: 0,
            crc_format: CrcFormat::Hex,
            length_sent: String::new(),
            encrypted: false,
            message_type: MessageType::Oh,
            sequence: "0000".to_string(),
            receiver: Some(self.receiver.clone()),
            line: self.line.clone(),
            account: Some(self.account.clone()),
            content: String::new(),
            encrypted_content: None,
            ti: None,
            id: Some(self.id.clone()),
            ri: Some("0".to_string()),
            code: Some("RP".to_string()),
            message: None,
            xdata: Vec::new(),
            timestamp: None,
            event_qualifier: None,
            event_type: None,
            partition: None,
            sia_code: codes::sia_code("RP"),
            account_record: None,
        }
    }
}

impl NakEvent {
    pub fn create_response(&self) -> Vec<u8> {
        nak_response()
    }
}

/// `\n<CRC4><LEN4><body>\r` -- the outbound framing shared by every
/// acknowledgement except the bare OH reply.
fn frame_response(body: &str) -> Vec<u8> {
    format!("\n{}{:04X}{}\r", crc::checksum_hex(body), body.len(), body).into_bytes()
}

/// NAKs carry no account context, so their timestamp is plain UTC.
fn nak_response() -> Vec<u8> {
    let body = format!(
        r#""NAK"0000R0L0A0[]{}"#,
        timestamp_suffix(chrono_tz::Tz::UTC)
    );
    frame_response(&body)
}

/// `_HH:MM:SS,MM-DD-YYYY` rendered in the given timezone.
fn timestamp_suffix(tz: Tz) -> String {
    format!("_{}", Utc::now().with_timezone(&tz).format(TIMESTAMP_FORMAT))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::AccountRegistry;

    const KEY: &str = "AAAAAAAAAAAAAAAA";

    fn accounts(key: Option<&str>) -> AccountRegistry {
        let account = SiaAccount::new("AAA", key.map(str::to_string))
            .unwrap()
            .with_timeband(None);
        AccountRegistry::new(vec![account])
    }

    fn build_line(body: &str) -> Vec<u8> {
        let mut line = crc::checksum_hex(body);
        line.push_str(&format!("{:04X}", body.len()));
        line.push_str(body);
        line.into_bytes()
    }

    #[test]
    fn test_closing_report_acks() {
        let registry = accounts(None);
        let raw = br#"E5D50078"SIA-DCS"6002L0#AAA[|Nri1/CL501]_14:12:04,09-25-2019"#;
        let event = Event::parse(raw, &registry.snapshot()).unwrap();
        assert_eq!(event.response_type(), Some(ResponseType::Ack));
        let response = String::from_utf8(event.create_response().unwrap()).unwrap();
        assert!(response.starts_with('\n'));
        assert!(response.ends_with('\r'));
        assert!(response.contains(r#""ACK"6002R0L0#AAA[]"#));
        let dispatched = event.dispatchable().unwrap();
        assert_eq!(dispatched.code.as_deref(), Some("CL"));
        assert_eq!(dispatched.ri.as_deref(), Some("1"));
        assert_eq!(dispatched.sia_code.unwrap().kind, "Closing Report");
    }

    #[test]
    fn test_response_frame_crc_is_consistent() {
        let registry = accounts(None);
        let raw = br#"E5D50078"SIA-DCS"6002L0#AAA[|Nri1/CL501]_14:12:04,09-25-2019"#;
        let event = Event::parse(raw, &registry.snapshot()).unwrap();
        let response = event.create_response().unwrap();
        let inner = &response[9..response.len() - 1];
        let inner = std::str::from_utf8(inner).unwrap();
        let crc = std::str::from_utf8(&response[1..5]).unwrap();
        assert_eq!(crc, crc::checksum_hex(inner));
        let length = std::str::from_utf8(&response[5..9]).unwrap();
        assert_eq!(usize::from_str_radix(length, 16).unwrap(), inner.len());
    }

    #[test]
    fn test_unknown_code_gets_duh() {
        let registry = accounts(None);
        let body = r#""SIA-DCS"6002L0#AAA[|Nri1/ZX000]_14:12:04,09-25-2019"#;
        let event = Event::parse(&build_line(body), &registry.snapshot()).unwrap();
        assert_eq!(event.response_type(), Some(ResponseType::Duh));
        let response = String::from_utf8(event.create_response().unwrap()).unwrap();
        assert!(response.contains(r#""DUH"6002R0L0#AAA[]"#));
        assert!(event.dispatchable().is_none());
    }

    #[test]
    fn test_crc_mismatch_is_silent() {
        let registry = accounts(None);
        let raw = br#"AAAA0078"SIA-DCS"6002L0#AAA[|Nri1/CL501]_14:12:04,09-25-2019"#;
        let event = Event::parse(raw, &registry.snapshot()).unwrap();
        assert_eq!(event.response_type(), None);
        assert!(event.create_response().is_none());
        assert!(event.dispatchable().is_none());
    }

    #[test]
    fn test_unknown_account_naks() {
        let registry = accounts(None);
        let body = r#""SIA-DCS"6002L0#BBB[|Nri1/CL501]_14:12:04,09-25-2019"#;
        let event = Event::parse(&build_line(body), &registry.snapshot()).unwrap();
        assert_eq!(event.response_type(), Some(ResponseType::Nak));
        let response = String::from_utf8(event.create_response().unwrap()).unwrap();
        assert!(response.contains(r#""NAK"0000R0L0A0[]_"#));
    }

    #[test]
    fn test_account_resolved_from_body() {
        let registry = AccountRegistry::new(vec![SiaAccount::new("006969", None)
            .unwrap()
            .with_timeband(None)]);
        let body = r#""SIA-DCS"4738R0001L0001[#006969|Nri04/OP001NM]"#;
        let event = Event::parse(&build_line(body), &registry.snapshot()).unwrap();
        assert_eq!(event.response_type(), Some(ResponseType::Ack));
        let response = String::from_utf8(event.create_response().unwrap()).unwrap();
        assert!(response.contains(r#""ACK"4738R0001L0001#006969[]"#));
    }

    #[test]
    fn test_stale_timestamp_naks() {
        let account = SiaAccount::new("AAA", None).unwrap();
        let registry = AccountRegistry::new(vec![account]);
        let body = r#""SIA-DCS"6002L0#AAA[|Nri1/CL501]_14:12:04,09-25-2019"#;
        let event = Event::parse(&build_line(body), &registry.snapshot()).unwrap();
        assert_eq!(event.response_type(), Some(ResponseType::Nak));
    }

    #[test]
    fn test_encrypted_null_heartbeat() {
        let registry = accounts(Some(KEY));
        let now = Utc::now().format(TIMESTAMP_FORMAT);
        let ciphertext = crypto::encrypt_hex(KEY.as_bytes(), &format!("]_{now}")).unwrap();
        let body = format!(r#""*NULL"0000R0L0#AAA[{ciphertext}"#);
        let event = Event::parse(&build_line(&body), &registry.snapshot()).unwrap();
        assert_eq!(event.response_type(), Some(ResponseType::Ack));
        let response = String::from_utf8(event.create_response().unwrap()).unwrap();
        assert!(response.contains(r#""*ACK"0000R0L0#AAA["#));
        // encrypted reply body is hex of whole blocks
        let ciphertext = response
            .rsplit('[')
            .next()
            .unwrap()
            .trim_end_matches('\r');
        assert_eq!(ciphertext.len() % 32, 0);
        let plain = crypto::decrypt_hex(KEY.as_bytes(), ciphertext).unwrap();
        assert!(plain.contains(']'));
        let dispatched = event.dispatchable().unwrap();
        assert_eq!(dispatched.code.as_deref(), Some("RP"));
        assert_eq!(dispatched.ri.as_deref(), Some("0"));
    }

    #[test]
    fn test_encrypted_frame_without_account_is_no_account() {
        let registry = accounts(None); // AAA exists but has no key
        let ciphertext = crypto::encrypt_hex(KEY.as_bytes(), "]_12:00:00,01-01-2024").unwrap();
        let body = format!(r#""*NULL"0000R0L0#AAA[{ciphertext}"#);
        assert!(matches!(
            Event::parse(&build_line(&body), &registry.snapshot()),
            Err(EventError::NoAccount(_))
        ));
    }

    #[test]
    fn test_wrong_key_is_a_format_error() {
        let registry = accounts(Some(KEY));
        let ciphertext =
            crypto::encrypt_hex(b"BBBBBBBBBBBBBBBB", "]_12:00:00,01-01-2024").unwrap();
        let body = format!(r#""*NULL"0000R0L0#AAA[{ciphertext}"#);
        assert!(matches!(
            Event::parse(&build_line(&body), &registry.snapshot()),
            Err(EventError::Format(_))
        ));
    }

    #[test]
    fn test_rsp_key_exchange_echo() {
        let registry = accounts(Some(KEY));
        let now = Utc::now().format(TIMESTAMP_FORMAT);
        let plain = format!("|Nri1/RP000][K0000000000000000]_{now}");
        let ciphertext = crypto::encrypt_hex(KEY.as_bytes(), &plain).unwrap();
        let body = format!(r#""*SIA-DCS"1234R0L0#AAA[{ciphertext}"#);
        let event = Event::parse(&build_line(&body), &registry.snapshot()).unwrap();
        assert_eq!(event.response_type(), Some(ResponseType::Rsp));
        let response = String::from_utf8(event.create_response().unwrap()).unwrap();
        assert!(response.contains(r#""*RSP"1234R0L0#AAA["#));
        let ciphertext = response
            .rsplit('[')
            .next()
            .unwrap()
            .trim_end_matches('\r');
        let plain = crypto::decrypt_hex(KEY.as_bytes(), ciphertext).unwrap();
        assert!(plain.contains(&format!("[K{KEY}]")));
    }

    #[test]
    fn test_adm_cid_translation() {
        let registry = accounts(None);
        let body = r#""ADM-CID"9876R579BDFL789ABC#AAA[#AAA|1110 00 129]"#;
        let event = Event::parse(&build_line(body), &registry.snapshot()).unwrap();
        assert_eq!(event.response_type(), Some(ResponseType::Ack));
        let dispatched = event.dispatchable().unwrap();
        assert_eq!(dispatched.code.as_deref(), Some("FA"));
        assert_eq!(dispatched.event_type.as_deref(), Some("110"));
        assert_eq!(dispatched.partition.as_deref(), Some("00"));
        assert_eq!(dispatched.ri.as_deref(), Some("129"));
    }

    #[test]
    fn test_adm_unmapped_code_still_acks() {
        let registry = accounts(None);
        let body = r#""ADM-CID"9876R0L0#AAA[#AAA|6602 00 001]"#;
        let event = Event::parse(&build_line(body), &registry.snapshot()).unwrap();
        // qualifier 6 has no mapping, but DUH is reserved for SIA-DCS
        assert_eq!(event.response_type(), Some(ResponseType::Ack));
    }

    #[test]
    fn test_oh_heartbeat_acks_bare() {
        let registry = accounts(None);
        let event =
            Event::parse(b"SR0001L0001    006969XX    [ID00000000]", &registry.snapshot())
                .unwrap();
        assert_eq!(event.response_type(), Some(ResponseType::Ack));
        assert_eq!(event.create_response().unwrap(), b"\"ACK\"");
        let dispatched = event.dispatchable().unwrap();
        assert_eq!(dispatched.code.as_deref(), Some("RP"));
        assert_eq!(dispatched.message_type, MessageType::Oh);
        assert_eq!(dispatched.account.as_deref(), Some("006969XX"));
    }

    #[test]
    fn test_event_serializes_for_observability() {
        let registry = accounts(None);
        let raw = br#"E5D50078"SIA-DCS"6002L0#AAA[|Nri1/CL501]_14:12:04,09-25-2019"#;
        let Event::Sia(event) = Event::parse(raw, &registry.snapshot()).unwrap() else {
            panic!("expected a SIA event");
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""code":"CL""#));
        assert!(json.contains(r#""kind":"Closing Report""#));
        // the matched account record stays out of the serialized form
        assert!(!json.contains("account_record"));
    }

    #[test]
    fn test_nak_event_response() {
        let response = String::from_utf8(NakEvent.create_response()).unwrap();
        assert!(response.starts_with('\n'));
        assert!(response.contains(r#""NAK"0000R0L0A0[]_"#));
        assert!(response.ends_with('\r'));
    }
}
