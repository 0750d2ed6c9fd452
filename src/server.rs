//! The frame pipeline, free of any I/O so the TCP, UDP, threaded and async
//! adapters all share it: split a byte stream into frames, parse and classify
//! each frame, keep the counters honest, and wrap the user callback so a
//! misbehaving handler cannot take the receive loop down.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use bytes::{Buf, BytesMut};
use futures::future::BoxFuture;
use futures::FutureExt;
use log::{debug, warn};

use crate::counter::Counter;
use crate::envelope::MessageType;
use crate::errors::EventError;
use crate::event::{Event, NakEvent, ResponseType, SiaEvent};
use crate::registry::AccountRegistry;

/// Synchronous user callback, one call per ACK'd event.
pub type EventHandler = Arc<dyn Fn(SiaEvent) + Send + Sync>;

/// Asynchronous user callback, one call per ACK'd event.
pub type AsyncEventHandler = Arc<dyn Fn(SiaEvent) -> BoxFuture<'static, ()> + Send + Sync>;

/// Per-connection scratch buffer. Frames end in `\r`; a leading `\n` is
/// stripped. Bytes after the last `\r` stay buffered until the next read, so
/// frames split across reads and back-to-back frames in one read both work.
#[derive(Debug, Default)]
pub struct FrameBuffer {
    buf: BytesMut,
}

impl FrameBuffer {
    pub fn new() -> FrameBuffer {
        FrameBuffer::default()
    }

    pub fn extend(&mut self, data: &[u8]) {
        self.buf.extend_from_slice(data);
    }

    /// The next complete frame, with framing bytes stripped. Empty frames
    /// are skipped.
    pub fn next_frame(&mut self) -> Option<Vec<u8>> {
        loop {
            let end = self.buf.iter().position(|&b| b == b'\r')?;
            let frame = trim_frame(&self.buf[..end]);
            let frame = (!frame.is_empty()).then(|| frame.to_vec());
            self.buf.advance(end + 1);
            if let Some(frame) = frame {
                return Some(frame);
            }
        }
    }

    /// Flush a trailing unterminated frame; used when the peer closes the
    /// connection or a datagram carries no `\r`.
    pub fn drain(&mut self) -> Option<Vec<u8>> {
        let frame = trim_frame(&self.buf);
        let frame = (!frame.is_empty()).then(|| frame.to_vec());
        self.buf.clear();
        frame
    }
}

fn trim_frame(raw: &[u8]) -> &[u8] {
    let start = raw.iter().position(|&b| b != b'\n').unwrap_or(raw.len());
    &raw[start..]
}

/// The pipeline core shared by every transport adapter. Cloning is cheap and
/// shares the registry and counters.
#[derive(Clone)]
pub struct Handler {
    registry: Arc<AccountRegistry>,
    counter: Arc<Counter>,
}

impl Handler {
    pub fn new(registry: Arc<AccountRegistry>, counter: Arc<Counter>) -> Handler {
        Handler { registry, counter }
    }

    pub fn counter(&self) -> &Counter {
        &self.counter
    }

    /// Parse one frame and classify it, counting the outcome. Checks happen
    /// in classification order so each frame lands in exactly one category.
    pub fn parse_and_check(&self, raw: &[u8]) -> Event {
        self.counter.increment_events();
        debug!("incoming frame: {}", String::from_utf8_lossy(raw));
        let accounts = self.registry.snapshot();
        let event = match Event::parse(raw, &accounts) {
            Ok(event) => event,
            Err(EventError::NoAccount(line)) => {
                warn!("no usable account for encrypted frame: {line}");
                self.counter.increment_error_account();
                return Event::Nak(NakEvent);
            }
            Err(EventError::Format(line)) => {
                warn!("frame did not parse: {line}");
                self.counter.increment_error_format();
                return Event::Nak(NakEvent);
            }
        };
        if let Event::Sia(event) = &event {
            if event.account_record().is_none() {
                warn!(
                    "unknown account {} in frame: {}",
                    event.account.as_deref().unwrap_or("<none>"),
                    event.full_message
                );
                self.counter.increment_error_account();
            } else if !event.valid_message() {
                warn!(
                    "CRC mismatch, discarding frame. sent {:04X}, calculated {:04X}: {}",
                    event.crc_sent, event.crc_calc, event.full_message
                );
                self.counter.increment_error_crc();
            } else if !event.valid_timestamp() {
                warn!("timestamp outside timeband: {:?}", event.timestamp);
                self.counter.increment_error_timestamp();
            } else if event.code_not_found() && event.message_type == MessageType::SiaDcs {
                warn!(
                    "unknown SIA code {}, replying DUH to account {}",
                    event.code.as_deref().unwrap_or("<none>"),
                    event.account.as_deref().unwrap_or("<none>")
                );
                self.counter.increment_error_code();
            } else if event.response_type() == Some(ResponseType::Rsp) {
                // answered with RSP, no callback runs; settle the frame here
                self.counter.increment_valid_events();
            }
        }
        event
    }

    /// The whole pipeline for one frame: `(response bytes, event to
    /// dispatch)`. A `None` response means silent discard.
    pub fn handle_frame(&self, raw: &[u8]) -> (Option<Vec<u8>>, Option<SiaEvent>) {
        let event = self.parse_and_check(raw);
        (event.create_response(), event.dispatchable())
    }

    /// Run the synchronous user callback. Panics are contained and counted;
    /// the ACK already left the socket by the time this runs.
    pub fn dispatch(&self, handler: &EventHandler, event: SiaEvent) {
        let result = std::panic::catch_unwind(AssertUnwindSafe(|| handler(event)));
        self.settle_dispatch(result);
    }

    /// Run the asynchronous user callback, same contract as `dispatch`.
    pub async fn dispatch_async(&self, handler: &AsyncEventHandler, event: SiaEvent) {
        let result = AssertUnwindSafe(handler(event)).catch_unwind().await;
        self.settle_dispatch(result);
    }

    fn settle_dispatch(&self, result: Result<(), Box<dyn std::any::Any + Send>>) {
        match result {
            Ok(()) => self.counter.increment_valid_events(),
            Err(_) => {
                warn!("user callback panicked");
                self.counter.increment_error_user_code();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::SiaAccount;
    use crate::crc;

    fn handler() -> Handler {
        let account = SiaAccount::new("AAA", None).unwrap().with_timeband(None);
        Handler::new(
            Arc::new(AccountRegistry::new(vec![account])),
            Arc::new(Counter::new()),
        )
    }

    fn build_line(body: &str) -> Vec<u8> {
        format!("{}{:04X}{}", crc::checksum_hex(body), body.len(), body).into_bytes()
    }

    #[test]
    fn test_frame_buffer_splits_back_to_back() {
        let mut buffer = FrameBuffer::new();
        buffer.extend(b"\nAAAA\r\nBBBB\r");
        assert_eq!(buffer.next_frame().as_deref(), Some(&b"AAAA"[..]));
        assert_eq!(buffer.next_frame().as_deref(), Some(&b"BBBB"[..]));
        assert_eq!(buffer.next_frame(), None);
    }

    #[test]
    fn test_frame_buffer_keeps_partial_frames() {
        let mut buffer = FrameBuffer::new();
        buffer.extend(b"\nAAAA");
        assert_eq!(buffer.next_frame(), None);
        buffer.extend(b"BB\r\nCC");
        assert_eq!(buffer.next_frame().as_deref(), Some(&b"AAAABB"[..]));
        assert_eq!(buffer.next_frame(), None);
        assert_eq!(buffer.drain().as_deref(), Some(&b"CC"[..]));
        assert_eq!(buffer.drain(), None);
    }

    #[test]
    fn test_frame_buffer_skips_empty_frames() {
        let mut buffer = FrameBuffer::new();
        buffer.extend(b"\r\n\r\nAAAA\r");
        assert_eq!(buffer.next_frame().as_deref(), Some(&b"AAAA"[..]));
    }

    #[test]
    fn test_counters_follow_classification_order() {
        let handler = handler();

        // valid frame: events only until the callback settles
        let body = r#""SIA-DCS"6002L0#AAA[|Nri1/CL501]_14:12:04,09-25-2019"#;
        let (response, event) = handler.handle_frame(&build_line(body));
        assert!(response.is_some());
        let user: EventHandler = Arc::new(|_| {});
        handler.dispatch(&user, event.unwrap());
        assert_eq!(handler.counter().events(), 1);
        assert_eq!(handler.counter().valid_events(), 1);

        // unparseable frame
        let (response, event) = handler.handle_frame(b"This is not a SIA Event.");
        assert!(response.is_some());
        assert!(event.is_none());
        assert_eq!(handler.counter().error_format(), 1);

        // CRC mismatch is silent
        let bad = format!(r#"0000{:04X}{body}"#, body.len());
        let (response, event) = handler.handle_frame(bad.as_bytes());
        assert!(response.is_none());
        assert!(event.is_none());
        assert_eq!(handler.counter().error_crc(), 1);

        // unknown account
        let unknown = r#""SIA-DCS"6002L0#BBB[|Nri1/CL501]_14:12:04,09-25-2019"#;
        let (response, _) = handler.handle_frame(&build_line(unknown));
        assert!(response.is_some());
        assert_eq!(handler.counter().error_account(), 1);

        // unknown code
        let duh = r#""SIA-DCS"6002L0#AAA[|Nri1/ZX000]_14:12:04,09-25-2019"#;
        let (response, event) = handler.handle_frame(&build_line(duh));
        assert!(response.is_some());
        assert!(event.is_none());
        assert_eq!(handler.counter().error_code(), 1);

        let snap = handler.counter().snapshot();
        assert_eq!(snap.events, 5);
        assert_eq!(snap.events, snap.valid_events + snap.errors());
    }

    #[test]
    fn test_rsp_frame_settles_without_dispatch() {
        let handler = handler();
        let body = r#""SIA-DCS"6002L0#AAA[|Nri1/RP000][K0000000000000000]_14:12:04,09-25-2019"#;
        let (response, event) = handler.handle_frame(&build_line(body));
        let response = String::from_utf8(response.unwrap()).unwrap();
        assert!(response.contains(r#""RSP"6002R0L0#AAA[]"#), "response: {response}");
        // key exchange answers are not handed to the callback
        assert!(event.is_none());
        let snap = handler.counter().snapshot();
        assert_eq!(snap.events, 1);
        assert_eq!(snap.valid_events, 1);
        assert_eq!(snap.events, snap.valid_events + snap.errors());
    }

    #[test]
    fn test_panicking_callback_is_counted() {
        let handler = handler();
        let body = r#""SIA-DCS"6002L0#AAA[|Nri1/CL501]_14:12:04,09-25-2019"#;
        let (_, event) = handler.handle_frame(&build_line(body));
        let user: EventHandler = Arc::new(|_| panic!("test error in user func"));
        handler.dispatch(&user, event.unwrap());
        assert_eq!(handler.counter().error_user_code(), 1);
        assert_eq!(handler.counter().valid_events(), 0);
        let snap = handler.counter().snapshot();
        assert_eq!(snap.events, snap.valid_events + snap.errors());
    }

    #[tokio::test]
    async fn test_async_dispatch_contains_panics() {
        let handler = handler();
        let body = r#""SIA-DCS"6002L0#AAA[|Nri1/CL501]_14:12:04,09-25-2019"#;
        let (_, event) = handler.handle_frame(&build_line(body));
        let user: AsyncEventHandler =
            Arc::new(|_| async { panic!("test error in user func") }.boxed());
        handler.dispatch_async(&user, event.unwrap()).await;
        assert_eq!(handler.counter().error_user_code(), 1);
    }
}
