//! Central-station receiver for the SIA DC-09 alarm reporting protocol.
//!
//! Alarm panels connect over TCP or UDP and send short CRC-protected,
//! optionally AES-encrypted frames (SIA-DCS, ADM-CID and NULL payloads, plus
//! legacy Osborne-Hoffman heartbeats). The receiver parses and validates each
//! frame, answers within protocol timing, and hands every acknowledged event
//! to a user callback. Two clients wrap the same pipeline:
//! [`aio::SiaClient`] runs on tokio, [`threaded::SiaClient`] on blocking
//! sockets with one worker per connection.

use serde::{Deserialize, Serialize};

pub mod account;
pub mod aio;
pub mod codes;
pub mod content;
pub mod counter;
pub mod crc;
pub mod crypto;
pub mod envelope;
pub mod errors;
pub mod event;
pub mod registry;
pub mod server;
pub mod threaded;

pub use account::SiaAccount;
pub use counter::{Counter, CounterSnapshot};
pub use envelope::MessageType;
pub use errors::{AccountError, DaemonError, EventError};
pub use event::{Event, NakEvent, OhEvent, ResponseType, SiaEvent};
pub use registry::AccountRegistry;
pub use server::{AsyncEventHandler, EventHandler};

/// Transport the receiver listens on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Tcp,
    Udp,
}
