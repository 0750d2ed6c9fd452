//! Pipeline counters. Every inbound frame lands in `events`; each frame then
//! either increments `valid_events` (the user callback ran, or the frame was
//! answered with RSP) or exactly one error category, so
//! `events >= valid_events + sum(errors)` holds at all times and is an
//! equality once the receiver is idle.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

#[derive(Debug, Default)]
pub struct Counter {
    events: AtomicU64,
    valid_events: AtomicU64,
    error_crc: AtomicU64,
    error_timestamp: AtomicU64,
    error_account: AtomicU64,
    error_code: AtomicU64,
    error_format: AtomicU64,
    error_user_code: AtomicU64,
}

/// Point-in-time copy of the counters, for logging or a stats endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CounterSnapshot {
    pub events: u64,
    pub valid_events: u64,
    pub error_crc: u64,
    pub error_timestamp: u64,
    pub error_account: u64,
    pub error_code: u64,
    pub error_format: u64,
    pub error_user_code: u64,
}

impl Counter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_events(&self) {
        self.events.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_valid_events(&self) {
        self.valid_events.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_error_crc(&self) {
        self.error_crc.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_error_timestamp(&self) {
        self.error_timestamp.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_error_account(&self) {
        self.error_account.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_error_code(&self) {
        self.error_code.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_error_format(&self) {
        self.error_format.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_error_user_code(&self) {
        self.error_user_code.fetch_add(1, Ordering::Relaxed);
    }

    pub fn events(&self) -> u64 {
        self.events.load(Ordering::Relaxed)
    }

    pub fn valid_events(&self) -> u64 {
        self.valid_events.load(Ordering::Relaxed)
    }

    pub fn error_crc(&self) -> u64 {
        self.error_crc.load(Ordering::Relaxed)
    }

    pub fn error_timestamp(&self) -> u64 {
        self.error_timestamp.load(Ordering::Relaxed)
    }

    pub fn error_account(&self) -> u64 {
        self.error_account.load(Ordering::Relaxed)
    }

    pub fn error_code(&self) -> u64 {
        self.error_code.load(Ordering::Relaxed)
    }

    pub fn error_format(&self) -> u64 {
        self.error_format.load(Ordering::Relaxed)
    }

    pub fn error_user_code(&self) -> u64 {
        self.error_user_code.load(Ordering::Relaxed)
    }

    pub fn snapshot(&self) -> CounterSnapshot {
        CounterSnapshot {
            events: self.events(),
            valid_events: self.valid_events(),
            error_crc: self.error_crc(),
            error_timestamp: self.error_timestamp(),
            error_account: self.error_account(),
            error_code: self.error_code(),
            error_format: self.error_format(),
            error_user_code: self.error_user_code(),
        }
    }
}

impl CounterSnapshot {
    /// Sum of all error categories.
    pub fn errors(&self) -> u64 {
        self.error_crc
            + self.error_timestamp
            + self.error_account
            + self.error_code
            + self.error_format
            + self.error_user_code
    }
}
