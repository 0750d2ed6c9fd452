//! Panel identity. An account pairs the hex id a panel reports with the
//! optional AES key used to decrypt its traffic, the timeband inside which
//! event timestamps are accepted, and the timezone the panel keeps its clock
//! in. Accounts are validated at construction and never mutated afterwards;
//! runtime changes replace the whole record through the registry.

use chrono_tz::Tz;

use crate::errors::AccountError;

pub const DEFAULT_TIMEBAND: (u32, u32) = (40, 20);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiaAccount {
    account_id: String,
    key: Option<String>,
    allowed_timeband: Option<(u32, u32)>,
    timezone: Tz,
}

impl SiaAccount {
    /// Build a validated account. The id is stored uppercase; the key, when
    /// present, is the 16/24/32 character hex string whose ASCII bytes form
    /// the AES key.
    pub fn new(
        account_id: impl Into<String>,
        key: Option<String>,
    ) -> Result<SiaAccount, AccountError> {
        let account_id = account_id.into();
        Self::validate(Some(&account_id), key.as_deref())?;
        Ok(SiaAccount {
            account_id: account_id.to_ascii_uppercase(),
            key,
            allowed_timeband: Some(DEFAULT_TIMEBAND),
            timezone: Tz::UTC,
        })
    }

    /// Override the timeband; `None` disables timestamp validation.
    pub fn with_timeband(mut self, timeband: Option<(u32, u32)>) -> SiaAccount {
        self.allowed_timeband = timeband;
        self
    }

    /// Set the timezone the panel's clock runs in.
    pub fn with_timezone(mut self, timezone: Tz) -> SiaAccount {
        self.timezone = timezone;
        self
    }

    /// Check account and key constraints without building anything. Either
    /// argument may be absent to check the other alone.
    pub fn validate(account_id: Option<&str>, key: Option<&str>) -> Result<(), AccountError> {
        if let Some(id) = account_id {
            if !id.chars().all(|c| c.is_ascii_hexdigit()) || id.is_empty() {
                return Err(AccountError::InvalidAccountFormat(id.to_string()));
            }
            if !(3..=16).contains(&id.len()) {
                return Err(AccountError::InvalidAccountLength(id.len()));
            }
        }
        if let Some(key) = key {
            if !key.chars().all(|c| c.is_ascii_hexdigit()) || key.is_empty() {
                return Err(AccountError::InvalidKeyFormat);
            }
            if !matches!(key.len(), 16 | 24 | 32) {
                return Err(AccountError::InvalidKeyLength(key.len()));
            }
        }
        Ok(())
    }

    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// The AES key bytes: the ASCII encoding of the configured key string.
    pub fn key_bytes(&self) -> Option<&[u8]> {
        self.key.as_deref().map(str::as_bytes)
    }

    pub fn encrypted(&self) -> bool {
        self.key.is_some()
    }

    pub fn allowed_timeband(&self) -> Option<(u32, u32)> {
        self.allowed_timeband
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }
}
