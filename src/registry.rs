//! Runtime account lookup. Readers take an immutable snapshot of the whole
//! map; a runtime account change swaps the map in one atomic operation, so a
//! frame in flight never observes a half-updated view.

use std::collections::HashMap;
use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::account::SiaAccount;

pub type AccountMap = HashMap<String, SiaAccount>;

#[derive(Debug, Default)]
pub struct AccountRegistry {
    accounts: ArcSwap<AccountMap>,
}

impl AccountRegistry {
    pub fn new(accounts: Vec<SiaAccount>) -> AccountRegistry {
        let registry = AccountRegistry::default();
        registry.replace(accounts);
        registry
    }

    /// Atomically replace every account.
    pub fn replace(&self, accounts: Vec<SiaAccount>) {
        let map: AccountMap = accounts
            .into_iter()
            .map(|a| (a.account_id().to_string(), a))
            .collect();
        self.accounts.store(Arc::new(map));
    }

    /// A consistent view of the map, valid for the lifetime of one frame.
    pub fn snapshot(&self) -> Arc<AccountMap> {
        self.accounts.load_full()
    }

    /// The configured accounts, in no particular order.
    pub fn accounts(&self) -> Vec<SiaAccount> {
        self.snapshot().values().cloned().collect()
    }
}
