// Callers await these futures inline; nothing boxes or spawns them.
#![allow(async_fn_in_trait)]

mod memory;

use std::collections::HashMap;

use crate::models::{ClaimRow, ContributionRow, LedgerRow, WithdrawalRow};
use crate::types::{AccountId, StoreError};

pub use memory::{ClaimFixtureRow, ContributionFixtureRow, Fixture, LedgerFixtureRow, MemoryStores, RecordStatus, WithdrawalFixtureRow};

/// Read contracts of the upstream record stores.
///
/// Each store applies its own settlement filter before handing rows over:
/// everything the engine sees is already settled, except withdrawals where
/// the status itself is data.

pub trait LedgerStore {
    /// Settled postings against the account, every source tag included.
    async fn list_postings(&self, account_id: AccountId) -> Result<Vec<LedgerRow>, StoreError>;
}

pub trait ContributionStore {
    /// Settled pledges toward goals owned by this account.
    async fn list_received(&self, owner_id: AccountId) -> Result<Vec<ContributionRow>, StoreError>;
    /// Settled pledges made by this account, own goals included.
    async fn list_sent(&self, supporter_id: AccountId) -> Result<Vec<ContributionRow>, StoreError>;
}

pub trait WithdrawalStore {
    /// Payout requests for this account, all statuses.
    async fn list_requests(&self, account_id: AccountId) -> Result<Vec<WithdrawalRow>, StoreError>;
}

pub trait ClaimStore {
    /// Confirmed purchase claims made by this account.
    async fn list_confirmed_by(&self, account_id: AccountId) -> Result<Vec<ClaimRow>, StoreError>;
}

/// Batch name-to-handle join used by identity resolution rule 2.
/// Called once per merge run with the distinct display names of the batch.
pub trait IdentityDirectory {
    async fn lookup_handles(&self, display_names: &[String]) -> Result<HashMap<String, String>, StoreError>;
}
