use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::{ClaimRow, ContributionRow, Direction, LedgerRow, WithdrawalRow, WithdrawalStatus};
use crate::stores::{ClaimStore, ContributionStore, IdentityDirectory, LedgerStore, WithdrawalStore};
use crate::types::{AccountId, StoreError};

/// Settlement state shared by the fixture stores that filter on it.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    Pending,
    Settled,
    Failed
}

/// One JSON document holding every upstream store's rows plus the identity
/// directory. Backs the CLI and the test suite.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Fixture {
    #[serde(default)]
    pub ledger: Vec<LedgerFixtureRow>,
    #[serde(default)]
    pub contributions: Vec<ContributionFixtureRow>,
    #[serde(default)]
    pub withdrawals: Vec<WithdrawalFixtureRow>,
    #[serde(default)]
    pub claims: Vec<ClaimFixtureRow>,
    #[serde(default)]
    pub directory: HashMap<String, String>
}

#[derive(Debug, Clone, Deserialize)]
pub struct LedgerFixtureRow {
    pub id: u64,
    pub account_id: AccountId,
    pub direction: Direction,
    pub amount: Decimal,
    pub description: String,
    pub status: RecordStatus,
    #[serde(default)]
    pub source_tag: Option<String>,
    #[serde(default)]
    pub counterparty_handle: Option<String>,
    pub occurred_at: DateTime<Utc>
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContributionFixtureRow {
    pub id: u64,
    pub amount: Decimal,
    pub goal_title: String,
    pub goal_owner_id: AccountId,
    pub status: RecordStatus,
    #[serde(default)]
    pub supporter_id: Option<AccountId>,
    #[serde(default)]
    pub supporter_handle: Option<String>,
    #[serde(default)]
    pub destination_owner_handle: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub is_anonymous: bool,
    pub occurred_at: DateTime<Utc>
}

#[derive(Debug, Clone, Deserialize)]
pub struct WithdrawalFixtureRow {
    pub id: u64,
    pub account_id: AccountId,
    pub amount: Decimal,
    pub status: WithdrawalStatus,
    #[serde(default)]
    pub bank_details: Option<String>,
    pub occurred_at: DateTime<Utc>
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClaimFixtureRow {
    pub id: u64,
    pub buyer_id: AccountId,
    pub item_name: String,
    pub amount: Decimal,
    pub status: RecordStatus,
    #[serde(default)]
    pub counterparty_handle: Option<String>,
    #[serde(default)]
    pub owner_display_name: Option<String>,
    pub occurred_at: DateTime<Utc>
}

/// In-memory implementation of all five store contracts over one fixture.
#[derive(Debug, Clone, Default)]
pub struct MemoryStores {
    fixture: Fixture
}

impl MemoryStores {
    pub fn new(fixture: Fixture) -> Self {
        Self { fixture }
    }
}

impl LedgerStore for MemoryStores {
    async fn list_postings(&self, account_id: AccountId) -> Result<Vec<LedgerRow>, StoreError> {
        Ok(self.fixture.ledger.iter()
            .filter(|row| row.account_id == account_id && row.status == RecordStatus::Settled)
            .map(|row| LedgerRow {
                id: row.id,
                direction: row.direction,
                amount: row.amount,
                description: row.description.clone(),
                source_tag: row.source_tag.clone(),
                counterparty_handle: row.counterparty_handle.clone(),
                occurred_at: row.occurred_at
            })
            .collect())
    }
}

impl ContributionStore for MemoryStores {
    async fn list_received(&self, owner_id: AccountId) -> Result<Vec<ContributionRow>, StoreError> {
        Ok(self.fixture.contributions.iter()
            .filter(|row| row.goal_owner_id == owner_id && row.status == RecordStatus::Settled)
            .map(to_contribution_row)
            .collect())
    }

    async fn list_sent(&self, supporter_id: AccountId) -> Result<Vec<ContributionRow>, StoreError> {
        Ok(self.fixture.contributions.iter()
            .filter(|row| row.supporter_id == Some(supporter_id) && row.status == RecordStatus::Settled)
            .map(to_contribution_row)
            .collect())
    }
}

impl WithdrawalStore for MemoryStores {
    async fn list_requests(&self, account_id: AccountId) -> Result<Vec<WithdrawalRow>, StoreError> {
        Ok(self.fixture.withdrawals.iter()
            .filter(|row| row.account_id == account_id)
            .map(|row| WithdrawalRow {
                id: row.id,
                amount: row.amount,
                status: row.status,
                bank_details: row.bank_details.clone(),
                occurred_at: row.occurred_at
            })
            .collect())
    }
}

impl ClaimStore for MemoryStores {
    async fn list_confirmed_by(&self, account_id: AccountId) -> Result<Vec<ClaimRow>, StoreError> {
        Ok(self.fixture.claims.iter()
            .filter(|row| row.buyer_id == account_id && row.status == RecordStatus::Settled)
            .map(|row| ClaimRow {
                id: row.id,
                item_name: row.item_name.clone(),
                amount: row.amount,
                counterparty_handle: row.counterparty_handle.clone(),
                owner_display_name: row.owner_display_name.clone(),
                occurred_at: row.occurred_at
            })
            .collect())
    }
}

impl IdentityDirectory for MemoryStores {
    async fn lookup_handles(&self, display_names: &[String]) -> Result<HashMap<String, String>, StoreError> {
        Ok(display_names.iter()
            .filter_map(|name| {
                self.fixture.directory.get(name)
                    .map(|handle| (name.clone(), handle.clone()))
            })
            .collect())
    }
}

fn to_contribution_row(row: &ContributionFixtureRow) -> ContributionRow {
    ContributionRow {
        id: row.id,
        amount: row.amount,
        goal_title: row.goal_title.clone(),
        goal_owner_id: row.goal_owner_id,
        destination_owner_handle: row.destination_owner_handle.clone(),
        supporter_handle: row.supporter_handle.clone(),
        display_name: row.display_name.clone(),
        is_anonymous: row.is_anonymous,
        occurred_at: row.occurred_at
    }
}
