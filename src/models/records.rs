use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::{Direction, WithdrawalStatus};
use crate::types::AccountId;

// Raw rows as the upstream stores hand them over, one shape per source.
// These never travel past the normalizer boundary. Optional fields are
// genuinely optional upstream (schema drift): the resolver and normalizer
// fall back to the next-best signal when they are absent.

/// A direct posting against the account balance.
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerRow {
    pub id: u64,
    pub direction: Direction,
    pub amount: Decimal,
    pub description: String,
    /// Subsystem that recorded the posting. Withdrawal-tagged postings are
    /// served exclusively by the withdrawal store and skipped here.
    #[serde(default)]
    pub source_tag: Option<String>,
    #[serde(default)]
    pub counterparty_handle: Option<String>,
    pub occurred_at: DateTime<Utc>
}

/// A settled crowdfunding pledge toward a goal.
#[derive(Debug, Clone, Deserialize)]
pub struct ContributionRow {
    pub id: u64,
    pub amount: Decimal,
    pub goal_title: String,
    pub goal_owner_id: AccountId,
    #[serde(default)]
    pub destination_owner_handle: Option<String>,
    #[serde(default)]
    pub supporter_handle: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub is_anonymous: bool,
    pub occurred_at: DateTime<Utc>
}

/// A payout request, any status.
#[derive(Debug, Clone, Deserialize)]
pub struct WithdrawalRow {
    pub id: u64,
    pub amount: Decimal,
    pub status: WithdrawalStatus,
    #[serde(default)]
    pub bank_details: Option<String>,
    pub occurred_at: DateTime<Utc>
}

/// A confirmed purchase claim against a wishlist item.
#[derive(Debug, Clone, Deserialize)]
pub struct ClaimRow {
    pub id: u64,
    pub item_name: String,
    pub amount: Decimal,
    /// Handle of the item's owner, when the claim store recorded it.
    #[serde(default)]
    pub counterparty_handle: Option<String>,
    #[serde(default)]
    pub owner_display_name: Option<String>,
    pub occurred_at: DateTime<Utc>
}
