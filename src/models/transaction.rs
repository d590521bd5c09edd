use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Category, Direction, WithdrawalStatus};
use crate::types::AccountId;

/// One canonical entry in an account's merged transaction history.
///
/// Derived, never persisted: every merge run rebuilds the full set from the
/// upstream stores. The `id` is `<source-tag>_<natural-key>` so that rows
/// from different origins can never collide even when their natural keys
/// overlap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    /// Globally unique within a merge result.
    pub id: String,
    /// The owning account.
    pub account_id: AccountId,
    pub direction: Direction,
    pub category: Category,
    /// Always non-negative; see `Direction` for sign semantics.
    pub amount: Decimal,
    pub title: String,
    /// Cleaned display text, payment-reference fragments stripped.
    pub description: String,
    /// Resolved counterparty, or `None` when every resolution rule missed.
    pub counterparty_handle: Option<String>,
    /// `Some` only for withdrawals.
    pub status: Option<WithdrawalStatus>,
    /// Merge and display ordering key.
    pub occurred_at: DateTime<Utc>
}
