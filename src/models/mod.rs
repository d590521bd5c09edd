mod errors;
mod records;
#[cfg(test)]
mod tests;
mod transaction;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::{Display, Formatter};

pub use errors::EngineError;
pub use records::{ClaimRow, ContributionRow, LedgerRow, WithdrawalRow};
pub use transaction::Transaction;

/// Whether a transaction adds money to the account or moves it out.
///
/// Amounts are always stored non-negative; direction and category are the
/// only carriers of sign.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Credit,
    Debit
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    LedgerPosting,
    ContributionReceived,
    ContributionSent,
    Withdrawal,
    ItemPaymentSent,
    ItemPaymentReceived,
    Other
}

/// Lifecycle of a payout request. The only category where status survives
/// into the merged result; every other source is pre-filtered to settled.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WithdrawalStatus {
    Requested,
    Processing,
    Paid,
    Failed
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Credit => "credit",
            Direction::Debit => "debit"
        }
    }
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::LedgerPosting => "ledger-posting",
            Category::ContributionReceived => "contribution-received",
            Category::ContributionSent => "contribution-sent",
            Category::Withdrawal => "withdrawal",
            Category::ItemPaymentSent => "item-payment-sent",
            Category::ItemPaymentReceived => "item-payment-received",
            Category::Other => "other"
        }
    }
}

impl WithdrawalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WithdrawalStatus::Requested => "requested",
            WithdrawalStatus::Processing => "processing",
            WithdrawalStatus::Paid => "paid",
            WithdrawalStatus::Failed => "failed"
        }
    }
}

impl Display for Direction {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.as_str())
    }
}

impl Display for Category {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.as_str())
    }
}

impl Display for WithdrawalStatus {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.as_str())
    }
}
