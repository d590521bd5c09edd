use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Category, Direction, Transaction, WithdrawalStatus};

/// Aggregates derived from one merged transaction set.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct AccountSummary {
    /// Total credits minus paid withdrawals.
    pub balance: Decimal,
    /// Sum of all credit amounts.
    pub total_received: Decimal,
    /// Sum of withdrawal amounts across every status (disclosure figure).
    pub total_withdrawn: Decimal,
    /// Sum of withdrawal amounts still in requested/processing.
    pub pending_withdrawals: Decimal
}

impl AccountSummary {
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let mut total_received = Decimal::ZERO;
        let mut total_withdrawn = Decimal::ZERO;
        let mut settled_withdrawn = Decimal::ZERO;
        let mut pending_withdrawals = Decimal::ZERO;

        for transaction in transactions {
            if transaction.direction == Direction::Credit {
                total_received += transaction.amount;
            }

            if transaction.category == Category::Withdrawal {
                total_withdrawn += transaction.amount;

                match transaction.status {
                    Some(WithdrawalStatus::Paid) => settled_withdrawn += transaction.amount,
                    Some(WithdrawalStatus::Requested) | Some(WithdrawalStatus::Processing) => {
                        pending_withdrawals += transaction.amount
                    }
                    _ => {}
                }
            }
        }

        // Sent contributions and item payments are funded by the sender's
        // own payment method, not drawn from this wallet. Only paid
        // withdrawals reduce the balance.
        Self {
            balance: total_received - settled_withdrawn,
            total_received,
            total_withdrawn,
            pending_withdrawals
        }
    }
}
