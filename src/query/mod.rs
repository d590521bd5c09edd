
use chrono::{DateTime, Duration, Utc};

use crate::models::{Category, Direction, Transaction};

// Stateless presentation-side operations over a merged transaction set.
// Every function is pure: (set, parameters) -> filtered subset. Nothing here
// mutates the canonical set or triggers a refetch.

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum CategoryFilter {
    All,
    /// Credits of any category.
    Received,
    /// Debits that are not withdrawals (sent contributions, item payments).
    Sent,
    /// Exactly `category == Withdrawal`.
    Withdrawals
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DateRange {
    Today,
    Last7Days,
    Last30Days,
    Custom {
        from: DateTime<Utc>,
        to: DateTime<Utc>
    }
}

pub fn filter_category(transactions: &[Transaction], filter: CategoryFilter) -> Vec<Transaction> {
    transactions.iter()
        .filter(|transaction| matches_category(transaction, filter))
        .cloned()
        .collect()
}

/// Case-insensitive free-text search across title, description, counterparty
/// and the amount rendered as text. An empty query matches everything.
pub fn search(transactions: &[Transaction], query: &str) -> Vec<Transaction> {
    let needle = query.trim().to_lowercase();

    if needle.is_empty() {
        return transactions.to_vec();
    }

    transactions.iter()
        .filter(|transaction| {
            transaction.title.to_lowercase().contains(&needle)
                || transaction.description.to_lowercase().contains(&needle)
                || transaction.counterparty_handle.as_deref()
                    .is_some_and(|handle| handle.to_lowercase().contains(&needle))
                || transaction.amount.to_string().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Inclusive date-window filter. `now` is passed in rather than read from the
/// clock so the operation stays pure.
pub fn filter_date_range(transactions: &[Transaction], range: DateRange, now: DateTime<Utc>) -> Vec<Transaction> {
    let (from, to) = match range {
        DateRange::Today => (start_of_day(now), now),
        DateRange::Last7Days => (now - Duration::days(7), now),
        DateRange::Last30Days => (now - Duration::days(30), now),
        DateRange::Custom { from, to } => (from, to)
    };

    transactions.iter()
        .filter(|transaction| transaction.occurred_at >= from && transaction.occurred_at <= to)
        .cloned()
        .collect()
}

/// Zero-based page slicing. A zero page size yields an empty page.
pub fn paginate(transactions: &[Transaction], page: usize, per_page: usize) -> Vec<Transaction> {
    if per_page == 0 {
        return Vec::new();
    }

    transactions.iter()
        .skip(page.saturating_mul(per_page))
        .take(per_page)
        .cloned()
        .collect()
}

fn matches_category(transaction: &Transaction, filter: CategoryFilter) -> bool {
    match filter {
        CategoryFilter::All => true,
        CategoryFilter::Received => transaction.direction == Direction::Credit,
        CategoryFilter::Sent => {
            transaction.direction == Direction::Debit && transaction.category != Category::Withdrawal
        }
        CategoryFilter::Withdrawals => transaction.category == Category::Withdrawal
    }
}

fn start_of_day(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive()
        .and_hms_opt(0, 0, 0)
        .map(|midnight| midnight.and_utc())
        .unwrap_or(now)
}
