#[cfg(test)]
mod tests;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{Category, ClaimRow, ContributionRow, Direction, LedgerRow, Transaction, WithdrawalRow};
use crate::resolver::{IdentityResolver, IdentitySignals};
use crate::types::AccountId;

// Trailing payment-reference fragment, e.g. `... - ref:abc123`.
static REFERENCE_FRAGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\s*[-–—]?\s*ref:\s*\S+\s*$").expect("reference fragment pattern"));

static QUOTED_TITLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""([^"]+)""#).expect("quoted title pattern"));

static FOR_TITLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bfor\s+(.+?)(?:\s+from\s|\s+to\s|$)").expect("for-title pattern"));

/// Removes trailing payment-reference fragments from free text.
pub fn strip_reference(description: &str) -> String {
    REFERENCE_FRAGMENT.replace(description, "").trim().to_string()
}

/// Pulls a human title out of free text: a quoted substring first, then the
/// tail of a "for <title>" fragment.
pub fn extract_title(description: &str) -> Option<String> {
    if let Some(capture) = QUOTED_TITLE.captures(description).and_then(|c| c.get(1)) {
        let title = capture.as_str().trim();

        if !title.is_empty() {
            return Some(title.to_string());
        }
    }

    FOR_TITLE.captures(description)
        .and_then(|captures| captures.get(1))
        .map(|capture| capture.as_str().trim().trim_matches('"').trim().to_string())
        .filter(|title| !title.is_empty())
}

// Keyword classifier for postings whose category is only evident from text.
// Falls back to the plain ledger-posting category when nothing matches.
fn classify_ledger(row: &LedgerRow, description: &str) -> Category {
    let text = format!("{} {}", row.source_tag.as_deref().unwrap_or(""), description).to_lowercase();

    if text.contains("contribution") {
        return match row.direction {
            Direction::Credit => Category::ContributionReceived,
            Direction::Debit => Category::ContributionSent
        };
    }

    if text.contains("payout") || text.contains("withdraw") {
        return Category::Withdrawal;
    }

    if text.contains("refund") {
        return Category::Other;
    }

    if text.contains("wishlist") || text.contains("cash payment") {
        return match row.direction {
            Direction::Credit => Category::ItemPaymentReceived,
            Direction::Debit => Category::ItemPaymentSent
        };
    }

    Category::LedgerPosting
}

pub fn normalize_ledger(account_id: AccountId, row: &LedgerRow, resolver: &IdentityResolver) -> Transaction {
    let description = strip_reference(&row.description);
    let title = extract_title(&description).unwrap_or_else(|| {
        match row.direction {
            Direction::Credit => "Wallet credit".to_string(),
            Direction::Debit => "Wallet debit".to_string()
        }
    });
    let counterparty_handle = resolver.resolve(&IdentitySignals {
        structural_handle: row.counterparty_handle.as_deref(),
        display_name: None,
        description: Some(&description)
    });

    Transaction {
        id: format!("ldg_{}", row.id),
        account_id,
        direction: row.direction,
        category: classify_ledger(row, &description),
        amount: row.amount,
        title,
        description,
        counterparty_handle,
        status: None,
        occurred_at: row.occurred_at
    }
}

pub fn normalize_contribution_received(account_id: AccountId, row: &ContributionRow, resolver: &IdentityResolver) -> Transaction {
    // Anonymous pledges never expose an identity, whatever the row carries.
    let counterparty_handle = if row.is_anonymous {
        None
    } else {
        resolver.resolve(&IdentitySignals {
            structural_handle: row.supporter_handle.as_deref(),
            display_name: row.display_name.as_deref(),
            description: None
        })
    };

    Transaction {
        id: format!("ctr_{}", row.id),
        account_id,
        direction: Direction::Credit,
        category: Category::ContributionReceived,
        amount: row.amount,
        title: row.goal_title.clone(),
        description: format!("Contribution received for \"{}\"", row.goal_title),
        counterparty_handle,
        status: None,
        occurred_at: row.occurred_at
    }
}

pub fn normalize_contribution_sent(account_id: AccountId, row: &ContributionRow, resolver: &IdentityResolver) -> Transaction {
    let counterparty_handle = resolver.resolve(&IdentitySignals {
        structural_handle: row.destination_owner_handle.as_deref(),
        display_name: None,
        description: None
    });

    Transaction {
        id: format!("cts_{}", row.id),
        account_id,
        direction: Direction::Debit,
        category: Category::ContributionSent,
        amount: row.amount,
        title: row.goal_title.clone(),
        description: format!("Contribution sent toward \"{}\"", row.goal_title),
        counterparty_handle,
        status: None,
        occurred_at: row.occurred_at
    }
}

pub fn normalize_withdrawal(account_id: AccountId, row: &WithdrawalRow) -> Transaction {
    let description = match row.bank_details.as_deref() {
        Some(bank) => format!("Payout to {bank}"),
        None => "Payout request".to_string()
    };

    Transaction {
        id: format!("wdr_{}", row.id),
        account_id,
        direction: Direction::Debit,
        category: Category::Withdrawal,
        amount: row.amount,
        title: "Withdrawal".to_string(),
        description,
        counterparty_handle: None,
        status: Some(row.status),
        occurred_at: row.occurred_at
    }
}

pub fn normalize_claim_sent(account_id: AccountId, row: &ClaimRow, resolver: &IdentityResolver) -> Transaction {
    let counterparty_handle = resolver.resolve(&IdentitySignals {
        structural_handle: row.counterparty_handle.as_deref(),
        display_name: row.owner_display_name.as_deref(),
        description: None
    });

    Transaction {
        id: format!("itm_{}", row.id),
        account_id,
        direction: Direction::Debit,
        category: Category::ItemPaymentSent,
        amount: row.amount,
        title: row.item_name.clone(),
        description: format!("Payment for \"{}\"", row.item_name),
        counterparty_handle,
        status: None,
        occurred_at: row.occurred_at
    }
}
