use super::{extract_title, normalize_claim_sent, normalize_contribution_received, normalize_contribution_sent, normalize_ledger, normalize_withdrawal, strip_reference};

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;

use crate::models::{Category, ContributionRow, ClaimRow, Direction, LedgerRow, WithdrawalRow, WithdrawalStatus};
use crate::resolver::IdentityResolver;

fn at(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, day, 10, 0, 0).single().unwrap()
}

fn ledger_row(description: &str) -> LedgerRow {
    LedgerRow {
        id: 42,
        direction: Direction::Credit,
        amount: Decimal::from(5000),
        description: description.to_string(),
        source_tag: None,
        counterparty_handle: None,
        occurred_at: at(10)
    }
}

#[test]
fn test_strip_reference_removes_trailing_fragment() {
    assert_eq!(strip_reference("Gift from @jane - ref:abc123"), "Gift from @jane");
    assert_eq!(strip_reference("Gift from @jane ref: xyz"), "Gift from @jane");
    assert_eq!(strip_reference("No reference here"), "No reference here");
}

#[test]
fn test_extract_title_prefers_quoted_substring() {
    assert_eq!(extract_title(r#"Cash payment for "Graduation Gift" from @jane"#).as_deref(), Some("Graduation Gift"));
    assert_eq!(extract_title("Top-up for birthday fund from @sam").as_deref(), Some("birthday fund"));
    assert_eq!(extract_title("Plain adjustment"), None);
}

#[test]
fn test_ledger_credit_normalization_scenario() {
    // The full worked example: title from quotes, handle from the
    // description, reference fragment stripped.
    let row = ledger_row(r#"Cash payment for "Graduation Gift" from @jane - ref:abc123"#);
    let transaction = normalize_ledger(1, &row, &IdentityResolver::empty());

    assert_eq!(transaction.id, "ldg_42");
    assert_eq!(transaction.title, "Graduation Gift");
    assert_eq!(transaction.counterparty_handle.as_deref(), Some("jane"));
    assert_eq!(transaction.description, r#"Cash payment for "Graduation Gift" from @jane"#);
    assert_eq!(transaction.category, Category::ItemPaymentReceived);
    assert_eq!(transaction.amount, Decimal::from(5000));
    assert!(transaction.status.is_none());
}

#[test]
fn test_ledger_classifier_keywords() {
    let classify = |description: &str, direction: Direction| {
        let mut row = ledger_row(description);
        row.direction = direction;
        normalize_ledger(1, &row, &IdentityResolver::empty()).category
    };

    assert_eq!(classify("Contribution received", Direction::Credit), Category::ContributionReceived);
    assert_eq!(classify("Contribution made", Direction::Debit), Category::ContributionSent);
    assert_eq!(classify("Manual payout correction", Direction::Debit), Category::Withdrawal);
    assert_eq!(classify("Refund issued", Direction::Credit), Category::Other);
    assert_eq!(classify("Wishlist settlement", Direction::Debit), Category::ItemPaymentSent);
    assert_eq!(classify("Balance adjustment", Direction::Credit), Category::LedgerPosting);
}

#[test]
fn test_ledger_structural_handle_beats_description_extraction() {
    let mut row = ledger_row("Gift from @someone_else");
    row.counterparty_handle = Some("maria".to_string());

    let transaction = normalize_ledger(1, &row, &IdentityResolver::empty());

    assert_eq!(transaction.counterparty_handle.as_deref(), Some("maria"));
}

#[test]
fn test_contribution_received_normalization() {
    let row = ContributionRow {
        id: 9,
        amount: Decimal::from(10000),
        goal_title: "New Laptop".to_string(),
        goal_owner_id: 1,
        destination_owner_handle: None,
        supporter_handle: Some("jane".to_string()),
        display_name: Some("Jane Doe".to_string()),
        is_anonymous: false,
        occurred_at: at(9)
    };

    let transaction = normalize_contribution_received(1, &row, &IdentityResolver::empty());

    assert_eq!(transaction.id, "ctr_9");
    assert_eq!(transaction.direction, Direction::Credit);
    assert_eq!(transaction.category, Category::ContributionReceived);
    assert_eq!(transaction.title, "New Laptop");
    assert_eq!(transaction.counterparty_handle.as_deref(), Some("jane"));
}

#[test]
fn test_anonymous_contribution_never_resolves_identity() {
    let row = ContributionRow {
        id: 10,
        amount: Decimal::from(500),
        goal_title: "New Laptop".to_string(),
        goal_owner_id: 1,
        destination_owner_handle: None,
        supporter_handle: Some("jane".to_string()),
        display_name: Some("Jane Doe".to_string()),
        is_anonymous: true,
        occurred_at: at(9)
    };

    let transaction = normalize_contribution_received(1, &row, &IdentityResolver::empty());

    assert_eq!(transaction.counterparty_handle, None);
}

#[test]
fn test_contribution_sent_is_a_debit_toward_the_goal_owner() {
    let row = ContributionRow {
        id: 11,
        amount: Decimal::from(2000),
        goal_title: "Camping Trip".to_string(),
        goal_owner_id: 2,
        destination_owner_handle: Some("mark".to_string()),
        supporter_handle: None,
        display_name: None,
        is_anonymous: false,
        occurred_at: at(8)
    };

    let transaction = normalize_contribution_sent(1, &row, &IdentityResolver::empty());

    assert_eq!(transaction.id, "cts_11");
    assert_eq!(transaction.direction, Direction::Debit);
    assert_eq!(transaction.category, Category::ContributionSent);
    assert_eq!(transaction.counterparty_handle.as_deref(), Some("mark"));
}

#[test]
fn test_withdrawal_normalization_keeps_status() {
    let row = WithdrawalRow {
        id: 4,
        amount: Decimal::from(3000),
        status: WithdrawalStatus::Processing,
        bank_details: Some("**** 4242".to_string()),
        occurred_at: at(7)
    };

    let transaction = normalize_withdrawal(1, &row);

    assert_eq!(transaction.id, "wdr_4");
    assert_eq!(transaction.category, Category::Withdrawal);
    assert_eq!(transaction.status, Some(WithdrawalStatus::Processing));
    assert_eq!(transaction.description, "Payout to **** 4242");
    assert_eq!(transaction.counterparty_handle, None);
}

#[test]
fn test_claim_sent_normalization() {
    let row = ClaimRow {
        id: 6,
        item_name: "Coffee Maker".to_string(),
        amount: Decimal::from(2500),
        counterparty_handle: None,
        owner_display_name: Some("ana_v".to_string()),
        occurred_at: at(6)
    };

    let transaction = normalize_claim_sent(1, &row, &IdentityResolver::empty());

    assert_eq!(transaction.id, "itm_6");
    assert_eq!(transaction.category, Category::ItemPaymentSent);
    assert_eq!(transaction.direction, Direction::Debit);
    // Handle-shaped display name is used verbatim when no structural link exists.
    assert_eq!(transaction.counterparty_handle.as_deref(), Some("ana_v"));
}

#[test]
fn test_normalization_is_deterministic() {
    let row = ledger_row(r#"Cash payment for "Graduation Gift" from @jane - ref:abc123"#);
    let resolver = IdentityResolver::empty();

    let first = normalize_ledger(1, &row, &resolver);
    let second = normalize_ledger(1, &row, &resolver);

    assert_eq!(first, second);
}
