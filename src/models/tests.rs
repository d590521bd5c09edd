use super::{Category, ContributionRow, Direction, LedgerRow, WithdrawalStatus};

use anyhow::Result;
use rust_decimal::Decimal;

#[test]
fn test_ledger_row_deserializes_without_optional_columns() -> Result<()> {
    // Upstream schema drift: older ledger rows carry neither a source tag
    // nor a structural counterparty link.
    let row: LedgerRow = serde_json::from_str(
        r#"{
            "id": 7,
            "direction": "credit",
            "amount": "5000",
            "description": "Cash payment",
            "occurred_at": "2026-02-10T10:00:00Z"
        }"#
    )?;

    assert_eq!(row.direction, Direction::Credit);
    assert_eq!(row.amount, Decimal::from(5000));
    assert!(row.source_tag.is_none());
    assert!(row.counterparty_handle.is_none());

    Ok(())
}

#[test]
fn test_contribution_row_defaults_anonymous_flag_to_false() -> Result<()> {
    let row: ContributionRow = serde_json::from_str(
        r#"{
            "id": 3,
            "amount": "1000",
            "goal_title": "New Laptop",
            "goal_owner_id": 1,
            "occurred_at": "2026-02-09T08:30:00Z"
        }"#
    )?;

    assert!(!row.is_anonymous);
    assert!(row.supporter_handle.is_none());
    assert!(row.display_name.is_none());

    Ok(())
}

#[test]
fn test_withdrawal_status_uses_lowercase_wire_names() -> Result<()> {
    assert_eq!(serde_json::from_str::<WithdrawalStatus>("\"paid\"")?, WithdrawalStatus::Paid);
    assert_eq!(serde_json::from_str::<WithdrawalStatus>("\"processing\"")?, WithdrawalStatus::Processing);
    assert!(serde_json::from_str::<WithdrawalStatus>("\"Paid\"").is_err());

    Ok(())
}

#[test]
fn test_category_display_matches_wire_names() {
    assert_eq!(Category::ContributionReceived.to_string(), "contribution-received");
    assert_eq!(Category::ItemPaymentSent.to_string(), "item-payment-sent");
    assert_eq!(Category::Withdrawal.to_string(), "withdrawal");
}
