use tracing::warn;

use crate::models::{ClaimRow, ContributionRow, LedgerRow, WithdrawalRow};
use crate::stores::{ClaimStore, ContributionStore, LedgerStore, WithdrawalStore};
use crate::types::{AccountId, StoreError};

// One thin accessor per upstream source. Every collector applies the
// per-source filter the merged result relies on; only the ledger collector
// is allowed to fail the run, so the others hand back `Vec` directly and
// degrade in place.

/// Settled postings, excluding withdrawal-tagged ones — those are served
/// exclusively by the withdrawal store, so the same money movement is never
/// represented twice.
pub(crate) async fn collect_ledger<L: LedgerStore>(store: &L, account_id: AccountId) -> Result<Vec<LedgerRow>, StoreError> {
    let rows = store.list_postings(account_id).await?;

    Ok(rows.into_iter()
        .filter(|row| row.source_tag.as_deref() != Some("withdrawal"))
        .collect())
}

pub(crate) async fn collect_contributions_received<C: ContributionStore>(store: &C, account_id: AccountId) -> Vec<ContributionRow> {
    degrade("contribution-received", store.list_received(account_id).await)
}

/// Pledges made by this account to goals owned by other accounts.
/// Self-funding is not a transfer and is dropped here.
pub(crate) async fn collect_contributions_sent<C: ContributionStore>(store: &C, account_id: AccountId) -> Vec<ContributionRow> {
    degrade("contribution-sent", store.list_sent(account_id).await)
        .into_iter()
        .filter(|row| row.goal_owner_id != account_id)
        .collect()
}

pub(crate) async fn collect_withdrawals<W: WithdrawalStore>(store: &W, account_id: AccountId) -> Vec<WithdrawalRow> {
    degrade("withdrawal", store.list_requests(account_id).await)
}

pub(crate) async fn collect_claims_sent<P: ClaimStore>(store: &P, account_id: AccountId) -> Vec<ClaimRow> {
    degrade("item-payment-sent", store.list_confirmed_by(account_id).await)
}

fn degrade<T>(source: &str, result: Result<Vec<T>, StoreError>) -> Vec<T> {
    match result {
        Ok(rows) => rows,
        Err(error) => {
            warn!("Collector [{source}] failed, continuing with an empty contribution: {error}");
            Vec::new()
        }
    }
}
