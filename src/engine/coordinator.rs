use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::debug;

use crate::engine::reconciler::{AccountStatement, Reconciler, StatementScope};
use crate::models::EngineError;
use crate::stores::{ClaimStore, ContributionStore, IdentityDirectory, LedgerStore, WithdrawalStore};
use crate::types::AccountId;

#[derive(Default)]
struct RunState {
    gate: Mutex<()>,
    dirty: AtomicBool
}

/// Serializes merge runs per account and coalesces refresh bursts.
///
/// At most one run is in flight per account. A trigger arriving during an
/// in-flight run marks the account dirty and waits its turn on the
/// per-account gate; a waiter whose trigger was already covered by a
/// later-started run returns the cached snapshot instead of rerunning, so a
/// burst of notifications costs at most one follow-up run.
///
/// Snapshots are `Arc`-swapped whole: a consumer either sees the previous
/// complete statement or the new one, never a partial mix.
pub struct RefreshCoordinator<L, C, W, P, D> {
    reconciler: Reconciler<L, C, W, P, D>,
    runs: DashMap<AccountId, Arc<RunState>>,
    snapshots: DashMap<AccountId, Arc<AccountStatement>>
}

impl<L, C, W, P, D> RefreshCoordinator<L, C, W, P, D>
where
    L: LedgerStore,
    C: ContributionStore,
    W: WithdrawalStore,
    P: ClaimStore,
    D: IdentityDirectory
{
    pub fn new(reconciler: Reconciler<L, C, W, P, D>) -> Self {
        Self {
            reconciler,
            runs: DashMap::new(),
            snapshots: DashMap::new()
        }
    }

    /// Latest complete snapshot, if any run has finished for this account.
    pub fn latest(&self, account_id: AccountId) -> Option<Arc<AccountStatement>> {
        self.snapshots.get(&account_id).map(|entry| entry.value().clone())
    }

    /// Triggers a refresh and returns a snapshot at least as fresh as the
    /// trigger.
    pub async fn refresh(&self, account_id: AccountId) -> Result<Arc<AccountStatement>, EngineError> {
        let state = self.runs.entry(account_id).or_default().value().clone();
        state.dirty.store(true, Ordering::SeqCst);

        let _guard = state.gate.lock().await;

        if !state.dirty.swap(false, Ordering::SeqCst) {
            // A run that started after this trigger already covered it.
            if let Some(snapshot) = self.latest(account_id) {
                debug!("Refresh for account [{account_id}] coalesced into a prior run");
                return Ok(snapshot);
            }
        }

        let statement = Arc::new(self.reconciler.statement(account_id, StatementScope::Member).await?);
        self.snapshots.insert(account_id, statement.clone());

        Ok(statement)
    }
}
