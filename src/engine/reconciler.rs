use std::collections::HashSet;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::engine::balance::AccountSummary;
use crate::engine::collectors;
use crate::models::{EngineError, Transaction};
use crate::normalizer;
use crate::resolver::IdentityResolver;
use crate::stores::{ClaimStore, ContributionStore, IdentityDirectory, LedgerStore, WithdrawalStore};
use crate::types::AccountId;

/// Which sources participate in a statement.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum StatementScope {
    /// The four member-facing sources.
    Member,
    /// Member sources plus item-payment claims, for admin/aggregate views.
    Admin
}

/// One complete, immutable reconciliation result.
#[derive(Debug, Clone)]
pub struct AccountStatement {
    pub account_id: AccountId,
    /// Descending by `occurred_at`, ties broken by ascending `id`.
    pub transactions: Vec<Transaction>,
    pub summary: AccountSummary,
    pub generated_at: DateTime<Utc>
}

/// Merges the upstream record stores into one canonical transaction history
/// per account.
///
/// Each run fans out to the collectors concurrently, joins, normalizes,
/// re-validates id uniqueness and sorts. Nothing is cached between runs:
/// the statement is a read-time view of the stores.
pub struct Reconciler<L, C, W, P, D> {
    ledger: L,
    contributions: C,
    withdrawals: W,
    claims: P,
    directory: D
}

impl<L, C, W, P, D> Reconciler<L, C, W, P, D>
where
    L: LedgerStore,
    C: ContributionStore,
    W: WithdrawalStore,
    P: ClaimStore,
    D: IdentityDirectory
{
    pub fn new(ledger: L, contributions: C, withdrawals: W, claims: P, directory: D) -> Self {
        Self { ledger, contributions, withdrawals, claims, directory }
    }

    /// Runs one full merge for the account.
    ///
    /// # Errors
    /// Returns `EngineError` if:
    /// - The ledger store is unavailable (it is the system of record for
    ///   balance; there is no partial statement without it).
    /// - Two normalized transactions share an id, which is a programming
    ///   error in the source-tag scheme and must not be swallowed.
    pub async fn statement(&self, account_id: AccountId, scope: StatementScope) -> Result<AccountStatement, EngineError> {
        let claims_branch = async {
            match scope {
                StatementScope::Admin => collectors::collect_claims_sent(&self.claims, account_id).await,
                StatementScope::Member => Vec::new()
            }
        };

        let (ledger, received, sent, withdrawals, claims) = futures::join!(
            collectors::collect_ledger(&self.ledger, account_id),
            collectors::collect_contributions_received(&self.contributions, account_id),
            collectors::collect_contributions_sent(&self.contributions, account_id),
            collectors::collect_withdrawals(&self.withdrawals, account_id),
            claims_branch
        );

        let ledger = ledger.map_err(|source| EngineError::ledger_unavailable(account_id, source))?;

        // One batch lookup per run; the table is passed down, never ambient.
        let mut display_names: Vec<String> = received.iter()
            .chain(sent.iter())
            .filter_map(|row| row.display_name.clone())
            .chain(claims.iter().filter_map(|row| row.owner_display_name.clone()))
            .collect();
        display_names.sort();
        display_names.dedup();

        let resolver = IdentityResolver::build(&self.directory, &display_names).await;

        let mut transactions = Vec::with_capacity(
            ledger.len() + received.len() + sent.len() + withdrawals.len() + claims.len()
        );
        transactions.extend(ledger.iter().map(|row| normalizer::normalize_ledger(account_id, row, &resolver)));
        transactions.extend(received.iter().map(|row| normalizer::normalize_contribution_received(account_id, row, &resolver)));
        transactions.extend(sent.iter().map(|row| normalizer::normalize_contribution_sent(account_id, row, &resolver)));
        transactions.extend(withdrawals.iter().map(|row| normalizer::normalize_withdrawal(account_id, row)));
        transactions.extend(claims.iter().map(|row| normalizer::normalize_claim_sent(account_id, row, &resolver)));

        ensure_unique_ids(account_id, &transactions)?;

        transactions.sort_by(|a, b| {
            b.occurred_at.cmp(&a.occurred_at).then_with(|| a.id.cmp(&b.id))
        });

        let summary = AccountSummary::from_transactions(&transactions);

        debug!("Merged {} transactions for account [{account_id}]", transactions.len());

        Ok(AccountStatement {
            account_id,
            transactions,
            summary,
            generated_at: Utc::now()
        })
    }
}

fn ensure_unique_ids(account_id: AccountId, transactions: &[Transaction]) -> Result<(), EngineError> {
    let mut seen = HashSet::with_capacity(transactions.len());

    for transaction in transactions {
        if !seen.insert(transaction.id.as_str()) {
            return Err(EngineError::duplicate_transaction_id(account_id, transaction.id.as_str()));
        }
    }

    Ok(())
}
