use thiserror::Error;

use crate::types::{AccountId, StoreError};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Ledger store is unavailable for account [{account_id}]: {source}")]
    LedgerUnavailable {
        account_id: AccountId,
        #[source]
        source: StoreError
    },
    #[error("Duplicate transaction id [{id}] in merged result for account [{account_id}]")]
    DuplicateTransactionId {
        account_id: AccountId,
        id: String
    }
}

impl EngineError {
    pub fn ledger_unavailable(account_id: AccountId, source: StoreError) -> Self {
        Self::LedgerUnavailable { account_id, source }
    }

    pub fn duplicate_transaction_id(account_id: AccountId, id: impl Into<String>) -> Self {
        Self::DuplicateTransactionId { account_id, id: id.into() }
    }
}
