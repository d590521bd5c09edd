mod balance;
mod collectors;
mod coordinator;
mod reconciler;

pub use balance::AccountSummary;
pub use coordinator::RefreshCoordinator;
pub use reconciler::{AccountStatement, Reconciler, StatementScope};
