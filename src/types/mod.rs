mod errors;

pub use errors::StoreError;

pub type AccountId = u64;
