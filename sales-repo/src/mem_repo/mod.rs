use crate::transaction_repo::TransactionRepo;
use std::sync::Arc;

mod transaction_repo;

pub use transaction_repo::MemTransactionRepo;

pub fn create_repo() -> Arc<dyn TransactionRepo> {
    Arc::new(MemTransactionRepo::new())
}
