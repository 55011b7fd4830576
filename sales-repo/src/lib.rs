pub mod month;
pub mod report;
pub mod transaction_repo;

// implementation modules
pub mod mem_repo;
#[cfg(feature = "sqlx-repo")]
pub mod sqlx_repo;
