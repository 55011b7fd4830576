use anyhow::anyhow;
use async_trait::async_trait;
use rust_decimal::Decimal;
use sales_lib::seed::{FeedError, TransactionFeed};
use sales_repo::transaction_repo::{
    CategoryCount, Filter, PageOptions, Transaction, TransactionRepo, TransactionRepoError,
};

/// Feed returning the same transactions on every fetch.
pub struct FixedFeed {
    pub transactions: Vec<Transaction>,
}

#[async_trait]
impl TransactionFeed for FixedFeed {
    async fn fetch(&self) -> Result<Vec<Transaction>, FeedError> {
        Ok(self.transactions.clone())
    }
}

pub struct FailingFeed;

#[async_trait]
impl TransactionFeed for FailingFeed {
    async fn fetch(&self) -> Result<Vec<Transaction>, FeedError> {
        Err(FeedError::Other(anyhow!("feed unavailable")))
    }
}

/// Repo whose every operation fails.
pub struct FailingRepo;

fn unavailable() -> TransactionRepoError {
    TransactionRepoError::Other(anyhow!("store unavailable"))
}

#[async_trait]
impl TransactionRepo for FailingRepo {
    async fn replace_all_transactions(
        &self,
        _transactions: Vec<Transaction>,
    ) -> Result<u64, TransactionRepoError> {
        Err(unavailable())
    }

    async fn get_transactions(
        &self,
        _filter: Filter,
        _page_options: Option<PageOptions>,
    ) -> Result<Vec<Transaction>, TransactionRepoError> {
        Err(unavailable())
    }

    async fn count_transactions(&self, _filter: Filter) -> Result<i64, TransactionRepoError> {
        Err(unavailable())
    }

    async fn get_total_price(&self, _filter: Filter) -> Result<Decimal, TransactionRepoError> {
        Err(unavailable())
    }

    async fn get_category_counts(
        &self,
        _filter: Filter,
    ) -> Result<Vec<CategoryCount>, TransactionRepoError> {
        Err(unavailable())
    }
}
