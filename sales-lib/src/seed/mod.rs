use actix_web::{web, Scope};
use async_trait::async_trait;
use reqwest::StatusCode;
use sales_repo::transaction_repo::{Transaction, TransactionRepo, TransactionRepoError};
use thiserror::Error;
use tracing::{info, instrument};

mod handlers;

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("request to transaction feed failed")]
    Request(#[from] reqwest::Error),
    #[error("transaction feed responded with {0}")]
    Status(StatusCode),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Error, Debug)]
pub enum SeedError {
    #[error("unable to fetch transactions")]
    Feed(#[from] FeedError),
    #[error("unable to store transactions")]
    Store(#[from] TransactionRepoError),
}

/// Source of the transactions loaded by `/initialize-db`.
#[async_trait]
pub trait TransactionFeed: Send + Sync {
    async fn fetch(&self) -> Result<Vec<Transaction>, FeedError>;
}

pub struct HttpTransactionFeed {
    client: reqwest::Client,
    url: String,
}

impl HttpTransactionFeed {
    pub fn new(url: impl Into<String>) -> HttpTransactionFeed {
        HttpTransactionFeed {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl TransactionFeed for HttpTransactionFeed {
    #[instrument(skip(self), fields(url = %self.url))]
    async fn fetch(&self) -> Result<Vec<Transaction>, FeedError> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status));
        }
        let transactions: Vec<Transaction> = response.json().await?;
        Ok(transactions)
    }
}

/// Replaces the store contents with whatever the feed returns.
pub async fn initialize(
    repo: &dyn TransactionRepo,
    feed: &dyn TransactionFeed,
) -> Result<u64, SeedError> {
    let transactions = feed.fetch().await?;
    info!(fetched = transactions.len(), "Fetched transactions");

    let inserted = repo.replace_all_transactions(transactions).await?;
    info!(inserted, "Replaced stored transactions");
    Ok(inserted)
}

pub fn seed_service() -> Scope {
    web::scope("/initialize-db").service(handlers::initialize_db)
}
