mod transaction_repo;

use crate::transaction_repo::TransactionRepo;
use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use std::sync::Arc;

pub struct SQLxRepo {
    pool: Pool<Postgres>,
}

impl SQLxRepo {
    pub fn new(pool: Pool<Postgres>) -> SQLxRepo {
        SQLxRepo { pool }
    }
}

pub async fn create_repo(
    database_url: &str,
    max_pool_size: u32,
) -> Result<Arc<dyn TransactionRepo>, anyhow::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(max_pool_size)
        .connect(database_url)
        .await
        .context("Unable to connect to database")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Unable to run database migrations")?;

    Ok(Arc::new(SQLxRepo::new(pool)))
}
