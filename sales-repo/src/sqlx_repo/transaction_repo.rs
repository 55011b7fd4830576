use crate::sqlx_repo::SQLxRepo;
use crate::transaction_repo::{
    CategoryCount, Filter, PageOptions, Transaction, TransactionRepo, TransactionRepoError,
};
use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{query, Executor, Postgres, QueryBuilder};
use tracing::instrument;

// Postgres accepts at most 65535 bind parameters per statement, 7 per row.
const INSERT_CHUNK_SIZE: usize = 1000;

const TRANSACTION_COLUMNS: &str = "id, title, description, price, date_of_sale, sold, category";

#[derive(sqlx::FromRow)]
struct TransactionEntry {
    id: i32,
    title: String,
    description: String,
    price: Decimal,
    date_of_sale: DateTime<Utc>,
    sold: bool,
    category: String,
}

impl From<TransactionEntry> for Transaction {
    fn from(value: TransactionEntry) -> Self {
        Transaction::new(
            value.id,
            value.title,
            value.description,
            value.price,
            value.date_of_sale,
            value.sold,
            value.category,
        )
    }
}

#[derive(sqlx::FromRow)]
struct CategoryCountEntry {
    category: String,
    count: i64,
}

/// Escapes `LIKE` wildcards so the search text is matched literally.
fn like_pattern(search: &str) -> String {
    let mut pattern = String::with_capacity(search.len() + 2);
    pattern.push('%');
    for c in search.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn push_filter(query_builder: &mut QueryBuilder<'_, Postgres>, filter: Filter) {
    query_builder.push(" WHERE TRUE");
    if let Some(range) = filter.range {
        query_builder
            .push(" AND date_of_sale >= ")
            .push_bind(range.start)
            .push(" AND date_of_sale < ")
            .push_bind(range.end);
    }
    if let Some(sold) = filter.sold {
        query_builder.push(" AND sold = ").push_bind(sold);
    }
    if let Some(band) = filter.price_band {
        if band.includes_lower() {
            query_builder.push(" AND price >= ");
        } else {
            query_builder.push(" AND price > ");
        }
        query_builder.push_bind(Decimal::from(band.lower));
        if let Some(upper) = band.upper {
            query_builder
                .push(" AND price <= ")
                .push_bind(Decimal::from(upper));
        }
    }
    if let Some(search) = filter.search {
        let pattern = like_pattern(&search);
        query_builder
            .push(" AND (title ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR description ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR price::text ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
}

impl SQLxRepo {
    #[instrument(skip(db_executor, transactions))]
    async fn insert_transaction_entries<'e, E>(
        db_executor: E,
        transactions: &[Transaction],
    ) -> Result<u64, TransactionRepoError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let mut query_builder =
            QueryBuilder::new(format!("INSERT INTO transactions({}) ", TRANSACTION_COLUMNS));
        query_builder.push_values(transactions, |mut row, t| {
            row.push_bind(t.id)
                .push_bind(t.title.clone())
                .push_bind(t.description.clone())
                .push_bind(t.price)
                .push_bind(t.date_of_sale)
                .push_bind(t.sold)
                .push_bind(t.category.clone());
        });
        let result = query_builder
            .build()
            .execute(db_executor)
            .await
            .context("Unable to insert transactions")?;
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl TransactionRepo for SQLxRepo {
    #[instrument(skip(self, transactions))]
    async fn replace_all_transactions(
        &self,
        transactions: Vec<Transaction>,
    ) -> Result<u64, TransactionRepoError> {
        let mut db_transaction = self
            .pool
            .begin()
            .await
            .context("Unable to start database transaction")?;

        query("DELETE FROM transactions")
            .execute(&mut *db_transaction)
            .await
            .context("Unable to delete transactions")?;

        let mut inserted = 0;
        for chunk in transactions.chunks(INSERT_CHUNK_SIZE) {
            inserted += Self::insert_transaction_entries(&mut *db_transaction, chunk).await?;
        }

        db_transaction
            .commit()
            .await
            .context("Unable to commit transactions")?;
        Ok(inserted)
    }

    #[instrument(skip(self))]
    async fn get_transactions(
        &self,
        filter: Filter,
        page_options: Option<PageOptions>,
    ) -> Result<Vec<Transaction>, TransactionRepoError> {
        let mut query_builder =
            QueryBuilder::new(format!("SELECT {} FROM transactions", TRANSACTION_COLUMNS));
        push_filter(&mut query_builder, filter);
        query_builder.push(" ORDER BY row_id");
        if let Some(po) = page_options {
            query_builder
                .push(" OFFSET ")
                .push_bind(po.offset)
                .push(" LIMIT ")
                .push_bind(po.limit);
        }

        let transaction_entries: Vec<TransactionEntry> = query_builder
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .context("Unable to get transactions")?;
        Ok(transaction_entries.into_iter().map(|t| t.into()).collect())
    }

    #[instrument(skip(self))]
    async fn count_transactions(&self, filter: Filter) -> Result<i64, TransactionRepoError> {
        let mut query_builder = QueryBuilder::new("SELECT COUNT(*) FROM transactions");
        push_filter(&mut query_builder, filter);

        let count: i64 = query_builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .context("Unable to count transactions")?;
        Ok(count)
    }

    #[instrument(skip(self))]
    async fn get_total_price(&self, filter: Filter) -> Result<Decimal, TransactionRepoError> {
        let mut query_builder = QueryBuilder::new("SELECT SUM(price) FROM transactions");
        push_filter(&mut query_builder, filter);

        let total: Option<Decimal> = query_builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .context("Unable to sum transaction prices")?;
        Ok(total.unwrap_or(Decimal::ZERO))
    }

    #[instrument(skip(self))]
    async fn get_category_counts(
        &self,
        filter: Filter,
    ) -> Result<Vec<CategoryCount>, TransactionRepoError> {
        let mut query_builder =
            QueryBuilder::new("SELECT category, COUNT(*) AS count FROM transactions");
        push_filter(&mut query_builder, filter);
        query_builder.push(" GROUP BY category ORDER BY category COLLATE \"C\"");

        let entries: Vec<CategoryCountEntry> = query_builder
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .context("Unable to count transactions by category")?;
        Ok(entries
            .into_iter()
            .map(|e| CategoryCount::new(e.category, e.count))
            .collect())
    }

    #[instrument(skip(self))]
    async fn close(&self) {
        self.pool.close().await;
    }
}
