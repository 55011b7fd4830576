use crate::transaction_repo::{
    CategoryCount, Filter, PageOptions, Transaction, TransactionRepo, TransactionRepoError,
};
use anyhow::anyhow;
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

struct State {
    transactions: Vec<Transaction>,
}

pub struct MemTransactionRepo {
    state: RwLock<State>,
}

impl MemTransactionRepo {
    pub fn new() -> MemTransactionRepo {
        let state = State {
            transactions: Vec::new(),
        };
        MemTransactionRepo {
            state: RwLock::new(state),
        }
    }

    fn read_lock(&self) -> Result<RwLockReadGuard<State>, anyhow::Error> {
        self.state
            .read()
            .map_err(|_| anyhow!("Unable to acquire lock"))
    }

    fn write_lock(&self) -> Result<RwLockWriteGuard<State>, anyhow::Error> {
        self.state
            .write()
            .map_err(|_| anyhow!("Unable to acquire lock"))
    }

    fn matching(&self, filter: &Filter) -> Result<Vec<Transaction>, anyhow::Error> {
        let read_guard = self.read_lock()?;
        Ok(read_guard
            .transactions
            .iter()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect())
    }
}

impl Default for MemTransactionRepo {
    fn default() -> Self {
        MemTransactionRepo::new()
    }
}

#[async_trait]
impl TransactionRepo for MemTransactionRepo {
    async fn replace_all_transactions(
        &self,
        transactions: Vec<Transaction>,
    ) -> Result<u64, TransactionRepoError> {
        let mut write_guard = self.write_lock()?;
        let inserted = transactions.len() as u64;
        write_guard.transactions = transactions;
        Ok(inserted)
    }

    async fn get_transactions(
        &self,
        filter: Filter,
        page_options: Option<PageOptions>,
    ) -> Result<Vec<Transaction>, TransactionRepoError> {
        let transactions = self.matching(&filter)?.into_iter();

        let transactions: Box<dyn Iterator<Item = Transaction>> = match page_options {
            Some(page_options) => Box::new(
                transactions
                    .skip(page_options.offset as usize)
                    .take(page_options.limit as usize),
            ),
            None => Box::new(transactions),
        };

        Ok(transactions.collect())
    }

    async fn count_transactions(&self, filter: Filter) -> Result<i64, TransactionRepoError> {
        let read_guard = self.read_lock()?;
        let count = read_guard
            .transactions
            .iter()
            .filter(|t| filter.matches(t))
            .count();
        Ok(count as i64)
    }

    async fn get_total_price(&self, filter: Filter) -> Result<Decimal, TransactionRepoError> {
        let read_guard = self.read_lock()?;
        let sum = read_guard
            .transactions
            .iter()
            .filter(|t| filter.matches(t))
            .map(|t| t.price)
            .sum::<Decimal>();
        Ok(sum)
    }

    async fn get_category_counts(
        &self,
        filter: Filter,
    ) -> Result<Vec<CategoryCount>, TransactionRepoError> {
        let read_guard = self.read_lock()?;

        let mut category_counts: BTreeMap<&str, i64> = BTreeMap::new();
        for t in read_guard.transactions.iter().filter(|t| filter.matches(t)) {
            *category_counts.entry(t.category.as_str()).or_insert(0) += 1;
        }

        Ok(category_counts
            .into_iter()
            .map(|(category, count)| CategoryCount::new(category.to_owned(), count))
            .collect())
    }
}
