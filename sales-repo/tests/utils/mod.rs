pub mod generator;

use sales_repo::transaction_repo::TransactionRepo;
use serde::Deserialize;
use std::fs;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::info;

// Every repo case replaces the whole collection, so cases sharing a database must not overlap.
static REPO_LOCK: Mutex<()> = Mutex::new(());

#[derive(Deserialize)]
struct TestConfig {
    database_url: String,
}

#[derive(Debug)]
pub enum RepoType {
    SQLx,
    Mem,
}

pub struct TestRepo {
    pub repo: Arc<dyn TransactionRepo>,
    _guard: MutexGuard<'static, ()>,
}

/// Returns `None` when the repo type is not available, e.g. there is no
/// `config_test.toml` pointing at a database.
pub async fn build_repo(repo_type: RepoType) -> Option<TestRepo> {
    let guard = REPO_LOCK.lock().unwrap_or_else(|e| e.into_inner());

    let repo = match repo_type {
        RepoType::Mem => sales_repo::mem_repo::create_repo(),
        RepoType::SQLx => {
            let Ok(config) = fs::read_to_string("config_test.toml") else {
                info!("config_test.toml not found, skipping SQLx case");
                return None;
            };
            let config: TestConfig = toml::from_str(config.as_str()).unwrap();
            sales_repo::sqlx_repo::create_repo(&config.database_url, 1)
                .await
                .unwrap()
        }
    };

    Some(TestRepo {
        repo,
        _guard: guard,
    })
}
