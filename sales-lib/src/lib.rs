use std::sync::Arc;

use actix_cors::Cors;
use actix_web::web;
use actix_web::web::Data;

use sales_repo::month::ReferenceYear;
use sales_repo::transaction_repo::TransactionRepo;

use crate::seed::TransactionFeed;

pub mod config;
mod error;
pub mod query;
pub mod report;
pub mod seed;
pub mod tracing;
pub mod transaction;

pub use error::HandlerError;

/// Registers the store, the seed feed and every endpoint on an actix `App`.
pub fn app_config_func(
    transaction_repo: Arc<dyn TransactionRepo>,
    transaction_feed: Arc<dyn TransactionFeed>,
    reference_year: ReferenceYear,
) -> impl FnOnce(&mut web::ServiceConfig) {
    move |config| {
        config
            .app_data(Data::new(transaction_repo))
            .app_data(Data::new(transaction_feed))
            .app_data(Data::new(reference_year))
            .service(seed::seed_service())
            .service(transaction::transaction_service())
            .configure(report::report_config);
    }
}

/// Read-only API, so any origin may call it.
pub fn create_cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec!["GET"])
        .max_age(3600)
}
