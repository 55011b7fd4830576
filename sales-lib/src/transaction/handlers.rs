use crate::error::HandlerError;
use crate::query::{RawTransactionsQuery, TransactionsQuery};
use crate::tracing::record_month;
use actix_web::{get, web, HttpResponse, Responder};
use sales_repo::month::ReferenceYear;
use sales_repo::transaction_repo::{Filter, TransactionRepo};
use std::sync::Arc;

#[get("")]
pub async fn get_transactions(
    transaction_repo: web::Data<Arc<dyn TransactionRepo>>,
    reference_year: web::Data<ReferenceYear>,
    query: web::Query<RawTransactionsQuery>,
) -> Result<impl Responder, HandlerError> {
    let query = TransactionsQuery::try_from(query.into_inner())?;
    record_month(query.month);

    let filter = Filter::in_range(query.range(**reference_year)).with_search(&query.search);
    let transactions = transaction_repo
        .get_transactions(filter, Some(query.page_options()))
        .await
        .map_err(HandlerError::repo("Error fetching transactions"))?;
    Ok(HttpResponse::Ok().json(transactions))
}
