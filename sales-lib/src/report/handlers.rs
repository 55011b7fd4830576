use crate::error::HandlerError;
use crate::query::{MonthQuery, RawMonthQuery};
use crate::report;
use crate::tracing::record_month;
use actix_web::{get, web, HttpResponse, Responder};
use sales_repo::month::ReferenceYear;
use sales_repo::transaction_repo::{DateRange, TransactionRepo};
use std::sync::Arc;

fn requested_range(
    query: web::Query<RawMonthQuery>,
    reference_year: &ReferenceYear,
) -> Result<DateRange, HandlerError> {
    let query = MonthQuery::try_from(query.into_inner())?;
    record_month(query.month);
    Ok(query.range(*reference_year))
}

#[get("/statistics")]
pub async fn get_statistics(
    transaction_repo: web::Data<Arc<dyn TransactionRepo>>,
    reference_year: web::Data<ReferenceYear>,
    query: web::Query<RawMonthQuery>,
) -> Result<impl Responder, HandlerError> {
    let range = requested_range(query, &reference_year)?;
    let statistics = report::statistics(&**transaction_repo.get_ref(), range)
        .await
        .map_err(HandlerError::repo("Error fetching statistics"))?;
    Ok(HttpResponse::Ok().json(statistics))
}

#[get("/bar-chart")]
pub async fn get_bar_chart(
    transaction_repo: web::Data<Arc<dyn TransactionRepo>>,
    reference_year: web::Data<ReferenceYear>,
    query: web::Query<RawMonthQuery>,
) -> Result<impl Responder, HandlerError> {
    let range = requested_range(query, &reference_year)?;
    let buckets = report::bar_chart(&**transaction_repo.get_ref(), range)
        .await
        .map_err(HandlerError::repo("Error fetching bar chart data"))?;
    Ok(HttpResponse::Ok().json(buckets))
}

#[get("/pie-chart")]
pub async fn get_pie_chart(
    transaction_repo: web::Data<Arc<dyn TransactionRepo>>,
    reference_year: web::Data<ReferenceYear>,
    query: web::Query<RawMonthQuery>,
) -> Result<impl Responder, HandlerError> {
    let range = requested_range(query, &reference_year)?;
    let categories = report::pie_chart(&**transaction_repo.get_ref(), range)
        .await
        .map_err(HandlerError::repo("Error fetching pie chart data"))?;
    Ok(HttpResponse::Ok().json(categories))
}

#[get("/combined-data")]
pub async fn get_combined_data(
    transaction_repo: web::Data<Arc<dyn TransactionRepo>>,
    reference_year: web::Data<ReferenceYear>,
    query: web::Query<RawMonthQuery>,
) -> Result<impl Responder, HandlerError> {
    let range = requested_range(query, &reference_year)?;
    let combined = report::combined(&**transaction_repo.get_ref(), range)
        .await
        .map_err(HandlerError::repo("Error fetching combined data"))?;
    Ok(HttpResponse::Ok().json(combined))
}
