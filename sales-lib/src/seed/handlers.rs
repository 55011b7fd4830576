use crate::error::HandlerError;
use crate::seed::{initialize, TransactionFeed};
use actix_web::http::header::ContentType;
use actix_web::{get, web, HttpResponse, Responder};
use sales_repo::transaction_repo::TransactionRepo;
use std::sync::Arc;

#[get("")]
pub async fn initialize_db(
    transaction_repo: web::Data<Arc<dyn TransactionRepo>>,
    transaction_feed: web::Data<Arc<dyn TransactionFeed>>,
) -> Result<impl Responder, HandlerError> {
    initialize(&**transaction_repo.get_ref(), &**transaction_feed.get_ref()).await?;
    Ok(HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .body("Database initialized successfully"))
}
