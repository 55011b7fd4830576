use actix_web::body::BoxBody;
use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use sales_repo::transaction_repo::TransactionRepoError;
use thiserror::Error;
use tracing::{error, warn};

use crate::query::QueryError;
use crate::seed::SeedError;

/// Errors returned by request handlers.
///
/// Store and seed failures only expose a short message to the client; the
/// cause is logged.
#[derive(Error, Debug)]
pub enum HandlerError {
    #[error(transparent)]
    InvalidQuery(#[from] QueryError),
    #[error("{context}")]
    Repo {
        context: &'static str,
        #[source]
        source: TransactionRepoError,
    },
    #[error("Error initializing database")]
    Seed(#[from] SeedError),
}

impl HandlerError {
    pub fn repo(context: &'static str) -> impl FnOnce(TransactionRepoError) -> HandlerError {
        move |source| HandlerError::Repo { context, source }
    }
}

impl ResponseError for HandlerError {
    fn status_code(&self) -> StatusCode {
        match self {
            HandlerError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            HandlerError::Repo { .. } | HandlerError::Seed(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        match self {
            HandlerError::InvalidQuery(e) => warn!(%e, "Rejected query"),
            HandlerError::Repo { context, source } => error!(%context, error = ?source),
            HandlerError::Seed(e) => error!(error = ?e, "Seeding failed"),
        }
        HttpResponse::build(self.status_code())
            .content_type(ContentType::plaintext())
            .body(self.to_string())
    }
}
