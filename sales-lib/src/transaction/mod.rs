use actix_web::{web, Scope};

mod handlers;

pub fn transaction_service() -> Scope {
    web::scope("/transactions").service(handlers::get_transactions)
}
