#![allow(dead_code)]

use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rstest::*;
use rust_decimal::Decimal;
use tracing::info;
use tracing::Level;

use sales_repo::transaction_repo::{Transaction, TransactionRepo};

pub mod mock;

macro_rules! build_app {
    ($transaction_repo:expr, $transaction_feed:expr) => {{
        let app = App::new()
            .wrap(sales_lib::tracing::create_middleware())
            .configure(sales_lib::app_config_func(
                $transaction_repo,
                $transaction_feed,
                sales_repo::month::ReferenceYear::DEFAULT,
            ));
        tracing::info!("Built app");
        app
    }};
}

macro_rules! get_json {
    (&$service:ident, $uri:expr) => {{
        let request = TestRequest::get().uri($uri).to_request();
        let response = test::call_service(&$service, request).await;
        assert!(
            response.status().is_success(),
            "Got {} response for {}",
            response.status(),
            $uri
        );
        test::read_body_json(response).await
    }};
}

macro_rules! seed {
    (&$service:ident) => {{
        let request = TestRequest::get().uri("/initialize-db").to_request();
        let response = test::call_service(&$service, request).await;
        assert_eq!(response.status(), StatusCode::OK);
    }};
}

#[fixture]
#[once]
pub fn tracing_setup() -> () {
    tracing_subscriber::fmt()
        .pretty()
        .with_max_level(Level::DEBUG)
        .init();
    info!("tracing initialized");
}

#[fixture]
pub fn transaction_repo() -> Arc<dyn TransactionRepo> {
    sales_repo::mem_repo::create_repo()
}

pub fn transaction(
    id: i32,
    title: &str,
    description: &str,
    price: &str,
    date_of_sale: &str,
    sold: bool,
    category: &str,
) -> Transaction {
    Transaction::new(
        id,
        title.to_string(),
        description.to_string(),
        Decimal::from_str(price).unwrap(),
        DateTime::parse_from_rfc3339(date_of_sale)
            .unwrap()
            .with_timezone(&Utc),
        sold,
        category.to_string(),
    )
}

/// A small feed spread over March, April and December of 2024, plus one
/// sale in January 2025.
#[fixture]
pub fn sample_transactions() -> Vec<Transaction> {
    vec![
        transaction(
            1,
            "Fjallraven Backpack",
            "Fits 15 inch laptops",
            "109.95",
            "2024-03-05T10:00:00+05:30",
            true,
            "men's clothing",
        ),
        transaction(
            2,
            "Mens Casual Slim Fit",
            "Slim fitting style",
            "15.99",
            "2024-03-20T08:30:00Z",
            false,
            "men's clothing",
        ),
        transaction(
            3,
            "WD 2TB Elements Portable Drive",
            "Electronic storage with USB 3.0",
            "64",
            "2024-03-31T23:59:59Z",
            true,
            "electronics",
        ),
        transaction(
            4,
            "Samsung 49-Inch Monitor",
            "Super ultrawide screen",
            "999.99",
            "2024-03-12T12:00:00Z",
            false,
            "electronics",
        ),
        transaction(
            5,
            "John Hardy Bracelet",
            "From the legends collection",
            "695",
            "2024-03-15T12:00:00Z",
            true,
            "jewelery",
        ),
        transaction(
            6,
            "Rain Jacket",
            "Lightweight, perfect for travel",
            "300.5",
            "2024-04-01T00:00:00Z",
            true,
            "women's clothing",
        ),
        transaction(
            7,
            "Silicon Power SSD",
            "Electronics grade 3D NAND flash",
            "200",
            "2024-12-24T18:00:00Z",
            true,
            "electronics",
        ),
        transaction(
            8,
            "Pierced Owl Earrings",
            "Rose gold plated",
            "10.99",
            "2025-01-01T00:00:00Z",
            true,
            "jewelery",
        ),
    ]
}
