#[macro_use]
extern crate tracing;

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use actix_web::http::header::ContentType;
use actix_web::{web, App, HttpResponse, HttpServer};
use anyhow::Context;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry;

use sales_lib::config::Config;
use sales_lib::seed::{HttpTransactionFeed, TransactionFeed};
use sales_repo::transaction_repo::TransactionRepo;

const SERVICE_NAME: &str = "sales-server";

#[actix_web::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let subscriber = registry::Registry::default()
        .with(LevelFilter::INFO)
        .with(tracing_subscriber::fmt::Layer::default());
    let tracing_guard = tracing::subscriber::set_default(subscriber);
    info!("tracing initialized");

    let config = match get_config_file() {
        Some(config_path) => {
            info!(config_path = %config_path.display(), "Loading config file");
            Config::from_file(config_path)?.with_port_from_env()?
        }
        None => {
            info!("No config file found, reading config from environment");
            Config::from_env()?
        }
    };
    let reference_year = config.reference_year()?;

    let telemetry_layer = config
        .honeycomb_api_key
        .as_deref()
        .map(|api_key| sales_lib::tracing::create_opentelemetry_layer(SERVICE_NAME, api_key))
        .transpose()?;

    let subscriber = registry::Registry::default()
        .with(LevelFilter::INFO)
        .with(tracing_subscriber::fmt::Layer::default())
        .with(telemetry_layer);
    tracing::subscriber::set_global_default(subscriber).context("Unable to set up subscriber")?;
    drop(tracing_guard);

    let transaction_repo = create_repo(&config).await?;
    let transaction_feed: Arc<dyn TransactionFeed> =
        Arc::new(HttpTransactionFeed::new(config.seed_url.clone()));

    let server_repo = transaction_repo.clone();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(sales_lib::create_cors())
            .wrap(sales_lib::tracing::create_middleware())
            .configure(sales_lib::app_config_func(
                server_repo.clone(),
                transaction_feed.clone(),
                reference_year,
            ))
            .app_data(web::QueryConfig::default().error_handler(|err, req| {
                error!(req_path = req.path(), %err);
                let response = HttpResponse::BadRequest()
                    .content_type(ContentType::plaintext())
                    .body(err.to_string());
                actix_web::error::InternalError::from_response(err, response).into()
            }))
    });

    info!(port = config.port, year = reference_year.year(), "Starting server");
    server.bind(("0.0.0.0", config.port))?.run().await?;

    transaction_repo.close().await;
    info!("Server stopped");
    Ok(())
}

#[cfg(feature = "sqlx-repo")]
async fn create_repo(config: &Config) -> Result<Arc<dyn TransactionRepo>, anyhow::Error> {
    match &config.database_url {
        Some(database_url) => {
            sales_repo::sqlx_repo::create_repo(database_url, config.max_pool_size).await
        }
        None => {
            warn!("No database_url configured, keeping transactions in memory");
            Ok(sales_repo::mem_repo::create_repo())
        }
    }
}

#[cfg(not(feature = "sqlx-repo"))]
async fn create_repo(config: &Config) -> Result<Arc<dyn TransactionRepo>, anyhow::Error> {
    if config.database_url.is_some() {
        warn!("Built without database support, ignoring database_url");
    }
    Ok(sales_repo::mem_repo::create_repo())
}

fn get_config_file() -> Option<PathBuf> {
    let config_current_dir = PathBuf::from("config.toml");
    if config_current_dir.exists() {
        return Some(config_current_dir);
    }
    if let Ok(config_env) = std::env::var("CONFIGURATION_DIRECTORY") {
        let config_path = PathBuf::from(config_env).join("config.toml");
        if config_path.exists() {
            return Some(config_path);
        }
    }

    None
}
