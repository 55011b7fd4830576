use reqwest::{Client, StatusCode};
use sales_repo::month::Month;
use sales_repo::report::{BarChartBucket, Statistics};
use sales_repo::transaction_repo::{CategoryCount, Transaction};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("server responded with {status}: {message}")]
    Status { status: StatusCode, message: String },
}

/// Client for the sales server's read endpoints.
#[derive(Clone)]
pub struct SalesApi {
    client: Client,
    base_url: String,
}

impl SalesApi {
    pub fn new(base_url: &str) -> SalesApi {
        SalesApi {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    pub async fn transactions(
        &self,
        month: Month,
        search: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Transaction>, ApiError> {
        let query = [
            ("month", month.number().to_string()),
            ("search", search.to_owned()),
            ("page", page.to_string()),
            ("perPage", per_page.to_string()),
        ];
        self.get("/transactions", &query).await
    }

    pub async fn statistics(&self, month: Month) -> Result<Statistics, ApiError> {
        self.get("/statistics", &month_query(month)).await
    }

    pub async fn bar_chart(&self, month: Month) -> Result<Vec<BarChartBucket>, ApiError> {
        self.get("/bar-chart", &month_query(month)).await
    }

    pub async fn pie_chart(&self, month: Month) -> Result<Vec<CategoryCount>, ApiError> {
        self.get("/pie-chart", &month_query(month)).await
    }

    #[instrument(skip(self, query))]
    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let response = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .query(query)
            .send()
            .await?;

        let status = response.status();
        debug!(%status, "Received response");
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ApiError::Status { status, message });
        }
        Ok(response.json().await?)
    }
}

fn month_query(month: Month) -> [(&'static str, String); 1] {
    [("month", month.number().to_string())]
}
