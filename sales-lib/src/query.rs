//! Typed versions of the query strings accepted by the read endpoints.
//!
//! Handlers take the raw, all-optional structs from actix and convert them
//! here, so every endpoint rejects bad input with the same messages.

use serde::Deserialize;
use thiserror::Error;

use sales_repo::month::{month_range, Month, ReferenceYear};
use sales_repo::transaction_repo::{DateRange, PageOptions};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PER_PAGE: u32 = 10;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum QueryError {
    #[error("month is required")]
    MissingMonth,
    #[error("invalid month {0:?}, expected a number from 1 to 12")]
    InvalidMonth(String),
    #[error("invalid {name} {value:?}, expected a positive integer")]
    InvalidNumber { name: &'static str, value: String },
}

#[derive(Deserialize, Debug, Default)]
pub struct RawMonthQuery {
    pub month: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawTransactionsQuery {
    pub month: Option<String>,
    pub search: Option<String>,
    pub page: Option<String>,
    pub per_page: Option<String>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct MonthQuery {
    pub month: Month,
}

impl MonthQuery {
    pub fn range(&self, reference_year: ReferenceYear) -> DateRange {
        month_range(reference_year, self.month)
    }
}

impl TryFrom<RawMonthQuery> for MonthQuery {
    type Error = QueryError;

    fn try_from(raw: RawMonthQuery) -> Result<Self, Self::Error> {
        Ok(MonthQuery {
            month: parse_month(raw.month)?,
        })
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct TransactionsQuery {
    pub month: Month,
    pub search: String,
    pub page: u32,
    pub per_page: u32,
}

impl TransactionsQuery {
    pub fn range(&self, reference_year: ReferenceYear) -> DateRange {
        month_range(reference_year, self.month)
    }

    pub fn page_options(&self) -> PageOptions {
        let per_page = i64::from(self.per_page);
        PageOptions {
            offset: (i64::from(self.page) - 1).saturating_mul(per_page),
            limit: per_page,
        }
    }
}

impl TryFrom<RawTransactionsQuery> for TransactionsQuery {
    type Error = QueryError;

    fn try_from(raw: RawTransactionsQuery) -> Result<Self, Self::Error> {
        Ok(TransactionsQuery {
            month: parse_month(raw.month)?,
            search: raw.search.unwrap_or_default(),
            page: parse_positive("page", raw.page, DEFAULT_PAGE)?,
            per_page: parse_positive("perPage", raw.per_page, DEFAULT_PER_PAGE)?,
        })
    }
}

fn parse_month(month: Option<String>) -> Result<Month, QueryError> {
    let month = month.ok_or(QueryError::MissingMonth)?;
    let parsed = month.trim().parse::<u32>().ok().and_then(Month::new);
    parsed.ok_or(QueryError::InvalidMonth(month))
}

fn parse_positive(
    name: &'static str,
    value: Option<String>,
    default: u32,
) -> Result<u32, QueryError> {
    match value {
        None => Ok(default),
        Some(value) if value.trim().is_empty() => Ok(default),
        Some(value) => {
            let parsed = value.trim().parse::<u32>();
            match parsed {
                Ok(n) if n >= 1 => Ok(n),
                _ => Err(QueryError::InvalidNumber { name, value }),
            }
        }
    }
}
