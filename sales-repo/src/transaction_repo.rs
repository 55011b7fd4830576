use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Copy, Debug)]
pub struct PageOptions {
    pub offset: i64,
    pub limit: i64,
}

/// Half-open range of sale dates, `[start, end)`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    pub const fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> DateRange {
        DateRange { start, end }
    }

    pub fn contains(&self, date: &DateTime<Utc>) -> bool {
        &self.start <= date && date < &self.end
    }
}

/// One bucket of the price histogram.
///
/// The first band includes its lower bound, every other band excludes it, so
/// consecutive bands never share a price.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PriceBand {
    pub lower: u32,
    pub upper: Option<u32>,
}

impl PriceBand {
    pub const ALL: [PriceBand; 10] = [
        PriceBand::new(0, Some(100)),
        PriceBand::new(100, Some(200)),
        PriceBand::new(200, Some(300)),
        PriceBand::new(300, Some(400)),
        PriceBand::new(400, Some(500)),
        PriceBand::new(500, Some(600)),
        PriceBand::new(600, Some(700)),
        PriceBand::new(700, Some(800)),
        PriceBand::new(800, Some(900)),
        PriceBand::new(900, None),
    ];

    pub const fn new(lower: u32, upper: Option<u32>) -> PriceBand {
        PriceBand { lower, upper }
    }

    pub fn includes_lower(&self) -> bool {
        self.lower == 0
    }

    pub fn contains(&self, price: &Decimal) -> bool {
        let lower = Decimal::from(self.lower);
        let above_lower = if self.includes_lower() {
            *price >= lower
        } else {
            *price > lower
        };
        let below_upper = match self.upper {
            Some(upper) => *price <= Decimal::from(upper),
            None => true,
        };
        above_lower && below_upper
    }

    /// Label shown in the bar chart, e.g. `0-100`, `101-200`, `901-Infinity`.
    pub fn label(&self) -> String {
        let first = if self.includes_lower() {
            self.lower
        } else {
            self.lower + 1
        };
        match self.upper {
            Some(upper) => format!("{}-{}", first, upper),
            None => format!("{}-Infinity", first),
        }
    }
}

#[derive(Clone, Default, Debug)]
pub struct Filter {
    pub range: Option<DateRange>,
    pub search: Option<String>,
    pub sold: Option<bool>,
    pub price_band: Option<PriceBand>,
}

impl Filter {
    pub const NONE: Filter = Filter {
        range: None,
        search: None,
        sold: None,
        price_band: None,
    };

    pub fn in_range(range: DateRange) -> Filter {
        Filter {
            range: Some(range),
            ..Filter::NONE
        }
    }

    /// Empty search strings match everything, so they are dropped here.
    pub fn with_search(mut self, search: &str) -> Filter {
        self.search = if search.is_empty() {
            None
        } else {
            Some(search.to_owned())
        };
        self
    }

    pub fn with_sold(mut self, sold: bool) -> Filter {
        self.sold = Some(sold);
        self
    }

    pub fn with_price_band(mut self, price_band: PriceBand) -> Filter {
        self.price_band = Some(price_band);
        self
    }

    pub fn matches(&self, transaction: &Transaction) -> bool {
        if let Some(range) = &self.range {
            if !range.contains(&transaction.date_of_sale) {
                return false;
            }
        }
        if let Some(sold) = self.sold {
            if transaction.sold != sold {
                return false;
            }
        }
        if let Some(band) = &self.price_band {
            if !band.contains(&transaction.price) {
                return false;
            }
        }
        if let Some(search) = &self.search {
            let search = search.to_lowercase();
            let matches_text = |text: &str| text.to_lowercase().contains(&search);
            return matches_text(&transaction.title)
                || matches_text(&transaction.description)
                || matches_text(&transaction.price.to_string());
        }
        true
    }
}

#[async_trait]
pub trait TransactionRepo: Sync + Send {
    /// Deletes every stored transaction and inserts `transactions` in order.
    /// Returns the number of inserted records.
    async fn replace_all_transactions(
        &self,
        transactions: Vec<Transaction>,
    ) -> Result<u64, TransactionRepoError>;

    async fn get_transactions(
        &self,
        filter: Filter,
        page_options: Option<PageOptions>,
    ) -> Result<Vec<Transaction>, TransactionRepoError>;

    async fn count_transactions(&self, filter: Filter) -> Result<i64, TransactionRepoError>;

    async fn get_total_price(&self, filter: Filter) -> Result<Decimal, TransactionRepoError>;

    async fn get_category_counts(
        &self,
        filter: Filter,
    ) -> Result<Vec<CategoryCount>, TransactionRepoError>;

    /// Releases any connections held by the repo.
    async fn close(&self) {}
}

#[derive(Error, Debug)]
pub enum TransactionRepoError {
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub price: Decimal,
    pub date_of_sale: DateTime<Utc>,
    pub sold: bool,
    pub category: String,
}

impl Transaction {
    pub const fn new(
        id: i32,
        title: String,
        description: String,
        price: Decimal,
        date_of_sale: DateTime<Utc>,
        sold: bool,
        category: String,
    ) -> Transaction {
        Transaction {
            id,
            title,
            description,
            price,
            date_of_sale,
            sold,
            category,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct CategoryCount {
    #[serde(rename = "_id")]
    pub category: String,
    pub count: i64,
}

impl CategoryCount {
    pub const fn new(category: String, count: i64) -> CategoryCount {
        CategoryCount { category, count }
    }
}
