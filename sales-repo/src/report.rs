use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::transaction_repo::{CategoryCount, PriceBand, Transaction};

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_sale_amount: Decimal,
    pub sold_items: i64,
    pub not_sold_items: i64,
}

impl Statistics {
    pub const fn new(total_sale_amount: Decimal, sold_items: i64, not_sold_items: i64) -> Self {
        Statistics {
            total_sale_amount,
            sold_items,
            not_sold_items,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct BarChartBucket {
    pub range: String,
    pub count: i64,
}

impl BarChartBucket {
    pub fn new(band: &PriceBand, count: i64) -> Self {
        BarChartBucket {
            range: band.label(),
            count,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CombinedData {
    pub transactions: Vec<Transaction>,
    pub statistics: Statistics,
    pub bar_chart: Vec<BarChartBucket>,
    pub pie_chart: Vec<CategoryCount>,
}
