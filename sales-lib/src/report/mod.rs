//! Month reports: statistics, the price histogram and the category
//! breakdown. `/combined-data` is built from the same functions as the
//! standalone endpoints.

use actix_web::web;
use futures::future::try_join_all;
use futures::try_join;
use sales_repo::report::{BarChartBucket, CombinedData, Statistics};
use sales_repo::transaction_repo::{
    CategoryCount, DateRange, Filter, PriceBand, TransactionRepo, TransactionRepoError,
};

mod handlers;

pub async fn statistics(
    repo: &dyn TransactionRepo,
    range: DateRange,
) -> Result<Statistics, TransactionRepoError> {
    let sold = Filter::in_range(range).with_sold(true);
    let not_sold = Filter::in_range(range).with_sold(false);

    let (total_sale_amount, sold_items, not_sold_items) = try_join!(
        repo.get_total_price(sold.clone()),
        repo.count_transactions(sold),
        repo.count_transactions(not_sold),
    )?;
    Ok(Statistics::new(total_sale_amount, sold_items, not_sold_items))
}

pub async fn bar_chart(
    repo: &dyn TransactionRepo,
    range: DateRange,
) -> Result<Vec<BarChartBucket>, TransactionRepoError> {
    let counts = try_join_all(
        PriceBand::ALL
            .iter()
            .map(|band| repo.count_transactions(Filter::in_range(range).with_price_band(*band))),
    )
    .await?;

    Ok(PriceBand::ALL
        .iter()
        .zip(counts)
        .map(|(band, count)| BarChartBucket::new(band, count))
        .collect())
}

pub async fn pie_chart(
    repo: &dyn TransactionRepo,
    range: DateRange,
) -> Result<Vec<CategoryCount>, TransactionRepoError> {
    repo.get_category_counts(Filter::in_range(range)).await
}

/// Every report for the month plus its unpaged, unsearched transactions.
pub async fn combined(
    repo: &dyn TransactionRepo,
    range: DateRange,
) -> Result<CombinedData, TransactionRepoError> {
    let (transactions, statistics, bar_chart, pie_chart) = try_join!(
        repo.get_transactions(Filter::in_range(range), None),
        statistics(repo, range),
        bar_chart(repo, range),
        pie_chart(repo, range),
    )?;
    Ok(CombinedData {
        transactions,
        statistics,
        bar_chart,
        pie_chart,
    })
}

pub fn report_config(config: &mut web::ServiceConfig) {
    config
        .service(handlers::get_statistics)
        .service(handlers::get_bar_chart)
        .service(handlers::get_pie_chart)
        .service(handlers::get_combined_data);
}
