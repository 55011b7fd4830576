//! Plain-text rendering of the four dashboard views.

use sales_repo::month::Month;
use sales_repo::report::{BarChartBucket, Statistics};
use sales_repo::transaction_repo::{CategoryCount, Transaction};

use crate::state::DashboardState;

const BAR_WIDTH: usize = 40;
const TITLE_WIDTH: usize = 30;
const DESCRIPTION_WIDTH: usize = 40;
const CATEGORY_WIDTH: usize = 18;

/// Result of the latest fetch for one view.
#[derive(Clone, PartialEq, Debug)]
pub enum ViewState<T> {
    NotLoaded,
    Loaded(T),
    Failed(String),
}

impl<T> ViewState<T> {
    pub fn from_result<E: std::fmt::Display>(result: Result<T, E>) -> ViewState<T> {
        match result {
            Ok(value) => ViewState::Loaded(value),
            Err(e) => ViewState::Failed(e.to_string()),
        }
    }

    fn render(&self, title: &str, render_loaded: impl FnOnce(&T) -> Vec<String>) -> String {
        let lines = match self {
            ViewState::NotLoaded => vec!["Loading...".to_owned()],
            ViewState::Failed(message) => vec![format!("Error: {}", message)],
            ViewState::Loaded(value) => render_loaded(value),
        };
        let mut out = format!("== {} ==\n", title);
        for line in lines {
            out.push_str(&line);
            out.push('\n');
        }
        out
    }
}

pub fn render_month_selector(selected: Month) -> String {
    let names: Vec<String> = Month::all()
        .map(|month| {
            if month == selected {
                format!("[{}]", month.name())
            } else {
                month.name().to_owned()
            }
        })
        .collect();
    format!("Month: {}\n", names.join(" "))
}

pub fn render_table(view: &ViewState<Vec<Transaction>>, state: &DashboardState) -> String {
    let title = if state.search.is_empty() {
        format!("Transactions, {} (page {})", state.month, state.page)
    } else {
        format!(
            "Transactions, {} matching {:?} (page {})",
            state.month, state.search, state.page
        )
    };
    view.render(&title, |transactions| {
        if transactions.is_empty() {
            return vec!["No transactions".to_owned()];
        }
        let header = format!(
            "{:>4}  {:<tw$}  {:<dw$}  {:>10}  {:<cw$}  {:<4}  {}",
            "ID",
            "Title",
            "Description",
            "Price",
            "Category",
            "Sold",
            "Date",
            tw = TITLE_WIDTH,
            dw = DESCRIPTION_WIDTH,
            cw = CATEGORY_WIDTH,
        );
        let rows = transactions.iter().map(|t| {
            format!(
                "{:>4}  {:<tw$}  {:<dw$}  {:>10}  {:<cw$}  {:<4}  {}",
                t.id,
                truncate(&t.title, TITLE_WIDTH),
                truncate(&t.description, DESCRIPTION_WIDTH),
                t.price.round_dp(2).to_string(),
                truncate(&t.category, CATEGORY_WIDTH),
                if t.sold { "yes" } else { "no" },
                t.date_of_sale.format("%Y-%m-%d"),
                tw = TITLE_WIDTH,
                dw = DESCRIPTION_WIDTH,
                cw = CATEGORY_WIDTH,
            )
        });
        std::iter::once(header).chain(rows).collect()
    })
}

pub fn render_statistics(view: &ViewState<Statistics>, month: Month) -> String {
    view.render(&format!("Statistics, {}", month), |statistics| {
        vec![
            format!("Total sale:     {}", statistics.total_sale_amount.round_dp(2)),
            format!("Sold items:     {}", statistics.sold_items),
            format!("Not sold items: {}", statistics.not_sold_items),
        ]
    })
}

pub fn render_bar_chart(view: &ViewState<Vec<BarChartBucket>>, month: Month) -> String {
    view.render(&format!("Price ranges, {}", month), |buckets| {
        let max = buckets.iter().map(|b| b.count).max().unwrap_or(0);
        let label_width = buckets.iter().map(|b| b.range.len()).max().unwrap_or(0);
        buckets
            .iter()
            .map(|bucket| {
                format!(
                    "{:>lw$} | {} {}",
                    bucket.range,
                    bar(bucket.count, max),
                    bucket.count,
                    lw = label_width,
                )
            })
            .collect()
    })
}

pub fn render_pie_chart(view: &ViewState<Vec<CategoryCount>>, month: Month) -> String {
    view.render(&format!("Categories, {}", month), |categories| {
        if categories.is_empty() {
            return vec!["No sales".to_owned()];
        }
        let total: i64 = categories.iter().map(|c| c.count).sum();
        let name_width = categories.iter().map(|c| c.category.len()).max().unwrap_or(0);
        categories
            .iter()
            .map(|category| {
                format!(
                    "{:<nw$}  {:>4}  {:>5.1}%",
                    category.category,
                    category.count,
                    percentage(category.count, total),
                    nw = name_width,
                )
            })
            .collect()
    })
}

fn bar(count: i64, max: i64) -> String {
    if max <= 0 || count <= 0 {
        return String::new();
    }
    let width = (count as f64 / max as f64 * BAR_WIDTH as f64).round() as usize;
    "#".repeat(width.max(1))
}

fn percentage(count: i64, total: i64) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 * 100.0 / total as f64
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_owned();
    }
    let mut truncated: String = text.chars().take(width.saturating_sub(3)).collect();
    truncated.push_str("...");
    truncated
}
