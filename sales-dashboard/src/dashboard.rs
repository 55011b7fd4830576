use sales_repo::report::{BarChartBucket, Statistics};
use sales_repo::transaction_repo::{CategoryCount, Transaction};
use tracing::info;

use crate::api::SalesApi;
use crate::state::{DashboardState, Effect};
use crate::views::{self, ViewState};

/// The four views and the selection they were fetched for.
pub struct Dashboard {
    api: SalesApi,
    pub state: DashboardState,
    pub table: ViewState<Vec<Transaction>>,
    pub statistics: ViewState<Statistics>,
    pub bar_chart: ViewState<Vec<BarChartBucket>>,
    pub pie_chart: ViewState<Vec<CategoryCount>>,
}

impl Dashboard {
    pub fn new(api: SalesApi, state: DashboardState) -> Dashboard {
        Dashboard {
            api,
            state,
            table: ViewState::NotLoaded,
            statistics: ViewState::NotLoaded,
            bar_chart: ViewState::NotLoaded,
            pie_chart: ViewState::NotLoaded,
        }
    }

    pub async fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::RefreshAll => self.refresh_all().await,
            Effect::RefreshTable => self.refresh_table().await,
            Effect::None | Effect::Help | Effect::Quit => {}
        }
    }

    /// Fetches every view at once. A failure only affects its own view.
    pub async fn refresh_all(&mut self) {
        let state = &self.state;
        info!(month = state.month.number(), "Fetching all views");
        let (table, statistics, bar_chart, pie_chart) = futures::join!(
            self.api
                .transactions(state.month, &state.search, state.page, state.per_page),
            self.api.statistics(state.month),
            self.api.bar_chart(state.month),
            self.api.pie_chart(state.month),
        );
        self.table = ViewState::from_result(table);
        self.statistics = ViewState::from_result(statistics);
        self.bar_chart = ViewState::from_result(bar_chart);
        self.pie_chart = ViewState::from_result(pie_chart);
    }

    pub async fn refresh_table(&mut self) {
        let state = &self.state;
        info!(search = %state.search, page = state.page, "Fetching transactions");
        let table = self
            .api
            .transactions(state.month, &state.search, state.page, state.per_page)
            .await;
        self.table = ViewState::from_result(table);
    }

    pub fn render(&self) -> String {
        let month = self.state.month;
        [
            views::render_month_selector(month),
            views::render_table(&self.table, &self.state),
            views::render_statistics(&self.statistics, month),
            views::render_bar_chart(&self.bar_chart, month),
            views::render_pie_chart(&self.pie_chart, month),
        ]
        .join("\n")
    }
}
