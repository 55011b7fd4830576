#[macro_use]
extern crate tracing;

use anyhow::Context;
use clap::Parser;
use sales_repo::month::Month;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry;

use crate::api::SalesApi;
use crate::dashboard::Dashboard;
use crate::state::{Command, DashboardState, Effect, DEFAULT_PER_PAGE, HELP};

mod api;
mod dashboard;
mod state;
mod views;

#[derive(Parser, Debug)]
#[command(name = "sales-dashboard")]
#[command(about = "Terminal dashboard for the sales server", long_about = None)]
struct Args {
    /// Base URL of the sales server
    #[arg(long, default_value = "http://localhost:5000")]
    server: String,

    /// Month to show first, as a number or a name
    #[arg(long, default_value = "3", value_parser = parse_month)]
    month: Month,

    /// Initial table search
    #[arg(long, default_value = "")]
    search: String,

    #[arg(long, default_value_t = DEFAULT_PER_PAGE, value_parser = clap::value_parser!(u32).range(1..))]
    per_page: u32,

    /// Render every view once and exit
    #[arg(long)]
    once: bool,
}

fn parse_month(value: &str) -> Result<Month, String> {
    value.parse().map_err(|e: sales_repo::month::ParseMonthError| e.to_string())
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let subscriber = registry::Registry::default()
        .with(LevelFilter::WARN)
        .with(tracing_subscriber::fmt::Layer::default().with_writer(std::io::stderr));
    tracing::subscriber::set_global_default(subscriber).context("Unable to set up subscriber")?;

    let args = Args::parse();
    let api = SalesApi::new(&args.server);
    let state = DashboardState::new(args.month, args.search, args.per_page);
    let mut dashboard = Dashboard::new(api, state);

    dashboard.refresh_all().await;
    println!("{}", dashboard.render());
    if args.once {
        return Ok(());
    }
    println!("{}", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Unable to read input")? {
        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };
        debug!(?command, "Parsed command");

        match dashboard.state.apply(command) {
            Effect::Quit => break,
            Effect::Help => println!("{}", HELP),
            Effect::None => println!("Nothing changed"),
            effect => {
                dashboard.apply(effect).await;
                println!("{}", dashboard.render());
            }
        }
    }

    Ok(())
}
