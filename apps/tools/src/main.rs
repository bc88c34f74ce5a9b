use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dashboard_api::{
    resolve_payload_range, success_pie_chart, success_payload_scatter, DashboardContext,
    SliderSettings,
};
use dataset::LaunchTable;
use shared::domain::SiteSelection;

#[derive(Parser, Debug)]
struct Cli {
    #[arg(long, default_value = "data/spacex_launch_dash.csv")]
    dataset: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Row count, payload bounds and per-site outcomes.
    Summary,
    /// Print the success pie figure as JSON.
    Pie {
        #[arg(long, default_value = "ALL")]
        site: SiteSelection,
    },
    /// Print the payload/outcome scatter figure as JSON.
    Scatter {
        #[arg(long, default_value = "ALL")]
        site: SiteSelection,
        #[arg(long)]
        low: Option<f64>,
        #[arg(long)]
        high: Option<f64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let table = LaunchTable::from_path(&cli.dataset)
        .with_context(|| format!("loading {}", cli.dataset.display()))?;

    match cli.command {
        Command::Summary => {
            let bounds = table.payload_bounds();
            println!("rows={}", table.len());
            println!("payload_kg={}..={}", bounds.low(), bounds.high());
            for summary in table.site_summaries() {
                println!(
                    "{}: launches={} success={} failure={}",
                    summary.launch_site,
                    summary.outcomes.total(),
                    summary.outcomes.success,
                    summary.outcomes.failure
                );
            }
        }
        Command::Pie { site } => {
            let ctx = DashboardContext::new(table, SliderSettings::default());
            let figure = success_pie_chart(&ctx, &site);
            println!("{}", serde_json::to_string_pretty(&figure)?);
        }
        Command::Scatter { site, low, high } => {
            let ctx = DashboardContext::new(table, SliderSettings::default());
            let range = resolve_payload_range(&ctx, low, high)
                .map_err(|e| anyhow::anyhow!(e.message))?;
            let figure = success_payload_scatter(&ctx, &site, &range);
            println!("{}", serde_json::to_string_pretty(&figure)?);
        }
    }

    Ok(())
}
