mod extract;
mod fetch;
mod output;
mod pipeline;
mod programs;
mod settings;

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;

use crate::fetch::ChromeFetcher;
use crate::settings::Settings;

#[derive(Parser)]
#[command(
    name = "visa_scraper",
    about = "Scrapes the skilled occupation list and groups occupations by visa program"
)]
struct Cli {
    /// Listing URL to crawl
    #[arg(long)]
    url: Option<String>,
    /// Directory the per-program artifacts are written to
    #[arg(long)]
    out_dir: Option<PathBuf>,
    /// Dwell after each page render, in milliseconds
    #[arg(long)]
    settle_ms: Option<u64>,
    /// Upper bound on waiting for the listing table, in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    let mut settings = Settings::load()?;
    settings.apply_overrides(cli.url, cli.out_dir, cli.settle_ms, cli.timeout_secs);

    let t0 = Instant::now();
    let fetcher = ChromeFetcher::new(&settings);
    let index = pipeline::run(&fetcher, &settings)?;

    println!("{:<36} {:>6}", "Program", "Titles");
    println!("{}", "-".repeat(43));
    for (program, titles) in &index {
        println!("{:<36} {:>6}", program, titles.len());
    }
    println!("\nDone in {:.1}s", t0.elapsed().as_secs_f64());

    Ok(())
}
