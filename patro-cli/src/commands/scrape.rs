use anyhow::Result;
use owo_colors::OwoColorize;
use patro_core::fetch::HttpFetcher;
use patro_core::scrape::Scraper;
use patro_core::store::Store;
use patro_core::{OutputModes, PatroConfig};

use crate::render::{ConsoleProgress, Render};
use crate::year_range::YearRange;

pub async fn run(config: &PatroConfig, range: YearRange, modes: OutputModes) -> Result<()> {
    let fetcher = HttpFetcher::from_config(config)?;
    let store = Store::from_config(config);

    println!(
        "{}",
        format!(
            "Scraping {} -> {}",
            fetcher.endpoint(),
            store.root().display()
        )
        .dimmed()
    );

    let scraper = Scraper::new(fetcher, store)?;
    let progress = ConsoleProgress::default();

    let reports = scraper
        .scrape_years(range.start, range.end, modes, &progress)
        .await?;

    // Per-year summary only adds anything over a range
    if range.len() > 1 {
        println!("{}", "Summary:".bold());
        for report in &reports {
            println!("{}", report.render());
        }
    }

    let incomplete = reports.iter().filter(|r| !r.is_complete()).count();
    if incomplete > 0 {
        println!(
            "\n{}",
            format!(
                "{} of {} years incomplete; re-run to fetch the missing months",
                incomplete,
                reports.len()
            )
            .yellow()
        );
    }

    Ok(())
}
