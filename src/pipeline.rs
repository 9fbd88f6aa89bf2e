use anyhow::{Context, Result};
use tracing::info;

use crate::extract;
use crate::fetch::PageSource;
use crate::output;
use crate::programs::{ProgramAggregator, ProgramIndex, KNOWN_PROGRAMS};
use crate::settings::Settings;

/// One full scrape: fetch every page, extract and aggregate its rows, then
/// persist one artifact per known program.
///
/// The browser session lives inside `source.fetch` and is gone before any
/// parsing or writing starts. A fetch or parse failure propagates without
/// touching the artifacts of an earlier run.
pub fn run(source: &dyn PageSource, settings: &Settings) -> Result<ProgramIndex> {
    let pages = source.fetch(&settings.base_url)?;
    info!("fetched {} pages from {}", pages.len(), settings.base_url);

    let mut aggregator = ProgramAggregator::new(&KNOWN_PROGRAMS);
    for (n, page) in pages.iter().enumerate() {
        let rows =
            extract::extract_rows(page).with_context(|| format!("parsing page {}", n + 1))?;
        for row in &rows {
            aggregator.add(row);
        }
    }

    let index = aggregator.finalize();
    output::write_programs(&index, &settings.output_dir)?;
    Ok(index)
}

// ── Tests ──
