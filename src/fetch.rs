use std::thread;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use headless_chrome::browser::tab::NoElementFound;
use headless_chrome::{Browser, LaunchOptions};
use tracing::info;

use crate::settings::Settings;

const NEXT_ANCHOR_SELECTOR: &str = ".pagination > li > a";
const TABLE_SELECTOR: &str = "table";

/// Source of rendered listing pages. The pipeline only depends on this
/// trait, so tests can swap the browser for canned HTML.
pub trait PageSource {
    /// Return every page of the listing, fully materialized, in order.
    fn fetch(&self, base_url: &str) -> Result<Vec<String>>;
}

/// Fetches pages by driving one headless Chrome session per call.
///
/// The listing renders its table client-side and swaps rows in place when
/// paginating, so each capture waits for the table to be present (bounded
/// by `load_timeout`) and then dwells `settle` before trusting the DOM.
pub struct ChromeFetcher {
    settle: Duration,
    load_timeout: Duration,
}

impl ChromeFetcher {
    pub fn new(settings: &Settings) -> Self {
        ChromeFetcher {
            settle: Duration::from_millis(settings.page_settle_ms),
            load_timeout: Duration::from_secs(settings.page_load_timeout_secs),
        }
    }
}

impl PageSource for ChromeFetcher {
    fn fetch(&self, base_url: &str) -> Result<Vec<String>> {
        let options = LaunchOptions::default_builder()
            .headless(true)
            .build()
            .map_err(|e| anyhow!("building chrome launch options: {e}"))?;
        // The browser process lives exactly as long as this binding; any
        // early return below still tears it down on drop.
        let browser = Browser::new(options).context("launching headless chrome")?;
        let tab = browser.new_tab().context("opening tab")?;

        tab.navigate_to(base_url)
            .with_context(|| format!("navigating to {base_url}"))?;
        tab.wait_until_navigated()?;

        let mut pages = Vec::new();
        loop {
            tab.wait_for_element_with_custom_timeout(TABLE_SELECTOR, self.load_timeout)
                .context("waiting for listing table")?;
            thread::sleep(self.settle);

            pages.push(tab.get_content()?);
            info!("page {} captured", pages.len());

            // Anchors inside the pagination control; none at all means a
            // single-page listing. Only the element-not-found case is
            // termination; a dead session must surface as an error.
            let anchors = absent_control_as_empty(tab.find_elements(NEXT_ANCHOR_SELECTOR))
                .context("scanning pagination anchors")?;
            let mut candidates = Vec::with_capacity(anchors.len());
            for anchor in &anchors {
                let text = anchor.get_inner_text().context("reading anchor text")?;
                let class = anchor
                    .get_attribute_value("class")
                    .context("reading anchor class")?
                    .unwrap_or_default();
                candidates.push((text, class));
            }

            match pick_next(&candidates) {
                Some(i) => {
                    anchors[i].click().context("clicking Next")?;
                }
                None => break,
            }
        }

        info!("crawl complete, {} pages", pages.len());
        Ok(pages)
    }
}

/// A query that found no pagination control is the crawl's normal end;
/// anything else the session reports stays an error.
fn absent_control_as_empty<T>(found: Result<Vec<T>>) -> Result<Vec<T>> {
    match found {
        Ok(anchors) => Ok(anchors),
        Err(e) if e.downcast_ref::<NoElementFound>().is_some() => Ok(Vec::new()),
        Err(e) => Err(e),
    }
}

/// Index of the first active Next anchor among (text, class) pairs.
fn pick_next(candidates: &[(String, String)]) -> Option<usize> {
    candidates
        .iter()
        .position(|(text, class)| is_active_next(text, class))
}

/// The Next control is the anchor whose trimmed text is exactly "Next"
/// and whose class list carries no disabled marker.
fn is_active_next(text: &str, class: &str) -> bool {
    text.trim() == "Next" && !class.contains("disabled")
}

// ── Tests ──
