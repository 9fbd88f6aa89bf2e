use std::path::PathBuf;

use anyhow::Result;
use config::{Config, Environment};
use serde::Deserialize;

/// Default listing URL. The site renders the occupation table client-side,
/// which is why fetching goes through a real browser session.
pub const DEFAULT_BASE_URL: &str =
    "https://immi.homeaffairs.gov.au/visas/working-in-australia/skill-occupation-list";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub base_url: String,
    pub output_dir: PathBuf,
    /// Extra dwell after the table is present, for in-place row swaps.
    pub page_settle_ms: u64,
    /// Upper bound on waiting for the listing table to appear.
    pub page_load_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            base_url: DEFAULT_BASE_URL.to_string(),
            output_dir: PathBuf::from("."),
            page_settle_ms: 12_000,
            page_load_timeout_secs: 30,
        }
    }
}

impl Settings {
    /// Load settings from `VISA_`-prefixed environment variables,
    /// falling back to defaults for anything unset.
    pub fn load() -> Result<Self> {
        let cfg = Config::builder()
            .add_source(Environment::with_prefix("VISA").try_parsing(true))
            .build()?;
        Ok(cfg.try_deserialize()?)
    }

    /// CLI flags win over env-derived values; unset flags change nothing.
    pub fn apply_overrides(
        &mut self,
        url: Option<String>,
        out_dir: Option<PathBuf>,
        settle_ms: Option<u64>,
        timeout_secs: Option<u64>,
    ) {
        if let Some(url) = url {
            self.base_url = url;
        }
        if let Some(dir) = out_dir {
            self.output_dir = dir;
        }
        if let Some(ms) = settle_ms {
            self.page_settle_ms = ms;
        }
        if let Some(secs) = timeout_secs {
            self.page_load_timeout_secs = secs;
        }
    }
}
