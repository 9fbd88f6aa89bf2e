use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::programs::ProgramIndex;

/// Write one `{program}.txt` artifact per indexed program, each title on
/// its own line. Programs with no titles get an empty file, and any
/// artifact left over from an earlier run is replaced wholesale.
pub fn write_programs(index: &ProgramIndex, dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("creating output directory {}", dir.display()))?;

    for (program, titles) in index {
        let path = dir.join(format!("{program}.txt"));
        let mut body = String::new();
        for title in titles {
            body.push_str(title);
            body.push('\n');
        }
        fs::write(&path, body).with_context(|| format!("writing {}", path.display()))?;
    }

    info!("wrote {} program artifacts to {}", index.len(), dir.display());
    Ok(())
}

// ── Tests ──
