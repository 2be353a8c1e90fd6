// Licensed under the Apache-2.0 license

//! Standard banner insertion for generated files.
//!
//! Prepends the tool's banner comment to a file exactly once; a file whose
//! first lines already carry the banner is left untouched.

use std::path::Path;

use anyhow::{Context, Result};
use log::info;

/// Line used to detect an already-inserted banner.
const BANNER_MARKER: &str = "Generated by : uvmtb";

/// Number of leading lines scanned for an existing banner.
const MARKER_SCAN_LINES: usize = 10;

/// Renders the banner for the given version and human-readable date.
pub fn render_banner(version: &str, date: &str) -> String {
    format!(
        "// =============================================================================\n\
         // {BANNER_MARKER}\n\
         // Date         : {date}\n\
         // Version      : {version}\n\
         //\n\
         // Description  :\n\
         //   Skeletal UVM testbench component generated from a tabular interface\n\
         //   description. Fill in the protocol-specific TODOs before simulation.\n\
         // =============================================================================\n"
    )
}

/// Inserts the banner at the top of `path`, skipping files that already
/// carry it.
pub fn insert_header(path: &Path, version: &str) -> Result<()> {
    let original = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    if original
        .lines()
        .take(MARKER_SCAN_LINES)
        .any(|line| line.contains(BANNER_MARKER))
    {
        info!("Header already present in {}; skipping", path.display());
        return Ok(());
    }

    let date = chrono::Local::now().format("%B %d, %Y").to_string();
    let updated = format!("{}\n{original}", render_banner(version, &date));
    std::fs::write(path, updated)
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!("Header inserted at top of {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_contains_marker_and_version() {
        let banner = render_banner("1.0.0", "July 06, 2025");
        assert!(banner.contains(BANNER_MARKER));
        assert!(banner.contains("Version      : 1.0.0"));
        assert!(banner.contains("Date         : July 06, 2025"));
    }

    #[test]
    fn test_insertion_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("top.sv");
        std::fs::write(&file, "module top;\nendmodule\n").unwrap();

        insert_header(&file, "1.0.0").unwrap();
        let once = std::fs::read_to_string(&file).unwrap();
        assert!(once.starts_with("// ====="));
        assert!(once.ends_with("module top;\nendmodule\n"));

        insert_header(&file, "1.0.0").unwrap();
        let twice = std::fs::read_to_string(&file).unwrap();
        assert_eq!(once, twice, "second insertion must be a no-op");
    }
}
