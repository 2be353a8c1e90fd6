// Licensed under the Apache-2.0 license

//! Generation context: output tree layout and the summary sink.
//!
//! The context is built once by the driver and passed to every generator
//! explicitly; nothing about the output location is ambient state. Artifact
//! writes are whole-file overwrites, so re-running a generator replaces its
//! file. The summary file is the exception: it is opened in append mode for
//! each section and closed again, which keeps a partially completed run
//! readable and makes a double run double the summary.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use log::info;

use crate::summary::SummarySection;

/// Name of the cumulative summary document inside the SIM directory.
pub const SUMMARY_FILE: &str = "README.txt";

/// Subdirectories of the output root, in creation order.
const LAYOUT: &[&[&str]] = &[
    &["TOP"],
    &["TEST_LIB"],
    &["SEQ_LIB"],
    &["ENV"],
    &["ENV", "AGENTS"],
    &["ENV", "SBD"],
    &["RAL"],
    &["SIM"],
];

/// Handle to the output tree for one generation run.
#[derive(Clone, Debug)]
pub struct GenContext {
    output_root: PathBuf,
}

impl GenContext {
    pub fn new(output_root: impl Into<PathBuf>) -> Self {
        GenContext {
            output_root: output_root.into(),
        }
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// Creates the output tree. Idempotent; existing directories and their
    /// contents are left alone.
    pub fn bootstrap(&self) -> Result<()> {
        for components in LAYOUT {
            let mut dir = self.output_root.clone();
            dir.extend(components.iter());
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("failed to create {}", dir.display()))?;
            info!("Created: {}", dir.display());
        }
        Ok(())
    }

    pub fn top_dir(&self) -> PathBuf {
        self.output_root.join("TOP")
    }

    pub fn test_lib_dir(&self) -> PathBuf {
        self.output_root.join("TEST_LIB")
    }

    pub fn seq_lib_dir(&self) -> PathBuf {
        self.output_root.join("SEQ_LIB")
    }

    pub fn env_dir(&self) -> PathBuf {
        self.output_root.join("ENV")
    }

    pub fn agents_dir(&self) -> PathBuf {
        self.env_dir().join("AGENTS")
    }

    pub fn sim_dir(&self) -> PathBuf {
        self.output_root.join("SIM")
    }

    pub fn summary_path(&self) -> PathBuf {
        self.sim_dir().join(SUMMARY_FILE)
    }

    /// Writes one artifact, replacing any previous version.
    pub fn write_artifact(&self, path: &Path, contents: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        std::fs::write(path, contents)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!("Generated: {}", path.display());
        Ok(())
    }

    /// Appends one section to the summary document and closes it again.
    pub fn append_summary(&self, section: &SummarySection) -> Result<()> {
        let path = self.summary_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("failed to open {}", path.display()))?;
        file.write_all(section.render().as_bytes())
            .with_context(|| format!("failed to append to {}", path.display()))?;
        Ok(())
    }
}
