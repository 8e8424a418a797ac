//! Check Run - Single Entry Point
//!
//! Walk, validate every manifest, aggregate. Every manifest is checked even
//! after a failure so all diagnostics surface in one run.

use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::manifest;
use crate::report::{Level, Reporter};
use crate::walker::{find_manifests, WalkError};
use crate::ENGINE_VERSION;

#[derive(Debug, Clone, Serialize)]
pub struct FailedManifest {
    pub manifest: PathBuf,
    pub server: String,
    pub failures: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckSummary {
    pub engine_version: String,
    pub root: PathBuf,
    pub manifests_checked: usize,
    pub failed: Vec<FailedManifest>,
}

impl CheckSummary {
    /// False when nothing was found, since an empty catalog is a misconfiguration.
    pub fn passed(&self) -> bool {
        self.manifests_checked > 0 && self.failed.is_empty()
    }
}

/// Validate every manifest under `root`.
///
/// Only an unreadable root escapes as an error; per-manifest problems are
/// reported and recorded in the summary.
pub fn run(root: &Path, reporter: &mut dyn Reporter) -> Result<CheckSummary, WalkError> {
    let manifests = find_manifests(root)?;

    let mut summary = CheckSummary {
        engine_version: ENGINE_VERSION.to_string(),
        root: root.to_path_buf(),
        manifests_checked: manifests.len(),
        failed: vec![],
    };

    if manifests.is_empty() {
        reporter.report(
            Level::Error,
            "No manifest files found.",
            &[format!(
                "Expected at least one manifest.json under {}",
                root.display()
            )],
        );
        return Ok(summary);
    }

    for path in &manifests {
        let report = manifest::inspect(path);
        manifest::emit(&report, reporter);
        if !report.passed() {
            summary.failed.push(FailedManifest {
                manifest: report.manifest.clone(),
                server: report.server.clone(),
                failures: report.failures(),
            });
        }
    }

    info!(
        checked = summary.manifests_checked,
        failed = summary.failed.len(),
        "check complete"
    );

    if summary.passed() {
        reporter.report(Level::Info, "All checks passed!", &[]);
    }

    Ok(summary)
}
