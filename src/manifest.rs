//! Manifest Validator
//!
//! `inspect` gathers per-asset outcomes without side effects beyond file reads.
//! `validate` runs `inspect` and turns every failure into a reported diagnostic.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::dimensions::{DimensionRule, DimensionViolation, ExactRule, IconRule};
use crate::png::{read_file_dimensions, FormatError, ImageDimensions};
use crate::report::Reporter;

/// The `assets` object of a manifest. Paths are relative to the manifest's directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetSpec {
    #[serde(default)]
    pub background: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
}

impl AssetSpec {
    /// Declared path for `kind`; an empty string counts as absent.
    pub fn path_for(&self, kind: AssetKind) -> Option<&str> {
        let declared = match kind {
            AssetKind::Background => self.background.as_deref(),
            AssetKind::Icon => self.icon.as_deref(),
        };
        declared.filter(|p| !p.is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(default)]
    assets: Option<AssetSpec>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Background,
    Icon,
}

impl AssetKind {
    pub const ALL: [AssetKind; 2] = [AssetKind::Background, AssetKind::Icon];

    pub fn key(&self) -> &'static str {
        match self {
            AssetKind::Background => "background",
            AssetKind::Icon => "icon",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AssetKind::Background => "Background",
            AssetKind::Icon => "Icon",
        }
    }

    pub fn rule(&self) -> &'static dyn DimensionRule {
        match self {
            AssetKind::Background => &ExactRule::BACKGROUND,
            AssetKind::Icon => &IconRule::DEFAULT,
        }
    }

    fn example_path(&self) -> &'static str {
        match self {
            AssetKind::Background => "assets/background.png",
            AssetKind::Icon => "assets/icon.png",
        }
    }

    fn shape_hint(&self) -> &'static str {
        match self {
            AssetKind::Background => "pointing to a PNG file (1920x1080)",
            AssetKind::Icon => "pointing to a square PNG (recommended 256x256)",
        }
    }
}

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Failed to read manifest: {0}")]
    Read(#[from] std::io::Error),

    #[error("Invalid manifest JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("No assets section")]
    MissingAssets,
}

#[derive(Debug, Error)]
pub enum AssetFailure {
    #[error("no {} image specified", .0.key())]
    MissingField(AssetKind),

    #[error("{} file not found: {declared}", .kind.label())]
    MissingFile {
        kind: AssetKind,
        declared: String,
        resolved: PathBuf,
    },

    #[error("error validating {}: {source}", .kind.key())]
    Format {
        kind: AssetKind,
        resolved: PathBuf,
        #[source]
        source: FormatError,
    },

    #[error("{} dimensions are incorrect: {} (expected: {})", .kind.label(), .violation.actual, .violation.expected)]
    Dimensions {
        kind: AssetKind,
        resolved: PathBuf,
        violation: DimensionViolation,
    },
}

#[derive(Debug)]
pub struct AssetCheck {
    pub kind: AssetKind,
    pub result: Result<ImageDimensions, AssetFailure>,
}

impl AssetCheck {
    pub fn passed(&self) -> bool {
        self.result.is_ok()
    }
}

#[derive(Debug)]
pub struct ManifestReport {
    pub manifest: PathBuf,
    pub server: String,
    /// One entry per asset kind, in `AssetKind::ALL` order.
    pub outcome: Result<Vec<AssetCheck>, ManifestError>,
}

impl ManifestReport {
    pub fn passed(&self) -> bool {
        match &self.outcome {
            Ok(checks) => checks.iter().all(AssetCheck::passed),
            Err(_) => false,
        }
    }

    pub fn check(&self, kind: AssetKind) -> Option<&AssetCheck> {
        self.outcome.as_ref().ok()?.iter().find(|c| c.kind == kind)
    }

    /// One line per failure.
    pub fn failures(&self) -> Vec<String> {
        match &self.outcome {
            Ok(checks) => checks
                .iter()
                .filter_map(|c| c.result.as_ref().err())
                .map(|e| e.to_string())
                .collect(),
            Err(e) => vec![e.to_string()],
        }
    }
}

/// Parent directory name with a trailing `smp` then `mc` suffix stripped,
/// each optionally preceded by `-` or `_`. Case-insensitive.
pub fn pretty_server_name(manifest_path: &Path) -> String {
    let name = manifest_path
        .parent()
        .and_then(Path::file_name)
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    let name = strip_suffix_ci(&name, "smp");
    strip_suffix_ci(name, "mc").to_string()
}

fn strip_suffix_ci<'a>(name: &'a str, suffix: &str) -> &'a str {
    let bytes = name.as_bytes();
    if bytes.len() < suffix.len()
        || !bytes[bytes.len() - suffix.len()..].eq_ignore_ascii_case(suffix.as_bytes())
    {
        return name;
    }
    let trimmed = &name[..name.len() - suffix.len()];
    trimmed
        .strip_suffix('-')
        .or_else(|| trimmed.strip_suffix('_'))
        .unwrap_or(trimmed)
}

/// Path shown to the user: relative to the working directory when possible.
pub fn display_path(path: &Path) -> String {
    std::env::current_dir()
        .ok()
        .and_then(|cwd| path.strip_prefix(cwd).ok().map(Path::to_path_buf))
        .unwrap_or_else(|| path.to_path_buf())
        .display()
        .to_string()
}

/// Check every asset of one manifest.
pub fn inspect(manifest_path: &Path) -> ManifestReport {
    let server = pretty_server_name(manifest_path);
    debug!(manifest = %manifest_path.display(), %server, "inspecting manifest");

    ManifestReport {
        manifest: manifest_path.to_path_buf(),
        server,
        outcome: load_assets(manifest_path).map(|assets| {
            let dir = manifest_path.parent().unwrap_or_else(|| Path::new(""));
            AssetKind::ALL
                .iter()
                .map(|&kind| AssetCheck {
                    kind,
                    result: check_asset(dir, &assets, kind),
                })
                .collect()
        }),
    }
}

/// Check one manifest and report every diagnostic. True iff all assets pass.
pub fn validate(manifest_path: &Path, reporter: &mut dyn Reporter) -> bool {
    let report = inspect(manifest_path);
    emit(&report, reporter);
    report.passed()
}

fn load_assets(manifest_path: &Path) -> Result<AssetSpec, ManifestError> {
    let content = fs::read_to_string(manifest_path)?;
    let manifest: Manifest = serde_json::from_str(&content)?;
    manifest.assets.ok_or(ManifestError::MissingAssets)
}

/// Join `declared` onto the manifest directory. Root and drive prefixes are
/// dropped so `/assets/icon.png` still lands inside `dir`.
pub fn resolve_asset(dir: &Path, declared: &str) -> PathBuf {
    let relative: PathBuf = Path::new(declared)
        .components()
        .filter(|c| !matches!(c, Component::Prefix(_) | Component::RootDir))
        .collect();
    dir.join(relative)
}

fn check_asset(
    dir: &Path,
    assets: &AssetSpec,
    kind: AssetKind,
) -> Result<ImageDimensions, AssetFailure> {
    let declared = assets.path_for(kind).ok_or(AssetFailure::MissingField(kind))?;
    let resolved = resolve_asset(dir, declared);

    if !resolved.exists() {
        return Err(AssetFailure::MissingFile {
            kind,
            declared: declared.to_string(),
            resolved,
        });
    }

    let dims = match read_file_dimensions(&resolved) {
        Ok(dims) => dims,
        Err(source) => {
            return Err(AssetFailure::Format { kind, resolved, source });
        }
    };
    debug!(asset = kind.key(), path = %resolved.display(), %dims, "read dimensions");

    match kind.rule().check(dims) {
        None => Ok(dims),
        Some(violation) => Err(AssetFailure::Dimensions { kind, resolved, violation }),
    }
}

/// Render a report's failures through `reporter`.
pub fn emit(report: &ManifestReport, reporter: &mut dyn Reporter) {
    let name = &report.server;

    let checks = match &report.outcome {
        Ok(checks) => checks,
        Err(ManifestError::MissingAssets) => {
            reporter.report_error(
                &format!("No assets section found for {name}"),
                &[
                    "How to fix: Add an `assets` object to the manifest. Example manifest entry:".to_string(),
                    r#"  "assets": { "background": "assets/background.png", "icon": "assets/icon.png" }"#.to_string(),
                ],
            );
            return;
        }
        Err(e) => {
            reporter.report_error(&format!("Error checking images for {name}: {e}"), &[]);
            return;
        }
    };

    for check in checks {
        if let Err(failure) = &check.result {
            emit_failure(name, failure, reporter);
        }
    }
}

fn emit_failure(name: &str, failure: &AssetFailure, reporter: &mut dyn Reporter) {
    match failure {
        AssetFailure::MissingField(kind) => {
            reporter.report_error(
                &format!("No {} image specified for {name}", kind.key()),
                &[format!(
                    "How to fix: Add a {} entry to the manifest under `assets`, {}.",
                    kind.key(),
                    kind.shape_hint()
                )],
            );
        }
        AssetFailure::MissingFile { kind, declared, .. } => {
            reporter.report_error(
                &format!("{} file not found for {name}: {declared}", kind.label()),
                &[
                    "How to fix: Ensure the path in the manifest is correct and the file exists. Example manifest entry:".to_string(),
                    format!(r#"  "assets": {{ "{}": "{}" }}"#, kind.key(), kind.example_path()),
                ],
            );
        }
        AssetFailure::Format { resolved, .. } => {
            reporter.report_error(
                &format!("servers/{name}: {}", capitalize(&failure.to_string())),
                &[format!(
                    "Suggestion: Open the file and confirm it's a valid PNG. Run: file \"{}\"",
                    display_path(resolved)
                )],
            );
        }
        AssetFailure::Dimensions { kind, resolved, violation } => {
            let mut lines = violation.issues.clone();
            if !lines.is_empty() {
                lines.push(String::new());
            }
            lines.extend(kind.rule().remediation(&display_path(resolved)));
            reporter.report_error(&format!("servers/{name}: {failure}."), &lines);
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
