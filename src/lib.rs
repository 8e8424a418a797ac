//! AssetCheck Core - Server Catalog Asset Checker
//!
//! # Pipeline
//! 1. Walk the servers tree for `manifest.json` files
//! 2. Parse each manifest's `assets` section
//! 3. Confirm every referenced asset exists
//! 4. Read PNG dimensions straight from the IHDR header
//! 5. Apply the background and icon rules, reporting remediation

pub mod png;
pub mod dimensions;
pub mod manifest;
pub mod walker;
pub mod report;
pub mod check;

pub use png::{read_dimensions, read_file_dimensions, FormatError, ImageDimensions};
pub use dimensions::{validate_exact, validate_icon, ExactRule, IconRule, IconIssues};
pub use manifest::{pretty_server_name, AssetKind, AssetSpec, ManifestReport};
pub use walker::{find_manifests, WalkError};
pub use report::{ConsoleReporter, Level, MemoryReporter, Reporter};
pub use check::{run, CheckSummary};

pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const MANIFEST_FILE_NAME: &str = "manifest.json";
pub const DEFAULT_SERVERS_DIR: &str = "servers";
