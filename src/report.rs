//! Reporter - human-facing diagnostics
//!
//! Every line goes out as `[level] text`, coloured per level on a terminal.

use serde::{Deserialize, Serialize};
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Info,
    Warn,
    Error,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
        }
    }

    /// ANSI escape for this level.
    pub fn color(&self) -> &'static str {
        match self {
            Level::Info => "\x1b[32m",
            Level::Warn => "\x1b[33m",
            Level::Error => "\x1b[31m",
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const RESET: &str = "\x1b[0m";

/// Sink for diagnostics: a headline plus ordered detail lines.
pub trait Reporter {
    fn report(&mut self, level: Level, headline: &str, lines: &[String]);

    fn report_error(&mut self, headline: &str, lines: &[String]) {
        self.report(Level::Error, headline, lines);
    }
}

/// Writes to stderr.
#[derive(Debug, Clone)]
pub struct ConsoleReporter {
    color: bool,
}

impl ConsoleReporter {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Colour unless `NO_COLOR` is set.
    pub fn from_env() -> Self {
        Self::new(std::env::var_os("NO_COLOR").is_none())
    }

    pub fn format_line(&self, level: Level, text: &str) -> String {
        if self.color {
            format!("{}[{}] {}{}", level.color(), level, text, RESET)
        } else {
            format!("[{}] {}", level, text)
        }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::from_env()
    }
}

impl Reporter for ConsoleReporter {
    fn report(&mut self, level: Level, headline: &str, lines: &[String]) {
        let stderr = io::stderr();
        let mut out = stderr.lock();
        // A closed stderr leaves nowhere to complain to.
        let _ = writeln!(out, "{}", self.format_line(level, headline));
        for line in lines {
            let _ = writeln!(out, "{}", self.format_line(level, line));
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub level: Level,
    pub headline: String,
    pub lines: Vec<String>,
}

/// Keeps every record in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryReporter {
    pub records: Vec<Record>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn errors(&self) -> impl Iterator<Item = &Record> {
        self.records.iter().filter(|r| r.level == Level::Error)
    }

    /// True if any headline contains `needle`.
    pub fn has_headline(&self, needle: &str) -> bool {
        self.records.iter().any(|r| r.headline.contains(needle))
    }
}

impl Reporter for MemoryReporter {
    fn report(&mut self, level: Level, headline: &str, lines: &[String]) {
        self.records.push(Record {
            level,
            headline: headline.to_string(),
            lines: lines.to_vec(),
        });
    }
}
