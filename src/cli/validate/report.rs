//! Validation report types and formatting.

use std::collections::BTreeMap;
use std::fmt;

use owo_colors::OwoColorize;

use crate::utils::plural_count;

/// A single failed image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The image URL that failed.
    pub target: String,
    /// Error reason/message.
    pub reason: String,
}

/// Image failures grouped by the config field that referenced them.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub images: BTreeMap<String, Vec<ValidationError>>,
    pub checked: usize,
    pub skipped: usize,
}

impl ValidationReport {
    pub fn add_image(&mut self, source: String, url: String, reason: String) {
        self.images.entry(source).or_default().push(ValidationError {
            target: url,
            reason,
        });
    }

    /// Config fields with at least one failure.
    pub fn source_count(&self) -> usize {
        self.images.len()
    }

    pub fn error_count(&self) -> usize {
        self.images.values().map(Vec::len).sum()
    }

    pub fn is_ok(&self) -> bool {
        self.images.is_empty()
    }

    /// Print failures to stderr.
    pub fn print(&self) {
        if self.images.is_empty() {
            return;
        }
        eprintln!();
        eprintln!(
            "{} {}",
            "images".red().bold(),
            format!(
                "({}, {})",
                plural_count(self.source_count(), "source"),
                plural_count(self.error_count(), "error")
            )
            .dimmed()
        );

        for (source, errs) in &self.images {
            eprintln!("{}{}{}", "[".dimmed(), source.cyan(), "]".dimmed());
            for e in errs {
                if e.reason.is_empty() {
                    eprintln!("{} {}", "→".red(), e.target);
                } else {
                    eprintln!("{} {} {}", "→".red(), e.target, e.reason.dimmed());
                }
            }
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.error_count();
        if total == 0 {
            write!(
                f,
                "{}",
                format!("all {} loaded", plural_count(self.checked, "image")).green()
            )
        } else {
            write!(
                f,
                "{} {} {}",
                "found".dimmed(),
                total.to_string().red().bold(),
                format!("failed image{}", if total == 1 { "" } else { "s" }).dimmed()
            )
        }
    }
}
