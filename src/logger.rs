//! Logging utilities with colored output and progress display.
//!
//! This module provides:
//! - `log!` macro for formatted terminal output with colored prefixes
//! - `debug!` macro, only printed with `--verbose`
//! - `Progress` for a single-line counter (pages written, images checked)
//!
//! Everything here goes to stderr. Stdout carries command output only, so
//! `vitrine head --json` stays parseable with warnings or `--verbose` on.
//!
//! ```ignore
//! log!("build"; "writing {} pages", count);
//!
//! let progress = Progress::new("validate", 12);
//! progress.inc();
//! progress.finish();
//! ```

use crossterm::{
    cursor, execute,
    terminal::{Clear, ClearType},
};
use owo_colors::OwoColorize;
use parking_lot::Mutex;
use std::{
    io::{Write, stderr},
    sync::atomic::{AtomicBool, AtomicUsize, Ordering},
};

/// Global verbose flag (set by --verbose CLI argument)
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Whether a progress line currently owns the last terminal row.
static PROGRESS_ACTIVE: AtomicBool = AtomicBool::new(false);

/// Set verbose mode globally
pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

/// Check if verbose mode is enabled
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

// ============================================================================
// Log Macros
// ============================================================================

/// Log a message with a colored module prefix
///
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a debug message (only shown when --verbose is enabled)
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Log a message with a colored module prefix
#[inline]
pub fn log(module: &str, message: &str) {
    let prefix = colorize_prefix(module);
    let mut out = stderr().lock();

    if PROGRESS_ACTIVE.load(Ordering::SeqCst) {
        execute!(out, cursor::MoveToColumn(0)).ok();
    }
    execute!(out, Clear(ClearType::UntilNewLine)).ok();

    writeln!(out, "{prefix} {message}").ok();
    out.flush().ok();
}

/// Apply color to a module prefix based on module type
#[inline]
fn colorize_prefix(module: &str) -> String {
    let prefix = format!("[{module}]");
    match module.to_ascii_lowercase().as_str() {
        "build" => prefix.bright_blue().bold().to_string(),
        "lazy" | "validate" => prefix.bright_green().bold().to_string(),
        "error" => prefix.bright_red().bold().to_string(),
        _ => prefix.bright_yellow().bold().to_string(),
    }
}

// ============================================================================
// Progress Line
// ============================================================================

/// Single-line progress counter, redrawn in place.
///
/// The final state is kept on screen by `finish()`; dropping without
/// finishing clears the line.
pub struct Progress {
    module: &'static str,
    total: usize,
    current: AtomicUsize,
    lock: Mutex<()>,
}

impl Progress {
    pub fn new(module: &'static str, total: usize) -> Self {
        PROGRESS_ACTIVE.store(true, Ordering::SeqCst);
        let progress = Self {
            module,
            total,
            current: AtomicUsize::new(0),
            lock: Mutex::new(()),
        };
        progress.display(false);
        progress
    }

    /// Increment the counter. Skips the redraw if another thread holds it.
    #[inline]
    pub fn inc(&self) {
        self.current.fetch_add(1, Ordering::Relaxed);
        if let Some(_guard) = self.lock.try_lock() {
            self.display(false);
        }
    }

    fn display(&self, newline: bool) {
        let current = self.current.load(Ordering::Relaxed);
        let prefix = colorize_prefix(self.module);

        let mut out = stderr().lock();
        execute!(
            out,
            cursor::MoveToColumn(0),
            Clear(ClearType::CurrentLine)
        )
        .ok();
        if newline {
            writeln!(out, "{prefix} ({current}/{})", self.total).ok();
        } else {
            write!(out, "{prefix} ({current}/{})", self.total).ok();
        }
        out.flush().ok();
    }

    /// Keep the final count on screen and release the line.
    pub fn finish(self) {
        PROGRESS_ACTIVE.store(false, Ordering::SeqCst);
        {
            let _guard = self.lock.lock();
            self.display(true);
        }
        std::mem::forget(self);
    }
}

impl Drop for Progress {
    fn drop(&mut self) {
        PROGRESS_ACTIVE.store(false, Ordering::SeqCst);

        let mut out = stderr().lock();
        execute!(
            out,
            cursor::MoveToColumn(0),
            Clear(ClearType::CurrentLine)
        )
        .ok();
        out.flush().ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_toggle() {
        set_verbose(true);
        assert!(is_verbose());
        set_verbose(false);
        assert!(!is_verbose());
    }

    #[test]
    fn test_progress_counts() {
        let progress = Progress::new("build", 3);
        progress.inc();
        progress.inc();
        assert_eq!(progress.current.load(Ordering::Relaxed), 2);
        progress.finish();
        assert!(!PROGRESS_ACTIVE.load(Ordering::SeqCst));
    }
}
