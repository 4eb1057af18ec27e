use std::fmt;
use std::io::Error;
use std::path::PathBuf;

use ratatui::crossterm::event::KeyEvent;
use tracing::warn;

use crate::layout;

/// Terminal width assumed when `COLUMNS` is unset or unusable.
pub const DEFAULT_TERMINAL_WIDTH: usize = 80;

#[derive(Debug)]
pub enum TVError {
    Usage(String),
    IoError(Error),
    FileNotFound(PathBuf),
    PermissionDenied(PathBuf),
    LoadingFailed(String),
    FormatError(csv::Error),
    QuoteError { line: usize, message: &'static str },
    EmptyInput(PathBuf),
    InvalidTerminalWidth(String),
    Logging(String),
    RunLoop(Error),
}

impl TVError {
    /// Max column width to fall back to when the terminal width could not be read.
    pub fn fallback_max_column_width(&self) -> usize {
        DEFAULT_TERMINAL_WIDTH / 2
    }
}

impl fmt::Display for TVError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TVError::Usage(usage) => write!(f, "{usage}"),
            TVError::IoError(e) => write!(f, "{e}"),
            TVError::FileNotFound(path) => {
                write!(f, "open {}: no such file or directory", path.display())
            }
            TVError::PermissionDenied(path) => {
                write!(f, "open {}: permission denied", path.display())
            }
            TVError::LoadingFailed(msg) => write!(f, "loading failed: {msg}"),
            TVError::FormatError(e) => write!(f, "{e}"),
            TVError::QuoteError { line, message } => {
                write!(f, "parse error on line {line}: {message}")
            }
            TVError::EmptyInput(path) => write!(f, "{}: file contains no records", path.display()),
            TVError::InvalidTerminalWidth(value) => {
                write!(f, "invalid terminal width COLUMNS={value:?}")
            }
            TVError::Logging(msg) => write!(f, "could not initialize logging: {msg}"),
            TVError::RunLoop(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for TVError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TVError::IoError(e) | TVError::RunLoop(e) => Some(e),
            TVError::FormatError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<Error> for TVError {
    fn from(err: Error) -> Self {
        TVError::IoError(err)
    }
}

impl From<csv::Error> for TVError {
    fn from(err: csv::Error) -> Self {
        TVError::FormatError(err)
    }
}

/// Everything the run loop can hand to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Key(KeyEvent),
    Resize(u16, u16),
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TVConfig {
    pub max_column_width: usize,
}

impl TVConfig {
    pub fn from_env() -> Self {
        let columns = std::env::var("COLUMNS").ok();
        Self::from_columns(columns.as_deref())
    }

    pub fn from_columns(columns: Option<&str>) -> Self {
        let max_column_width = layout::max_column_width(columns).unwrap_or_else(|e| {
            let fallback = e.fallback_max_column_width();
            warn!("{e}, using max column width {fallback}");
            fallback
        });
        Self { max_column_width }
    }
}
