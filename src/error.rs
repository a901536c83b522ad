//! Error types for reading plan requests

use std::path::PathBuf;

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Error, Debug)]
pub enum RequestError {
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid TOML request: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid JSON request: {0}")]
    Json(#[from] serde_json::Error),
}

impl RequestError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Location of the error in the request text, when known
    pub fn span(&self, source: &str) -> Option<Span> {
        match self {
            RequestError::Io { .. } => None,
            RequestError::Toml(err) => err.span(),
            RequestError::Json(err) => {
                let offset = line_column_offset(source, err.line(), err.column())?;
                Some(offset..(offset + 1).min(source.len()))
            }
        }
    }

    fn message(&self) -> String {
        match self {
            RequestError::Toml(err) => err.message().to_string(),
            other => other.to_string(),
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let Some(span) = self.span(source) else {
            return self.to_string();
        };
        let message = self.message();

        let mut buf = Vec::new();
        let written = Report::build(ReportKind::Error, filename, span.start)
            .with_message(&message)
            .with_label(
                Label::new((filename, span))
                    .with_message(message)
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);
        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => self.to_string(),
        }
    }
}

/// Byte offset of a 1-based line and column
fn line_column_offset(source: &str, line: usize, column: usize) -> Option<usize> {
    if line == 0 {
        return None;
    }
    let line_start: usize = source
        .split_inclusive('\n')
        .take(line - 1)
        .map(str::len)
        .sum();
    Some((line_start + column.saturating_sub(1)).min(source.len().saturating_sub(1)))
}
