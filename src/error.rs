// src/error.rs
//! Error types.
//!
//! `ParseError` is the only failure surface of the card engine: a deterministic verdict
//! about one already-fetched document. `ScrapeError` wraps it for the layers that fetch
//! pages and write files.

use std::fmt;

/// Result type alias for the scraping layers.
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Which extraction call failed: enough to log the failure and skip the card.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    pub source_url: Option<String>,
    pub requested: Option<String>,
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.source_url, &self.requested) {
            (Some(url), Some(name)) => write!(f, "{url}, card {name:?}"),
            (Some(url), None) => write!(f, "{url}"),
            (None, Some(name)) => write!(f, "card {name:?}"),
            (None, None) => write!(f, "unknown source"),
        }
    }
}

/// Fatal extraction failures. Optional fields that are missing are not errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The mandatory name anchor (or the requested card's block) is missing.
    #[error("malformed card page ({context}): {reason}")]
    MalformedDocument { context: Context, reason: String },

    /// Anchor count and markers match none of the known layouts.
    #[error("ambiguous layout ({context}): {anchors} card name blocks and no layout marker")]
    AmbiguousLayout { context: Context, anchors: usize },

    /// The source URL carries no numeric `multiverseid`.
    #[error("no numeric multiverseid in url: {url}")]
    IdentifierFormat { url: String },
}

impl ParseError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        ParseError::MalformedDocument { context: Context::default(), reason: reason.into() }
    }

    /// Attach the call's source URL and requested card name.
    pub fn with_context(self, source_url: &str, requested: Option<&str>) -> Self {
        let context = Context {
            source_url: Some(s!(source_url)),
            requested: requested.map(String::from),
        };
        match self {
            ParseError::MalformedDocument { reason, .. } => ParseError::MalformedDocument { context, reason },
            ParseError::AmbiguousLayout { anchors, .. } => ParseError::AmbiguousLayout { context, anchors },
            e @ ParseError::IdentifierFormat { .. } => e,
        }
    }

    pub fn context(&self) -> Option<&Context> {
        match self {
            ParseError::MalformedDocument { context, .. } | ParseError::AmbiguousLayout { context, .. } => Some(context),
            ParseError::IdentifierFormat { .. } => None,
        }
    }
}

/// Failures of the fetching / exporting layers.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Non-200 status or an unreadable response.
    #[error("HTTP error: {0}")]
    Http(String),

    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A listing page lacks the markup its parser anchors on.
    #[error("missing markup: {0}")]
    MissingMarkup(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_is_attached_and_displayed() {
        let e = ParseError::malformed("no Card Name block")
            .with_context("http://x/?multiverseid=1", Some("Forest"));
        let msg = e.to_string();
        assert!(msg.contains("multiverseid=1"));
        assert!(msg.contains("\"Forest\""));
        assert_eq!(e.context().and_then(|c| c.requested.as_deref()), Some("Forest"));
    }
}
