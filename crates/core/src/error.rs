//! Error types for pagedown operations.
//!
//! This module defines the main error type [`PagedownError`] which represents
//! everything that can go wrong while loading a page and turning it into
//! Markdown.
//!
//! Errors fall into two families. Load errors ([`PagedownError::is_load_error`])
//! come from the page loader: an unusable URL, a browser that would not start,
//! a navigation failure or a timeout. Conversion errors come from the
//! extraction stages. Both are surfaced the same way, as one message naming
//! the URL and the underlying cause.
//!
//! # Example
//!
//! ```rust
//! use pagedown_core::{PagedownError, Result};
//!
//! fn require_content(markdown: &str) -> Result<&str> {
//!     if markdown.is_empty() {
//!         return Err(PagedownError::Conversion("empty document".to_string()));
//!     }
//!     Ok(markdown)
//! }
//! ```

use thiserror::Error;

/// Main error type for page loading and conversion.
#[derive(Error, Debug)]
pub enum PagedownError {
    /// Invalid URL provided.
    ///
    /// Returned before any browser is launched when the input cannot be
    /// parsed or uses an unsupported scheme.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The headless browser could not be configured or started.
    #[error("Failed to launch browser: {0}")]
    Browser(String),

    /// The page failed to load or render.
    #[error("Failed to load {url}: {cause}")]
    Load { url: String, cause: String },

    /// Navigation did not settle before the configured deadline.
    #[error("Timed out after {timeout_ms}ms loading {url}")]
    Timeout { url: String, timeout_ms: u64 },

    /// A CSS selector in the extraction configuration is malformed.
    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    /// HTML to Markdown conversion failed.
    #[error("Failed to convert HTML: {0}")]
    Conversion(String),

    /// A stage failed while processing `url`.
    ///
    /// Wraps errors that do not already carry the URL they were raised for.
    #[error("Failed to scrape {url}: {source}")]
    Scrape {
        url: String,
        #[source]
        source: Box<PagedownError>,
    },
}

impl PagedownError {
    /// Returns true for failures raised while loading or rendering the page.
    pub fn is_load_error(&self) -> bool {
        match self {
            PagedownError::InvalidUrl(_)
            | PagedownError::Browser(_)
            | PagedownError::Load { .. }
            | PagedownError::Timeout { .. } => true,
            PagedownError::Scrape { source, .. } => source.is_load_error(),
            PagedownError::InvalidSelector(_) | PagedownError::Conversion(_) => false,
        }
    }

    /// Attaches `url` to an error that does not mention it yet.
    pub fn for_url(self, url: &str) -> Self {
        match self {
            PagedownError::Load { .. } | PagedownError::Timeout { .. } | PagedownError::Scrape { .. } => self,
            other => PagedownError::Scrape { url: url.to_string(), source: Box::new(other) },
        }
    }
}

/// Result type alias for PagedownError.
pub type Result<T> = std::result::Result<T, PagedownError>;
