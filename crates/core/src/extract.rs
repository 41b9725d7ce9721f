use tracing::debug;

use crate::Result;
use crate::parse::Document;

/// Main content containers, highest priority first.
pub const MAIN_CONTENT_SELECTORS: &[&str] = &[
    "main",
    r#"[role="main"]"#,
    "#main-content",
    ".main-content",
    "article",
    ".article",
    ".content",
    "#content",
];

/// Configuration for main content selection
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Candidate selectors tried in order; the first match wins
    pub content_selectors: Vec<String>,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self { content_selectors: MAIN_CONTENT_SELECTORS.iter().map(|s| s.to_string()).collect() }
    }
}

/// The result of content selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedContent {
    /// Inner HTML of the chosen container
    pub content: String,
    /// Selector that matched, `None` when the body was used
    pub matched_selector: Option<String>,
}

/// Pick the main content container and return its inner HTML.
///
/// Falls back to the body when no selector matches.
pub fn select_main_content(doc: &Document, config: &ExtractConfig) -> Result<ExtractedContent> {
    for selector in &config.content_selectors {
        if let Some(element) = doc.select_first(selector)? {
            debug!(selector = selector.as_str(), "selected main content");
            return Ok(ExtractedContent { content: element.inner_html(), matched_selector: Some(selector.clone()) });
        }
    }

    debug!("no main content container, falling back to body");
    Ok(ExtractedContent { content: doc.body_inner_html(), matched_selector: None })
}
