//! Page loading through a headless browser.
//!
//! Documentation sites commonly build their content with JavaScript, so a
//! plain HTTP fetch sees an empty shell. [`load_page`] drives a headless
//! Chromium instance instead: it navigates to the URL, waits for the network
//! to go idle and for a `body` element to exist, then serializes the live DOM.
//!
//! The browser sits behind the [`RenderEngine`] trait. [`render_with`] owns the
//! engine's lifecycle and closes it exactly once on every path, including a
//! timeout.

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::{PagedownError, Result};

#[cfg(feature = "render")]
mod engine;

#[cfg(feature = "render")]
pub use engine::{ChromiumEngine, load_page, render_with};

const SUPPORTED_SCHEMES: &[&str] = &["http", "https", "file"];

/// Browser window dimensions in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { width: 1200, height: 800 }
    }
}

/// Headless browser configuration for rendering pages.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Deadline for navigation plus the network-idle wait.
    pub timeout: Duration,
    /// Window and layout viewport size.
    pub viewport: Viewport,
    /// Whether to run without a visible window.
    pub headless: bool,
    /// Whether to keep Chromium's sandbox enabled.
    ///
    /// Off by default so the tool works inside containers and CI runners.
    pub sandbox: bool,
    /// Path to a Chromium binary; auto-detected when `None`.
    pub executable: Option<PathBuf>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            viewport: Viewport::default(),
            headless: true,
            sandbox: false,
            executable: None,
        }
    }
}

impl RenderConfig {
    /// Timeout in whole milliseconds, as reported in errors.
    pub fn timeout_ms(&self) -> u64 {
        u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX)
    }
}

/// Something that can turn a URL into rendered document markup.
#[allow(async_fn_in_trait)]
pub trait RenderEngine {
    /// Acquire the rendering context.
    async fn open(&mut self, config: &RenderConfig) -> Result<()>;

    /// Navigate to `url` and return the serialized document.
    async fn render(&mut self, url: &Url, config: &RenderConfig) -> Result<String>;

    /// Release the rendering context. Must tolerate being called on an engine
    /// that never opened.
    async fn close(&mut self) -> Result<()>;
}

/// Validate a page URL before any browser is started.
pub fn parse_url(input: &str) -> Result<Url> {
    let url = Url::parse(input).map_err(|e| PagedownError::InvalidUrl(format!("{}: {}", input, e)))?;

    if !SUPPORTED_SCHEMES.contains(&url.scheme()) {
        return Err(PagedownError::InvalidUrl(format!(
            "{}: unsupported scheme '{}' (expected http, https or file)",
            input,
            url.scheme()
        )));
    }

    Ok(url)
}
