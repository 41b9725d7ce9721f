//! Page to Markdown pipeline.
//!
//! Stages run strictly in order on a single document: render, remove noise,
//! select the main content, convert to Markdown, normalize. The first stage
//! to fail aborts the run; there is no partial output.
//!
//! # Example
//!
//! ```rust
//! use pagedown_core::{ScrapeConfig, html_to_markdown};
//!
//! let html = "<html><body><nav>Menu</nav><main><h1>Title</h1><p>Hello</p></main></body></html>";
//! let markdown = html_to_markdown(html, &ScrapeConfig::default()).unwrap();
//! assert_eq!(markdown, "# Title\n\nHello");
//! ```

use std::path::PathBuf;
use std::time::Duration;

use tracing::debug;
#[cfg(feature = "render")]
use tracing::info;

use crate::Result;
use crate::extract::{ExtractConfig, select_main_content};
use crate::markdown::{MarkdownConfig, MarkdownConverter};
use crate::noise::{NoiseConfig, remove_noise};
use crate::normalize::normalize_markdown;
use crate::parse::Document;
use crate::render::{RenderConfig, Viewport};

/// Configuration for every stage of the pipeline.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use pagedown_core::ScrapeConfig;
///
/// let config = ScrapeConfig::builder()
///     .timeout(Duration::from_secs(60))
///     .viewport(1440, 900)
///     .build();
/// assert_eq!(config.render.viewport.width, 1440);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScrapeConfig {
    /// Browser and navigation settings.
    pub render: RenderConfig,
    /// Noise removal rules.
    pub noise: NoiseConfig,
    /// Main content candidates.
    pub extract: ExtractConfig,
    /// Markdown conversion options.
    pub markdown: MarkdownConfig,
}

impl ScrapeConfig {
    /// Creates a new builder for ScrapeConfig.
    pub fn builder() -> ScrapeConfigBuilder {
        ScrapeConfigBuilder::new()
    }
}

/// Builder for ScrapeConfig.
pub struct ScrapeConfigBuilder {
    config: ScrapeConfig,
}

impl ScrapeConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: ScrapeConfig::default() }
    }

    /// Sets the navigation timeout.
    pub fn timeout(mut self, value: Duration) -> Self {
        self.config.render.timeout = value;
        self
    }

    /// Sets the browser viewport size.
    pub fn viewport(mut self, width: u32, height: u32) -> Self {
        self.config.render.viewport = Viewport { width, height };
        self
    }

    /// Sets whether the browser runs headless.
    pub fn headless(mut self, value: bool) -> Self {
        self.config.render.headless = value;
        self
    }

    /// Sets whether Chromium's sandbox stays enabled.
    pub fn sandbox(mut self, value: bool) -> Self {
        self.config.render.sandbox = value;
        self
    }

    /// Uses the Chromium binary at `path` instead of auto-detecting one.
    pub fn executable(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.render.executable = Some(path.into());
        self
    }

    /// Adds a selector to the noise denylist.
    pub fn remove_selector(mut self, selector: impl Into<String>) -> Self {
        self.config.noise.remove_selectors.push(selector.into());
        self
    }

    /// Sets whether link-heavy navigation lists are removed.
    pub fn remove_nav_lists(mut self, value: bool) -> Self {
        self.config.noise.remove_nav_lists = value;
        self
    }

    /// Replaces the main content candidates, highest priority first.
    pub fn content_selectors<I, S>(mut self, selectors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.extract.content_selectors = selectors.into_iter().map(Into::into).collect();
        self
    }

    /// Sets whether code is always rendered as language-tagged fences.
    pub fn preserve_code(mut self, value: bool) -> Self {
        self.config.markdown.preserve_code = value;
        self
    }

    /// Builds the config.
    pub fn build(self) -> ScrapeConfig {
        self.config
    }
}

impl Default for ScrapeConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs the offline stages over already rendered HTML.
///
/// Parses `html`, strips noise, picks the main content, converts it and
/// normalizes the result.
pub fn html_to_markdown(html: &str, config: &ScrapeConfig) -> Result<String> {
    let mut doc = Document::parse(html);
    remove_noise(&mut doc, &config.noise)?;

    let main = select_main_content(&doc, &config.extract)?;
    debug!(
        selector = main.matched_selector.as_deref().unwrap_or("body"),
        bytes = main.content.len(),
        "main content selected"
    );

    let markdown = MarkdownConverter::new(&config.markdown).convert(&main.content)?;
    debug!(bytes = markdown.len(), "converted to markdown");

    Ok(normalize_markdown(&markdown))
}

/// Renders `url` and converts its main content using default settings.
///
/// # Example
///
/// ```no_run
/// use pagedown_core::scrape_to_markdown;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let markdown = scrape_to_markdown("https://docs.rs/tokio").await?;
///     println!("{}", markdown);
///     Ok(())
/// }
/// ```
#[cfg(feature = "render")]
pub async fn scrape_to_markdown(url: &str) -> Result<String> {
    scrape_to_markdown_with_config(url, &ScrapeConfig::default()).await
}

/// Renders `url` and converts its main content with custom settings.
///
/// Errors name the URL that was being scraped.
#[cfg(feature = "render")]
pub async fn scrape_to_markdown_with_config(url: &str, config: &ScrapeConfig) -> Result<String> {
    info!("Scraping {}...", url);

    let html = crate::render::load_page(url, &config.render)
        .await
        .map_err(|e| e.for_url(url))?;
    debug!(bytes = html.len(), "page rendered");

    let markdown = html_to_markdown(&html, config).map_err(|e| e.for_url(url))?;
    info!(url, bytes = markdown.len(), "scrape finished");

    Ok(markdown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PagedownError;

    const DOCS_PAGE: &str = r##"
        <!DOCTYPE html>
        <html>
        <head><title>Guide</title><style>.x{}</style></head>
        <body>
            <header><a href="/">Home</a></header>
            <nav><a href="/docs">Docs</a></nav>
            <main>
                <h1>Install</h1>
                <p>Run the <em>installer</em> first.</p>
                <pre><code class="language-bash">curl -sSf https://example.com | sh</code></pre>
                <h2>Next steps</h2>
                <p>Read the tutorial.</p>
            </main>
            <footer>Copyright</footer>
            <script>track()</script>
        </body>
        </html>
    "##;

    #[test]
    fn test_scrape_config_default() {
        let config = ScrapeConfig::default();

        assert_eq!(config.render.timeout, Duration::from_secs(30));
        assert_eq!(config.render.viewport, Viewport { width: 1200, height: 800 });
        assert!(config.noise.remove_nav_lists);
        assert_eq!(config.extract.content_selectors.first().map(String::as_str), Some("main"));
        assert!(config.markdown.preserve_code);
    }

    #[test]
    fn test_scrape_config_builder() {
        let config = ScrapeConfig::builder()
            .timeout(Duration::from_secs(5))
            .viewport(800, 600)
            .headless(false)
            .sandbox(true)
            .executable("/usr/bin/chromium")
            .remove_selector(".cookie-banner")
            .content_selectors(["#docs"])
            .preserve_code(false)
            .build();

        assert_eq!(config.render.timeout, Duration::from_secs(5));
        assert_eq!(config.render.viewport, Viewport { width: 800, height: 600 });
        assert!(!config.render.headless);
        assert!(config.render.sandbox);
        assert_eq!(config.render.executable, Some(PathBuf::from("/usr/bin/chromium")));
        assert_eq!(config.noise.remove_selectors.last().map(String::as_str), Some(".cookie-banner"));
        assert_eq!(config.extract.content_selectors, vec!["#docs".to_string()]);
        assert!(!config.markdown.preserve_code);
    }

    #[test]
    fn test_simple_main_content() {
        let html = "<html><body><main><h1>Title</h1><p>Hello</p></main></body></html>";
        assert_eq!(html_to_markdown(html, &ScrapeConfig::default()).unwrap(), "# Title\n\nHello");
    }

    #[test]
    fn test_body_fallback() {
        let html = "<html><body><div><p>Just text</p></div></body></html>";
        assert_eq!(html_to_markdown(html, &ScrapeConfig::default()).unwrap(), "Just text");
    }

    #[test]
    fn test_docs_page() {
        let markdown = html_to_markdown(DOCS_PAGE, &ScrapeConfig::default()).unwrap();

        assert!(markdown.starts_with("# Install"));
        assert!(markdown.contains("_installer_"));
        assert!(markdown.contains("```bash\ncurl -sSf https://example.com | sh\n```"));
        assert!(markdown.contains("\n## Next steps"));
        assert!(!markdown.contains("Home"));
        assert!(!markdown.contains("Docs"));
        assert!(!markdown.contains("Copyright"));
        assert!(!markdown.contains("track()"));
        assert!(!markdown.contains("\n\n\n"));
    }

    #[test]
    fn test_noise_inside_main_is_removed() {
        let html = r#"<html><body><main><aside>Related</aside><p>Kept</p></main></body></html>"#;
        assert_eq!(html_to_markdown(html, &ScrapeConfig::default()).unwrap(), "Kept");
    }

    #[test]
    fn test_container_inside_removed_noise_is_not_selected() {
        let html = r#"<html><body><aside><div class="content">Sidebar</div></aside><div id="content"><p>Real</p></div></body></html>"#;
        assert_eq!(html_to_markdown(html, &ScrapeConfig::default()).unwrap(), "Real");
    }

    #[test]
    fn test_invalid_selector_fails_whole_run() {
        let config = ScrapeConfig::builder().remove_selector("[[broken").build();
        let err = html_to_markdown("<p>x</p>", &config).unwrap_err();

        assert!(matches!(err, PagedownError::InvalidSelector(_)));
    }

    #[cfg(feature = "render")]
    #[tokio::test]
    async fn test_scrape_invalid_url_names_input() {
        let err = scrape_to_markdown("not a url").await.unwrap_err();

        assert!(err.is_load_error());
        assert!(err.to_string().contains("not a url"));
    }
}
