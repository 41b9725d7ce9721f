pub mod error;
pub mod extract;
pub mod markdown;
pub mod noise;
pub mod normalize;
pub mod parse;
pub mod pipeline;
pub mod render;

pub use error::{PagedownError, Result};
#[doc(hidden)]
pub use extract::{ExtractConfig, ExtractedContent, MAIN_CONTENT_SELECTORS};
pub use extract::select_main_content;
pub use markdown::{MarkdownConfig, MarkdownConverter, convert_to_markdown};
#[doc(hidden)]
pub use noise::{NAV_KEYWORDS, NOISE_SELECTORS, NoiseConfig};
pub use noise::remove_noise;
pub use normalize::{NORMALIZE_RULES, normalize_markdown};
pub use parse::Document;
pub use pipeline::{ScrapeConfig, ScrapeConfigBuilder, html_to_markdown};
#[cfg(feature = "render")]
pub use pipeline::{scrape_to_markdown, scrape_to_markdown_with_config};
pub use render::{RenderConfig, RenderEngine, Viewport, parse_url};
#[cfg(feature = "render")]
pub use render::{ChromiumEngine, load_page, render_with};
