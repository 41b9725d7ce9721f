//! Chromium-backed [`RenderEngine`].

use chromiumoxide::cdp::browser_protocol::page::EventLifecycleEvent;
use chromiumoxide::error::CdpError;
use chromiumoxide::handler::viewport::Viewport as BrowserViewport;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use url::Url;

use super::{RenderConfig, RenderEngine, Viewport, parse_url};
use crate::{PagedownError, Result};

/// Lifecycle event Chrome emits once no connections have been in flight for 500ms.
const NETWORK_IDLE: &str = "networkIdle";

/// Lifecycle event that opens a new navigation.
const LIFECYCLE_INIT: &str = "init";

/// Follows lifecycle events until the main frame's navigation goes network idle.
///
/// Events from child frames are ignored so an iframe settling first does not
/// end the wait. Without a known main frame every frame is accepted.
#[derive(Debug, Default)]
struct IdleWatch {
    navigation_started: bool,
}

impl IdleWatch {
    /// Returns true once the main frame reports network idle after its `init`.
    fn observe<F: PartialEq>(&mut self, frame: &F, main_frame: Option<&F>, name: &str) -> bool {
        if main_frame.is_some_and(|main| main != frame) {
            return false;
        }

        match name {
            LIFECYCLE_INIT => {
                self.navigation_started = true;
                false
            }
            NETWORK_IDLE => self.navigation_started,
            _ => false,
        }
    }
}

/// Render `url` in a fresh headless Chromium and return its HTML.
pub async fn load_page(url: &str, config: &RenderConfig) -> Result<String> {
    let url = parse_url(url)?;
    debug!(url = url.as_str(), "rendering page");

    let mut engine = ChromiumEngine::new();
    render_with(&mut engine, &url, config).await
}

/// Open `engine`, render `url` under the configured deadline, then close it.
///
/// `close` is awaited exactly once on every path. A failure to close is
/// logged and does not mask the rendering result.
pub async fn render_with<E: RenderEngine>(engine: &mut E, url: &Url, config: &RenderConfig) -> Result<String> {
    let rendered = open_and_render(engine, url, config).await;

    if let Err(e) = engine.close().await {
        warn!(error = %e, "failed to close rendering context");
    }

    rendered
}

async fn open_and_render<E: RenderEngine>(engine: &mut E, url: &Url, config: &RenderConfig) -> Result<String> {
    engine.open(config).await?;

    match tokio::time::timeout(config.timeout, engine.render(url, config)).await {
        Ok(rendered) => rendered,
        Err(_) => Err(PagedownError::Timeout { url: url.to_string(), timeout_ms: config.timeout_ms() }),
    }
}

/// [`RenderEngine`] backed by a chromiumoxide-controlled Chromium process.
#[derive(Default)]
pub struct ChromiumEngine {
    browser: Option<Browser>,
    handler: Option<JoinHandle<()>>,
}

impl ChromiumEngine {
    pub fn new() -> Self {
        Self::default()
    }

    fn browser_config(config: &RenderConfig) -> Result<BrowserConfig> {
        let Viewport { width, height } = config.viewport;

        let mut builder = BrowserConfig::builder().window_size(width, height).viewport(BrowserViewport {
            width,
            height,
            device_scale_factor: None,
            emulating_mobile: false,
            is_landscape: false,
            has_touch: false,
        });

        if !config.headless {
            builder = builder.with_head();
        }
        if !config.sandbox {
            builder = builder.no_sandbox();
        }
        if let Some(path) = &config.executable {
            builder = builder.chrome_executable(path);
        }

        builder.build().map_err(PagedownError::Browser)
    }

    async fn navigate(page: &Page, url: &Url) -> std::result::Result<String, CdpError> {
        let mut lifecycle = page.event_listener::<EventLifecycleEvent>().await?;
        let main_frame = page.mainframe().await?;

        page.goto(url.as_str()).await?;

        let mut watch = IdleWatch::default();
        while let Some(event) = lifecycle.next().await {
            if watch.observe(&event.frame_id, main_frame.as_ref(), &event.name) {
                break;
            }
        }
        debug!(url = url.as_str(), "network idle");

        page.find_element("body").await?;
        page.content().await
    }
}

impl RenderEngine for ChromiumEngine {
    async fn open(&mut self, config: &RenderConfig) -> Result<()> {
        let browser_config = Self::browser_config(config)?;

        let (browser, mut handler) =
            Browser::launch(browser_config).await.map_err(|e| PagedownError::Browser(e.to_string()))?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        debug!("browser launched");
        self.browser = Some(browser);
        self.handler = Some(handler);
        Ok(())
    }

    async fn render(&mut self, url: &Url, _config: &RenderConfig) -> Result<String> {
        let load_error = |e: CdpError| PagedownError::Load { url: url.to_string(), cause: e.to_string() };

        let browser = self
            .browser
            .as_ref()
            .ok_or_else(|| PagedownError::Browser("render called before open".to_string()))?;

        let page = browser.new_page("about:blank").await.map_err(load_error)?;
        Self::navigate(&page, url).await.map_err(load_error)
    }

    async fn close(&mut self) -> Result<()> {
        let closed = match self.browser.take() {
            Some(mut browser) => {
                let closed = browser.close().await.map(|_| ()).map_err(|e| PagedownError::Browser(e.to_string()));
                if let Err(e) = browser.wait().await {
                    debug!(error = %e, "browser process did not exit cleanly");
                }
                closed
            }
            None => Ok(()),
        };

        if let Some(handler) = self.handler.take() {
            handler.abort();
        }

        closed
    }
}
