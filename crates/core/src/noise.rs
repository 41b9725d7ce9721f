use tracing::debug;

use crate::Result;
use crate::parse::{Document, Element, ElementId};

/// Structural, ARIA and class/id patterns removed from every page, in order.
pub const NOISE_SELECTORS: &[&str] = &[
    "script",
    "style",
    "iframe",
    "nav",
    "header",
    "footer",
    "noscript",
    "svg",
    r#"[role="alert"]"#,
    r#"[role="banner"]"#,
    r#"[role="dialog"]"#,
    r#"[role="alertdialog"]"#,
    r#"[role="region"][aria-label*="skip" i]"#,
    r#"[aria-modal="true"]"#,
    r#"[role="navigation"]"#,
    r#"[role="complementary"]"#,
    r#"[role="search"]"#,
    r#"[aria-hidden="true"]"#,
    "aside",
    ".sidebar",
    ".navigation",
    ".nav",
    ".menu",
    ".search",
    "#sidebar",
    "#navigation",
    "#menu",
    "#search",
];

/// List containers inspected by the navigation-list heuristic.
pub const NAV_LIST_SELECTORS: &[&str] = &["ul", "ol"];

/// Link text that marks a list as documentation navigation (matched lowercase).
pub const NAV_KEYWORDS: &[&str] = &["introduction", "guide", "documentation"];

/// Configuration for noise removal
#[derive(Debug, Clone)]
pub struct NoiseConfig {
    /// Selectors removed unconditionally
    pub remove_selectors: Vec<String>,
    /// Whether to run the navigation-list heuristic
    pub remove_nav_lists: bool,
    /// Containers the heuristic considers
    pub nav_list_selectors: Vec<String>,
    /// A list qualifies only with more links than this
    pub min_list_links: usize,
    /// A qualifying list is removed when more links than this look navigational
    pub min_nav_links: usize,
    /// Keywords that mark a link as navigational
    pub nav_keywords: Vec<String>,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            remove_selectors: NOISE_SELECTORS.iter().map(|s| s.to_string()).collect(),
            remove_nav_lists: true,
            nav_list_selectors: NAV_LIST_SELECTORS.iter().map(|s| s.to_string()).collect(),
            min_list_links: 5,
            min_nav_links: 3,
            nav_keywords: NAV_KEYWORDS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Remove noise from the document in place.
///
/// Navigation lists go first since they are detected by content rather than
/// by selector, then every denylisted selector is detached.
pub fn remove_noise(doc: &mut Document, config: &NoiseConfig) -> Result<()> {
    if config.remove_nav_lists {
        let removed = remove_navigation_lists(doc, config)?;
        debug!(removed, "removed navigation lists");
    }

    let mut removed = 0;
    for selector in &config.remove_selectors {
        removed += doc.remove_matching(selector)?;
    }
    debug!(removed, "removed denylisted elements");

    Ok(())
}

/// Detach every list that looks like a sidebar of navigation links.
///
/// All lists are judged against the untouched tree before anything is
/// detached, so an outer list is measured with its nested lists included.
pub fn remove_navigation_lists(doc: &mut Document, config: &NoiseConfig) -> Result<usize> {
    let mut doomed: Vec<ElementId> = Vec::new();

    for selector in &config.nav_list_selectors {
        for list in doc.select(selector)? {
            if is_navigation_list(&list, config)? {
                doomed.push(list.id());
            }
        }
    }

    Ok(doc.remove_elements(doomed))
}

/// Check whether a list carries enough in-page or doc-navigation links to be chrome.
pub fn is_navigation_list(list: &Element<'_>, config: &NoiseConfig) -> Result<bool> {
    let links = list.select("a")?;
    if links.len() <= config.min_list_links {
        return Ok(false);
    }

    let nav_links = links.iter().filter(|link| is_navigation_link(link, &config.nav_keywords)).count();

    Ok(nav_links > config.min_nav_links)
}

fn is_navigation_link(link: &Element<'_>, keywords: &[String]) -> bool {
    if link.attr("href").is_some_and(|href| href.contains('#')) {
        return true;
    }

    let text = link.text().to_lowercase();
    keywords.iter().any(|keyword| text.contains(keyword.as_str()))
}
