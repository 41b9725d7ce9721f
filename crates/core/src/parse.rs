//! HTML parsing and DOM manipulation.
//!
//! This module provides the [`Document`] and [`Element`] types for parsing
//! HTML, navigating the DOM tree using CSS selectors and detaching noisy
//! subtrees in place.
//!
//! # Example
//!
//! ```rust
//! use pagedown_core::parse::Document;
//!
//! let html = r#"
//!     <html>
//!         <body>
//!             <nav>Menu</nav>
//!             <p class="content">Paragraph</p>
//!         </body>
//!     </html>
//! "#;
//!
//! let mut doc = Document::parse(html);
//! let removed = doc.remove_matching("nav").unwrap();
//! assert_eq!(removed, 1);
//! assert!(!doc.as_string().contains("Menu"));
//! ```

use std::collections::HashSet;

use scraper::{ElementRef, Html, Selector};

use crate::{PagedownError, Result};

/// Compiles a CSS selector, mapping failures to [`PagedownError::InvalidSelector`].
pub fn compile_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| PagedownError::InvalidSelector(format!("{}: {}", selector, e)))
}

/// Represents a parsed HTML document.
///
/// A Document wraps a rendered page and provides methods for querying
/// elements using CSS selectors and for removing subtrees. Removal mutates
/// the tree in place; removed nodes are no longer reachable from the root.
///
/// # Example
///
/// ```rust
/// use pagedown_core::parse::Document;
///
/// let html = "<html><head><title>Test</title></head><body><p>Hello</p></body></html>";
/// let doc = Document::parse(html);
/// assert_eq!(doc.body_inner_html(), "<p>Hello</p>");
/// ```
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses HTML from a string.
    ///
    /// Parsing never fails: the HTML5 algorithm recovers from malformed
    /// markup the same way a browser does.
    pub fn parse(html: &str) -> Self {
        Self { html: Html::parse_document(html) }
    }

    /// Gets the entire HTML as a string.
    pub fn as_string(&self) -> String {
        self.html.html()
    }

    /// Selects elements using a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`PagedownError::InvalidSelector`] if the selector is invalid.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pagedown_core::parse::Document;
    ///
    /// let html = r#"<p class="content">First</p><p class="content">Second</p>"#;
    /// let doc = Document::parse(html);
    /// let elements = doc.select("p.content").unwrap();
    /// assert_eq!(elements.len(), 2);
    /// ```
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel = compile_selector(selector)?;
        Ok(self.matches(&sel).map(|element| Element { element }).collect())
    }

    /// Selects the first element matching a CSS selector in document order.
    pub fn select_first(&'_ self, selector: &str) -> Result<Option<Element<'_>>> {
        let sel = compile_selector(selector)?;
        Ok(self.matches(&sel).next().map(|element| Element { element }))
    }

    /// Detaches every element matching `selector` and returns how many subtrees were removed.
    pub fn remove_matching(&mut self, selector: &str) -> Result<usize> {
        let sel = compile_selector(selector)?;
        let ids: Vec<_> = self.matches(&sel).map(|el| el.id()).collect();
        Ok(self.detach(ids))
    }

    /// Detaches the given elements from the tree.
    ///
    /// Elements nested inside another element of the batch go with their
    /// ancestor and are not counted separately.
    pub fn remove_elements(&mut self, elements: Vec<ElementId>) -> usize {
        self.detach(elements.into_iter().map(|id| id.0).collect())
    }

    /// Matches reachable from the document root.
    ///
    /// scraper walks the whole node arena, so descendants of a detached
    /// subtree would otherwise still match.
    fn matches<'a, 'b>(&'a self, selector: &'b Selector) -> impl Iterator<Item = ElementRef<'a>> {
        let root = self.html.tree.root().id();
        self.html.select(selector).filter(move |el| el.ancestors().last().is_some_and(|top| top.id() == root))
    }

    fn detach(&mut self, ids: Vec<ego_tree::NodeId>) -> usize {
        let batch: HashSet<ego_tree::NodeId> = ids.iter().copied().collect();
        let outermost: Vec<ego_tree::NodeId> = ids
            .into_iter()
            .filter(|id| {
                self.html
                    .tree
                    .get(*id)
                    .is_some_and(|node| !node.ancestors().any(|ancestor| batch.contains(&ancestor.id())))
            })
            .collect();

        let mut removed = 0;
        for id in outermost {
            if let Some(mut node) = self.html.tree.get_mut(id) {
                node.detach();
                removed += 1;
            }
        }
        removed
    }

    /// Gets the inner HTML of `<body>`, or the whole document when there is none.
    pub fn body_inner_html(&self) -> String {
        match self.select_first("body") {
            Ok(Some(body)) => body.inner_html(),
            _ => self.as_string(),
        }
    }

    /// Gets all text content from the document.
    pub fn text_content(&self) -> String {
        self.html.root_element().text().collect()
    }
}

/// Stable handle to an element that outlives the borrow used to find it.
///
/// Collect handles while reading the tree, then pass them to
/// [`Document::remove_elements`] once the borrow has ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ElementId(ego_tree::NodeId);

/// A wrapper around scraper's ElementRef for easier DOM access.
///
/// # Example
///
/// ```rust
/// use pagedown_core::parse::Document;
///
/// let html = r#"<a href="https://example.com">Link text</a>"#;
/// let doc = Document::parse(html);
/// let link = &doc.select("a").unwrap()[0];
///
/// assert_eq!(link.text(), "Link text");
/// assert_eq!(link.attr("href"), Some("https://example.com"));
/// ```
#[derive(Clone, Debug)]
pub struct Element<'a> {
    element: ElementRef<'a>,
}

impl<'a> Element<'a> {
    /// Gets a handle that can be used to remove this element later.
    pub fn id(&self) -> ElementId {
        ElementId(self.element.id())
    }

    /// Gets the inner HTML of this element.
    ///
    /// Returns the HTML content inside this element, excluding the element's own tags.
    pub fn inner_html(&self) -> String {
        self.element.inner_html()
    }

    /// Gets the text content of this element.
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    /// Gets the value of an attribute.
    ///
    /// Returns `None` if the attribute is not present.
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.element.value().attr(name)
    }

    /// Selects descendant elements using a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`PagedownError::InvalidSelector`] if the selector is invalid.
    pub fn select(&self, selector: &str) -> Result<Vec<Element<'a>>> {
        let sel = compile_selector(selector)?;
        Ok(self.element.select(&sel).map(|element| Element { element }).collect())
    }
}
