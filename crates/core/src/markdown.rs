use std::rc::Rc;

use htmd::element_handler::{HandlerResult, Handlers};
use htmd::options::{BulletListMarker, CodeBlockStyle, HeadingStyle, Options};
use htmd::{Element, HtmlToMarkdown, Node};
use markup5ever_rcdom::NodeData;

use crate::{PagedownError, Result};

/// Configuration for Markdown conversion
#[derive(Debug, Clone)]
pub struct MarkdownConfig {
    /// ATX (`# Title`) or Setext headings
    pub heading_style: HeadingStyle,
    /// Fenced or indented code blocks for `<pre>` without the code rule
    pub code_block_style: CodeBlockStyle,
    /// Delimiter wrapped around `<em>`/`<i>` content
    pub em_delimiter: String,
    /// Marker used for unordered list items
    pub bullet_list_marker: BulletListMarker,
    /// Text emitted for `<hr>`
    pub hr: String,
    /// Render every `pre`/`code` as a fenced block tagged with its language
    pub preserve_code: bool,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            heading_style: HeadingStyle::Atx,
            code_block_style: CodeBlockStyle::Fenced,
            em_delimiter: "_".to_string(),
            bullet_list_marker: BulletListMarker::Dash,
            hr: "---".to_string(),
            preserve_code: true,
        }
    }
}

/// HTML to Markdown converter with the extraction rules registered once.
pub struct MarkdownConverter {
    inner: HtmlToMarkdown,
}

impl MarkdownConverter {
    pub fn new(config: &MarkdownConfig) -> Self {
        let options = Options {
            heading_style: config.heading_style,
            code_block_style: config.code_block_style,
            bullet_list_marker: config.bullet_list_marker,
            ..Default::default()
        };

        let em_delimiter = config.em_delimiter.clone();
        let hr = config.hr.clone();

        let mut builder = HtmlToMarkdown::builder()
            .options(options)
            .add_handler(vec!["em", "i"], move |handlers: &dyn Handlers, element: Element| {
                emphasis(handlers, element, &em_delimiter)
            })
            .add_handler(vec!["hr"], move |_: &dyn Handlers, _: Element| {
                Some(HandlerResult::from(format!("\n\n{}\n\n", hr)))
            });

        if config.preserve_code {
            builder = builder.add_handler(vec!["pre", "code"], preserve_code);
        }

        Self { inner: builder.build() }
    }

    pub fn convert(&self, html: &str) -> Result<String> {
        self.inner.convert(html).map_err(|e| PagedownError::Conversion(e.to_string()))
    }
}

/// Convert an HTML fragment to Markdown
pub fn convert_to_markdown(html: &str, config: &MarkdownConfig) -> Result<String> {
    MarkdownConverter::new(config).convert(html)
}

/// Render a `pre` or `code` element as a fenced block.
///
/// The fence is tagged with the `language-<lang>` class of the node. A `pre`
/// wrapping a lone `code` element renders that child directly, borrowing its
/// language when the `pre` has none, so the pair yields a single fence.
fn preserve_code(handlers: &dyn Handlers, element: Element) -> Option<HandlerResult> {
    let mut language = language_of(element.node);
    let mut body = Rc::clone(element.node);

    if element.tag == "pre"
        && let Some(code) = lone_code_child(element.node)
    {
        if language.is_none() {
            language = language_of(&code);
        }
        body = code;
    }

    let content = handlers.walk_children(&body).content;
    let content = content.trim_matches('\n');

    Some(format!("\n\n```{}\n{}\n```\n\n", language.unwrap_or_default(), content).into())
}

fn language_of(node: &Rc<Node>) -> Option<String> {
    let NodeData::Element { ref attrs, .. } = node.data else {
        return None;
    };

    attrs
        .borrow()
        .iter()
        .find(|attr| &*attr.name.local == "class")
        .and_then(|attr| {
            attr.value
                .split_whitespace()
                .find_map(|class| class.strip_prefix("language-"))
                .filter(|lang| !lang.is_empty())
                .map(str::to_string)
        })
}

fn lone_code_child(node: &Rc<Node>) -> Option<Rc<Node>> {
    let mut code = None;

    for child in node.children.borrow().iter() {
        match child.data {
            NodeData::Element { ref name, .. } if &*name.local == "code" && code.is_none() => {
                code = Some(Rc::clone(child));
            }
            NodeData::Text { ref contents } if contents.borrow().trim().is_empty() => {}
            NodeData::Comment { .. } => {}
            _ => return None,
        }
    }

    code
}

fn emphasis(handlers: &dyn Handlers, element: Element, delimiter: &str) -> Option<HandlerResult> {
    let content = handlers.walk_children(element.node).content;
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return None;
    }

    let leading = &content[..content.len() - content.trim_start().len()];
    let trailing = &content[content.trim_end().len()..];

    Some(format!("{}{}{}{}{}", leading, delimiter, trimmed, delimiter, trailing).into())
}
