//! Markdown text cleanup.
//!
//! The converter leaves behind artifacts of the page chrome it was fed:
//! runs of blank lines, "On this page" tables of contents, skip links,
//! feedback widgets, pagination links and copy buttons. [`normalize_markdown`]
//! runs an ordered table of rewrite rules over the text to remove them.
//!
//! Order matters. Later rules assume the earlier ones already ran; heading
//! spacing, for instance, is only fixed once the blocks around the headings
//! are gone.

use std::sync::LazyLock;

use regex::Regex;

/// A named, pure rewrite applied to the whole Markdown string.
pub type NormalizeRule = (&'static str, fn(&str) -> String);

/// Cleanup rules in the order they are applied.
pub const NORMALIZE_RULES: &[NormalizeRule] = &[
    ("collapse_blank_lines", collapse_blank_lines),
    ("trim", trim),
    ("truncate_on_this_page", truncate_on_this_page),
    ("remove_skip_link", remove_skip_link),
    ("remove_feedback_block", remove_feedback_block),
    ("remove_pagination_links", remove_pagination_links),
    ("remove_copy_buttons", remove_copy_buttons),
    ("remove_zero_width_links", remove_zero_width_links),
    ("tighten_heading_spacing", tighten_heading_spacing),
    ("final_trim", trim),
];

static EXCESS_NEWLINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());
static SKIP_LINK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[Skip to main content\].*?\n").unwrap());
static PAGINATION_LINK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[(?:Previous|Next)\].*?\n").unwrap());
static ZERO_WIDTH_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\[(?:\x{200B}|\x{E2}\x{20AC}\x{2039})\]\s*\n").unwrap());
static HEADING_GAP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{2,}#").unwrap());

const ON_THIS_PAGE: &str = "On this page";
const FEEDBACK_PROMPT: &str = "Was this page helpful?";
const COPY_BUTTON: &str = "Copy\n\n```";

/// Run every rule in [`NORMALIZE_RULES`] over `markdown`.
pub fn normalize_markdown(markdown: &str) -> String {
    NORMALIZE_RULES
        .iter()
        .fold(markdown.to_string(), |text, (_, rule)| rule(&text))
}

/// Collapse three or more consecutive newlines to a single blank line.
pub fn collapse_blank_lines(text: &str) -> String {
    EXCESS_NEWLINES.replace_all(text, "\n\n").into_owned()
}

pub fn trim(text: &str) -> String {
    text.trim().to_string()
}

/// Drop everything from the first "On this page" marker onward.
pub fn truncate_on_this_page(text: &str) -> String {
    match text.find(ON_THIS_PAGE) {
        Some(idx) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

/// Remove the first skip link through the end of its line.
pub fn remove_skip_link(text: &str) -> String {
    SKIP_LINK.replace(text, "").into_owned()
}

/// Remove the feedback prompt up to, but not including, the next blank line.
///
/// Without a following blank line the text is left alone.
pub fn remove_feedback_block(text: &str) -> String {
    let Some(start) = text.find(FEEDBACK_PROMPT) else {
        return text.to_string();
    };

    let after_prompt = start + FEEDBACK_PROMPT.len();
    match text[after_prompt..].find("\n\n") {
        Some(offset) => {
            let end = after_prompt + offset;
            let mut out = String::with_capacity(text.len() - (end - start));
            out.push_str(&text[..start]);
            out.push_str(&text[end..]);
            out
        }
        None => text.to_string(),
    }
}

/// Remove every `[Previous]`/`[Next]` link through the end of its line.
pub fn remove_pagination_links(text: &str) -> String {
    PAGINATION_LINK.replace_all(text, "").into_owned()
}

/// Fold a "Copy" button label sitting right above a code fence into the fence.
pub fn remove_copy_buttons(text: &str) -> String {
    text.replace(COPY_BUTTON, "```")
}

/// Remove lines holding nothing but a zero-width-space link.
///
/// The mojibake spelling covers pages whose UTF-8 was decoded as Windows-1252.
pub fn remove_zero_width_links(text: &str) -> String {
    ZERO_WIDTH_LINK.replace_all(text, "\n").into_owned()
}

/// Pull headings up against the preceding block.
pub fn tighten_heading_spacing(text: &str) -> String {
    HEADING_GAP.replace_all(text, "\n#").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_rule_order() {
        let names: Vec<&str> = NORMALIZE_RULES.iter().map(|(name, _)| *name).collect();
        assert_eq!(
            names,
            vec![
                "collapse_blank_lines",
                "trim",
                "truncate_on_this_page",
                "remove_skip_link",
                "remove_feedback_block",
                "remove_pagination_links",
                "remove_copy_buttons",
                "remove_zero_width_links",
                "tighten_heading_spacing",
                "final_trim",
            ]
        );
    }

    #[rstest]
    #[case("a\n\n\nb", "a\n\nb")]
    #[case("a\n\n\n\n\n\nb\n\n\nc", "a\n\nb\n\nc")]
    #[case("a\n\nb", "a\n\nb")]
    #[case("a\nb", "a\nb")]
    fn test_collapse_blank_lines(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(collapse_blank_lines(input), expected);
    }

    #[test]
    fn test_trim() {
        assert_eq!(trim("\n\n  body \t\n"), "body");
    }

    #[test]
    fn test_truncate_on_this_page() {
        assert_eq!(truncate_on_this_page("Intro\n\nOn this page\n\n- [A](#a)\n- [B](#b)"), "Intro\n\n");
        assert_eq!(truncate_on_this_page("No table of contents"), "No table of contents");
    }

    #[test]
    fn test_remove_skip_link() {
        assert_eq!(
            remove_skip_link("[Skip to main content](#main)\n# Title\n[Skip to main content](#x)\n"),
            "# Title\n[Skip to main content](#x)\n"
        );
    }

    #[test]
    fn test_skip_link_without_newline_is_kept() {
        assert_eq!(remove_skip_link("[Skip to main content](#main)"), "[Skip to main content](#main)");
    }

    #[test]
    fn test_remove_feedback_block() {
        let text = "Body\n\nWas this page helpful?\n\nYes No";
        assert_eq!(remove_feedback_block(text), "Body\n\n\n\nYes No");

        let text = "Body\n\nWas this page helpful? Yes\nNo\n\nNext section";
        assert_eq!(remove_feedback_block(text), "Body\n\n\n\nNext section");
    }

    #[test]
    fn test_feedback_block_without_blank_line_is_kept() {
        let text = "Body\n\nWas this page helpful? Yes No";
        assert_eq!(remove_feedback_block(text), text);
    }

    #[test]
    fn test_remove_pagination_links() {
        let text = "Body\n[Previous](/a) Getting started\n[Next](/c) Advanced\nEnd";
        assert_eq!(remove_pagination_links(text), "Body\nEnd");
    }

    #[test]
    fn test_remove_copy_buttons() {
        let text = "Install:\n\nCopy\n\n```\nnpm i\n```\n\nCopy\n\n```sh\nls\n```";
        assert_eq!(remove_copy_buttons(text), "Install:\n\n```\nnpm i\n```\n\n```sh\nls\n```");
    }

    #[test]
    fn test_copy_word_in_prose_is_kept() {
        let text = "Copy the file first.\n\nThen run it.";
        assert_eq!(remove_copy_buttons(text), text);
    }

    #[rstest]
    #[case("Intro\n[\u{200B}]\nBody", "Intro\nBody")]
    #[case("Intro\n\n  [\u{200B}]  \n\nBody", "Intro\nBody")]
    #[case("Intro\n[\u{E2}\u{20AC}\u{2039}]\nBody", "Intro\nBody")]
    #[case("Intro\n[text]\nBody", "Intro\n[text]\nBody")]
    fn test_remove_zero_width_links(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(remove_zero_width_links(input), expected);
    }

    #[rstest]
    #[case("Para\n\n# Heading", "Para\n# Heading")]
    #[case("Para\n\n\n## Sub", "Para\n## Sub")]
    #[case("Para\n# Heading", "Para\n# Heading")]
    fn test_tighten_heading_spacing(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(tighten_heading_spacing(input), expected);
    }

    #[test]
    fn test_normalize_full_page() {
        let raw = "\n\n[Skip to main content](#content)\n# Guide\n\n\n\nIntro text.\n\n\
                   Copy\n\n```sh\nmake\n```\n\n## Usage\n\nUse it.\n\n\
                   [Previous](/a) Setup\n[Next](/c) Deploy\n\n\
                   Was this page helpful?\n\nOn this page\n\n- [Usage](#usage)\n";

        assert_eq!(normalize_markdown(raw), "# Guide\n\nIntro text.\n\n```sh\nmake\n```\n## Usage\n\nUse it.");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let inputs = [
            "# Title\n\nHello",
            "\n\n# Title\n\n\n\nHello\n\n\n## Section\n\nText\n\n",
            "Plain paragraph\n\nAnother paragraph",
            "Code:\n\n```rust\nfn main() {}\n```",
        ];

        for input in inputs {
            let once = normalize_markdown(input);
            assert_eq!(normalize_markdown(&once), once, "{input:?}");
        }
    }

    #[test]
    fn test_normalize_simple_document() {
        assert_eq!(normalize_markdown("# Title\n\n\n\nHello\n"), "# Title\n\nHello");
    }
}
