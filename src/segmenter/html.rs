use super::block::{from_cuts, span_cuts, Block};
use super::cached_regex_with;
use regex::Regex;
use std::sync::OnceLock;

static ELEMENT: OnceLock<Regex> = OnceLock::new();

const BLOCK_TAGS: [&str; 6] = ["p", "div", "section", "pre", "code", "table"];

/// Block-level elements from their opening tag to the first matching
/// closing tag. Markup outside those elements fills the gaps.
pub fn segment(text: &str) -> Vec<Block<'_>> {
    let re = cached_regex_with(&ELEMENT, || {
        let alternatives: Vec<String> = BLOCK_TAGS
            .iter()
            .map(|tag| format!(r"<{tag}(?:\s[^>]*)?>.*?</{tag}\s*>"))
            .collect();
        format!("(?is){}", alternatives.join("|"))
    });

    let spans = re.find_iter(text).map(|m| m.range());
    from_cuts(text, span_cuts(text, spans))
}
