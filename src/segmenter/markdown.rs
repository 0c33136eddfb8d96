use super::block::{from_cuts, span_cuts, Block};
use super::cached_regex;
use regex::Regex;
use std::sync::OnceLock;

static MARKDOWN_UNIT: OnceLock<Regex> = OnceLock::new();

/// Headings, fenced code, list items and table rows; the prose between
/// them forms paragraph blocks.
pub fn segment(text: &str) -> Vec<Block<'_>> {
    let re = cached_regex(
        &MARKDOWN_UNIT,
        concat!(
            r"(?m)^#{1,6} .*$",
            r"|^```(?s:.*?)\n```[^\n]*",
            r"|^[ \t]*[-*+] .*$",
            r"|^[ \t]*\d+\. .*$",
            r"|^\|.*\|[ \t\r]*$",
        ),
    );

    let spans = re.find_iter(text).map(|m| m.range());
    from_cuts(text, span_cuts(text, spans))
}
