use super::block::{from_cuts, span_cuts, Block};
use super::{cached_regex, fallbacks};
use regex::Regex;
use std::sync::OnceLock;

static ENTRY: OnceLock<Regex> = OnceLock::new();

/// Log entries anchored by a timestamp, a `[LEVEL]` marker or an
/// `XxxError:` token. Without any anchor every line is its own entry.
pub fn segment(text: &str) -> Vec<Block<'_>> {
    let re = cached_regex(
        &ENTRY,
        r"(?m)^(?:\d{4}-\d{2}-\d{2}[ T]\d{2}:\d{2}:\d{2}|\[\w+\]|\w+Error:).*$",
    );

    let spans: Vec<_> = re.find_iter(text).map(|m| m.range()).collect();
    if spans.is_empty() {
        return fallbacks::lines(text);
    }

    from_cuts(text, span_cuts(text, spans))
}
