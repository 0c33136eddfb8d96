use super::block::{from_cuts, span_cuts, Block};
use super::{cached_regex, fallbacks};
use regex::Regex;
use std::sync::OnceLock;

static HEADER_OR_QUOTE: OnceLock<Regex> = OnceLock::new();

/// Header lines, quoted-reply lines and blank-line separated body paragraphs
pub fn segment(text: &str) -> Vec<Block<'_>> {
    let re = cached_regex(
        &HEADER_OR_QUOTE,
        r"(?m)^(?:(?:From|To|Subject|Date):.*|>.*)$",
    );

    let mut cuts = span_cuts(text, re.find_iter(text).map(|m| m.range()));
    cuts.extend(fallbacks::paragraph_cuts(text, false));
    from_cuts(text, cuts)
}
