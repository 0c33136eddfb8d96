//! Generic tiers used when a structural block is too large on its own.

use super::block::{from_cuts, line_starts, Block};
use super::cached_regex;
use regex::Regex;
use std::sync::OnceLock;

static SENTENCE: OnceLock<Regex> = OnceLock::new();
static WORD_OR_SPACE: OnceLock<Regex> = OnceLock::new();

/// Paragraphs separated by blank lines or introduced by an indented line.
/// Separating newlines stay with the paragraph they follow.
pub fn paragraphs(text: &str) -> Vec<Block<'_>> {
    from_cuts(text, paragraph_cuts(text, true))
}

/// Start of every non-blank line that follows a blank one, and with
/// `indent_breaks` also of every indented line.
pub(crate) fn paragraph_cuts(text: &str, indent_breaks: bool) -> Vec<usize> {
    let mut cuts = Vec::new();
    let mut after_blank = false;

    for start in line_starts(text) {
        let line = line_at(text, start);
        if line.trim().is_empty() {
            after_blank = true;
            continue;
        }
        let indented = indent_breaks && line.starts_with([' ', '\t']);
        if start > 0 && (after_blank || indented) {
            cuts.push(start);
        }
        after_blank = false;
    }

    cuts
}

/// Sentences ending in `.`, `!` or `?`, each carrying its trailing whitespace
pub fn sentences(text: &str) -> Vec<Block<'_>> {
    let re = cached_regex(&SENTENCE, r"[^.!?]+[.!?]+\s*");
    let cuts = re
        .find_iter(text)
        .flat_map(|m| [m.start(), m.end()])
        .collect();

    from_cuts(text, cuts)
}

/// One block per line, line break included
pub fn lines(text: &str) -> Vec<Block<'_>> {
    if text.is_empty() {
        return Vec::new();
    }
    from_cuts(text, line_starts(text).collect())
}

/// Terminal tier: every run of non-whitespace and every run of whitespace
/// is its own block.
pub fn words(text: &str) -> Vec<Block<'_>> {
    cached_regex(&WORD_OR_SPACE, r"\S+|\s+")
        .find_iter(text)
        .map(|m| Block::new(m.as_str(), m.start()))
        .collect()
}

fn line_at(text: &str, start: usize) -> &str {
    let rest = &text[start..];
    match rest.find('\n') {
        Some(end) => &rest[..end],
        None => rest,
    }
}
