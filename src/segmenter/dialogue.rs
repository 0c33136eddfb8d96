use super::block::{from_cuts, Block};
use super::cached_regex;
use regex::Regex;
use std::sync::OnceLock;

static SPEAKER: OnceLock<Regex> = OnceLock::new();

/// Speaker turns: a `Name:` line plus its continuation lines up to the next
/// speaker line.
pub fn segment(text: &str) -> Vec<Block<'_>> {
    let cuts = cached_regex(&SPEAKER, r"(?m)^\w+:")
        .find_iter(text)
        .map(|m| m.start())
        .collect();

    from_cuts(text, cuts)
}
