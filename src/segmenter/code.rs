use super::block::{from_cuts, span_cuts, Block};
use super::cached_regex;
use regex::Regex;
use std::sync::OnceLock;

static STATEMENT_GROUP: OnceLock<Regex> = OnceLock::new();

/// Runs of lines led by a definition or control-flow keyword, plus fenced
/// code blocks. Bodies between them become their own blocks.
pub fn segment(text: &str) -> Vec<Block<'_>> {
    let re = cached_regex(
        &STATEMENT_GROUP,
        concat!(
            r"(?m)(?:^[ \t]*(?:def|class|function|if|for|while|switch|async|public|private)\b.*(?:\n|$))+",
            r"|```(?s:.*?)```",
        ),
    );

    let spans = re.find_iter(text).map(|m| m.range());
    from_cuts(text, span_cuts(text, spans))
}
