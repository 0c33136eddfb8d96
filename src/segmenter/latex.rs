use super::block::{from_cuts, span_cuts, Block};
use super::cached_regex;
use regex::Regex;
use std::ops::Range;
use std::sync::OnceLock;

static LATEX_MARKER: OnceLock<Regex> = OnceLock::new();

/// Sectioning commands, `\begin`/`\end` environments and `$$` display math
pub fn segment(text: &str) -> Vec<Block<'_>> {
    from_cuts(text, span_cuts(text, units(text)))
}

fn units(text: &str) -> Vec<Range<usize>> {
    let re = cached_regex(
        &LATEX_MARKER,
        r"\\(?:sub)?section\*?\{[^}]*\}|\\begin\{([^}]*)\}|\$\$",
    );

    let mut spans = Vec::new();
    let mut pos = 0;

    while let Some(caps) = re.captures_at(text, pos) {
        let Some(marker) = caps.get(0) else { break };
        let end = if let Some(env) = caps.get(1) {
            closing(text, marker.end(), &format!(r"\end{{{}}}", env.as_str()))
        } else if marker.as_str() == "$$" {
            closing(text, marker.end(), "$$")
        } else {
            None
        };

        let span = marker.start()..end.unwrap_or(marker.end());
        pos = span.end;
        spans.push(span);
    }

    spans
}

/// End offset of the first `terminator` at or after `from`
fn closing(text: &str, from: usize, terminator: &str) -> Option<usize> {
    text[from..]
        .find(terminator)
        .map(|i| from + i + terminator.len())
}
