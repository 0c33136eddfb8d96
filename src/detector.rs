//! Heuristic document-type detection for adaptive chunking.

use crate::segmenter::Strategy;
use regex::RegexSet;
use std::sync::OnceLock;
use tracing::debug;

/// Detection rules in priority order. The first rule that matches wins,
/// no matter how many later rules also match.
const RULES: [(Strategy, &str); 7] = [
    (Strategy::Markdown, r"(?m)^# |^```|\|[-:]+\|"),
    (
        Strategy::Code,
        r"\b(?:function|class|def)\b|\b(?:public|private|async) ",
    ),
    (Strategy::Html, r"(?i)<[a-z][^>]*>"),
    (Strategy::Dialogue, r"(?m)^\w+:"),
    (Strategy::Latex, r"\\section\{|\\begin\{|\\end\{|\$\$"),
    (
        Strategy::Logs,
        r"(?m)^\d{4}-\d{2}-\d{2}[ T]\d{2}:\d{2}:\d{2}|\[(?:INFO|ERROR|WARN|DEBUG)\]",
    ),
    (Strategy::Email, r"(?m)^(?:From|To|Subject|Date):|^>"),
];

/// Pick the top-level segmenter for a whole document.
/// Falls back to [`Strategy::Plain`] when no rule matches.
pub fn detect(text: &str) -> Strategy {
    let set = RULE_SET.get_or_init(|| {
        RegexSet::new(RULES.iter().map(|(_, pattern)| pattern)).expect("valid detector rules")
    });

    let strategy = set
        .matches(text)
        .iter()
        .next()
        .map_or(Strategy::Plain, |rule| RULES[rule].0);

    debug!(%strategy, bytes = text.len(), "detected document type");
    strategy
}

static RULE_SET: OnceLock<RegexSet> = OnceLock::new();
