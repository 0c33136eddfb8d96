mod block;
mod code;
mod dialogue;
mod email;
mod fallbacks;
mod html;
mod latex;
mod logs;
mod markdown;

#[cfg(test)]
mod tests;

pub use block::Block;

use crate::error::ChunkError;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Identifiers accepted by [`Strategy::from_str`], in table order
pub const STRATEGY_NAMES: [&str; 12] = [
    "fixed",
    "sentence",
    "paragraph",
    "line",
    "markdown",
    "code",
    "html",
    "dialogue",
    "latex",
    "logs",
    "email",
    "plain",
];

/// A block segmenter for one document type or fallback tier.
///
/// Every variant except [`Strategy::Fixed`] names the tier used to re-split
/// a block that alone exceeds the token budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Fixed,
    Sentence,
    Paragraph,
    Line,
    Markdown,
    Code,
    Html,
    Dialogue,
    Latex,
    Logs,
    Email,
    Plain,
}

impl Strategy {
    pub const ALL: [Strategy; 12] = [
        Strategy::Fixed,
        Strategy::Sentence,
        Strategy::Paragraph,
        Strategy::Line,
        Strategy::Markdown,
        Strategy::Code,
        Strategy::Html,
        Strategy::Dialogue,
        Strategy::Latex,
        Strategy::Logs,
        Strategy::Email,
        Strategy::Plain,
    ];

    /// Split `text` into ordered blocks that concatenate back to `text`.
    /// Offsets are relative to `text`.
    pub fn segment(self, text: &str) -> Vec<Block<'_>> {
        match self {
            Strategy::Fixed => fallbacks::words(text),
            Strategy::Sentence => fallbacks::sentences(text),
            Strategy::Paragraph | Strategy::Plain => fallbacks::paragraphs(text),
            Strategy::Line => fallbacks::lines(text),
            Strategy::Markdown => markdown::segment(text),
            Strategy::Code => code::segment(text),
            Strategy::Html => html::segment(text),
            Strategy::Dialogue => dialogue::segment(text),
            Strategy::Latex => latex::segment(text),
            Strategy::Logs => logs::segment(text),
            Strategy::Email => email::segment(text),
        }
    }

    /// Tier used for blocks that exceed the budget on their own
    pub fn fallback(self) -> Option<Strategy> {
        match self {
            Strategy::Fixed => None,
            Strategy::Sentence | Strategy::Line => Some(Strategy::Fixed),
            Strategy::Paragraph | Strategy::Plain | Strategy::Dialogue => Some(Strategy::Sentence),
            Strategy::Code | Strategy::Logs => Some(Strategy::Line),
            Strategy::Markdown | Strategy::Html | Strategy::Latex | Strategy::Email => {
                Some(Strategy::Paragraph)
            }
        }
    }

    /// This strategy followed by every fallback tier down to `fixed`
    pub fn chain(self) -> impl Iterator<Item = Strategy> {
        std::iter::successors(Some(self), |s| s.fallback())
    }

    pub const fn name(self) -> &'static str {
        match self {
            Strategy::Fixed => "fixed",
            Strategy::Sentence => "sentence",
            Strategy::Paragraph => "paragraph",
            Strategy::Line => "line",
            Strategy::Markdown => "markdown",
            Strategy::Code => "code",
            Strategy::Html => "html",
            Strategy::Dialogue => "dialogue",
            Strategy::Latex => "latex",
            Strategy::Logs => "logs",
            Strategy::Email => "email",
            Strategy::Plain => "plain",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = ChunkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Strategy::ALL
            .into_iter()
            .find(|strategy| strategy.name() == s)
            .ok_or_else(|| ChunkError::UnknownStrategy(s.to_string()))
    }
}

/// How the top-level segmenter is chosen for a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    /// Pick a strategy per document with [`crate::detect`]
    #[default]
    Adaptive,
    Strategy(Strategy),
}

impl Selection {
    /// Resolve to a concrete strategy for `text`
    pub fn resolve(self, text: &str) -> Strategy {
        match self {
            Selection::Adaptive => crate::detector::detect(text),
            Selection::Strategy(strategy) => strategy,
        }
    }
}

impl From<Strategy> for Selection {
    fn from(strategy: Strategy) -> Self {
        Selection::Strategy(strategy)
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::Adaptive => f.write_str("adaptive"),
            Selection::Strategy(strategy) => f.write_str(strategy.name()),
        }
    }
}

impl FromStr for Selection {
    type Err = ChunkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "adaptive" => Ok(Selection::Adaptive),
            other => other.parse().map(Selection::Strategy),
        }
    }
}

/// Compile a constant pattern once per process
pub(crate) fn cached_regex(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cached_regex_with(cell, || pattern.to_string())
}

/// Like [`cached_regex`], for patterns assembled at first use
pub(crate) fn cached_regex_with(
    cell: &'static OnceLock<Regex>,
    pattern: impl FnOnce() -> String,
) -> &'static Regex {
    cell.get_or_init(|| Regex::new(&pattern()).expect("valid segmenter regex"))
}
