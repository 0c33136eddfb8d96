use std::ops::Range;

/// A contiguous, structurally delimited slice of the text being segmented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block<'a> {
    /// Text content, including any whitespace that belongs to the block
    pub text: &'a str,
    /// Byte offset of the block in the text it was cut from
    pub offset: usize,
}

impl<'a> Block<'a> {
    pub fn new(text: &'a str, offset: usize) -> Self {
        Self { text, offset }
    }

    /// Byte offset one past the end of the block
    pub fn end(&self) -> usize {
        self.offset + self.text.len()
    }

    /// Re-anchor a block cut from a sub-slice onto the enclosing document
    pub(crate) fn shifted(self, base: usize) -> Self {
        Self {
            text: self.text,
            offset: self.offset + base,
        }
    }
}

/// Cut `text` at the given byte positions.
///
/// Whitespace-only pieces never stand alone: they are appended to the
/// preceding block, or prepended to the first block when nothing precedes
/// them. The resulting blocks always concatenate back to `text`.
pub(crate) fn from_cuts(text: &str, mut cuts: Vec<usize>) -> Vec<Block<'_>> {
    if text.is_empty() {
        return Vec::new();
    }

    cuts.push(0);
    cuts.push(text.len());
    cuts.retain(|&c| c <= text.len() && text.is_char_boundary(c));
    cuts.sort_unstable();
    cuts.dedup();

    let mut blocks: Vec<Block<'_>> = Vec::new();
    let mut leading: Option<usize> = None;

    for window in cuts.windows(2) {
        let (start, end) = (window[0], window[1]);
        let piece = &text[start..end];

        if piece.trim().is_empty() {
            match blocks.last_mut() {
                Some(last) => last.text = &text[last.offset..end],
                None => {
                    leading.get_or_insert(start);
                }
            }
            continue;
        }

        let start = leading.take().unwrap_or(start);
        blocks.push(Block::new(&text[start..end], start));
    }

    // Nothing but whitespace
    if blocks.is_empty() {
        blocks.push(Block::new(text, 0));
    }

    blocks
}

/// Cut points for a set of matched structural spans.
///
/// Each span keeps the whitespace that trails it up to the end of its last
/// line break, so the next block starts at the beginning of a line with its
/// indentation intact.
pub(crate) fn span_cuts(text: &str, spans: impl IntoIterator<Item = Range<usize>>) -> Vec<usize> {
    let spans: Vec<Range<usize>> = spans.into_iter().filter(|s| !s.is_empty()).collect();
    let mut cuts = Vec::with_capacity(spans.len() * 2);

    for (i, span) in spans.iter().enumerate() {
        let limit = spans.get(i + 1).map_or(text.len(), |next| next.start);
        cuts.push(span.start);
        cuts.push(absorb_trailing_whitespace(text, span.end, limit));
    }

    cuts
}

fn absorb_trailing_whitespace(text: &str, end: usize, limit: usize) -> usize {
    if end >= limit {
        return end;
    }

    let tail = &text[end..limit];
    let run = tail
        .find(|c: char| !c.is_whitespace())
        .unwrap_or(tail.len());

    if end + run == text.len() {
        return text.len();
    }

    match tail[..run].rfind('\n') {
        Some(newline) => end + newline + 1,
        // Already at a line start: the run is the next line's indentation
        None if end == 0 || text[..end].ends_with('\n') => end,
        None => end + run,
    }
}

/// Byte offsets of the start of every line
pub(crate) fn line_starts(text: &str) -> impl Iterator<Item = usize> + '_ {
    let breaks = text
        .match_indices('\n')
        .map(|(i, _)| i + 1)
        .filter(move |&i| i < text.len());
    std::iter::once(0).chain(breaks)
}
