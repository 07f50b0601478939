//! Sentence splitting over joined paragraph text.
//!
//! Runs are joined with single spaces while recording the byte range each
//! run occupies; an explicit state machine then cuts the text after runs of
//! terminators (`. ! ? 。 ！ ？`) and any closing quotes that follow them.
//! Each sentence maps back to the runs whose ranges overlap it.
//!
//! Abbreviations and decimal numbers are not special-cased: "e.g." or "3.5"
//! split like any other terminator.

use std::ops::Range;

use super::super::types::{GlyphId, GlyphRun};

/// Text of one output unit and the runs that contributed to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    /// Contributing runs in reading order.
    pub glyphs: Vec<GlyphId>,
}

/// Runs joined with single spaces, with each run's byte range.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JoinedText {
    pub text: String,
    pub ranges: Vec<(GlyphId, Range<usize>)>,
}

impl JoinedText {
    /// Joins the given runs in order.
    pub fn new(runs: &[GlyphRun], items: &[GlyphId]) -> Self {
        let mut joined = Self::default();
        for &g in items {
            if !joined.text.is_empty() {
                joined.text.push(' ');
            }
            let start = joined.text.len();
            joined.text.push_str(&runs[g].text);
            joined.ranges.push((g, start..joined.text.len()));
        }
        joined
    }

    /// Runs whose range overlaps `span`.
    pub fn glyphs_in(&self, span: &Range<usize>) -> Vec<GlyphId> {
        self.ranges
            .iter()
            .filter(|(_, r)| r.start < span.end && span.start < r.end)
            .map(|(g, _)| *g)
            .collect()
    }
}

pub fn is_terminator(c: char) -> bool {
    matches!(c, '.' | '!' | '?' | '。' | '！' | '？')
}

fn is_closing(c: char) -> bool {
    matches!(
        c,
        '"' | '\'' | '\u{201d}' | '\u{2019}' | '»' | '」' | '』' | ')' | ']'
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Nothing but whitespace or terminators seen in this sentence yet.
    Lead,
    /// Inside the sentence body.
    Body,
    /// After one or more terminators.
    Terminator,
    /// After closing quotes that follow terminators.
    ClosingQuote,
}

/// Byte spans of the sentences in `text`, trimmed and non-empty.
///
/// Spans are maximal and non-overlapping: a sentence is a body followed by
/// one or more terminators and optional closing quotes, or a trailing
/// fragment without a terminator. Terminators with no body before them are
/// kept with the sentence that follows.
pub fn sentence_spans(text: &str) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut start = 0;
    let mut state = State::Lead;

    for (i, c) in text.char_indices() {
        state = match state {
            State::Lead if c.is_whitespace() || is_terminator(c) => State::Lead,
            State::Lead => State::Body,
            State::Body if is_terminator(c) => State::Terminator,
            State::Body => State::Body,
            State::Terminator if is_terminator(c) => State::Terminator,
            State::Terminator | State::ClosingQuote if is_closing(c) => State::ClosingQuote,
            State::Terminator | State::ClosingQuote => {
                push_trimmed(&mut spans, text, start..i);
                start = i;
                if c.is_whitespace() || is_terminator(c) {
                    State::Lead
                } else {
                    State::Body
                }
            }
        };
    }
    push_trimmed(&mut spans, text, start..text.len());
    spans
}

fn push_trimmed(spans: &mut Vec<Range<usize>>, text: &str, span: Range<usize>) {
    let s = &text[span.clone()];
    let lead = s.len() - s.trim_start().len();
    let trail = s.len() - s.trim_end().len();
    if lead + trail < s.len() {
        spans.push(span.start + lead..span.end - trail);
    }
}

/// Splits the joined text of `items` into sentence segments.
pub fn split_sentences(runs: &[GlyphRun], items: &[GlyphId]) -> Vec<Segment> {
    let joined = JoinedText::new(runs, items);
    sentence_spans(&joined.text)
        .into_iter()
        .map(|span| Segment {
            text: joined.text[span.clone()].to_string(),
            glyphs: joined.glyphs_in(&span),
        })
        .collect()
}

/// The whole of `items` as one segment, or `None` when it has no text.
pub fn whole_segment(runs: &[GlyphRun], items: &[GlyphId]) -> Option<Segment> {
    let joined = JoinedText::new(runs, items);
    let text = joined.text.trim();
    (!text.is_empty()).then(|| Segment {
        text: text.to_string(),
        glyphs: items.to_vec(),
    })
}
