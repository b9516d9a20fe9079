//! Text quality metrics computed on extracted output

use serde::{Deserialize, Serialize};

/// Structural statistics for one extracted text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStructure {
    /// Total number of characters (Unicode scalar values, not bytes)
    pub total_chars: usize,

    /// Number of newline-delimited lines, blank lines included
    pub total_lines: usize,

    /// Number of whitespace-separated words
    pub total_words: usize,

    /// Mean character length across all lines
    pub avg_line_length: f64,

    /// Number of lines that are empty after trimming
    pub empty_lines: usize,
}

/// Fuzzy similarity between a baseline text and a candidate text.
///
/// Returns a score in `[0, 100]` where 100 means identical. The baseline
/// goes first so that every comparison in a run shares the same reference
/// orientation.
pub fn similarity(baseline: &str, candidate: &str) -> f64 {
    rapidfuzz::fuzz::ratio(baseline.chars(), candidate.chars())
}

/// Fraction of non-blank lines consisting of exactly one character.
///
/// A high ratio indicates vertically shredded output, the typical failure
/// mode when an extractor falls back to per-glyph emission. Returns `0.0`
/// for text with no non-blank lines.
pub fn garbled_ratio(text: &str) -> f64 {
    let mut non_blank = 0usize;
    let mut single_char = 0usize;
    for line in text.split('\n') {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        non_blank += 1;
        if trimmed.chars().count() == 1 {
            single_char += 1;
        }
    }
    if non_blank == 0 {
        return 0.0;
    }
    single_char as f64 / non_blank as f64
}

/// Compute structural statistics for one extracted text.
///
/// Lines are the segments produced by splitting on `\n`; an empty input
/// still counts as one (empty) line.
pub fn text_structure(text: &str) -> TextStructure {
    let mut total_lines = 0usize;
    let mut empty_lines = 0usize;
    let mut line_chars = 0usize;
    for line in text.split('\n') {
        total_lines += 1;
        line_chars += line.chars().count();
        if line.trim().is_empty() {
            empty_lines += 1;
        }
    }
    let avg_line_length = if total_lines == 0 {
        0.0
    } else {
        line_chars as f64 / total_lines as f64
    };
    TextStructure {
        total_chars: text.chars().count(),
        total_lines,
        total_words: text.split_whitespace().count(),
        avg_line_length,
        empty_lines,
    }
}
