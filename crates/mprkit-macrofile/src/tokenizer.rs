//! Macro tokenizer
//!
//! Segments decoded MPR text into an ordered sequence of macro blocks.
//! A header is recognized only at the start of a line so the pattern
//! cannot fire inside a parameter value. Matching is ID-only: the name
//! token after the backslash is inconsistent across CAM exports and is
//! never consulted.

use std::sync::LazyLock;

use regex::Regex;

use mprkit_core::{MacroBlock, MacroDocument};

/// Header pattern: optional leading whitespace, `<`, optional whitespace,
/// the numeric macro ID, optional whitespace, a single backslash.
static HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*<\s*(\d+)\s*\\").expect("invalid header regex"));

/// Tokenize decoded MPR text into a [`MacroDocument`].
///
/// Each block's span runs from its header match to the position
/// immediately before the next header (or end of input); the text before
/// the first header is kept verbatim as the preamble. Zero headers yield
/// an empty block list with the whole input as preamble. A header
/// followed immediately by another header is a valid header-only block.
///
/// The tokenizer never validates block bodies; it only segments.
pub fn tokenize(text: &str) -> MacroDocument {
    let headers: Vec<(usize, u32)> = HEADER_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let start = caps.get(0).expect("group 0 always present").start();
            // IDs too large for u32 are not real macro headers
            let id = caps[1].parse::<u32>().ok()?;
            Some((start, id))
        })
        .collect();

    let Some(&(first_start, _)) = headers.first() else {
        return MacroDocument {
            preamble: text.to_string(),
            blocks: Vec::new(),
        };
    };

    let blocks = headers
        .iter()
        .enumerate()
        .map(|(order, &(start, id))| {
            let end = headers
                .get(order + 1)
                .map_or(text.len(), |&(next_start, _)| next_start);
            MacroBlock::new(id, &text[start..end], order)
        })
        .collect();

    MacroDocument {
        preamble: text[..first_start].to_string(),
        blocks,
    }
}
