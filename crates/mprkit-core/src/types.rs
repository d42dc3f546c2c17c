//! Core data model for MPR macro files
//!
//! An MPR file is a line-oriented stream of numbered macro blocks. The
//! tokenizer segments the decoded text into [`MacroBlock`]s carrying their
//! exact original spans; everything before the first header is kept as the
//! document preamble so the file can be reassembled byte-for-byte.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tolerance for coordinate and delta comparisons.
///
/// Parsed floating-point values are never compared with bit equality;
/// this matches the integer-snap tolerance used when formatting drill
/// diameters.
pub const COORD_EPS: f64 = 1e-9;

/// One parsed macro block: a numbered operation record spanning from its
/// header line to the next header (or end of file).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroBlock {
    /// Macro ID parsed from the header (`<109 \...` → 109).
    pub id: u32,
    /// The block's exact original text, header and parameter lines included.
    pub raw: String,
    /// Position index in the file, for stable re-assembly.
    pub order: usize,
}

impl MacroBlock {
    /// Create a block from its header ID, raw span, and file position.
    pub fn new(id: u32, raw: impl Into<String>, order: usize) -> Self {
        Self {
            id,
            raw: raw.into(),
            order,
        }
    }
}

/// Tokenized form of one MPR file: any text before the first macro header,
/// followed by the blocks in file order.
///
/// `preamble` plus the concatenated block spans reconstructs the input
/// exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroDocument {
    /// Verbatim text before the first recognized header (often empty).
    pub preamble: String,
    /// Macro blocks in file order.
    pub blocks: Vec<MacroBlock>,
}

impl MacroDocument {
    /// Reassemble the document into its original text.
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(
            self.preamble.len() + self.blocks.iter().map(|b| b.raw.len()).sum::<usize>(),
        );
        out.push_str(&self.preamble);
        for block in &self.blocks {
            out.push_str(&block.raw);
        }
        out
    }

    /// Number of blocks in the document.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether the document contains no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Whether any block carries the given macro ID.
    pub fn contains_id(&self, id: u32) -> bool {
        self.blocks.iter().any(|b| b.id == id)
    }
}

/// Workpiece length/width extracted from the file's workpiece-definition
/// macro (ID 100). Defaults to 0.0 per axis when absent or unparsable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkpieceDimensions {
    /// Panel length (LA parameter).
    pub length: f64,
    /// Panel width (BR parameter).
    pub width: f64,
}

impl WorkpieceDimensions {
    /// Create dimensions from explicit length and width.
    pub fn new(length: f64, width: f64) -> Self {
        Self { length, width }
    }
}

/// Planar axis a groove runs along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GrooveAxis {
    /// Groove runs along the workpiece length.
    X,
    /// Groove runs along the workpiece width.
    Y,
}

impl fmt::Display for GrooveAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrooveAxis::X => write!(f, "X"),
            GrooveAxis::Y => write!(f, "Y"),
        }
    }
}
