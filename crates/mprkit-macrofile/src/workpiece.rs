//! Workpiece dimension extraction
//!
//! The workpiece-definition macro (ID 100) carries the panel's bounding
//! dimensions as LA (length) and BR (width). The first such block in the
//! file is authoritative; each dimension independently defaults to 0.0
//! when absent or unparsable, and downstream geometry treats a zero
//! dimension as "unknown".

use mprkit_core::data::macro_ids;
use mprkit_core::{MacroDocument, WorkpieceDimensions};

use crate::params::param_f64;
use crate::tokenizer::tokenize;

/// Extract workpiece dimensions from a tokenized document.
pub fn workpiece_dimensions(doc: &MacroDocument) -> WorkpieceDimensions {
    doc.blocks
        .iter()
        .find(|b| b.id == macro_ids::WORKPIECE)
        .map(|b| WorkpieceDimensions {
            length: param_f64(&b.raw, "LA").unwrap_or(0.0),
            width: param_f64(&b.raw, "BR").unwrap_or(0.0),
        })
        .unwrap_or_default()
}

/// Extract workpiece dimensions straight from decoded text.
pub fn workpiece_dimensions_from_text(text: &str) -> WorkpieceDimensions {
    workpiece_dimensions(&tokenize(text))
}
