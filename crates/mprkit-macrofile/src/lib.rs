//! # MPRKit Macrofile
//!
//! Loading, tokenizing, and parameter extraction for WoodWOP-style MPR
//! macro files.
//!
//! The grammar is undocumented and loosely followed by the CAM exports
//! that produce these files, so everything here is deliberately tolerant:
//! the tokenizer only segments (it never validates block bodies), and the
//! parameter extractor answers `None` for anything it cannot recognize.

pub mod file_io;
pub mod params;
pub mod tokenizer;
pub mod workpiece;

pub use file_io::{decode_bytes, MprFileReader};
pub use params::{param, param_f64};
pub use tokenizer::tokenize;
pub use workpiece::{workpiece_dimensions, workpiece_dimensions_from_text};
