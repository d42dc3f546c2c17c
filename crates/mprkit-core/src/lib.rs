//! # MPRKit Core
//!
//! Core types, reference data, and error handling for MPRKit.
//! Provides the fundamental data model shared by the macro-file parser
//! and the CAM analysis/conversion tools.

pub mod data;
pub mod error;
pub mod types;

pub use data::{
    is_known_process, process_description, COMPONENT_REF_BLOCK, PROCESS_DEFS,
    UNDERSIDE_TOOL_SUFFIX, UNKNOWN_PROCESS_DESC,
};
pub use error::{Error, Result};
pub use types::{GrooveAxis, MacroBlock, MacroDocument, WorkpieceDimensions, COORD_EPS};
