//! # MPRKit CAM Tools
//!
//! Analysis and conversion tools over tokenized MPR macro files.
//!
//! ## Read path
//!
//! - **Signatures**: canonical descriptive strings for vertical and
//!   horizontal drilling macros (diameter, style, depth semantics)
//! - **Groove analysis**: length/axis/context descriptors for saw-groove
//!   and angle-groove macros
//! - **Inventory**: per-file aggregation of process counts, signature
//!   histograms, and groove lengths
//!
//! ## Write path
//!
//! - **Pocket conversion**: rewriting underside saw-groove macros (109)
//!   into underfloor-pocket macros (151) under the documented sign/axis
//!   convention
//! - **Transform**: the whole-file pipeline that applies conversions and
//!   removals while keeping every untouched byte intact

pub mod groove;
pub mod inventory;
mod numfmt;
pub mod pocket_convert;
pub mod signatures;
pub mod transform;

pub use groove::{analyze_angle_groove, analyze_saw_groove, GrooveDescriptor};
pub use inventory::{scan_document, scan_text, InventoryOptions, MappedCount, ProcessInventory};
pub use pocket_convert::{
    convert_saw_groove, qualifies_for_pocket_conversion, PocketConvertOptions, RewriteResult,
};
pub use signatures::{horizontal_drill_signature, vertical_drill_signature};
pub use transform::{transform_text, GrooveConversion, TransformOptions, TransformReport};
