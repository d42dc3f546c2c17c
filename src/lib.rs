//! # MPRKit
//!
//! A Rust toolkit for WoodWOP-style MPR machining files.
//!
//! ## Architecture
//!
//! MPRKit is organized as a workspace with multiple crates:
//!
//! 1. **mprkit-core** - Core types, reference data, error handling
//! 2. **mprkit-macrofile** - Decoding, tokenizing, parameter extraction
//! 3. **mprkit-camtools** - Signatures, groove analysis, pocket conversion,
//!    inventories
//! 4. **mprkit** - CLI binary that integrates all crates
//!
//! ## Features
//!
//! - **Process inventories**: per-macro-ID counts with mapped
//!   descriptions, drilling-signature histograms, groove-length lists
//! - **Drilling signatures**: canonical `VDrill_…`/`HDrill_…` strings for
//!   comparing parts across files
//! - **Pocket conversion**: rewrite underside saw-grooves (109) into
//!   underfloor pockets (151) with byte-level non-interference for
//!   everything else in the file
//! - **Tolerant parsing**: an undocumented text grammar handled without
//!   ever failing a whole file over one malformed block

pub use mprkit_core::{
    data, is_known_process, process_description, Error, GrooveAxis, MacroBlock, MacroDocument,
    Result, WorkpieceDimensions, COMPONENT_REF_BLOCK, PROCESS_DEFS, UNDERSIDE_TOOL_SUFFIX,
    UNKNOWN_PROCESS_DESC,
};

pub use mprkit_macrofile::{
    decode_bytes, param, param_f64, tokenize, workpiece_dimensions,
    workpiece_dimensions_from_text, MprFileReader,
};

pub use mprkit_camtools::{
    analyze_angle_groove, analyze_saw_groove, convert_saw_groove, horizontal_drill_signature,
    qualifies_for_pocket_conversion, scan_document, scan_text, transform_text,
    vertical_drill_signature, GrooveConversion, GrooveDescriptor, InventoryOptions, MappedCount,
    PocketConvertOptions, ProcessInventory, RewriteResult, TransformOptions, TransformReport,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output on stderr
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}
