//! Static reference data for MPR macro processing
//!
//! The macro-ID table is the sole authority for operation classification.
//! Header name tokens are not guaranteed stable or complete across CAM
//! exports, so matching is ID-only throughout MPRKit; names are retained
//! in block text purely for human-readable echo.

/// Description answered for macro IDs absent from [`PROCESS_DEFS`].
pub const UNKNOWN_PROCESS_DESC: &str = "Unknown/Unmapped macro ID";

/// Trailing marker on a saw-groove's T_ identifier (after stripping quote
/// and exclamation characters) indicating the operation is performed from
/// the workpiece's bottom face.
///
/// The marker is a machine-specific tool code supplied by the shop's
/// tooling setup; it is configuration, not something derivable from the
/// file contents.
pub const UNDERSIDE_TOOL_SUFFIX: &str = "xxxxx2";

/// Fixed component-reference block removed wholesale on the write path.
///
/// Some CAM exports inject this exact reference to a shared component
/// macro; the target machines have no use for it.
pub const COMPONENT_REF_BLOCK: &str = "<139 \\Komponente\\
IN=\"ZP500_FR.mpr\"
KAT=\"Composant\"
MNM=\"Composant\"";

/// Macro IDs with a known manufacturing-operation description.
///
/// Expand freely; IDs outside this table are still counted, just reported
/// as unmapped.
pub const PROCESS_DEFS: &[(u32, &str)] = &[
    (102, "V_drill"),
    (103, "H_drill"),
    (104, "U_drilling"),
    (105, "Milling_from_top"),
    (106, "Edge-banding on contour"),
    (107, "Flush trimming on contour"),
    (108, "End trimming / capping on contour"),
    (109, "Saw_Grooving"),
    (112, "Pocket_milling"),
    (113, "Milling_from_below"),
    (124, "Angle_sawing[45_Handle]"),
    (131, "Drilling from below"),
    (133, "Contour milling"),
    (151, "Pocketing_from_below"),
    (181, "Freeform pocket milling"),
];

/// Well-known macro IDs used directly by the analysis and rewrite paths.
pub mod macro_ids {
    /// Workpiece definition (Werkstck), the source of LA/BR dimensions.
    pub const WORKPIECE: u32 = 100;
    /// Vertical drilling (BohrVert).
    pub const VERT_DRILL: u32 = 102;
    /// Horizontal drilling (BohrHoriz).
    pub const HORIZ_DRILL: u32 = 103;
    /// Saw grooving.
    pub const SAW_GROOVE: u32 = 109;
    /// Angle sawing / angle groove.
    pub const ANGLE_GROOVE: u32 = 124;
    /// Component reference macro (Komponente).
    pub const COMPONENT: u32 = 139;
    /// Underfloor pocket (UflurTasche), the rewrite target.
    pub const POCKET_BELOW: u32 = 151;
}

/// Look up the description for a macro ID.
pub fn process_description(id: u32) -> Option<&'static str> {
    PROCESS_DEFS
        .iter()
        .find(|(def_id, _)| *def_id == id)
        .map(|(_, desc)| *desc)
}

/// Whether a macro ID appears in the reference table.
pub fn is_known_process(id: u32) -> bool {
    process_description(id).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_ids_resolve() {
        assert_eq!(process_description(102), Some("V_drill"));
        assert_eq!(process_description(109), Some("Saw_Grooving"));
        assert_eq!(process_description(151), Some("Pocketing_from_below"));
        assert!(is_known_process(124));
    }

    #[test]
    fn unknown_ids_miss() {
        assert_eq!(process_description(100), None);
        assert_eq!(process_description(999), None);
        assert!(!is_known_process(139));
    }

    #[test]
    fn component_block_is_a_full_header_and_body() {
        assert!(COMPONENT_REF_BLOCK.starts_with("<139 \\Komponente\\"));
        assert!(COMPONENT_REF_BLOCK.contains("IN=\"ZP500_FR.mpr\""));
    }
}
