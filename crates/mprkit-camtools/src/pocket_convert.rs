//! Saw-groove to pocket conversion (macro 109 → 151)
//!
//! Grooves cut from the workpiece's underside cannot run on machines
//! without a saw unit below the table; they are re-expressed as
//! underfloor pocket-milling macros instead. Only saw-groove blocks whose
//! T_ identifier carries the underside-origin marker qualify; everything
//! else passes through untouched.
//!
//! The pocket is centered on the groove: along the running axis the
//! center snaps to the workpiece midline (when the dimension is known),
//! across it the center shifts by half the groove width in the direction
//! given by the RK flank flag and the groove's travel direction. The
//! pocket grows by the milling tool's diameter along the running axis so
//! the cut reaches the groove's nominal ends.

use serde::{Deserialize, Serialize};

use mprkit_core::data::UNDERSIDE_TOOL_SUFFIX;
use mprkit_core::{GrooveAxis, MacroBlock, WorkpieceDimensions, COORD_EPS};
use mprkit_macrofile::{param, param_f64};

use crate::groove::stripped_tool_id;
use crate::numfmt::fmt_decimal;

/// Options for the 109 → 151 conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PocketConvertOptions {
    /// Diameter of the milling tool that will cut the pocket; added to
    /// the groove length so the pocket covers the full cut.
    pub tool_diameter: f64,
    /// Trailing marker on the stripped T_ identifier that qualifies a
    /// saw-groove for conversion. Machine-specific configuration.
    pub underside_suffix: String,
}

impl Default for PocketConvertOptions {
    fn default() -> Self {
        Self {
            tool_diameter: 0.0,
            underside_suffix: UNDERSIDE_TOOL_SUFFIX.to_string(),
        }
    }
}

/// Outcome of offering one saw-groove block to the converter.
#[derive(Debug, Clone)]
pub struct RewriteResult {
    /// The block as it appeared in the file.
    pub original: MacroBlock,
    /// Replacement block text, or `None` when the conversion was
    /// declined.
    pub replacement: Option<String>,
    /// Axis the groove runs along, when the conversion happened.
    pub axis: Option<GrooveAxis>,
    /// Groove length the pocket was sized from.
    pub groove_length: Option<f64>,
    /// Whether the block changed.
    pub changed: bool,
}

impl RewriteResult {
    fn declined(block: &MacroBlock) -> Self {
        Self {
            original: block.clone(),
            replacement: None,
            axis: None,
            groove_length: None,
            changed: false,
        }
    }

    /// The text this block contributes to the reassembled file.
    pub fn output_text(&self) -> &str {
        self.replacement.as_deref().unwrap_or(&self.original.raw)
    }
}

/// Whether a saw-groove block's stripped T_ identifier carries the
/// underside-origin marker.
pub fn qualifies_for_pocket_conversion(block: &str, underside_suffix: &str) -> bool {
    stripped_tool_id(block).ends_with(underside_suffix)
}

/// Half-groove-width offset across the running axis, signed by the RK
/// flank flag and the groove's travel direction. WRKR mirrors WRKL; any
/// other flag means no adjustment.
fn flank_offset(rk: &str, delta_positive: bool, half_width: f64) -> f64 {
    match (rk, delta_positive) {
        ("WRKL", true) => half_width,
        ("WRKL", false) => -half_width,
        ("WRKR", true) => -half_width,
        ("WRKR", false) => half_width,
        _ => 0.0,
    }
}

/// Convert one saw-groove block into an underfloor-pocket block.
///
/// Declines (returning the block unchanged) when the identifier lacks
/// the underside marker, when any coordinate fails to parse, or when the
/// groove is not axis-aligned. A decline is a no-op decision, not an
/// error.
pub fn convert_saw_groove(
    block: &MacroBlock,
    dims: WorkpieceDimensions,
    opts: &PocketConvertOptions,
) -> RewriteResult {
    if !qualifies_for_pocket_conversion(&block.raw, &opts.underside_suffix) {
        tracing::debug!(
            id = block.id,
            order = block.order,
            "saw-groove is top-face, leaving as-is"
        );
        return RewriteResult::declined(block);
    }

    let (Some(xa), Some(ya), Some(xe), Some(ye)) = (
        param_f64(&block.raw, "XA"),
        param_f64(&block.raw, "YA"),
        param_f64(&block.raw, "XE"),
        param_f64(&block.raw, "YE"),
    ) else {
        tracing::debug!(
            id = block.id,
            order = block.order,
            "saw-groove has unparsable coordinates, conversion declined"
        );
        return RewriteResult::declined(block);
    };

    let ddx = xe - xa;
    let ddy = ye - ya;
    let along_x = ddx.abs() > COORD_EPS;
    let along_y = ddy.abs() > COORD_EPS;

    if along_x == along_y {
        // diagonal or degenerate; only axis-aligned grooves are convertible
        tracing::warn!(
            id = block.id,
            order = block.order,
            ddx,
            ddy,
            "saw-groove is not axis-aligned, conversion declined"
        );
        return RewriteResult::declined(block);
    }

    let groove_width = param_f64(&block.raw, "NB").unwrap_or(0.0);
    let tool_index = param(&block.raw, "TI").unwrap_or("");
    let rk = param(&block.raw, "RK").unwrap_or("").to_uppercase();
    let half_width = groove_width / 2.0;

    let (axis, groove_length, center_x, center_y, pocket_length, pocket_width) = if along_x {
        let center_x = if dims.length.abs() > COORD_EPS {
            dims.length / 2.0
        } else {
            xa
        };
        let center_y = ya + flank_offset(&rk, ddx > 0.0, half_width);
        (
            GrooveAxis::X,
            ddx.abs(),
            center_x,
            center_y,
            ddx.abs() + opts.tool_diameter,
            groove_width,
        )
    } else {
        // across the Y run the flank sides swap, mirroring the X case
        let center_x = xa - flank_offset(&rk, ddy > 0.0, half_width);
        let center_y = if dims.width.abs() > COORD_EPS {
            dims.width / 2.0
        } else {
            ya
        };
        (
            GrooveAxis::Y,
            ddy.abs(),
            center_x,
            center_y,
            groove_width,
            ddy.abs() + opts.tool_diameter,
        )
    };

    let replacement = format!(
        "<151 \\UflurTasche\\\n\
         XA=\"{xa}\"\n\
         YA=\"{ya}\"\n\
         LA=\"{la}\"\n\
         BR=\"{br}\"\n\
         TI=\"{ti}\"\n\
         RD=\"0\"\n\
         WI=\"0\"\n\
         ZT=\"0\"\n\
         XY=\"80\"\n\
         AB=\"30\"\n\
         AM=\"1\"\n\
         DS=\"0\"\n\
         T_=\"3\"\n\
         KO=\"00\"\n",
        xa = fmt_decimal(center_x),
        ya = fmt_decimal(center_y),
        la = fmt_decimal(pocket_length),
        br = fmt_decimal(pocket_width),
        ti = tool_index,
    );

    tracing::info!(
        id = block.id,
        order = block.order,
        axis = %axis,
        length = groove_length,
        "converted underside saw-groove to pocket"
    );

    RewriteResult {
        original: block.clone(),
        replacement: Some(replacement),
        axis: Some(axis),
        groove_length: Some(groove_length),
        changed: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIMS: WorkpieceDimensions = WorkpieceDimensions {
        length: 800.0,
        width: 600.0,
    };

    fn underside_block(body: &str) -> MacroBlock {
        MacroBlock::new(
            109,
            format!("<109 \\Nut\\\n{}T_=\"104!xxxxx2\"\n", body),
            0,
        )
    }

    fn opts(tool_diameter: f64) -> PocketConvertOptions {
        PocketConvertOptions {
            tool_diameter,
            ..PocketConvertOptions::default()
        }
    }

    #[test]
    fn top_face_groove_is_declined() {
        let block = MacroBlock::new(
            109,
            "<109 \\Nut\\\nXA=\"0\"\nYA=\"30\"\nXE=\"800\"\nYE=\"30\"\nT_=\"103\"\n",
            0,
        );
        let result = convert_saw_groove(&block, DIMS, &opts(6.0));
        assert!(!result.changed);
        assert!(result.replacement.is_none());
        assert_eq!(result.output_text(), block.raw);
    }

    #[test]
    fn along_x_wrkl_positive_travel() {
        let block =
            underside_block("XA=\"0\"\nYA=\"30\"\nXE=\"800\"\nYE=\"30\"\nNB=\"20\"\nTI=\"7\"\nRK=\"WRKL\"\n");
        let result = convert_saw_groove(&block, DIMS, &opts(6.0));
        assert!(result.changed);
        assert_eq!(result.axis, Some(GrooveAxis::X));
        assert_eq!(result.groove_length, Some(800.0));

        let text = result.replacement.unwrap();
        // center X snaps to the workpiece midline
        assert!(text.contains("XA=\"400.0\""));
        // center Y shifts by half the groove width toward the left flank
        assert!(text.contains("YA=\"40.0\""));
        // pocket grows by the tool diameter along the run
        assert!(text.contains("LA=\"806.0\""));
        assert!(text.contains("BR=\"20.0\""));
        assert!(text.contains("TI=\"7\""));
        assert!(text.starts_with("<151 \\UflurTasche\\\n"));
        assert!(text.ends_with("KO=\"00\"\n"));
    }

    #[test]
    fn along_x_wrkl_negative_travel_mirrors_offset() {
        let block =
            underside_block("XA=\"800\"\nYA=\"30\"\nXE=\"0\"\nYE=\"30\"\nNB=\"20\"\nTI=\"7\"\nRK=\"WRKL\"\n");
        let text = convert_saw_groove(&block, DIMS, &opts(6.0))
            .replacement
            .unwrap();
        assert!(text.contains("YA=\"20.0\""));
    }

    #[test]
    fn along_x_wrkr_mirrors_wrkl() {
        let block =
            underside_block("XA=\"0\"\nYA=\"30\"\nXE=\"800\"\nYE=\"30\"\nNB=\"20\"\nTI=\"7\"\nRK=\"WRKR\"\n");
        let text = convert_saw_groove(&block, DIMS, &opts(6.0))
            .replacement
            .unwrap();
        assert!(text.contains("YA=\"20.0\""));
    }

    #[test]
    fn unknown_flank_flag_keeps_center() {
        let block =
            underside_block("XA=\"0\"\nYA=\"30\"\nXE=\"800\"\nYE=\"30\"\nNB=\"20\"\nTI=\"7\"\n");
        let text = convert_saw_groove(&block, DIMS, &opts(6.0))
            .replacement
            .unwrap();
        assert!(text.contains("YA=\"30.0\""));
    }

    #[test]
    fn along_y_swaps_roles() {
        let block =
            underside_block("XA=\"100\"\nYA=\"0\"\nXE=\"100\"\nYE=\"600\"\nNB=\"20\"\nTI=\"7\"\nRK=\"WRKL\"\n");
        let result = convert_saw_groove(&block, DIMS, &opts(6.0));
        assert_eq!(result.axis, Some(GrooveAxis::Y));

        let text = result.replacement.unwrap();
        // WRKL with positive ddy shifts X by minus half the width
        assert!(text.contains("XA=\"90.0\""));
        // center Y snaps to the workpiece width midline
        assert!(text.contains("YA=\"300.0\""));
        // length and width swap: LA is the groove width, BR grows by tool
        assert!(text.contains("LA=\"20.0\""));
        assert!(text.contains("BR=\"606.0\""));
    }

    #[test]
    fn zero_dimension_falls_back_to_groove_start() {
        let block =
            underside_block("XA=\"10\"\nYA=\"30\"\nXE=\"810\"\nYE=\"30\"\nNB=\"20\"\nTI=\"7\"\n");
        let text = convert_saw_groove(&block, WorkpieceDimensions::default(), &opts(6.0))
            .replacement
            .unwrap();
        assert!(text.contains("XA=\"10.0\""));
    }

    #[test]
    fn diagonal_groove_is_declined() {
        let block =
            underside_block("XA=\"0\"\nYA=\"0\"\nXE=\"30\"\nYE=\"40\"\nNB=\"20\"\nTI=\"7\"\n");
        let result = convert_saw_groove(&block, DIMS, &opts(6.0));
        assert!(!result.changed);
        assert!(result.replacement.is_none());
    }

    #[test]
    fn unparsable_coordinate_is_declined() {
        let block =
            underside_block("XA=\"zero\"\nYA=\"0\"\nXE=\"800\"\nYE=\"0\"\nNB=\"20\"\nTI=\"7\"\n");
        assert!(!convert_saw_groove(&block, DIMS, &opts(6.0)).changed);
    }
}
