//! Whole-file transform (write path)
//!
//! Applies the 109 → 151 pocket conversion across one file, optionally
//! dropping angle-groove (124) blocks and the fixed component-reference
//! block, and reassembles the output from the original spans: every
//! block the transform does not touch is emitted byte-identical, in its
//! original position. The caller owns backups, confirmation, and the
//! final write.

use serde::Serialize;

use mprkit_core::data::{macro_ids, COMPONENT_REF_BLOCK, UNDERSIDE_TOOL_SUFFIX};
use mprkit_core::{GrooveAxis, WorkpieceDimensions};
use mprkit_macrofile::{tokenize, workpiece_dimensions};

use crate::pocket_convert::{convert_saw_groove, PocketConvertOptions};

/// Options for one file transform.
#[derive(Debug, Clone, Serialize)]
pub struct TransformOptions {
    /// Tool-diameter compensation handed to the pocket converter.
    pub tool_diameter: f64,
    /// Drop angle-groove (124) blocks entirely.
    pub remove_angle_grooves: bool,
    /// Underside-origin marker; see
    /// [`PocketConvertOptions::underside_suffix`].
    pub underside_suffix: String,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            tool_diameter: 0.0,
            remove_angle_grooves: false,
            underside_suffix: UNDERSIDE_TOOL_SUFFIX.to_string(),
        }
    }
}

/// One successful 109 → 151 conversion.
#[derive(Debug, Clone, Serialize)]
pub struct GrooveConversion {
    /// Axis the groove ran along.
    pub axis: GrooveAxis,
    /// Groove length the pocket was sized from.
    pub groove_length: f64,
}

/// Per-file action log for one transform pass.
#[derive(Debug, Clone, Serialize)]
pub struct TransformReport {
    /// The fixed component-reference block was found and removed.
    pub removed_component: bool,
    /// The file contained angle-groove blocks before any removal.
    pub had_angle_grooves: bool,
    /// Angle-groove blocks were dropped from the output.
    pub removed_angle_grooves: bool,
    /// Successful saw-groove conversions, in file order.
    pub conversions: Vec<GrooveConversion>,
    /// Workpiece dimensions the geometry was computed against.
    pub dimensions: WorkpieceDimensions,
    /// The output differs from the input.
    pub changed: bool,
    /// The fully reassembled output text.
    pub text: String,
}

/// Transform one file's decoded text.
///
/// Per-block problems (unparsable coordinates, non-underside grooves,
/// diagonal grooves) decline locally and leave the block untouched; the
/// transform itself never fails.
pub fn transform_text(text: &str, opts: &TransformOptions) -> TransformReport {
    let dimensions = workpiece_dimensions(&tokenize(text));

    let without_component = text.replace(COMPONENT_REF_BLOCK, "");
    let removed_component = without_component != text;
    if removed_component {
        tracing::info!("removed component-reference block");
    }

    let doc = tokenize(&without_component);
    let had_angle_grooves = doc.contains_id(macro_ids::ANGLE_GROOVE);

    let convert_opts = PocketConvertOptions {
        tool_diameter: opts.tool_diameter,
        underside_suffix: opts.underside_suffix.clone(),
    };

    let mut out = String::with_capacity(without_component.len());
    out.push_str(&doc.preamble);

    let mut removed_angle_grooves = false;
    let mut conversions = Vec::new();

    for block in &doc.blocks {
        if block.id == macro_ids::ANGLE_GROOVE && opts.remove_angle_grooves {
            tracing::info!(order = block.order, "dropped angle-groove block");
            removed_angle_grooves = true;
            continue;
        }

        if block.id == macro_ids::SAW_GROOVE {
            let result = convert_saw_groove(block, dimensions, &convert_opts);
            if let (Some(axis), Some(groove_length)) = (result.axis, result.groove_length) {
                conversions.push(GrooveConversion { axis, groove_length });
            }
            out.push_str(result.output_text());
            continue;
        }

        out.push_str(&block.raw);
    }

    let changed = out != text;

    TransformReport {
        removed_component,
        had_angle_grooves,
        removed_angle_grooves,
        conversions,
        dimensions,
        changed,
        text: out,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INPUT: &str = "\
[H
VERSION=\"4.0\"
<100 \\Werkstck\\
LA=\"800\"
BR=\"600\"
<102 \\BohrVert\\
BM=\"LSL\"
DU=\"8\"
<109 \\Nut\\
XA=\"0\"
YA=\"30\"
XE=\"800\"
YE=\"30\"
NB=\"20\"
TI=\"7\"
RK=\"WRKL\"
T_=\"104!xxxxx2\"
<109 \\Nut\\
XA=\"0\"
YA=\"60\"
XE=\"800\"
YE=\"60\"
NB=\"20\"
T_=\"103\"
<124 \\Saege\\
XA=\"0\"
YA=\"0\"
XE=\"200\"
YE=\"0\"
";

    fn default_opts() -> TransformOptions {
        TransformOptions {
            tool_diameter: 6.0,
            ..TransformOptions::default()
        }
    }

    #[test]
    fn converts_underside_grooves_and_keeps_the_rest_verbatim() {
        let report = transform_text(INPUT, &default_opts());

        assert!(report.changed);
        assert_eq!(report.conversions.len(), 1);
        assert_eq!(report.conversions[0].axis, GrooveAxis::X);
        assert_eq!(report.conversions[0].groove_length, 800.0);
        assert_eq!(report.dimensions.length, 800.0);

        // the underside groove became a pocket
        assert!(report.text.contains("<151 \\UflurTasche\\"));
        // the top-face groove survived byte-for-byte
        assert!(report.text.contains("<109 \\Nut\\\nXA=\"0\"\nYA=\"60\""));
        // untouched content is still there
        assert!(report.text.starts_with("[H\nVERSION=\"4.0\"\n"));
        assert!(report.text.contains("<102 \\BohrVert\\\nBM=\"LSL\"\nDU=\"8\"\n"));
        assert!(report.had_angle_grooves);
        assert!(!report.removed_angle_grooves);
        assert!(report.text.contains("<124 \\Saege\\"));
    }

    #[test]
    fn no_qualifying_blocks_leaves_text_unchanged() {
        let input = "<100 \\Werkstck\\\nLA=\"800\"\nBR=\"600\"\n<102 \\BohrVert\\\nDU=\"5\"\n";
        let report = transform_text(input, &default_opts());
        assert!(!report.changed);
        assert_eq!(report.text, input);
        assert!(report.conversions.is_empty());
    }

    #[test]
    fn angle_grooves_are_dropped_on_request() {
        let opts = TransformOptions {
            remove_angle_grooves: true,
            ..default_opts()
        };
        let report = transform_text(INPUT, &opts);
        assert!(report.removed_angle_grooves);
        assert!(!report.text.contains("<124"));
        assert!(report.changed);
    }

    #[test]
    fn component_reference_block_is_removed() {
        let input = format!(
            "<100 \\Werkstck\\\nLA=\"800\"\nBR=\"600\"\n{}\n<102 \\BohrVert\\\nDU=\"5\"\n",
            mprkit_core::COMPONENT_REF_BLOCK
        );
        let report = transform_text(&input, &TransformOptions::default());
        assert!(report.removed_component);
        assert!(report.changed);
        assert!(!report.text.contains("Komponente"));
        assert!(report.text.contains("<102 \\BohrVert\\"));
    }

    #[test]
    fn block_order_is_preserved() {
        let report = transform_text(INPUT, &default_opts());
        let ids: Vec<u32> = tokenize(&report.text).blocks.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![100, 102, 151, 109, 124]);
    }
}
