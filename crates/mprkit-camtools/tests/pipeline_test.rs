//! End-to-end checks over one realistic part: the read path (inventory)
//! and the write path (transform) against the same input.

use mprkit_camtools::{scan_text, transform_text, InventoryOptions, TransformOptions};
use mprkit_core::GrooveAxis;
use mprkit_macrofile::tokenize;

const PART: &str = "\
[H
VERSION=\"4.0 Alpha\"
OP=\"1\"
<100 \\Werkstck\\
LA=\"812\"
BR=\"512\"
DI=\"19\"
<102 \\BohrVert\\
XA=\"50\"
YA=\"50\"
BM=\"LSL\"
DU=\"8\"
<102 \\BohrVert\\
XA=\"762\"
YA=\"50\"
BM=\"LSL\"
DU=\"8\"
<103 \\BohrHoriz\\
XA=\"0\"
YA=\"100\"
BM=\"XP\"
T_=\"4\"
<109 \\Nut\\
XA=\"0\"
YA=\"30\"
XE=\"812\"
YE=\"30\"
NB=\"20\"
TI=\"7\"
RK=\"WRKL\"
T_=\"104!xxxxx2\"
<109 \\Nut\\
XA=\"40\"
YA=\"0\"
XE=\"40\"
YE=\"512\"
NB=\"8\"
T_=\"103\"
<124 \\Saege\\
XA=\"0\"
YA=\"0\"
XE=\"200\"
YE=\"0\"
<139 \\Komponente\\
IN=\"side_panel.mpr\"
KAT=\"Composant\"
MNM=\"Composant\"
";

#[test]
fn inventory_matches_the_part() {
    let inv = scan_text(PART, &InventoryOptions::default());

    assert_eq!(inv.total_blocks(), 8);
    assert_eq!(inv.counts_by_id[&102], 2);
    assert_eq!(inv.counts_by_id[&109], 2);
    assert_eq!(inv.dimensions.length, 812.0);
    assert_eq!(inv.dimensions.width, 512.0);

    assert_eq!(inv.vertical_drill_signatures["VDrill_8D_SFS_Through"], 2);
    assert_eq!(inv.horizontal_drill_signatures["HDrill_Tool4_+X"], 1);

    assert_eq!(
        inv.saw_groove_lengths,
        vec![
            "812.0_On_PL<812.0_Milling_From_Below>",
            "512.0_On_PW<512.0_Top_Saw_Grv>"
        ]
    );
    assert_eq!(inv.angle_groove_lengths, vec!["200.0_On_PL<812.0>"]);

    // 100 and 139 are not mapped operations
    assert_eq!(inv.unknown_counts.len(), 2);
    assert_eq!(inv.unknown_counts[&100], 1);
    assert_eq!(inv.unknown_counts[&139], 1);
}

#[test]
fn transform_rewrites_only_the_underside_groove() {
    let opts = TransformOptions {
        tool_diameter: 6.0,
        ..TransformOptions::default()
    };
    let report = transform_text(PART, &opts);

    assert!(report.changed);
    assert_eq!(report.conversions.len(), 1);
    assert_eq!(report.conversions[0].axis, GrooveAxis::X);
    assert_eq!(report.conversions[0].groove_length, 812.0);

    // the pocket replaces the underside groove in place
    let out = tokenize(&report.text);
    let ids: Vec<u32> = out.blocks.iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![100, 102, 102, 103, 151, 109, 124, 139]);

    // pocket geometry: centered on the panel, widened by the tool
    let pocket = &out.blocks[4].raw;
    assert!(pocket.contains("XA=\"406.0\""));
    assert!(pocket.contains("YA=\"40.0\""));
    assert!(pocket.contains("LA=\"818.0\""));
    assert!(pocket.contains("BR=\"20.0\""));
    assert!(pocket.contains("TI=\"7\""));

    // the top-face groove is byte-identical to its input span
    let input_doc = tokenize(PART);
    assert_eq!(out.blocks[5].raw, input_doc.blocks[5].raw);
    // and so is everything outside the rewritten span
    assert_eq!(out.preamble, input_doc.preamble);
    assert_eq!(out.blocks[0].raw, input_doc.blocks[0].raw);
    assert_eq!(out.blocks[7].raw, input_doc.blocks[7].raw);
}

#[test]
fn transform_is_stable_when_nothing_qualifies() {
    // strip the underside marker: every groove is then top-face
    let part = PART.replace("104!xxxxx2", "104");
    let opts = TransformOptions {
        tool_diameter: 6.0,
        ..TransformOptions::default()
    };
    let report = transform_text(&part, &opts);
    assert!(!report.changed);
    assert_eq!(report.text, part);
    assert!(report.conversions.is_empty());
}

#[test]
fn converted_output_reparses_as_a_pocket() {
    let opts = TransformOptions {
        tool_diameter: 6.0,
        ..TransformOptions::default()
    };
    let report = transform_text(PART, &opts);

    let inv = scan_text(&report.text, &InventoryOptions::default());
    assert_eq!(inv.counts_by_id[&151], 1);
    assert_eq!(inv.counts_by_id[&109], 1);
    assert_eq!(
        inv.mapped_counts[&151].description,
        "Pocketing_from_below"
    );
}

#[test]
fn angle_groove_removal_is_opt_in() {
    let opts = TransformOptions {
        tool_diameter: 6.0,
        remove_angle_grooves: true,
        ..TransformOptions::default()
    };
    let report = transform_text(PART, &opts);
    assert!(report.had_angle_grooves);
    assert!(report.removed_angle_grooves);

    let out = tokenize(&report.text);
    assert!(!out.blocks.iter().any(|b| b.id == 124));
}
