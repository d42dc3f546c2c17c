//! Drilling process signatures
//!
//! Vertical (102) and horizontal (103) drilling macros are summarized as
//! canonical strings such as `VDrill_10D_SFS_Through` and
//! `HDrill_Tool7_+X`, so that one part's drilling pattern can be compared
//! or histogrammed across files.
//!
//! The BM mode-code lookups are data tables with an explicit unknown
//! fallback; unrecognized codes embed the raw code (`BMLSX`) instead of
//! failing, because real exports carry codes the documentation never
//! mentions.

use mprkit_macrofile::param;

/// BM mode code → style abbreviation for vertical drilling.
const VERT_STYLE: &[(&str, &str)] = &[
    ("LS", "SF"),
    ("SS", "FF"),
    ("LSL", "SFS"),
    ("SSS", "FFF"),
    ("LSU", "SF"),
    ("LSLU", "SFS"),
];

/// BM mode code → depth-semantics suffix for vertical drilling.
const VERT_DEPTH: &[(&str, &str)] = &[
    ("LS", "ToDepth"),
    ("SS", "ToDepth"),
    ("LSL", "Through"),
    ("SSS", "Through"),
    ("LSU", "FromBottom"),
    ("LSLU", "FromBottom"),
];

/// BM mode code → drilling direction for horizontal drilling.
const HORIZ_DIR: &[(&str, &str)] = &[("XP", "+X"), ("XM", "-X"), ("YP", "+Y"), ("YM", "-Y")];

fn lookup(table: &[(&str, &'static str)], key: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(entry, _)| *entry == key)
        .map(|(_, value)| *value)
}

/// Token emitted when neither a diameter nor a tool identifier is present.
const UNKNOWN_DIAMETER: &str = "DUNK";

fn strip_whitespace(s: &str) -> String {
    s.split_whitespace().collect()
}

/// Format the diameter token from a DU value with a tool-identifier
/// fallback.
///
/// Numeric diameters within 1e-9 of a whole number drop the decimal
/// point (`10D`); other numerics keep it (`7.5D`); non-numeric DU values
/// are carried through with whitespace stripped. Absent DU falls back to
/// `<tool_prefix><identifier>`, and `DUNK` marks both absent.
fn format_diameter(du: Option<&str>, tool: Option<&str>, tool_prefix: &str) -> String {
    if let Some(du) = du.filter(|s| !s.is_empty()) {
        return match du.parse::<f64>() {
            Ok(v) if (v - v.trunc()).abs() < 1e-9 => format!("{}D", v.trunc() as i64),
            Ok(v) => format!("{}D", v),
            Err(_) => format!("{}D", strip_whitespace(du)),
        };
    }

    if let Some(tool) = tool.filter(|s| !s.is_empty()) {
        return format!("{}{}", tool_prefix, strip_whitespace(tool));
    }

    UNKNOWN_DIAMETER.to_string()
}

fn unknown_mode(bm: &str) -> String {
    if bm.is_empty() {
        "BMUNK".to_string()
    } else {
        format!("BM{}", bm)
    }
}

/// Signature for a vertical drilling (102) block:
/// `VDrill_<diameter>_<style>_<suffix>`.
///
/// Diameter comes from DU with TNO as the tool-identifier fallback.
pub fn vertical_drill_signature(block: &str) -> String {
    let bm = param(block, "BM").unwrap_or("").to_uppercase();
    let diam = format_diameter(param(block, "DU"), param(block, "TNO"), "Tool");

    let style = lookup(VERT_STYLE, &bm)
        .map(str::to_string)
        .unwrap_or_else(|| unknown_mode(&bm));
    let suffix = lookup(VERT_DEPTH, &bm).unwrap_or("UNK");

    format!("VDrill_{}_{}_{}", diam, style, suffix)
}

/// Signature for a horizontal drilling (103) block:
/// `HDrill_<diameter>_<direction>`.
///
/// Diameter comes from DU with T_ as the tool-identifier fallback. Mode
/// code `C` picks up the free angle parameter WI when present (`C45`).
pub fn horizontal_drill_signature(block: &str) -> String {
    let bm = param(block, "BM").unwrap_or("").to_uppercase();
    let diam = format_diameter(param(block, "DU"), param(block, "T_"), "Tool");

    let direction = if let Some(dir) = lookup(HORIZ_DIR, &bm) {
        dir.to_string()
    } else if bm == "C" {
        match param(block, "WI").filter(|wi| !wi.is_empty()) {
            Some(wi) => format!("C{}", wi),
            None => "C".to_string(),
        }
    } else {
        unknown_mode(&bm)
    };

    format!("HDrill_{}_{}", diam, direction)
}
