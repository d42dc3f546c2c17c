//! Groove geometry analysis
//!
//! Saw-groove (109) and angle-groove (124) macros describe a cut by its
//! start and end coordinates. The analyzer derives the groove's length
//! and orientation from the coordinate deltas and annotates it with the
//! workpiece dimension it runs across, so an inventory line reads like
//! `800.0_On_PL<800.0_Top_Saw_Grv>`: a full-length groove along the
//! panel length, cut from the top face.
//!
//! A groove with both deltas nonzero is diagonal or malformed; it is
//! reported as the larger magnitude with no axis attributed. Treat those
//! entries as a data-quality signal.

use std::fmt;

use mprkit_core::{GrooveAxis, WorkpieceDimensions, COORD_EPS};
use mprkit_macrofile::{param, param_f64};

use crate::numfmt::fmt_decimal;

/// Derived length/axis/context summary for one groove macro.
#[derive(Debug, Clone, PartialEq)]
pub struct GrooveDescriptor {
    /// Groove length: the larger absolute coordinate delta.
    pub length: f64,
    /// Axis the groove runs along; `None` when both deltas are nonzero.
    pub axis: Option<GrooveAxis>,
    /// Workpiece dimension perpendicular context (LA for X, BR for Y);
    /// `None` for diagonal grooves.
    pub reference_dim: Option<f64>,
    /// Face suffix for saw-grooves (`Top_Saw_Grv` / `Milling_From_Below`);
    /// angle-grooves carry no face concept.
    pub face: Option<&'static str>,
}

impl fmt::Display for GrooveDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.axis {
            Some(GrooveAxis::X) => "PL",
            Some(GrooveAxis::Y) => "PW",
            None => return write!(f, "{}", fmt_decimal(self.length)),
        };
        let dim = fmt_decimal(self.reference_dim.unwrap_or(0.0));
        match self.face {
            Some(face) => write!(
                f,
                "{}_On_{}<{}_{}>",
                fmt_decimal(self.length),
                label,
                dim,
                face
            ),
            None => write!(f, "{}_On_{}<{}>", fmt_decimal(self.length), label, dim),
        }
    }
}

/// Coordinate deltas for one groove block, or `None` when any of the four
/// coordinates is missing or unparsable (an unmeasurable groove, not an
/// error).
fn groove_deltas(block: &str) -> Option<(f64, f64)> {
    let xa = param_f64(block, "XA")?;
    let ya = param_f64(block, "YA")?;
    let xe = param_f64(block, "XE")?;
    let ye = param_f64(block, "YE")?;
    Some(((xa - xe).abs(), (ya - ye).abs()))
}

/// The block's T_ identifier with quote and exclamation characters
/// stripped.
pub(crate) fn stripped_tool_id(block: &str) -> String {
    param(block, "T_")
        .unwrap_or("")
        .replace(['"', '!'], "")
        .trim()
        .to_string()
}

fn descriptor(
    dx: f64,
    dy: f64,
    dims: WorkpieceDimensions,
    face: Option<&'static str>,
) -> GrooveDescriptor {
    if dy.abs() < COORD_EPS {
        GrooveDescriptor {
            length: dx,
            axis: Some(GrooveAxis::X),
            reference_dim: Some(dims.length),
            face,
        }
    } else if dx.abs() < COORD_EPS {
        GrooveDescriptor {
            length: dy,
            axis: Some(GrooveAxis::Y),
            reference_dim: Some(dims.width),
            face,
        }
    } else {
        GrooveDescriptor {
            length: dx.max(dy),
            axis: None,
            reference_dim: None,
            face: None,
        }
    }
}

/// Analyze a saw-groove (109) block.
///
/// The face suffix distinguishes underside-origin grooves, detected when
/// the stripped T_ identifier ends with `underside_suffix`.
pub fn analyze_saw_groove(
    block: &str,
    dims: WorkpieceDimensions,
    underside_suffix: &str,
) -> Option<GrooveDescriptor> {
    let (dx, dy) = groove_deltas(block)?;
    let face = if stripped_tool_id(block).ends_with(underside_suffix) {
        "Milling_From_Below"
    } else {
        "Top_Saw_Grv"
    };
    Some(descriptor(dx, dy, dims, Some(face)))
}

/// Analyze an angle-groove (124) block.
pub fn analyze_angle_groove(block: &str, dims: WorkpieceDimensions) -> Option<GrooveDescriptor> {
    let (dx, dy) = groove_deltas(block)?;
    Some(descriptor(dx, dy, dims, None))
}
