//! Decimal rendering for derived MPR values.

use mprkit_core::COORD_EPS;

/// Render a value the way the target machines have always seen it: whole
/// values keep a trailing `.0` (`408.0`), fractional values print
/// minimally (`30.25`).
pub(crate) fn fmt_decimal(v: f64) -> String {
    if (v - v.trunc()).abs() < COORD_EPS {
        format!("{:.1}", v)
    } else {
        format!("{}", v)
    }
}
