use tracing::{error, warn};

use crate::types::{Tile, UvBounds};

/// Resolve one axis of a UV box to its integer tile coordinate.
///
/// A minimum sitting within `tolerance` below the next integer snaps up to
/// that integer, but only when the box actually crosses it. Authoring tools
/// often leave `0.999999` where `1.0` was meant.
pub fn resolve_part(min: f64, max: f64, tolerance: f64) -> i64 {
    let floor = min.floor();
    let next = floor + 1.0;
    // One epsilon of slack so a gap equal to the tolerance still snaps.
    if (next - min) - tolerance <= f64::EPSILON && max > next {
        next as i64
    } else {
        floor as i64
    }
}

/// Resolve a polygon's UV box to a UDIM tile.
///
/// Returns `None` when the box spans more than one tile along either axis,
/// lies below the origin, or lands past the tenth column.
pub fn resolve_tile(bounds: &UvBounds, tolerance: f64) -> Option<Tile> {
    let [span_u, span_v] = bounds.span();
    if span_u > 1.0 + tolerance || span_v > 1.0 + tolerance {
        return None;
    }

    let u_col = resolve_part(bounds.min[0], bounds.max[0], tolerance);
    let v_row = resolve_part(bounds.min[1], bounds.max[1], tolerance);

    if u_col < 0 || v_row < 0 {
        warn!(u_col, v_row, "UVs below the UDIM origin");
        return None;
    }
    if u_col > 9 {
        error!(u_col, v_row, "UV column exceeds the 10-wide UDIM row");
        return None;
    }

    let v_row = u32::try_from(v_row).ok()?;
    Tile::from_grid(u_col as u32, v_row)
}
