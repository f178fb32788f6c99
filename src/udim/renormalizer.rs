use crate::types::{PolygonList, UvChannel};

/// Move every UV value referenced by `polygon` back into the unit square by
/// dropping its integer part.
///
/// Values live in the channel's shared array, so a value also used by a
/// polygon in another tile moves with it. Returns whether anything changed.
pub fn renormalize_polygon(channel: &mut UvChannel, polygons: &PolygonList, polygon: usize) -> bool {
    let mut changed = false;
    for corner in 0..polygons.vertices_in_polygon(polygon) {
        let Some(index) = channel.value_index(polygons, polygon, corner) else {
            continue;
        };
        let uv = &mut channel.values[index];
        let wrapped = [uv[0] - uv[0].floor(), uv[1] - uv[1].floor()];
        if wrapped != *uv {
            *uv = wrapped;
            changed = true;
        }
    }
    changed
}
