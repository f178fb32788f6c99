use crate::types::{PolygonList, UvBounds, UvChannel};

/// UV bounding box of `polygon` in `channel`.
///
/// Returns `None` if the channel's mapping mode is unsupported, an index
/// points outside the channel, or the polygon has no corners.
pub fn polygon_uv_bounds(channel: &UvChannel, polygons: &PolygonList, polygon: usize) -> Option<UvBounds> {
    let mut bounds = UvBounds::empty();
    for corner in 0..polygons.vertices_in_polygon(polygon) {
        let index = channel.value_index(polygons, polygon, corner)?;
        bounds.include(channel.values[index]);
    }
    (!bounds.is_empty()).then_some(bounds)
}

/// Sample every polygon of a channel. Fails as a whole if any polygon
/// cannot be sampled, so callers can skip the channel before editing it.
pub fn sample_channel(channel: &UvChannel, polygons: &PolygonList) -> Option<Vec<UvBounds>> {
    (0..polygons.count())
        .map(|p| polygon_uv_bounds(channel, polygons, p))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MappingMode, ReferenceMode};

    fn two_quads() -> PolygonList {
        // Control points 0..6, quads share the edge 1-4.
        PolygonList::from_arities(&[4, 4], vec![0, 1, 4, 3, 1, 2, 5, 4]).unwrap()
    }

    #[test]
    fn bounds_by_control_point() {
        let polys = two_quads();
        let channel = UvChannel {
            name: "map1".into(),
            mapping: MappingMode::ByControlPoint,
            reference: ReferenceMode::Direct,
            values: vec![
                [0.0, 0.0],
                [1.0, 0.0],
                [2.0, 0.0],
                [0.0, 1.0],
                [1.0, 1.0],
                [2.0, 1.0],
            ],
            indices: vec![],
        };

        let bb = polygon_uv_bounds(&channel, &polys, 1).unwrap();
        assert_eq!(bb.min, [1.0, 0.0]);
        assert_eq!(bb.max, [2.0, 1.0]);
    }

    #[test]
    fn bounds_by_polygon_vertex_indexed() {
        let polys = two_quads();
        let channel = UvChannel {
            name: "map1".into(),
            mapping: MappingMode::ByPolygonVertex,
            reference: ReferenceMode::Indexed,
            values: vec![[0.1, 0.1], [0.9, 0.1], [0.9, 0.9], [0.1, 0.9], [1.2, 0.2], [1.8, 0.8]],
            indices: vec![0, 1, 2, 3, 4, 5, 5, 4],
        };

        let first = polygon_uv_bounds(&channel, &polys, 0).unwrap();
        assert_eq!(first.min, [0.1, 0.1]);
        assert_eq!(first.max, [0.9, 0.9]);

        let second = polygon_uv_bounds(&channel, &polys, 1).unwrap();
        assert_eq!(second.min, [1.2, 0.2]);
        assert_eq!(second.max, [1.8, 0.8]);
    }

    #[test]
    fn bounds_by_polygon_vertex_direct_uses_global_slot() {
        let polys = two_quads();
        let mut values = vec![[0.5, 0.5]; 4];
        values.extend([[3.5, 0.5]; 4]);
        let channel = UvChannel {
            name: "map1".into(),
            mapping: MappingMode::ByPolygonVertex,
            reference: ReferenceMode::Direct,
            values,
            indices: vec![],
        };

        let second = polygon_uv_bounds(&channel, &polys, 1).unwrap();
        assert_eq!(second.min, [3.5, 0.5]);
    }

    #[test]
    fn out_of_range_fails_whole_channel() {
        let polys = two_quads();
        let channel = UvChannel {
            name: "map1".into(),
            mapping: MappingMode::ByPolygonVertex,
            reference: ReferenceMode::Indexed,
            values: vec![[0.5, 0.5]; 2],
            indices: vec![0, 1, 0, 1, 0, 1, 0, 7],
        };

        assert!(polygon_uv_bounds(&channel, &polys, 0).is_some());
        assert!(polygon_uv_bounds(&channel, &polys, 1).is_none());
        assert!(sample_channel(&channel, &polys).is_none());
    }

    #[test]
    fn sample_channel_collects_every_polygon() {
        let polys = two_quads();
        let channel = UvChannel {
            name: "map1".into(),
            mapping: MappingMode::ByControlPoint,
            reference: ReferenceMode::Direct,
            values: vec![[0.25, 0.25]; 6],
            indices: vec![],
        };
        assert_eq!(sample_channel(&channel, &polys).unwrap().len(), 2);
    }
}
