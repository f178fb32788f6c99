use tracing::debug;

use crate::types::{MaterialElement, MaterialMapping};

/// Switch a whole-mesh material element to one slot per polygon, every
/// polygon keeping the slot the mesh had. Returns `true` only on the call
/// that performs the upgrade.
pub fn ensure_per_polygon(element: &mut MaterialElement, polygon_count: usize) -> bool {
    if element.mapping == MaterialMapping::ByPolygon {
        return false;
    }

    let slot = element.indices.first().copied().unwrap_or(0);
    element.mapping = MaterialMapping::ByPolygon;
    element.indices = vec![slot; polygon_count];
    debug!(slot, polygon_count, "Material assignment upgraded to per-polygon");
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upgrades_whole_mesh_once() {
        let mut element = MaterialElement::whole_mesh(3);

        assert!(ensure_per_polygon(&mut element, 4));
        assert_eq!(element.mapping, MaterialMapping::ByPolygon);
        assert_eq!(element.indices, vec![3, 3, 3, 3]);

        element.indices[1] = 5;
        assert!(!ensure_per_polygon(&mut element, 4));
        assert_eq!(element.indices, vec![3, 5, 3, 3]);
    }

    #[test]
    fn per_polygon_element_is_left_alone() {
        let mut element = MaterialElement {
            mapping: MaterialMapping::ByPolygon,
            indices: vec![0, 1],
        };
        assert!(!ensure_per_polygon(&mut element, 2));
        assert_eq!(element.indices, vec![0, 1]);
    }
}
