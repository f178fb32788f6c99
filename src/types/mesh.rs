use std::ops::Range;

/// How a layer's values attach to mesh topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingMode {
    ByControlPoint,
    ByPolygonVertex,
    ByPolygon,
    ByEdge,
    AllSame,
}

impl MappingMode {
    /// Only per-control-point and per-polygon-vertex UVs can be tiled.
    pub fn is_uv_supported(self) -> bool {
        matches!(self, MappingMode::ByControlPoint | MappingMode::ByPolygonVertex)
    }
}

/// Whether values are addressed directly or through an index array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceMode {
    Direct,
    Indexed,
}

/// Polygon soup: per-polygon corner ranges into a flat control-point index list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolygonList {
    /// `starts[p]..starts[p + 1]` are the corners of polygon `p`.
    starts: Vec<usize>,
    vertices: Vec<u32>,
}

impl PolygonList {
    /// Build from per-polygon vertex counts and the flattened control-point
    /// indices. Returns `None` if the arities do not add up.
    pub fn from_arities(arities: &[u32], vertices: Vec<u32>) -> Option<Self> {
        let mut starts = Vec::with_capacity(arities.len() + 1);
        let mut acc = 0usize;
        starts.push(0);
        for &n in arities {
            acc += n as usize;
            starts.push(acc);
        }
        (acc == vertices.len()).then_some(Self { starts, vertices })
    }

    /// Convenience for all-triangle input.
    pub fn triangles(vertices: Vec<u32>) -> Option<Self> {
        if vertices.len() % 3 != 0 {
            return None;
        }
        let arities = vec![3; vertices.len() / 3];
        Self::from_arities(&arities, vertices)
    }

    pub fn count(&self) -> usize {
        self.starts.len().saturating_sub(1)
    }

    pub fn vertices_in_polygon(&self, polygon: usize) -> usize {
        self.starts[polygon + 1] - self.starts[polygon]
    }

    /// Mesh-global polygon-vertex slots of `polygon`.
    pub fn slots(&self, polygon: usize) -> Range<usize> {
        self.starts[polygon]..self.starts[polygon + 1]
    }

    pub fn control_point_index(&self, polygon: usize, corner: usize) -> u32 {
        self.vertices[self.starts[polygon] + corner]
    }
}

/// A named UV set.
#[derive(Debug, Clone, PartialEq)]
pub struct UvChannel {
    pub name: String,
    pub mapping: MappingMode,
    pub reference: ReferenceMode,
    pub values: Vec<[f64; 2]>,
    pub indices: Vec<u32>,
}

impl UvChannel {
    /// Position in `values` used by `corner` of `polygon`, or `None` when the
    /// mapping mode is unsupported or any index is out of range.
    pub fn value_index(&self, polygons: &PolygonList, polygon: usize, corner: usize) -> Option<usize> {
        let key = match self.mapping {
            MappingMode::ByControlPoint => polygons.control_point_index(polygon, corner) as usize,
            MappingMode::ByPolygonVertex => polygons.slots(polygon).start + corner,
            _ => return None,
        };
        let index = match self.reference {
            ReferenceMode::Direct => key,
            ReferenceMode::Indexed => *self.indices.get(key)? as usize,
        };
        (index < self.values.len()).then_some(index)
    }
}

/// Normals, stored per polygon vertex through an index array.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalLayer {
    pub values: Vec<[f64; 3]>,
    pub indices: Vec<u32>,
}

/// How material slots are assigned to polygons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialMapping {
    /// One slot for the whole mesh.
    AllSame,
    /// One slot per polygon.
    ByPolygon,
}

/// Material assignment: node-local material slots.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialElement {
    pub mapping: MaterialMapping,
    pub indices: Vec<usize>,
}

impl MaterialElement {
    pub fn whole_mesh(slot: usize) -> Self {
        Self {
            mapping: MaterialMapping::AllSame,
            indices: vec![slot],
        }
    }

    /// Local material slot used by `polygon`.
    pub fn slot_for(&self, polygon: usize) -> Option<usize> {
        match self.mapping {
            MaterialMapping::AllSame => self.indices.first().copied(),
            MaterialMapping::ByPolygon => self.indices.get(polygon).copied(),
        }
    }

    /// Whether the index array has the length its mapping mode requires and
    /// every slot exists on a node holding `slot_count` materials.
    pub fn is_well_formed(&self, polygon_count: usize, slot_count: usize) -> bool {
        let expected = match self.mapping {
            MaterialMapping::AllSame => 1,
            MaterialMapping::ByPolygon => polygon_count,
        };
        self.indices.len() == expected && self.indices.iter().all(|&i| i < slot_count)
    }
}

/// Polygonal mesh with UV channels and material assignment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub control_points: Vec<[f64; 3]>,
    pub polygons: PolygonList,
    pub normals: Option<NormalLayer>,
    pub uv_channels: Vec<UvChannel>,
    pub material_elements: Vec<MaterialElement>,
}

impl Mesh {
    pub fn polygon_count(&self) -> usize {
        self.polygons.count()
    }

    pub fn vertices_in_polygon(&self, polygon: usize) -> usize {
        self.polygons.vertices_in_polygon(polygon)
    }

    pub fn control_point_index(&self, polygon: usize, corner: usize) -> u32 {
        self.polygons.control_point_index(polygon, corner)
    }
}
