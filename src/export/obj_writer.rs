use std::fmt::Write;

use tracing::warn;

use crate::types::{Material, Mesh, Node, Scene, UvChannel};

/// Serialize `scene` as Wavefront OBJ text referencing the MTL library `mtl_name`.
///
/// Polygons keep their arity. A `usemtl` line is emitted whenever the
/// material changes between consecutive polygons, including across objects,
/// since OBJ material state is not reset by `o`. Polygons without a material
/// after a bound run get `usemtl` with a name absent from the library.
/// Only the first supported UV channel of each mesh can be written.
pub fn write_obj(scene: &Scene, mtl_name: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# udim-split");
    if !scene.materials.is_empty() {
        let _ = writeln!(out, "mtllib {mtl_name}");
    }

    let mut state = WriteState {
        bases: IndexBases::default(),
        current: None,
        unbound: unbound_material_name(&scene.materials),
    };
    for id in scene.depth_first() {
        let node = &scene.nodes[id];
        if let Some(mesh) = &node.mesh {
            write_object(&mut out, node, mesh, &scene.materials, &mut state);
        }
    }
    out
}

/// A `usemtl` name no scene material carries, used to unbind faces.
fn unbound_material_name(materials: &[Material]) -> String {
    let mut name = String::from("default");
    while materials.iter().any(|m| m.name == name) {
        name.push('_');
    }
    name
}

/// Serialize every scene material as an MTL library.
pub fn write_mtl(materials: &[Material]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# udim-split");
    for mat in materials {
        let _ = writeln!(out);
        let _ = writeln!(out, "newmtl {}", mat.name);
        if let Some([r, g, b]) = mat.ambient {
            let _ = writeln!(out, "Ka {r:.6} {g:.6} {b:.6}");
        }
        if let Some([r, g, b]) = mat.diffuse {
            let _ = writeln!(out, "Kd {r:.6} {g:.6} {b:.6}");
        }
        if let Some([r, g, b]) = mat.specular {
            let _ = writeln!(out, "Ks {r:.6} {g:.6} {b:.6}");
        }
        if let Some(ns) = mat.shininess {
            let _ = writeln!(out, "Ns {ns:.6}");
        }
        if let Some(d) = mat.dissolve {
            let _ = writeln!(out, "d {d:.6}");
        }
        if let Some(ni) = mat.optical_density {
            let _ = writeln!(out, "Ni {ni:.6}");
        }
        if let Some(illum) = mat.illumination_model {
            let _ = writeln!(out, "illum {illum}");
        }

        let maps = [
            ("map_Ka", &mat.textures.ambient),
            ("map_Kd", &mat.textures.diffuse),
            ("map_Ks", &mat.textures.specular),
            ("map_Bump", &mat.textures.normal),
            ("map_Ns", &mat.textures.shininess),
            ("map_d", &mat.textures.dissolve),
        ];
        for (key, path) in maps {
            if let Some(path) = path {
                let _ = writeln!(out, "{key} {path}");
            }
        }
        for (key, value) in &mat.extra {
            let _ = writeln!(out, "{key} {value}");
        }
    }
    out
}

/// Running 1-based offsets for `v`, `vt` and `vn` records across objects.
#[derive(Default)]
struct IndexBases {
    v: usize,
    vt: usize,
    vn: usize,
}

/// Writer state carried from one object to the next.
struct WriteState<'a> {
    bases: IndexBases,
    /// Material bound by the last `usemtl`, `None` when unbound.
    current: Option<&'a str>,
    unbound: String,
}

fn write_object<'a>(
    out: &mut String,
    node: &Node,
    mesh: &Mesh,
    materials: &'a [Material],
    state: &mut WriteState<'a>,
) {
    let bases = &mut state.bases;
    let _ = writeln!(out, "o {}", node.name);

    for [x, y, z] in &mesh.control_points {
        let _ = writeln!(out, "v {x:.6} {y:.6} {z:.6}");
    }

    let channel = first_writable_channel(node, mesh);
    if let Some(channel) = channel {
        for [u, v] in &channel.values {
            // Shortest round-trip form, so renormalized values stay below 1.
            let _ = writeln!(out, "vt {u} {v}");
        }
    }

    if let Some(normals) = &mesh.normals {
        for [x, y, z] in &normals.values {
            let _ = writeln!(out, "vn {x:.6} {y:.6} {z:.6}");
        }
    }

    let element = mesh.material_elements.first();
    for polygon in 0..mesh.polygon_count() {
        let name = element
            .and_then(|e| e.slot_for(polygon))
            .and_then(|slot| node.materials.get(slot))
            .and_then(|&id| materials.get(id))
            .map(|m| m.name.as_str());
        if name != state.current {
            let _ = writeln!(out, "usemtl {}", name.unwrap_or(state.unbound.as_str()));
            state.current = name;
        }

        out.push('f');
        for (corner, slot) in mesh.polygons.slots(polygon).enumerate() {
            let v = mesh.control_point_index(polygon, corner) as usize + 1 + bases.v;
            let vt = channel
                .and_then(|c| c.value_index(&mesh.polygons, polygon, corner))
                .map(|i| i + 1 + bases.vt);
            let vn = mesh
                .normals
                .as_ref()
                .and_then(|n| n.indices.get(slot))
                .map(|&i| i as usize + 1 + bases.vn);
            let _ = match (vt, vn) {
                (Some(vt), Some(vn)) => write!(out, " {v}/{vt}/{vn}"),
                (Some(vt), None) => write!(out, " {v}/{vt}"),
                (None, Some(vn)) => write!(out, " {v}//{vn}"),
                (None, None) => write!(out, " {v}"),
            };
        }
        out.push('\n');
    }

    bases.v += mesh.control_points.len();
    bases.vt += channel.map_or(0, |c| c.values.len());
    bases.vn += mesh.normals.as_ref().map_or(0, |n| n.values.len());
}

fn first_writable_channel<'a>(node: &Node, mesh: &'a Mesh) -> Option<&'a UvChannel> {
    let mut supported = mesh.uv_channels.iter().filter(|c| c.mapping.is_uv_supported());
    let first = supported.next();
    let dropped = supported.count();
    if dropped > 0 {
        warn!(object = %node.name, dropped, "OBJ holds one UV set, extra channels are not written");
    }
    first
}
