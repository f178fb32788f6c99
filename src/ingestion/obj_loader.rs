use std::path::Path;

use tracing::{debug, warn};

use crate::error::{Result, UdimError};
use crate::types::{
    MappingMode, Material, MaterialElement, Mesh, Node, NormalLayer, PolygonList, ReferenceMode,
    Scene, TextureMaps, UvChannel,
};

/// Name given to the single UV set an OBJ file can carry.
pub const OBJ_UV_CHANNEL: &str = "map1";

fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        single_index: false,
        triangulate: false,
        ignore_points: true,
        ignore_lines: true,
        ..Default::default()
    }
}

/// Load an OBJ file (+ associated MTL) into a scene. Every OBJ model becomes
/// a root node with one whole-mesh material assignment.
pub fn load_obj(path: &Path) -> Result<Scene> {
    let (models, materials_result) = tobj::load_obj(path, &load_options())
        .map_err(|e| UdimError::Input(format!("Failed to load OBJ: {e}")))?;

    debug!(model_count = models.len(), "Loaded OBJ models");

    let tobj_materials = match materials_result {
        Ok(mats) => mats,
        Err(e) => {
            warn!("Failed to load MTL: {e}");
            Vec::new()
        }
    };

    let mut scene = Scene::default();
    for mat in &tobj_materials {
        scene.add_material(convert_material(mat));
    }

    for model in models {
        let mesh = convert_mesh(&model.mesh).ok_or_else(|| {
            UdimError::Input(format!("Malformed polygon data in object '{}'", model.name))
        })?;

        let mut node = Node::with_mesh(model.name, mesh);
        match model.mesh.material_id {
            Some(id) if id < scene.material_count() => {
                let slot = node.attach_material(id);
                if let Some(mesh) = node.mesh.as_mut() {
                    mesh.material_elements.push(MaterialElement::whole_mesh(slot));
                }
            }
            Some(id) => warn!(object = %node.name, material = id, "Object references a missing material"),
            None => debug!(object = %node.name, "Object has no material"),
        }
        scene.add_node(node, None);
    }

    Ok(scene)
}

/// Convert a `tobj::Mesh` loaded without triangulation into our `Mesh`.
fn convert_mesh(mesh: &tobj::Mesh) -> Option<Mesh> {
    let polygons = if mesh.face_arities.is_empty() {
        PolygonList::triangles(mesh.indices.clone())?
    } else {
        PolygonList::from_arities(&mesh.face_arities, mesh.indices.clone())?
    };

    let control_points = mesh
        .positions
        .chunks_exact(3)
        .map(|p| [f64::from(p[0]), f64::from(p[1]), f64::from(p[2])])
        .collect();

    let mut uv_channels = Vec::new();
    if !mesh.texcoords.is_empty() {
        let values = mesh
            .texcoords
            .chunks_exact(2)
            .map(|uv| [f64::from(uv[0]), f64::from(uv[1])])
            .collect();
        let (reference, indices) = if mesh.texcoord_indices.is_empty() {
            (ReferenceMode::Direct, Vec::new())
        } else {
            (ReferenceMode::Indexed, mesh.texcoord_indices.clone())
        };
        uv_channels.push(UvChannel {
            name: OBJ_UV_CHANNEL.into(),
            mapping: MappingMode::ByPolygonVertex,
            reference,
            values,
            indices,
        });
    }

    let normals = (!mesh.normals.is_empty() && !mesh.normal_indices.is_empty()).then(|| NormalLayer {
        values: mesh
            .normals
            .chunks_exact(3)
            .map(|n| [f64::from(n[0]), f64::from(n[1]), f64::from(n[2])])
            .collect(),
        indices: mesh.normal_indices.clone(),
    });

    Some(Mesh {
        control_points,
        polygons,
        normals,
        uv_channels,
        material_elements: Vec::new(),
    })
}

/// Convert a tobj material, keeping every property for re-export.
fn convert_material(mat: &tobj::Material) -> Material {
    Material {
        name: mat.name.clone(),
        ambient: mat.ambient,
        diffuse: mat.diffuse,
        specular: mat.specular,
        shininess: mat.shininess,
        dissolve: mat.dissolve,
        optical_density: mat.optical_density,
        illumination_model: mat.illumination_model,
        textures: TextureMaps {
            ambient: mat.ambient_texture.clone(),
            diffuse: mat.diffuse_texture.clone(),
            specular: mat.specular_texture.clone(),
            normal: mat.normal_texture.clone(),
            shininess: mat.shininess_texture.clone(),
            dissolve: mat.dissolve_texture.clone(),
        },
        extra: mat
            .unknown_param
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect(),
    }
}
