pub mod obj_loader;

use std::path::Path;

use tracing::{debug, info};

use crate::error::{Result, UdimError};
use crate::types::Scene;

/// Statistics about an imported scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneStats {
    pub nodes: usize,
    pub meshes: usize,
    pub polygons: usize,
    pub uv_channels: usize,
    pub materials: usize,
}

/// Supported input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Obj,
}

impl InputFormat {
    /// Detect format from file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "obj" => Ok(InputFormat::Obj),
            _ => Err(UdimError::Input(format!("Unsupported file format: .{ext}"))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InputFormat::Obj => "OBJ",
        }
    }
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Import a scene from disk.
pub fn load_scene(path: &Path) -> Result<Scene> {
    if !path.exists() {
        return Err(UdimError::Input(format!(
            "Input file not found: {}",
            path.display()
        )));
    }

    let format = InputFormat::from_path(path)?;
    info!(format = %format, path = %path.display(), "Detected input format");

    let scene = match format {
        InputFormat::Obj => obj_loader::load_obj(path)?,
    };

    let stats = compute_stats(&scene);
    debug!(
        nodes = stats.nodes,
        meshes = stats.meshes,
        polygons = stats.polygons,
        uv_channels = stats.uv_channels,
        materials = stats.materials,
        "Import stats"
    );
    Ok(scene)
}

/// Compute summary statistics for a scene.
pub fn compute_stats(scene: &Scene) -> SceneStats {
    let meshes = scene.nodes.iter().filter_map(|n| n.mesh.as_ref());
    let (polygons, uv_channels) = meshes.fold((0, 0), |(p, c), m| {
        (p + m.polygon_count(), c + m.uv_channels.len())
    });

    SceneStats {
        nodes: scene.nodes.len(),
        meshes: scene.mesh_count(),
        polygons,
        uv_channels,
        materials: scene.material_count(),
    }
}
