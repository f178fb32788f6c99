pub mod obj_writer;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{Result, UdimError};
use crate::types::Scene;

/// Files produced by an export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFiles {
    pub obj: PathBuf,
    pub mtl: PathBuf,
}

/// Write `scene` as `<path>` (OBJ) plus a sibling MTL library.
pub fn write_scene(scene: &Scene, path: &Path) -> Result<ExportedFiles> {
    let is_obj = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("obj"));
    if !is_obj {
        return Err(UdimError::Output(format!(
            "Output must be an .obj file: {}",
            path.display()
        )));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mtl = path.with_extension("mtl");
    let mtl_name = mtl
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| UdimError::Output(format!("Invalid output path: {}", path.display())))?;

    fs::write(path, obj_writer::write_obj(scene, mtl_name))
        .map_err(|e| UdimError::Output(format!("Failed to write {}: {e}", path.display())))?;
    fs::write(&mtl, obj_writer::write_mtl(&scene.materials))
        .map_err(|e| UdimError::Output(format!("Failed to write {}: {e}", mtl.display())))?;

    info!(obj = %path.display(), mtl = %mtl.display(), "Wrote scene");
    Ok(ExportedFiles {
        obj: path.to_path_buf(),
        mtl,
    })
}
