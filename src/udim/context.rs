use serde::Serialize;

use crate::config::UdimConfig;
use crate::error::{Result, UdimError};
use crate::types::Scene;
use crate::udim::cache::MaterialCache;

/// Counters collected over one conversion run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConversionStats {
    pub meshes_visited: usize,
    pub meshes_changed: usize,
    pub meshes_skipped: usize,
    pub channels_skipped: usize,
    pub polygons_not_tiled: usize,
    pub polygons_reassigned: usize,
    pub polygons_renormalized: usize,
    pub assignments_upgraded: usize,
}

/// Per-run state shared by every mesh of one scene.
///
/// Create a fresh context for each input scene; nothing in it may carry
/// over to another conversion.
#[derive(Debug)]
pub struct ConversionContext {
    pub config: UdimConfig,
    pub cache: MaterialCache,
    pub stats: ConversionStats,
}

impl ConversionContext {
    pub fn new(config: UdimConfig) -> Self {
        let cache = MaterialCache::new(&config);
        Self {
            config,
            cache,
            stats: ConversionStats::default(),
        }
    }

    /// Reject scenes that already hold more materials than allowed.
    pub fn check_scene_capacity(&self, scene: &Scene) -> Result<()> {
        let count = scene.material_count();
        if count > self.config.max_materials {
            return Err(UdimError::SceneCapacity {
                count,
                max: self.config.max_materials,
            });
        }
        Ok(())
    }
}
