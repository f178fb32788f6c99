pub mod cache;
pub mod context;
pub mod orchestrator;
pub mod renormalizer;
pub mod resolver;
pub mod rewriter;
pub mod sampler;
pub mod translator;

use tracing::{debug, info};

use crate::error::Result;
use crate::types::Scene;

pub use cache::{MaterialCache, TileClaim};
pub use context::{ConversionContext, ConversionStats};
pub use orchestrator::process_mesh;
pub use resolver::{resolve_part, resolve_tile};

/// Run the tile split over every mesh in `scene`, depth-first from the roots.
///
/// Returns whether any mesh changed. A mesh that cannot be processed never
/// stops the traversal; capacity errors do.
pub fn convert_scene(scene: &mut Scene, ctx: &mut ConversionContext) -> Result<bool> {
    let order = scene.depth_first();
    let Scene {
        materials, nodes, ..
    } = scene;

    let mut changed = false;
    for id in order {
        let node = &mut nodes[id];
        if node.mesh.is_none() {
            continue;
        }
        let mesh_changed = process_mesh(ctx, node, materials)?;
        debug!(node = %node.name, changed = mesh_changed, "Processed mesh");
        changed |= mesh_changed;
    }

    info!(
        meshes = ctx.stats.meshes_visited,
        changed = ctx.stats.meshes_changed,
        skipped = ctx.stats.meshes_skipped,
        tile_materials = ctx.cache.cloned_count(),
        "Tile split complete"
    );
    Ok(changed)
}
