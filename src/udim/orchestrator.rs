use tracing::{debug, error, warn};

use crate::error::Result;
use crate::types::{Material, MaterialElement, MaterialId, Mesh, Node, Tile};
use crate::udim::context::ConversionContext;
use crate::udim::renormalizer::renormalize_polygon;
use crate::udim::resolver::resolve_tile;
use crate::udim::rewriter::ensure_per_polygon;
use crate::udim::sampler::sample_channel;
use crate::udim::translator::IndexTranslator;

/// Split the mesh on `node` into per-tile materials.
///
/// Meshes that cannot be processed are reported and left untouched; only
/// capacity errors propagate. Returns whether the mesh or its material
/// assignment changed.
pub fn process_mesh(
    ctx: &mut ConversionContext,
    node: &mut Node,
    scene_materials: &mut Vec<Material>,
) -> Result<bool> {
    let Node {
        name,
        mesh,
        materials: node_materials,
        ..
    } = node;
    let Some(mesh) = mesh.as_mut() else {
        return Ok(false);
    };
    ctx.stats.meshes_visited += 1;

    let Mesh {
        polygons,
        uv_channels,
        material_elements,
        ..
    } = mesh;
    let polygon_count = polygons.count();
    let element_count = material_elements.len();

    let Some(element) = material_elements.first_mut() else {
        warn!(node = %name, "Mesh has no material assignment, skipping");
        ctx.stats.meshes_skipped += 1;
        return Ok(false);
    };
    if element_count > 1 {
        warn!(
            node = %name,
            elements = element_count,
            "Mesh has several material assignments, only the first is used"
        );
    }
    if !element.is_well_formed(polygon_count, node_materials.len())
        || node_materials.iter().any(|&m| m >= scene_materials.len())
    {
        warn!(node = %name, "Material assignment does not match the mesh, skipping");
        ctx.stats.meshes_skipped += 1;
        return Ok(false);
    }

    let mut translator = IndexTranslator::build(node_materials);
    let mut changed = false;

    for channel in uv_channels.iter_mut() {
        if !channel.mapping.is_uv_supported() {
            warn!(
                node = %name,
                channel = %channel.name,
                mapping = ?channel.mapping,
                "Unsupported UV mapping, skipping channel"
            );
            ctx.stats.channels_skipped += 1;
            continue;
        }
        // Sample the whole channel before touching anything so a bad
        // channel is skipped without partial edits.
        let Some(samples) = sample_channel(channel, polygons) else {
            warn!(node = %name, channel = %channel.name, "UV indices out of range, skipping channel");
            ctx.stats.channels_skipped += 1;
            continue;
        };

        for (polygon, bounds) in samples.iter().enumerate() {
            let Some(tile) = resolve_tile(bounds, ctx.config.tolerance) else {
                debug!(node = %name, polygon, ?bounds, "Polygon is not inside a single tile");
                ctx.stats.polygons_not_tiled += 1;
                continue;
            };

            if !tile.is_base() && ensure_per_polygon(element, polygon_count) {
                ctx.stats.assignments_upgraded += 1;
                changed = true;
            }

            let reassigned = assign_tile_material(
                ctx,
                element,
                &mut translator,
                node_materials,
                scene_materials,
                polygon_count,
                polygon,
                tile,
            )?;
            if reassigned {
                ctx.stats.polygons_reassigned += 1;
                changed = true;
            }

            if !tile.is_base() && renormalize_polygon(channel, polygons, polygon) {
                ctx.stats.polygons_renormalized += 1;
                changed = true;
            }
        }
    }

    if changed {
        ctx.stats.meshes_changed += 1;
    }
    Ok(changed)
}

/// Point `polygon` at the material serving `tile`. Returns whether its slot changed.
fn assign_tile_material(
    ctx: &mut ConversionContext,
    element: &mut MaterialElement,
    translator: &mut IndexTranslator,
    node_materials: &mut Vec<MaterialId>,
    scene_materials: &mut Vec<Material>,
    polygon_count: usize,
    polygon: usize,
    tile: Tile,
) -> Result<bool> {
    let Some(current) = element
        .slot_for(polygon)
        .and_then(|slot| translator.to_scene(slot))
    else {
        error!(polygon, "Polygon material slot has no scene material");
        return Ok(false);
    };

    let resolved = ctx
        .cache
        .resolve(current, tile, scene_materials, node_materials)?;
    translator.sync(node_materials);
    if resolved == current {
        return Ok(false);
    }

    let Some(slot) = translator.to_local(resolved) else {
        error!(polygon, material = resolved, "Tile material is not attached to the node");
        return Ok(false);
    };
    if ensure_per_polygon(element, polygon_count) {
        ctx.stats.assignments_upgraded += 1;
    }
    element.indices[polygon] = slot;
    Ok(true)
}
