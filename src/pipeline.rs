use std::fs;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::info;

use crate::config::ConversionConfig;
use crate::error::{Result, UdimError};
use crate::export;
use crate::ingestion;
use crate::types::{Scene, Tile};
use crate::udim::{self, ConversionContext, ConversionStats};

/// A material that serves a tile after the run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileMaterial {
    pub name: String,
    pub tile: Tile,
    /// Name stem of the base material it was derived from.
    pub base: String,
    pub cloned: bool,
}

/// Summary of a completed conversion run.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionResult {
    pub changed: bool,
    pub exported: bool,
    pub materials_before: usize,
    pub materials_after: usize,
    pub tile_materials: Vec<TileMaterial>,
    pub stats: ConversionStats,
    #[serde(serialize_with = "serialize_secs")]
    pub duration: Duration,
}

fn serialize_secs<S: serde::Serializer>(d: &Duration, s: S) -> std::result::Result<S::Ok, S::Error> {
    s.serialize_f64(d.as_secs_f64())
}

/// Pipeline orchestrator: import, split, export.
pub struct Pipeline;

impl Pipeline {
    /// Run a full conversion of `config.input` into `config.output`.
    pub fn run(config: &ConversionConfig) -> Result<ConversionResult> {
        let start = Instant::now();
        info!(input = %config.input.display(), "Starting conversion");

        info!("Stage 1/3: Import");
        let mut scene = ingestion::load_scene(&config.input)?;

        info!("Stage 2/3: Tile split");
        let mut ctx = ConversionContext::new(config.udim.clone());
        let (changed, materials_before) = Self::split(&mut scene, &mut ctx)?;

        let exported = changed || config.always_export;
        if exported {
            info!(output = %config.output.display(), "Stage 3/3: Export");
            export::write_scene(&scene, &config.output)?;
        } else {
            info!("No mesh changed, skipping export");
        }

        let result = ConversionResult {
            changed,
            exported,
            materials_before,
            materials_after: scene.material_count(),
            tile_materials: tile_materials(&scene, &ctx),
            stats: ctx.stats,
            duration: start.elapsed(),
        };

        if let Some(report) = &config.report {
            let json = serde_json::to_string_pretty(&result)
                .map_err(|e| UdimError::Output(format!("Failed to encode report: {e}")))?;
            fs::write(report, json).map_err(|e| {
                UdimError::Output(format!("Failed to write report {}: {e}", report.display()))
            })?;
        }

        info!(
            changed,
            exported,
            tile_materials = result.tile_materials.len(),
            elapsed = ?result.duration,
            "Conversion complete"
        );
        Ok(result)
    }

    /// Capacity precheck plus the tile split. Returns `(changed, materials_before)`.
    pub fn split(scene: &mut Scene, ctx: &mut ConversionContext) -> Result<(bool, usize)> {
        ctx.check_scene_capacity(scene)?;
        let before = scene.material_count();
        let changed = udim::convert_scene(scene, ctx)?;
        Ok((changed, before))
    }
}

fn tile_materials(scene: &Scene, ctx: &ConversionContext) -> Vec<TileMaterial> {
    ctx.cache
        .claims()
        .into_iter()
        .filter_map(|(id, claim)| {
            scene.material(id).map(|m| TileMaterial {
                name: m.name.clone(),
                tile: claim.tile,
                base: claim.stem.clone(),
                cloned: id != claim.root,
            })
        })
        .collect()
}

/// Print a short human-readable summary of a run.
pub fn print_summary(result: &ConversionResult) {
    let stats = &result.stats;
    println!("=== UDIM Split ===");
    println!(
        "  Meshes:       {} ({} changed, {} skipped)",
        stats.meshes_visited, stats.meshes_changed, stats.meshes_skipped
    );
    println!(
        "  Materials:    {} -> {}",
        result.materials_before, result.materials_after
    );
    println!("  Reassigned:   {} polygons", stats.polygons_reassigned);
    println!("  Renormalized: {} polygons", stats.polygons_renormalized);
    if stats.polygons_not_tiled > 0 {
        println!("  Not tiled:    {} polygons", stats.polygons_not_tiled);
    }
    for tm in &result.tile_materials {
        let kind = if tm.cloned { "clone" } else { "renamed" };
        println!("    {} -> {} [{kind}]", tm.tile, tm.name);
    }
    println!("  Exported:     {}", if result.exported { "yes" } else { "no" });
}
