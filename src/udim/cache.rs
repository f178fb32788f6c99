use std::collections::HashMap;

use tracing::{debug, info};

use crate::config::UdimConfig;
use crate::error::{Result, UdimError};
use crate::types::{Material, MaterialId, Tile};

/// Record that a material serves a tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileClaim {
    pub tile: Tile,
    /// The base material every tile variant was derived from.
    pub root: MaterialId,
    /// Base name the tile marker was appended to.
    pub stem: String,
}

/// Memoizes `(base material, tile) -> concrete material` for one run.
///
/// The first request for tile 1001 renames the base in place; every other
/// tile gets a clone of the base appended to the scene.
#[derive(Debug)]
pub struct MaterialCache {
    entries: HashMap<(MaterialId, u32), MaterialId>,
    claims: HashMap<MaterialId, TileClaim>,
    max_materials: usize,
    max_tile_offset: u32,
    renamed: usize,
    cloned: usize,
}

impl MaterialCache {
    pub fn new(config: &UdimConfig) -> Self {
        Self {
            entries: HashMap::new(),
            claims: HashMap::new(),
            max_materials: config.max_materials,
            max_tile_offset: config.max_tile_offset,
            renamed: 0,
            cloned: 0,
        }
    }

    /// Scene material serving `tile` for `base`, created on first request.
    ///
    /// The result is always attached to `node_materials`. Exceeding the
    /// material or tile capacity is fatal for the run.
    pub fn resolve(
        &mut self,
        base: MaterialId,
        tile: Tile,
        scene_materials: &mut Vec<Material>,
        node_materials: &mut Vec<MaterialId>,
    ) -> Result<MaterialId> {
        let root = self.root_of(base);
        let key = (root, tile.offset());

        if let Some(&hit) = self.entries.get(&key) {
            self.attach(hit, tile, node_materials)?;
            return Ok(hit);
        }

        if tile.offset() >= self.max_tile_offset {
            return Err(UdimError::TileCapacity {
                tile: tile.id(),
                max_offset: self.max_tile_offset,
            });
        }

        let Some(root_material) = scene_materials.get(root) else {
            return Err(UdimError::Input(format!(
                "Material {root} is not part of the scene"
            )));
        };
        let stem = match self.claims.get(&root) {
            Some(claim) => claim.stem.clone(),
            None => root_material.name.clone(),
        };

        let resolved = if tile.is_base() && !self.claims.contains_key(&root) {
            let name = format!("{stem}{}", tile.marker());
            debug!(material = root, %name, "Claiming base material for tile 1001");
            scene_materials[root].set_name(name);
            self.renamed += 1;
            root
        } else {
            if scene_materials.len() >= self.max_materials {
                return Err(UdimError::MaterialCapacity {
                    tile: tile.id(),
                    max: self.max_materials,
                });
            }
            let mut clone = root_material.clone();
            clone.set_name(format!("{stem}{}", tile.marker()));
            info!(base = %stem, name = %clone.name, tile = %tile, "Created tile material");
            scene_materials.push(clone);
            self.cloned += 1;
            scene_materials.len() - 1
        };

        self.claims.insert(
            resolved,
            TileClaim {
                tile,
                root,
                stem,
            },
        );
        self.attach(resolved, tile, node_materials)?;
        self.entries.insert(key, resolved);
        Ok(resolved)
    }

    /// The base a material was derived from; unclaimed materials are their own root.
    pub fn root_of(&self, material: MaterialId) -> MaterialId {
        self.claims.get(&material).map_or(material, |c| c.root)
    }

    /// All tile claims, ordered by scene id.
    pub fn claims(&self) -> Vec<(MaterialId, &TileClaim)> {
        let mut claims: Vec<_> = self.claims.iter().map(|(&id, c)| (id, c)).collect();
        claims.sort_by_key(|(id, _)| *id);
        claims
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Base materials renamed in place for tile 1001.
    pub fn renamed_count(&self) -> usize {
        self.renamed
    }

    /// Tile materials created by cloning.
    pub fn cloned_count(&self) -> usize {
        self.cloned
    }

    fn attach(&self, material: MaterialId, tile: Tile, node_materials: &mut Vec<MaterialId>) -> Result<()> {
        if node_materials.contains(&material) {
            return Ok(());
        }
        if node_materials.len() >= self.max_materials {
            return Err(UdimError::MaterialCapacity {
                tile: tile.id(),
                max: self.max_materials,
            });
        }
        node_materials.push(material);
        Ok(())
    }
}
