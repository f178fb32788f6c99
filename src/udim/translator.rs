use std::collections::HashMap;

use crate::types::MaterialId;

/// Two-way map between a node's local material slots and scene material ids.
#[derive(Debug, Default)]
pub struct IndexTranslator {
    local_to_scene: HashMap<usize, MaterialId>,
    scene_to_local: HashMap<MaterialId, usize>,
    synced: usize,
}

impl IndexTranslator {
    /// Build from a node's current material list.
    pub fn build(node_materials: &[MaterialId]) -> Self {
        let mut translator = Self::default();
        translator.sync(node_materials);
        translator
    }

    /// Record slots appended to the node since the last sync. Existing
    /// entries are never revisited.
    pub fn sync(&mut self, node_materials: &[MaterialId]) {
        for (slot, &scene) in node_materials.iter().enumerate().skip(self.synced) {
            self.local_to_scene.insert(slot, scene);
            self.scene_to_local.entry(scene).or_insert(slot);
        }
        self.synced = self.synced.max(node_materials.len());
    }

    pub fn to_scene(&self, slot: usize) -> Option<MaterialId> {
        self.local_to_scene.get(&slot).copied()
    }

    pub fn to_local(&self, scene: MaterialId) -> Option<usize> {
        self.scene_to_local.get(&scene).copied()
    }

    pub fn len(&self) -> usize {
        self.local_to_scene.len()
    }

    pub fn is_empty(&self) -> bool {
        self.local_to_scene.is_empty()
    }
}
