use std::collections::BTreeMap;

/// Index of a material in the scene's global material list.
pub type MaterialId = usize;

/// Texture maps referenced by a material, stored as authored paths.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextureMaps {
    pub ambient: Option<String>,
    pub diffuse: Option<String>,
    pub specular: Option<String>,
    pub normal: Option<String>,
    pub shininess: Option<String>,
    pub dissolve: Option<String>,
}

/// Surface material. Everything except the name is carried through
/// untouched so exported tile clones look exactly like their base.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    pub ambient: Option<[f32; 3]>,
    pub diffuse: Option<[f32; 3]>,
    pub specular: Option<[f32; 3]>,
    pub shininess: Option<f32>,
    pub dissolve: Option<f32>,
    pub optical_density: Option<f32>,
    pub illumination_model: Option<u8>,
    pub textures: TextureMaps,
    /// Parameters the importer did not recognise, re-emitted verbatim.
    pub extra: BTreeMap<String, String>,
}

impl Material {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ambient: None,
            diffuse: None,
            specular: None,
            shininess: None,
            dissolve: None,
            optical_density: None,
            illumination_model: None,
            textures: TextureMaps::default(),
            extra: BTreeMap::new(),
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::named(String::new())
    }
}
