pub mod material;
pub mod mesh;
pub mod scene;
pub mod tile;

pub use material::{Material, MaterialId, TextureMaps};
pub use mesh::{
    MappingMode, MaterialElement, MaterialMapping, Mesh, NormalLayer, PolygonList, ReferenceMode,
    UvChannel,
};
pub use scene::{Node, NodeId, Scene};
pub use tile::{Tile, UvBounds};
