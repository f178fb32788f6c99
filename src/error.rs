use std::io;

/// All error types for the udim-split converter.
#[derive(thiserror::Error, Debug)]
pub enum UdimError {
    #[error("Input error: {0}")]
    Input(String),
    #[error("Output error: {0}")]
    Output(String),
    #[error("Scene already holds {count} materials (limit {max})")]
    SceneCapacity { count: usize, max: usize },
    #[error("Material capacity exceeded: creating tile {tile} would exceed {max} materials")]
    MaterialCapacity { tile: u32, max: usize },
    #[error("Tile capacity exceeded: tile {tile} is beyond the maximum tile offset {max_offset}")]
    TileCapacity { tile: u32, max_offset: u32 },
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl UdimError {
    /// Process exit code reported by the command-line front end.
    ///
    /// Capacity problems detected on the imported scene and capacity
    /// problems hit while creating tile materials are kept distinct.
    pub fn exit_code(&self) -> i32 {
        match self {
            UdimError::SceneCapacity { .. } => 3,
            UdimError::MaterialCapacity { .. } | UdimError::TileCapacity { .. } => 4,
            UdimError::Input(_) | UdimError::Output(_) | UdimError::Io(_) => -1,
        }
    }

    /// Whether this error must abort the whole run.
    pub fn is_capacity(&self) -> bool {
        matches!(
            self,
            UdimError::SceneCapacity { .. }
                | UdimError::MaterialCapacity { .. }
                | UdimError::TileCapacity { .. }
        )
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, UdimError>;
