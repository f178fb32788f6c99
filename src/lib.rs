pub mod config;
pub mod error;
pub mod export;
pub mod ingestion;
pub mod pipeline;
pub mod types;
pub mod udim;

pub use config::{ConversionConfig, UdimConfig};
pub use error::{Result, UdimError};
pub use pipeline::Pipeline;
