use std::path::PathBuf;

use clap::Parser;

/// Limits and tolerances for tile classification and material splitting.
#[derive(Debug, Clone)]
pub struct UdimConfig {
    /// How close to the next integer a UV minimum may sit and still snap up.
    pub tolerance: f64,
    /// Maximum number of materials the scene may hold.
    pub max_materials: usize,
    /// Tile offsets (`tile - 1001`) must stay below this value.
    pub max_tile_offset: u32,
}

impl Default for UdimConfig {
    fn default() -> Self {
        Self {
            tolerance: 0.001,
            max_materials: 256,
            max_tile_offset: 100,
        }
    }
}

/// Fully resolved conversion configuration (constructed from CLI args).
#[derive(Debug, Clone, Default)]
pub struct ConversionConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Export even if no mesh changed.
    pub always_export: bool,
    pub udim: UdimConfig,
    /// Optional JSON run report destination.
    pub report: Option<PathBuf>,
    pub verbose: bool,
}

/// CLI argument definition (clap derive).
#[derive(Parser, Debug)]
#[command(
    name = "udim-split",
    about = "Split shared materials into per-UDIM-tile materials and renormalize UVs",
    version
)]
pub struct CliArgs {
    /// Input scene (OBJ)
    pub input: PathBuf,

    /// Output scene (OBJ); the MTL library is written next to it
    pub output: PathBuf,

    /// Export even when no mesh needed changes
    #[arg(short = 'a', long)]
    pub always: bool,

    /// Boundary snap tolerance in UV units
    #[arg(long, default_value_t = 0.001)]
    pub tolerance: f64,

    /// Maximum number of materials in the scene
    #[arg(long, default_value_t = 256)]
    pub max_materials: usize,

    /// Maximum tile offset (tile - 1001), exclusive
    #[arg(long, default_value_t = 100)]
    pub max_tile_offset: u32,

    /// Write a JSON run report to this path
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

impl From<CliArgs> for ConversionConfig {
    fn from(args: CliArgs) -> Self {
        ConversionConfig {
            input: args.input,
            output: args.output,
            always_export: args.always,
            udim: UdimConfig {
                tolerance: args.tolerance,
                max_materials: args.max_materials,
                max_tile_offset: args.max_tile_offset,
            },
            report: args.report,
            verbose: args.verbose,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_udim_config() {
        let c = UdimConfig::default();
        assert!((c.tolerance - 0.001).abs() < f64::EPSILON);
        assert_eq!(c.max_materials, 256);
        assert_eq!(c.max_tile_offset, 100);
    }

    #[test]
    fn cli_args_to_conversion_config() {
        let args = CliArgs::parse_from([
            "udim-split",
            "in.obj",
            "out/result.obj",
            "-a",
            "--tolerance",
            "0.01",
            "--max-materials",
            "32",
            "--max-tile-offset",
            "20",
            "--report",
            "report.json",
            "-v",
        ]);

        let config: ConversionConfig = args.into();

        assert_eq!(config.input, PathBuf::from("in.obj"));
        assert_eq!(config.output, PathBuf::from("out/result.obj"));
        assert!(config.always_export);
        assert!((config.udim.tolerance - 0.01).abs() < f64::EPSILON);
        assert_eq!(config.udim.max_materials, 32);
        assert_eq!(config.udim.max_tile_offset, 20);
        assert_eq!(config.report, Some(PathBuf::from("report.json")));
        assert!(config.verbose);
    }

    #[test]
    fn cli_args_minimal() {
        let args = CliArgs::parse_from(["udim-split", "a.obj", "b.obj"]);
        let config: ConversionConfig = args.into();

        assert!(!config.always_export);
        assert_eq!(config.udim.max_materials, 256);
        assert!(config.report.is_none());
        assert!(!config.verbose);
    }

    #[test]
    fn cli_args_missing_output_is_rejected() {
        assert!(CliArgs::try_parse_from(["udim-split", "a.obj"]).is_err());
    }

    #[test]
    fn cli_long_always_flag() {
        let args = CliArgs::parse_from(["udim-split", "--always", "a.obj", "b.obj"]);
        assert!(args.always);
    }
}
