use std::process;

use clap::Parser;
use clap::error::ErrorKind;
use tracing::error;
use tracing_subscriber::EnvFilter;

use udim_split::config::{CliArgs, ConversionConfig};
use udim_split::pipeline::{self, Pipeline};

fn main() {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            if e.print().is_err() {
                eprintln!("{e}");
            }
            process::exit(-1);
        }
    };

    // Init tracing
    let filter = if args.verbose {
        EnvFilter::new("udim_split=debug")
    } else {
        EnvFilter::new("udim_split=info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config: ConversionConfig = args.into();

    match Pipeline::run(&config) {
        Ok(result) => {
            pipeline::print_summary(&result);
            println!("Done in {:.2}s", result.duration.as_secs_f64());
        }
        Err(e) => {
            if e.is_capacity() {
                error!(%e, max_materials = config.udim.max_materials, "Material capacity exceeded");
            } else {
                error!(%e, "Conversion failed");
            }
            let code = e.exit_code();
            let err = anyhow::Error::new(e).context("udim-split conversion failed");
            eprintln!("Error: {err:#}");
            process::exit(code);
        }
    }
}
