use clap::Parser;
use dxf2stix::pipeline::{self, Config};
use log::error;
use std::path::PathBuf;
use std::process::ExitCode;

/// Convert the DXF drawings in a directory into D-Stability models.
///
/// Every closed lightweight polyline becomes a soil layer. Drawings that fail to convert get debug
/// plots next to them instead.
#[derive(Parser, Debug)]
#[command(name = "dxf2stix", version, about)]
struct Args {
    /// Directory scanned (recursively) for drawings; outputs are written here
    #[arg(env = "DXF2STIX_DIR", default_value = "./data")]
    root_dir: PathBuf,

    /// Extension of the drawings, compared case-insensitively
    #[arg(short, long, env = "DXF2STIX_EXT", default_value = "dxf")]
    extension: String,

    /// Do not render debug plots for drawings that fail to convert
    #[arg(long)]
    no_plots: bool,
}

fn main() -> ExitCode {
    let env = env_logger::Env::default().default_filter_or("info");
    env_logger::Builder::from_env(env).init();

    let args = Args::parse();
    let config = Config {
        root_dir: args.root_dir,
        extension: args.extension,
        plots: !args.no_plots,
    };

    match pipeline::run(&config) {
        Ok(summary) if summary.is_success() => ExitCode::SUCCESS,
        Ok(summary) => {
            for f in &summary.failed {
                error!("{}: {}", f.file.display(), f.message);
            }
            ExitCode::from(1)
        }
        Err(e) => {
            error!("run aborted: {}", e);
            ExitCode::from(2)
        }
    }
}
