//! The conversion run: discover drawings, convert each one, plot the ones that fail.
use crate::*;
use log::{error, info, warn};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Extension given to the converted models.
pub const STIX_EXTENSION: &str = "stix";

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Directory scanned (recursively) for drawings; outputs are written here too.
    pub root_dir: PathBuf,
    /// Extension of the drawings, compared case-insensitively.
    pub extension: String,
    /// Render debug plots for drawings that fail to convert.
    pub plots: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from("./data"),
            extension: "dxf".to_string(),
            plots: true,
        }
    }
}

/// A drawing that did not convert.
#[derive(Clone, Debug, PartialEq)]
pub struct Failure {
    pub file: PathBuf,
    pub message: String,
}

/// The outcome of a run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Summary {
    /// The `.stix` files written.
    pub converted: Vec<PathBuf>,
    pub failed: Vec<Failure>,
}

impl Summary {
    pub fn processed(&self) -> usize {
        self.converted.len() + self.failed.len()
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Build the geotechnical model of a drawing: one layer per ring, all of the default soil.
pub fn to_geotechnical_model(drawing: &DrawingModel) -> Result<GeotechnicalModel> {
    let mut model = GeotechnicalModel::new();

    let soil = SoilMaterial::default();
    let name = soil.name.clone();
    model.add_soil(soil)?;

    for ring in &drawing.rings {
        let polygon = ring.to_polygon()?;
        model.add_layer(polygon.open_clockwise(), &name)?;
    }

    Ok(model)
}

/// Outputs for `file` are named after its stem, in the root directory.
pub fn output_base(root: &Path, file: &Path) -> PathBuf {
    root.join(file.file_stem().unwrap_or(file.as_os_str()))
}

/// `base` with `suffix` appended, keeping any dots already in the file name.
pub(crate) fn suffixed(base: &Path, suffix: &str) -> PathBuf {
    let mut s = OsString::from(base.as_os_str());
    s.push(suffix);
    PathBuf::from(s)
}

/// Convert one drawing into `<base>.stix`.
///
/// `drawing` holds whatever was extracted, also when conversion fails afterwards.
pub fn convert_file(file: &Path, base: &Path, drawing: &mut DrawingModel) -> Result<PathBuf> {
    *drawing = io::dxf::from_dxf_file(file)?;
    let model = to_geotechnical_model(drawing)?;

    let target = suffixed(base, &format!(".{}", STIX_EXTENSION));
    io::stix::write_stix(&model, &target)?;
    Ok(target)
}

/// Convert every drawing under the configured root.
///
/// A drawing that fails to convert is logged, plotted and skipped. Failing to scan the root, or
/// failing to plot, ends the run.
pub fn run(config: &Config) -> Result<Summary> {
    let files = find_files(&config.root_dir, &config.extension)?;
    info!(
        "found {} drawing(s) in {}",
        files.len(),
        config.root_dir.display()
    );

    let mut summary = Summary::default();

    for file in files {
        info!("converting {}...", file.display());
        let base = output_base(&config.root_dir, &file);
        let mut drawing = DrawingModel::new(&file);

        match convert_file(&file, &base, &mut drawing) {
            Ok(target) => {
                info!("wrote {} ({} layer(s))", target.display(), drawing.len());
                summary.converted.push(target);
            }
            Err(e) if e.is_recoverable() => {
                if config.plots {
                    error!(
                        "failed to convert '{}': '{}', see the debug images at {}.*.png",
                        file.display(),
                        e,
                        base.display()
                    );
                    debug_plots(&drawing, &base)?;
                } else {
                    error!("failed to convert '{}': '{}'", file.display(), e);
                }
                summary.failed.push(Failure {
                    file,
                    message: e.to_string(),
                });
            }
            Err(e) => return Err(e),
        }
    }

    let level = if summary.is_success() {
        log::Level::Info
    } else {
        log::Level::Warn
    };
    log::log!(
        level,
        "processed {} drawing(s): {} converted, {} failed",
        summary.processed(),
        summary.converted.len(),
        summary.failed.len()
    );

    Ok(summary)
}

#[cfg(feature = "plot")]
fn debug_plots(drawing: &DrawingModel, base: &Path) -> Result<()> {
    if drawing.is_empty() {
        warn!("{}: no geometry was extracted", drawing.source.display());
    }
    plot::debug_plot(drawing, base).map(|_| ())
}

#[cfg(not(feature = "plot"))]
fn debug_plots(drawing: &DrawingModel, _: &Path) -> Result<()> {
    warn!(
        "{}: debug plots are unavailable, built without the `plot` feature",
        drawing.source.display()
    );
    Ok(())
}
