//! Charts of persisted probability timelines.
//!
//! A stateless batch job over the results tree: every result directory
//! gets one chart per noise category, overlaying one curve per noise
//! threshold. Charts are written as SVG at two sizes.

mod catalog;
mod svg;

pub use catalog::{group_by_threshold, threshold_from_filename, CategoryPlot, PlotCatalog, PlotSeries};
pub use svg::{render_svg, ChartSize, SMALL_SCALE};

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors raised while plotting.
#[derive(Error, Debug)]
pub enum PlotError {
    /// Scanning a results directory or writing a chart failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PlotError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for plotting.
pub type PlotResult<T> = Result<T, PlotError>;

/// Plot every result directory under `results_root` into `plot_dir`.
///
/// Returns the chart files written, in directory order.
pub fn plot_results(results_root: &Path, plot_dir: &Path) -> PlotResult<Vec<PathBuf>> {
    fs::create_dir_all(plot_dir).map_err(|e| PlotError::io(plot_dir, e))?;

    let mut dirs: Vec<PathBuf> = fs::read_dir(results_root)
        .map_err(|e| PlotError::io(results_root, e))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_dir())
        .collect();
    dirs.sort();

    let mut written = Vec::new();
    for dir in dirs {
        written.extend(plot_directory(&dir, plot_dir)?);
    }
    Ok(written)
}

/// Plot one result directory. Categories without curves produce no chart.
pub fn plot_directory(dir: &Path, plot_dir: &Path) -> PlotResult<Vec<PathBuf>> {
    let catalog = PlotCatalog::scan(dir)?;
    let mut written = Vec::new();

    for plot in catalog.plots() {
        if plot.series.is_empty() {
            continue;
        }

        let stem = format!("{}_{}", catalog.name(), plot.category.file_token());
        for (suffix, size) in [("", ChartSize::FULL), ("_small", ChartSize::small())] {
            let path = plot_dir.join(format!("{}{}.svg", stem, suffix));
            fs::write(&path, render_svg(&plot.series, size)).map_err(|e| PlotError::io(&path, e))?;
            written.push(path);
        }

        tracing::info!(
            "Plotted {} {} curves for {}",
            plot.series.len(),
            plot.category,
            catalog.name()
        );
    }

    Ok(written)
}
