//! Discovery and grouping of timeline CSV files.

use std::fs;
use std::path::{Path, PathBuf};

use super::{PlotError, PlotResult};
use crate::models::{PropertyType, Timeline};
use crate::results::read_timeline_csv;

const THRESHOLD_TAG: &str = "threshold_";

/// Noise threshold embedded in a result filename as `threshold_<digits>_`.
pub fn threshold_from_filename(name: &str) -> Option<u32> {
    name.match_indices(THRESHOLD_TAG).find_map(|(start, _)| {
        let rest = &name[start + THRESHOLD_TAG.len()..];
        let digits = rest.len() - rest.trim_start_matches(|c: char| c.is_ascii_digit()).len();
        if digits == 0 || !rest[digits..].starts_with('_') {
            return None;
        }
        rest[..digits].parse().ok()
    })
}

/// Group filenames by noise category, ordered by threshold.
///
/// A name is placed in every category it mentions (case-insensitive).
/// Names without a threshold are skipped. Categories come back in
/// [`PropertyType::ALL`] order, possibly empty.
pub fn group_by_threshold<'a>(
    names: impl IntoIterator<Item = &'a str>,
) -> Vec<(PropertyType, Vec<(u32, &'a str)>)> {
    let names: Vec<&str> = names.into_iter().collect();

    PropertyType::ALL
        .iter()
        .map(|&category| {
            let mut entries: Vec<(u32, &str)> = names
                .iter()
                .filter(|name| name.to_lowercase().contains(category.file_token()))
                .filter_map(|&name| match threshold_from_filename(name) {
                    Some(threshold) => Some((threshold, name)),
                    None => {
                        tracing::debug!("No threshold in '{}', skipping", name);
                        None
                    }
                })
                .collect();
            entries.sort_by_key(|(threshold, _)| *threshold);
            (category, entries)
        })
        .collect()
}

/// One curve: a threshold and its timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotSeries {
    pub threshold: u32,
    pub source: PathBuf,
    pub timeline: Timeline,
}

impl PlotSeries {
    /// Legend label.
    pub fn label(&self) -> String {
        format!("≥ {}", self.threshold)
    }
}

/// Curves of one category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryPlot {
    pub category: PropertyType,
    pub series: Vec<PlotSeries>,
}

/// Curves found in one result directory.
#[derive(Debug, Clone)]
pub struct PlotCatalog {
    name: String,
    plots: Vec<CategoryPlot>,
}

impl PlotCatalog {
    /// Scan `dir` for timeline CSV files.
    ///
    /// Files that cannot be read as timelines are skipped with a warning.
    pub fn scan(dir: &Path) -> PlotResult<Self> {
        let name = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mut files: Vec<String> = fs::read_dir(dir)
            .map_err(|e| PlotError::io(dir, e))?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .filter(|file| file.ends_with(".csv"))
            .collect();
        files.sort();

        let plots = group_by_threshold(files.iter().map(String::as_str))
            .into_iter()
            .map(|(category, entries)| CategoryPlot {
                category,
                series: entries
                    .into_iter()
                    .filter_map(|(threshold, file)| load_series(dir, threshold, file))
                    .collect(),
            })
            .collect();

        Ok(Self { name, plots })
    }

    /// Directory name, used as the chart filename prefix.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Per-category curves.
    pub fn plots(&self) -> &[CategoryPlot] {
        &self.plots
    }
}

fn load_series(dir: &Path, threshold: u32, file: &str) -> Option<PlotSeries> {
    let source = dir.join(file);
    match read_timeline_csv(&source) {
        Ok(timeline) => Some(PlotSeries {
            threshold,
            source,
            timeline,
        }),
        Err(e) => {
            tracing::warn!("Skipping {}: {}", source.display(), e);
            None
        }
    }
}
