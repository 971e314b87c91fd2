//! Minimal SVG line charts.
//!
//! Layout follows the paper figures: a grid, "Clock cycles" against
//! "Probability" on a fixed `[0, 1]` axis, and the legend in the lower
//! right corner.

use super::catalog::PlotSeries;

/// Scale of the small chart variant relative to the full one.
pub const SMALL_SCALE: f64 = 30.0 / 44.0;

const POINTS_PER_INCH: f64 = 72.0;

/// Matplotlib's default category palette.
const PALETTE: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// Physical chart size and font sizes, in inches and points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartSize {
    pub width_in: f64,
    pub height_in: f64,
    /// Axis label font size.
    pub label_pt: f64,
    /// Tick and legend font size.
    pub tick_pt: f64,
}

impl ChartSize {
    /// Single-column figure size.
    pub const FULL: ChartSize = ChartSize {
        width_in: 3.3,
        height_in: 2.7,
        label_pt: 10.0,
        tick_pt: 10.0,
    };

    /// Full size scaled by [`SMALL_SCALE`] with 8 pt axis labels.
    pub fn small() -> Self {
        Self {
            width_in: Self::FULL.width_in * SMALL_SCALE,
            height_in: Self::FULL.height_in * SMALL_SCALE,
            label_pt: 8.0,
            tick_pt: Self::FULL.tick_pt,
        }
    }

    fn width_pt(&self) -> f64 {
        self.width_in * POINTS_PER_INCH
    }

    fn height_pt(&self) -> f64 {
        self.height_in * POINTS_PER_INCH
    }
}

/// Plot area in chart coordinates, with the data range it maps.
struct Frame {
    left: f64,
    right: f64,
    top: f64,
    bottom: f64,
    x_max: f64,
}

impl Frame {
    fn x(&self, cycle: f64) -> f64 {
        self.left + cycle / self.x_max * (self.right - self.left)
    }

    fn y(&self, probability: f64) -> f64 {
        self.bottom - probability.clamp(0.0, 1.0) * (self.bottom - self.top)
    }
}

/// Render curves in the given order as an SVG document.
pub fn render_svg(series: &[PlotSeries], size: ChartSize) -> String {
    let width = size.width_pt();
    let height = size.height_pt();

    let max_cycle = series
        .iter()
        .filter_map(|s| s.timeline.samples().iter().map(|p| p.clock_cycle).max())
        .max()
        .unwrap_or(0) as f64;
    let x_step = nice_step(max_cycle / 5.0).max(1.0);
    let x_max = ((max_cycle / x_step).ceil() * x_step).max(x_step);

    let frame = Frame {
        left: size.tick_pt * 2.2 + size.label_pt * 1.6,
        right: width - 8.0,
        top: 6.0,
        bottom: height - size.tick_pt * 1.6 - size.label_pt * 1.6,
        x_max,
    };

    let mut out = String::new();
    out.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{:.2}pt\" height=\"{:.2}pt\" viewBox=\"0 0 {:.2} {:.2}\" font-family=\"DejaVu Sans, sans-serif\">\n",
        width, height, width, height
    ));
    out.push_str(&format!(
        "<rect width=\"{:.2}\" height=\"{:.2}\" fill=\"white\"/>\n",
        width, height
    ));

    // Grid and ticks
    let mut tick = 0.0;
    while tick <= x_max + x_step / 2.0 {
        let x = frame.x(tick);
        out.push_str(&grid_line(x, frame.top, x, frame.bottom));
        out.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" font-size=\"{}\" text-anchor=\"middle\">{:.0}</text>\n",
            x,
            frame.bottom + size.tick_pt * 1.2,
            size.tick_pt,
            tick
        ));
        tick += x_step;
    }
    for i in 0..=5 {
        let p = i as f64 / 5.0;
        let y = frame.y(p);
        out.push_str(&grid_line(frame.left, y, frame.right, y));
        out.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" font-size=\"{}\" text-anchor=\"end\">{:.1}</text>\n",
            frame.left - 3.0,
            y + size.tick_pt * 0.35,
            size.tick_pt,
            p
        ));
    }

    out.push_str(&format!(
        "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"none\" stroke=\"black\" stroke-width=\"0.8\"/>\n",
        frame.left,
        frame.top,
        frame.right - frame.left,
        frame.bottom - frame.top
    ));

    // Curves
    for (index, s) in series.iter().enumerate() {
        let points: Vec<String> = s
            .timeline
            .samples()
            .iter()
            .map(|p| {
                format!(
                    "{:.2},{:.2}",
                    frame.x(p.clock_cycle as f64),
                    frame.y(p.probability)
                )
            })
            .collect();
        out.push_str(&format!(
            "<polyline fill=\"none\" stroke=\"{}\" stroke-width=\"1\" points=\"{}\"/>\n",
            color(index),
            points.join(" ")
        ));
    }

    // Axis labels
    out.push_str(&format!(
        "<text x=\"{:.2}\" y=\"{:.2}\" font-size=\"{}\" text-anchor=\"middle\">Clock cycles</text>\n",
        (frame.left + frame.right) / 2.0,
        height - size.label_pt * 0.4,
        size.label_pt
    ));
    let y_label_x = size.label_pt;
    let y_label_y = (frame.top + frame.bottom) / 2.0;
    out.push_str(&format!(
        "<text x=\"{:.2}\" y=\"{:.2}\" font-size=\"{}\" text-anchor=\"middle\" transform=\"rotate(-90 {:.2} {:.2})\">Probability</text>\n",
        y_label_x, y_label_y, size.label_pt, y_label_x, y_label_y
    ));

    if !series.is_empty() {
        out.push_str(&legend(series, &frame, size));
    }

    out.push_str("</svg>\n");
    out
}

fn legend(series: &[PlotSeries], frame: &Frame, size: ChartSize) -> String {
    let row = size.tick_pt * 1.3;
    let sample_len = size.tick_pt * 1.8;
    let widest = series
        .iter()
        .map(|s| s.label().chars().count())
        .max()
        .unwrap_or(0) as f64;
    let box_width = sample_len + widest * size.tick_pt * 0.6 + 12.0;
    let box_height = row * series.len() as f64 + 6.0;
    let box_left = frame.right - box_width - 4.0;
    let box_top = frame.bottom - box_height - 4.0;

    let mut out = String::new();
    out.push_str(&format!(
        "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"2\" fill=\"white\" fill-opacity=\"0.8\" stroke=\"#cccccc\" stroke-width=\"0.8\"/>\n",
        box_left, box_top, box_width, box_height
    ));

    for (index, s) in series.iter().enumerate() {
        let y = box_top + 3.0 + row * (index as f64 + 0.5);
        out.push_str(&format!(
            "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"{}\" stroke-width=\"1\"/>\n",
            box_left + 4.0,
            y,
            box_left + 4.0 + sample_len,
            y,
            color(index)
        ));
        out.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" font-size=\"{}\">{}</text>\n",
            box_left + 8.0 + sample_len,
            y + size.tick_pt * 0.35,
            size.tick_pt,
            s.label()
        ));
    }
    out
}

fn grid_line(x1: f64, y1: f64, x2: f64, y2: f64) -> String {
    format!(
        "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"#b0b0b0\" stroke-width=\"0.8\"/>\n",
        x1, y1, x2, y2
    )
}

fn color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

/// Round `raw` up to 1, 2 or 5 times a power of ten.
fn nice_step(raw: f64) -> f64 {
    if raw <= 0.0 || !raw.is_finite() {
        return 1.0;
    }
    let magnitude = 10f64.powi(raw.log10().floor() as i32);
    let fraction = raw / magnitude;
    let nice = if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Sample, Timeline};
    use std::path::PathBuf;

    fn series(threshold: u32, samples: &[(u64, f64)]) -> PlotSeries {
        PlotSeries {
            threshold,
            source: PathBuf::from(format!("threshold_{}_.csv", threshold)),
            timeline: Timeline::from_samples(
                samples.iter().map(|(c, p)| Sample::new(*c, *p)).collect(),
            ),
        }
    }

    #[test]
    fn full_and_small_sizes() {
        let full = render_svg(&[], ChartSize::FULL);
        assert!(full.contains("width=\"237.60pt\""));

        let small = render_svg(&[], ChartSize::small());
        assert!(small.contains("width=\"162.00pt\""));
        assert!(small.contains("font-size=\"8\" text-anchor=\"middle\">Clock cycles<"));
    }

    #[test]
    fn one_curve_and_legend_entry_per_series() {
        let curves = [
            series(1, &[(0, 0.0), (100, 0.5), (200, 1.0)]),
            series(5, &[(0, 0.0), (200, 0.25)]),
        ];
        let svg = render_svg(&curves, ChartSize::FULL);

        assert_eq!(svg.matches("<polyline").count(), 2);
        assert!(svg.contains("stroke=\"#1f77b4\""));
        assert!(svg.contains("stroke=\"#ff7f0e\""));
        let first = svg.find(">≥ 1</text>").unwrap();
        let second = svg.find(">≥ 5</text>").unwrap();
        assert!(first < second);
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn empty_chart_has_no_curves() {
        let svg = render_svg(&[], ChartSize::FULL);
        assert_eq!(svg.matches("<polyline").count(), 0);
        assert!(svg.contains(">Probability</text>"));
    }

    #[test]
    fn nice_steps() {
        assert_eq!(nice_step(0.0), 1.0);
        assert_eq!(nice_step(1.0), 1.0);
        assert_eq!(nice_step(3.0), 5.0);
        assert_eq!(nice_step(60.0), 100.0);
        assert_eq!(nice_step(150.0), 200.0);
    }
}
