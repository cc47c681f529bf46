use std::path::Path;

use anyhow::Result;
use itertools_num::linspace;
use plotly::common::{Line, Marker, Mode};
use plotly::layout::{Axis, Layout};
use plotly::{ImageFormat, Plot, Scatter};

use crate::error::ReportError;
use crate::stats::linear_fit;

/// Marker color of the statewide population layer.
const POPULATION_COLOR: &str = "rgba(120, 120, 120, 0.45)";
/// Color of the fitted trend line.
const TREND_COLOR: &str = "rgba(31, 119, 180, 1.0)";
/// Pixel dimensions of an exported page.
const PAGE_WIDTH: usize = 1100;
const PAGE_HEIGHT: usize = 700;

/// Everything needed to draw one district page.
pub struct ScatterPage<'a> {
    pub population_x: &'a [f64],
    pub population_y: &'a [f64],
    pub population_label: &'a str,
    pub subset_x: &'a [f64],
    pub subset_y: &'a [f64],
    pub subset_labels: &'a [String],
    pub subset_label: &'a str,
    pub title: &'a str,
    pub x_label: &'a str,
    pub y_label: &'a str,
    pub highlight_color: &'a str,
    pub show_subset: bool,
    pub show_legend: bool,
    pub show_trend: bool,
}

/// Build the scatter for one page: the full population in a muted color, an
/// optional least-squares trend line over it, and the page's schools
/// highlighted on top with their names attached to the markers.
pub fn scatter_with_highlight(page: &ScatterPage) -> Result<Plot, String> {
    // Assert that each trace's arrays agree in length
    assert_eq!(
        page.population_x.len(),
        page.population_y.len(),
        "Population x and y must have the same length"
    );
    assert_eq!(
        page.subset_x.len(),
        page.subset_y.len(),
        "Subset x and y must have the same length"
    );
    assert_eq!(
        page.subset_y.len(),
        page.subset_labels.len(),
        "Subset points and labels must have the same length"
    );

    let mut plot = Plot::new();

    plot.add_trace(
        Scatter::new(page.population_x.to_vec(), page.population_y.to_vec())
            .mode(Mode::Markers)
            .name(page.population_label)
            .marker(Marker::new().color(POPULATION_COLOR).size(6)),
    );

    if page.show_trend {
        if let Some((slope, intercept)) = linear_fit(page.population_x, page.population_y) {
            let x_min = page.population_x.iter().cloned().fold(f64::INFINITY, f64::min);
            let x_max = page
                .population_x
                .iter()
                .cloned()
                .fold(f64::NEG_INFINITY, f64::max);
            let xs: Vec<f64> = linspace(x_min, x_max, 100).collect();
            let ys: Vec<f64> = xs.iter().map(|&x| slope * x + intercept).collect();
            plot.add_trace(
                Scatter::new(xs, ys)
                    .mode(Mode::Lines)
                    .name("Trend")
                    .line(Line::new().color(TREND_COLOR)),
            );
        }
    }

    if page.show_subset {
        plot.add_trace(
            Scatter::new(page.subset_x.to_vec(), page.subset_y.to_vec())
                .mode(Mode::Markers)
                .name(page.subset_label)
                .text_array(page.subset_labels.to_vec())
                .marker(Marker::new().color(page.highlight_color.to_string()).size(10)),
        );
    }

    let layout = Layout::new()
        .title(page.title)
        .x_axis(Axis::new().title(page.x_label))
        .y_axis(Axis::new().title(page.y_label))
        .show_legend(page.show_legend);
    plot.set_layout(layout);

    Ok(plot)
}

/// Write the page to `path` as a PNG, or open it in the interactive viewer
/// when `save` is false.
pub fn render(plot: &Plot, path: &Path, save: bool) -> Result<()> {
    if !save {
        plot.show();
        return Ok(());
    }

    let _ = plot.write_image(path, ImageFormat::PNG, PAGE_WIDTH, PAGE_HEIGHT, 1.0);
    if !path.is_file() {
        return Err(ReportError::Plotting {
            path: path.to_path_buf(),
            detail: "static export produced no file".to_string(),
        }
        .into());
    }
    Ok(())
}
