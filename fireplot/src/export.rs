//! Export of the chart as an SVG file.

use std::{io::Write, path::PathBuf};

use app_core::string_error::ErrorStringExt;
use svg_export::{Axis, Figure, LinePlot};

use crate::chart::{ChartSpec, Render};

#[derive(Debug, Clone)]
pub struct SvgRenderer {
    path: PathBuf,
    width: u64,
    height: u64,
    linewidth: f64,
    marker_radius: f64,
    bounds: Option<[f64; 4]>,
}

impl SvgRenderer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            width: 800,
            height: 600,
            linewidth: 2.0,
            marker_radius: 3.0,
            bounds: None,
        }
    }

    pub fn with_size(mut self, width: u64, height: u64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_linewidth(mut self, linewidth: f64) -> Self {
        self.linewidth = linewidth;
        self
    }

    pub fn with_marker_radius(mut self, radius: f64) -> Self {
        self.marker_radius = radius;
        self
    }

    /// Fix the axis ranges (`[xmin, xmax, ymin, ymax]`) instead of deriving
    /// them from the data.
    pub fn with_bounds(mut self, bounds: [f64; 4]) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn to_svg(&self, chart: &ChartSpec) -> String {
        let [xmin, xmax, ymin, ymax] = self.bounds.unwrap_or_else(|| chart.bounds());

        let mut fig = Figure::empty(self.width, self.height).with_title(&chart.title);
        let mut ax = Axis::default()
            .with_xlim(xmin, xmax)
            .with_ylim(ymin, ymax)
            .with_xlabel(&chart.x_title)
            .with_ylabel(&chart.y_title)
            .with_legend(true);

        for trace in chart.traces.iter() {
            let mut line = LinePlot::new(&trace.x, &trace.y)
                .with_color(&trace.hex_color())
                .with_name(&trace.name);
            line = if trace.mode.has_lines() {
                line.with_linewidth(self.linewidth)
            } else {
                line.with_linewidth(0.0)
            };
            if trace.mode.has_markers() {
                line = line.with_markers(self.marker_radius);
            }
            line.insert_into(&mut ax);
        }
        ax.insert_into(&mut fig);
        fig.render()
    }
}

impl Render for SvgRenderer {
    fn render(&mut self, chart: &ChartSpec) -> Result<(), String> {
        log::debug!("requested to save svg at '{:?}'", self.path);
        let mut file =
            std::fs::File::create(&self.path).err_to_string("unable to create file for svg")?;
        file.write_all(self.to_svg(chart).as_bytes())
            .err_to_string("could not write svg file")?;
        log::info!("saved plot to {:?}", self.path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alarm_table::{Combination, Prob};

    use super::*;
    use crate::{chart, series::build_series};

    fn dataset() -> Vec<Combination> {
        (0..=50)
            .map(|f| Combination::new(f, 2, 3, Prob::Number(2.0 / (2.0 + f as f64))))
            .collect()
    }

    #[test]
    fn test_svg_contains_chart_texts() {
        let chart = ChartSpec::from_series(&build_series(2, 3, &dataset()));
        let raw = SvgRenderer::new("unused.svg").to_svg(&chart);
        for text in [
            "Probability of Fire(1) and Fire(0)",
            "False Alarm Count",
            "Probability",
            "Fire(1)",
            "Fire(0)",
        ] {
            assert!(raw.contains(text), "missing '{text}'");
        }
        assert!(raw.contains("#1f77b4"));
        assert!(raw.contains("<circle"));
        assert!(raw.contains("<polyline"));
    }

    #[test]
    fn test_render_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plot.svg");
        let mut renderer = SvgRenderer::new(&path)
            .with_size(400, 300)
            .with_bounds([0.0, 50.0, 0.0, 1.0]);
        chart::render(&build_series(2, 3, &dataset()), &mut renderer).unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.starts_with("<svg height=\"300\""));
    }

    #[test]
    fn test_render_empty_series() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.svg");
        let mut renderer = SvgRenderer::new(&path);
        chart::render(&build_series(9, 9, &dataset()), &mut renderer).unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("False Alarm Count"));
        assert!(!raw.contains("<circle"));
    }

    #[test]
    fn test_render_to_missing_directory_fails() {
        let mut renderer = SvgRenderer::new("/no/such/dir/plot.svg");
        let chart = ChartSpec::from_series(&build_series(2, 3, &dataset()));
        let err = renderer.render(&chart).unwrap_err();
        assert!(err.starts_with("unable to create file for svg"));
    }
}
