use crate::series::PlotSeries;

pub const CHART_TITLE: &str = "Probability of Fire(1) and Fire(0)";
pub const X_AXIS_TITLE: &str = "False Alarm Count";
pub const Y_AXIS_TITLE: &str = "Probability";
pub const FIRE_TRACE_NAME: &str = "Fire(1)";
pub const NO_FIRE_TRACE_NAME: &str = "Fire(0)";

/// Axis ranges shown when nothing else is known: `[xmin, xmax, ymin, ymax]`.
pub const DEFAULT_BOUNDS: [f64; 4] = [0.0, 50.0, 0.0, 1.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceMode {
    Lines,
    Markers,
    LinesMarkers,
}

impl TraceMode {
    pub fn has_lines(&self) -> bool {
        matches!(self, TraceMode::Lines | TraceMode::LinesMarkers)
    }

    pub fn has_markers(&self) -> bool {
        matches!(self, TraceMode::Markers | TraceMode::LinesMarkers)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    pub name: String,
    pub mode: TraceMode,
    pub color: [u8; 3],
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl Trace {
    pub fn hex_color(&self) -> String {
        let [r, g, b] = self.color;
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Consecutive runs of finite points. A line is never drawn across a
    /// point whose value is missing.
    pub fn finite_runs(&self) -> Vec<Vec<[f64; 2]>> {
        let mut runs = Vec::new();
        let mut current = Vec::new();
        for (&x, &y) in self.x.iter().zip(&self.y) {
            if x.is_finite() && y.is_finite() {
                current.push([x, y]);
            } else if !current.is_empty() {
                runs.push(std::mem::take(&mut current));
            }
        }
        if !current.is_empty() {
            runs.push(current);
        }
        runs
    }

    pub fn finite_points(&self) -> Vec<[f64; 2]> {
        self.finite_runs().into_iter().flatten().collect()
    }
}

/// Everything a renderer needs to draw the probability chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    pub traces: Vec<Trace>,
}

impl ChartSpec {
    pub fn from_series(series: &PlotSeries) -> Self {
        let x: Vec<f64> = series.x_values().iter().map(|x| *x as f64).collect();
        let traces = vec![
            Trace {
                name: FIRE_TRACE_NAME.to_string(),
                mode: TraceMode::LinesMarkers,
                color: [0x1f, 0x77, 0xb4],
                x: x.clone(),
                y: series.y_values1().to_vec(),
            },
            Trace {
                name: NO_FIRE_TRACE_NAME.to_string(),
                mode: TraceMode::LinesMarkers,
                color: [0xff, 0x7f, 0x0e],
                x,
                y: series.y_values2().to_vec(),
            },
        ];
        Self {
            title: CHART_TITLE.to_string(),
            x_title: X_AXIS_TITLE.to_string(),
            y_title: Y_AXIS_TITLE.to_string(),
            traces,
        }
    }

    /// Bounds that show every finite point and at least [`DEFAULT_BOUNDS`].
    pub fn bounds(&self) -> [f64; 4] {
        let [mut xmin, mut xmax, mut ymin, mut ymax] = DEFAULT_BOUNDS;
        for [x, y] in self.traces.iter().flat_map(Trace::finite_points) {
            xmin = xmin.min(x);
            xmax = xmax.max(x);
            ymin = ymin.min(y);
            ymax = ymax.max(y);
        }
        [xmin, xmax, ymin, ymax]
    }
}

/// A target the chart can be drawn on.
pub trait Render {
    fn render(&mut self, chart: &ChartSpec) -> Result<(), String>;
}

/// Describe `series` as a chart and hand it to `renderer`.
pub fn render(series: &PlotSeries, renderer: &mut impl Render) -> Result<(), String> {
    let chart = ChartSpec::from_series(series);
    log::debug!(
        "rendering chart with {} points per trace",
        series.len()
    );
    renderer.render(&chart)
}

#[cfg(test)]
mod tests {
    use alarm_table::{Combination, Prob};

    use super::*;
    use crate::series::build_series;

    #[derive(Default)]
    struct Recorder {
        charts: Vec<ChartSpec>,
    }

    impl Render for Recorder {
        fn render(&mut self, chart: &ChartSpec) -> Result<(), String> {
            self.charts.push(chart.clone());
            Ok(())
        }
    }

    fn series() -> PlotSeries {
        build_series(
            2,
            3,
            &[
                Combination::new(10, 2, 3, Prob::Number(0.75)),
                Combination::new(12, 2, 3, Prob::from("oops")),
                Combination::new(14, 2, 3, Prob::Number(0.5)),
            ],
        )
    }

    #[test]
    fn test_chart_layout() {
        let chart = ChartSpec::from_series(&series());
        assert_eq!(chart.title, "Probability of Fire(1) and Fire(0)");
        assert_eq!(chart.x_title, "False Alarm Count");
        assert_eq!(chart.y_title, "Probability");
        let names: Vec<_> = chart.traces.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["Fire(1)", "Fire(0)"]);
        for trace in chart.traces.iter() {
            assert_eq!(trace.mode, TraceMode::LinesMarkers);
            assert!(trace.mode.has_lines() && trace.mode.has_markers());
            assert_eq!(trace.x, vec![10.0, 12.0, 14.0]);
        }
        assert_eq!(chart.traces[0].y[0], 0.75);
        assert_eq!(chart.traces[1].y[0], 0.25);
    }

    #[test]
    fn test_render_hands_chart_to_renderer() {
        let mut recorder = Recorder::default();
        render(&series(), &mut recorder).unwrap();
        render(&PlotSeries::default(), &mut recorder).unwrap();
        assert_eq!(recorder.charts.len(), 2);
        assert!(recorder.charts[1].traces.iter().all(|t| t.x.is_empty()));
        assert_eq!(recorder.charts[1].traces.len(), 2);
    }

    #[test]
    fn test_finite_runs_split_at_nan() {
        let chart = ChartSpec::from_series(&series());
        let runs = chart.traces[0].finite_runs();
        assert_eq!(runs, vec![vec![[10.0, 0.75]], vec![[14.0, 0.5]]]);
    }

    #[test]
    fn test_bounds() {
        let chart = ChartSpec::from_series(&PlotSeries::default());
        assert_eq!(chart.bounds(), DEFAULT_BOUNDS);

        let wide = build_series(1, 1, &[Combination::new(3, 1, 1, Prob::Number(1.5))]);
        let [_, _, ymin, ymax] = ChartSpec::from_series(&wide).bounds();
        assert_eq!(ymin, -0.5);
        assert_eq!(ymax, 1.5);
    }

    #[test]
    fn test_hex_color() {
        let chart = ChartSpec::from_series(&series());
        assert_eq!(chart.traces[0].hex_color(), "#1f77b4");
        assert_eq!(chart.traces[1].hex_color(), "#ff7f0e");
    }
}
