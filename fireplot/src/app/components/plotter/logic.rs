use std::path::Path;

use crate::{
    chart::{ChartSpec, Render},
    export::SvgRenderer,
    FirePlotApp,
};

impl Render for super::Plotter {
    fn render(&mut self, chart: &ChartSpec) -> Result<(), String> {
        // Bounds restored from a session win over the data bounds.
        if self.request_plot_bounds.is_none() {
            self.request_plot_bounds = Some(chart.bounds());
        }
        self.chart = Some(chart.clone());
        Ok(())
    }
}

impl super::Plotter {
    pub fn chart(&self) -> Option<&ChartSpec> {
        self.chart.as_ref()
    }

    pub fn apply_bounds(&mut self, bounds: [f64; 4]) {
        self.request_plot_bounds = Some(bounds);
    }

    pub fn get_current_plot_bounds(&self) -> [f64; 4] {
        self.current_plot_bounds
    }
}

/// Write the chart currently shown, within the bounds currently shown.
pub fn save_svg(app: &FirePlotApp, path: &Path) -> Result<(), String> {
    let Some(chart) = app.plotter.chart() else {
        return Err("nothing has been plotted yet".to_string());
    };
    let config = &app.config;
    SvgRenderer::new(path)
        .with_size(config.svg_width, config.svg_height)
        .with_linewidth(config.plot_linewidth)
        .with_marker_radius(config.marker_radius)
        .with_bounds(app.plotter.get_current_plot_bounds())
        .render(chart)
}

#[cfg(test)]
mod tests {
    use alarm_table::{Combination, Prob};

    use super::*;
    use crate::{app::components::Plotter, chart, series::build_series};

    #[test]
    fn test_render_keeps_requested_bounds() {
        let series = build_series(1, 1, &[Combination::new(4, 1, 1, Prob::Number(0.4))]);
        let mut plotter = Plotter::new();
        plotter.apply_bounds([0.0, 10.0, 0.0, 0.5]);
        chart::render(&series, &mut plotter).unwrap();
        assert_eq!(plotter.request_plot_bounds, Some([0.0, 10.0, 0.0, 0.5]));
        assert_eq!(plotter.chart().map(|c| c.traces.len()), Some(2));
    }

    #[test]
    fn test_render_requests_data_bounds() {
        let mut plotter = Plotter::new();
        chart::render(&Default::default(), &mut plotter).unwrap();
        assert_eq!(plotter.request_plot_bounds, Some(chart::DEFAULT_BOUNDS));
    }
}
