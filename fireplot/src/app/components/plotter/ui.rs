use egui::Color32;
use egui_plot::{Legend, Line, Plot, PlotBounds, PlotPoints, Points};

impl super::Plotter {
    pub fn show(&mut self, ui: &mut egui::Ui, linewidth: f32, marker_radius: f32) {
        let Some(chart) = &self.chart else {
            ui.centered_and_justified(|ui| {
                ui.label("Enter the alarm counts and press \"Plot\".");
            });
            return;
        };

        ui.vertical_centered(|ui| ui.heading(chart.title.as_str()));

        let request_bounds = self.request_plot_bounds.take();
        let response = Plot::new("fire_plot")
            .legend(Legend::default())
            .x_axis_label(chart.x_title.as_str())
            .y_axis_label(chart.y_title.as_str())
            .show(ui, |plot_ui| {
                if let Some([xmin, xmax, ymin, ymax]) = request_bounds {
                    plot_ui.set_plot_bounds(PlotBounds::from_min_max([xmin, ymin], [xmax, ymax]));
                }
                for trace in chart.traces.iter() {
                    let [r, g, b] = trace.color;
                    let color = Color32::from_rgb(r, g, b);
                    if trace.mode.has_lines() {
                        // Runs share a name, so the legend shows a single entry.
                        for run in trace.finite_runs() {
                            plot_ui.line(
                                Line::new(PlotPoints::from(run))
                                    .color(color)
                                    .width(linewidth)
                                    .name(&trace.name),
                            );
                        }
                    }
                    if trace.mode.has_markers() {
                        plot_ui.points(
                            Points::new(PlotPoints::from(trace.finite_points()))
                                .color(color)
                                .radius(marker_radius)
                                .name(&trace.name),
                        );
                    }
                }
                let [xmin, ymin] = plot_ui.plot_bounds().min();
                let [xmax, ymax] = plot_ui.plot_bounds().max();
                [xmin, xmax, ymin, ymax]
            });
        self.current_plot_bounds = response.inner;
    }
}
