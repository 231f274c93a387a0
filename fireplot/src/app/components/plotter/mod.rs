mod logic;
mod ui;

pub use logic::save_svg;

use crate::chart::{ChartSpec, DEFAULT_BOUNDS};

/// Shows the most recently rendered chart.
pub struct Plotter {
    chart: Option<ChartSpec>,
    /// `[xmin, xmax, ymin, ymax]` as shown in the last frame.
    current_plot_bounds: [f64; 4],
    request_plot_bounds: Option<[f64; 4]>,
}

impl Plotter {
    pub fn new() -> Self {
        Self {
            chart: None,
            current_plot_bounds: DEFAULT_BOUNDS,
            request_plot_bounds: None,
        }
    }
}

impl Default for Plotter {
    fn default() -> Self {
        Self::new()
    }
}
