#![warn(clippy::all, rust_2018_idioms)]

//! Plot the probability of a fire against the number of false alarms, for a
//! given number of true and dismissed alarms, from a precomputed table.

mod app;
mod backend_state;
pub mod chart;
pub mod export;
pub mod series;

pub use app::config::{Config, CONFIG_FILE_NAME};
pub use app::FirePlotApp;
pub use backend_state::{BackendAppState, Dataset, DatasetSource};
pub use chart::{ChartSpec, Render};
pub use export::SvgRenderer;
pub use series::{build_series, PlotRequest, PlotSeries};
