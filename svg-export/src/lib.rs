#![warn(clippy::all, rust_2018_idioms)]

//! Minimal SVG plotting: a figure with a title, one or more axes, and line
//! plots with optional point markers.

mod plotting;
pub mod svg;

pub use plotting::{element_opts, Axis, Figure, LinePlot, Ticks};
