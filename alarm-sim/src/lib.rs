#![warn(clippy::all, rust_2018_idioms)]

//! Generator for the table of fire probabilities.

mod network;
mod sweep;

pub use network::{BayesNet, Node, Observation};
pub use sweep::{
    alarm_network, alarm_observations, fire_probability, generate, SweepRanges, ALARM, FIRE,
    MESSAGED,
};
