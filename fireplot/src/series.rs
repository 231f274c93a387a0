//! Turning a plot request into the two probability curves.
//!
//! This is plain computation over a borrowed table and does not know about
//! any UI, so it can be used from the window as well as from the command line.

use std::ops::RangeInclusive;

use alarm_table::{parse_int, Combination};

/// The false alarm counts that make up the x-axis.
pub const FALSE_ALARM_RANGE: RangeInclusive<i64> = 0..=50;

/// The two numbers a plot is requested for. `None` stands for an input that
/// could not be read as a number; it never matches any table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlotRequest {
    pub true_alarm: Option<i64>,
    pub dismissed_alarm: Option<i64>,
}

impl PlotRequest {
    pub fn new(true_alarm: i64, dismissed_alarm: i64) -> Self {
        Self {
            true_alarm: Some(true_alarm),
            dismissed_alarm: Some(dismissed_alarm),
        }
    }

    /// Read the request from the raw text of the two input fields.
    pub fn from_inputs(true_alarm: &str, dismissed_alarm: &str) -> Self {
        Self {
            true_alarm: parse_int(true_alarm),
            dismissed_alarm: parse_int(dismissed_alarm),
        }
    }

    pub fn build_series(&self, dataset: &[Combination]) -> PlotSeries {
        match (self.true_alarm, self.dismissed_alarm) {
            (Some(true_alarm), Some(dismissed_alarm)) => {
                build_series(true_alarm, dismissed_alarm, dataset)
            }
            _ => {
                log::debug!("request {:?} cannot match any combination", self);
                PlotSeries::default()
            }
        }
    }
}

/// Fire probabilities over the false alarm count.
///
/// `y_values1[i]` is the probability of a fire at `x_values[i]` false alarms,
/// `y_values2[i]` its complement. All three always have the same length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlotSeries {
    x_values: Vec<i64>,
    y_values1: Vec<f64>,
    y_values2: Vec<f64>,
}

impl PlotSeries {
    fn push(&mut self, false_alarm: i64, prob: f64) {
        self.x_values.push(false_alarm);
        self.y_values1.push(prob);
        self.y_values2.push(1.0 - prob);
    }

    pub fn x_values(&self) -> &[i64] {
        &self.x_values
    }

    pub fn y_values1(&self) -> &[f64] {
        &self.y_values1
    }

    pub fn y_values2(&self) -> &[f64] {
        &self.y_values2
    }

    pub fn len(&self) -> usize {
        self.x_values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x_values.is_empty()
    }
}

/// For every false alarm count in [`FALSE_ALARM_RANGE`], look up the first
/// combination with the given true and dismissed alarm counts and collect
/// its probability. Counts without a combination are left out.
pub fn build_series(true_alarm: i64, dismissed_alarm: i64, dataset: &[Combination]) -> PlotSeries {
    let mut series = PlotSeries::default();
    for false_alarm in FALSE_ALARM_RANGE {
        if let Some(comb) = dataset
            .iter()
            .find(|comb| comb.matches(false_alarm, true_alarm, dismissed_alarm))
        {
            series.push(false_alarm, comb.prob.value());
        }
    }
    log::debug!(
        "found {} points for true alarm = {}, dismissed alarm = {}",
        series.len(),
        true_alarm,
        dismissed_alarm
    );
    series
}
