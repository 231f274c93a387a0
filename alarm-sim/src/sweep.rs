//! The alarm model behind the combinations table.
//!
//! Three binary variables: `F` (there is a fire), `A` (an alarm went off) and
//! `M` (the alarm was passed on instead of being dismissed), with edges
//! F → A, F → M and A → M. Every table row is the fire probability after
//! fitting the model to a history of true, false and dismissed alarms.

use std::ops::RangeInclusive;

use alarm_table::{Combination, Prob};

use crate::network::{BayesNet, Node, Observation};

pub const FIRE: usize = 0;
pub const ALARM: usize = 1;
pub const MESSAGED: usize = 2;

pub fn alarm_network() -> BayesNet {
    BayesNet {
        nodes: vec![
            Node::new("F", vec![]),
            Node::new("A", vec![FIRE]),
            Node::new("M", vec![FIRE, ALARM]),
        ],
    }
}

/// The alarm history as observations of `(F, A, M)`.
pub fn alarm_observations(true_alarm: u32, false_alarm: u32, dismissed_alarm: u32) -> Vec<Observation> {
    [
        ([true, true, true], true_alarm),
        ([false, true, true], false_alarm),
        ([false, true, false], dismissed_alarm),
    ]
    .into_iter()
    .filter(|(_, count)| *count > 0)
    .map(|(states, count)| Observation {
        states: states.to_vec(),
        count: count as u64,
    })
    .collect()
}

/// `P(F = 1 | A = 1, M = 1)` after fitting the alarm model to the given
/// history, or `None` if an alarm that was passed on never happened in it.
pub fn fire_probability(true_alarm: u32, false_alarm: u32, dismissed_alarm: u32) -> Option<f64> {
    let mut net = alarm_network();
    net.fit(&alarm_observations(true_alarm, false_alarm, dismissed_alarm));
    net.query(FIRE, &[(ALARM, true), (MESSAGED, true)])
}

/// The alarm counts to generate table rows for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepRanges {
    pub true_alarm: RangeInclusive<u32>,
    pub false_alarm: RangeInclusive<u32>,
    pub dismissed_alarm: RangeInclusive<u32>,
}

impl Default for SweepRanges {
    fn default() -> Self {
        Self {
            true_alarm: 1..=10,
            false_alarm: 1..=50,
            dismissed_alarm: 1..=50,
        }
    }
}

impl SweepRanges {
    pub fn len(&self) -> usize {
        self.true_alarm.clone().count()
            * self.false_alarm.clone().count()
            * self.dismissed_alarm.clone().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Compute one table row per combination of alarm counts in `ranges`.
/// Combinations without a defined probability are left out.
pub fn generate(ranges: &SweepRanges) -> Vec<Combination> {
    log::info!("generating {} combinations", ranges.len());
    let mut records = Vec::with_capacity(ranges.len());
    for true_alarm in ranges.true_alarm.clone() {
        for false_alarm in ranges.false_alarm.clone() {
            for dismissed_alarm in ranges.dismissed_alarm.clone() {
                match fire_probability(true_alarm, false_alarm, dismissed_alarm) {
                    Some(prob) => records.push(Combination::new(
                        false_alarm.into(),
                        true_alarm.into(),
                        dismissed_alarm.into(),
                        Prob::Number(prob),
                    )),
                    None => log::warn!(
                        "no fire probability for true = {}, false = {}, dismissed = {}",
                        true_alarm,
                        false_alarm,
                        dismissed_alarm
                    ),
                }
            }
        }
        log::debug!("done with true alarm count {}", true_alarm);
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-12, "{a} != {b}");
    }

    #[test]
    fn test_network_matches_named_construction() {
        let named = BayesNet::new(&["F", "A", "M"], &[("F", "A"), ("F", "M"), ("A", "M")]).unwrap();
        let fixed = alarm_network();
        for (a, b) in named.nodes().iter().zip(fixed.nodes()) {
            assert_eq!(a.name, b.name);
            assert_eq!(a.parents, b.parents);
        }
    }

    #[test]
    fn test_fire_probability_single_alarm_each() {
        assert_close(fire_probability(1, 1, 1).unwrap(), 0.5);
    }

    #[test]
    fn test_fire_probability_ignores_dismissed_alarms() {
        // Passed on alarms are only true or false alarms, so the posterior is
        // the share of true alarms among them.
        assert_close(fire_probability(2, 6, 10).unwrap(), 0.25);
        assert_close(fire_probability(2, 6, 1).unwrap(), 0.25);
        assert_close(fire_probability(10, 50, 50).unwrap(), 10.0 / 60.0);
    }

    #[test]
    fn test_fire_probability_without_false_alarms() {
        assert_close(fire_probability(3, 0, 4).unwrap(), 1.0);
    }

    #[test]
    fn test_fire_probability_undefined() {
        assert_eq!(fire_probability(0, 0, 5), None);
    }

    #[test]
    fn test_generate_small_sweep() {
        init();
        let ranges = SweepRanges {
            true_alarm: 1..=2,
            false_alarm: 1..=3,
            dismissed_alarm: 1..=2,
        };
        let records = generate(&ranges);
        assert_eq!(records.len(), ranges.len());
        assert_eq!(records.len(), 12);
        // Same nesting as the sweep: true alarms outermost, dismissed innermost.
        assert!(records[0].matches(1, 1, 1));
        assert!(records[1].matches(1, 1, 2));
        assert!(records[2].matches(2, 1, 1));
        for comb in records.iter() {
            let expected = comb.true_alarm as f64 / (comb.true_alarm + comb.false_alarm) as f64;
            assert_close(comb.prob.value(), expected);
        }
    }

    #[test]
    fn test_generate_skips_undefined() {
        init();
        let ranges = SweepRanges {
            true_alarm: 0..=0,
            false_alarm: 0..=1,
            dismissed_alarm: 1..=1,
        };
        let records = generate(&ranges);
        assert_eq!(records.len(), 1);
        assert!(records[0].matches(1, 0, 1));
        assert_close(records[0].prob.value(), 0.0);
    }

    #[test]
    fn test_default_sweep_size() {
        assert_eq!(SweepRanges::default().len(), 25_000);
    }
}
