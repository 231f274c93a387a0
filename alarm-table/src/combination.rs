use serde::{de, Deserialize, Deserializer, Serialize};

use crate::number::parse_float;

/// One row of the precomputed table: the probability of a fire given how
/// many true, false and dismissed alarms were observed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Combination {
    #[serde(deserialize_with = "count")]
    pub false_alarm: i64,
    #[serde(deserialize_with = "count")]
    pub true_alarm: i64,
    // The generator writes `discardedAlarm`, the UI reads `dismissedAlarm`.
    #[serde(alias = "discardedAlarm", deserialize_with = "count")]
    pub dismissed_alarm: i64,
    pub prob: Prob,
}

/// The probability as stored in the table, either as a number or as the
/// decimal text it was written as.
///
/// JSON has no NaN or infinity, so those are written as the text `"NaN"`,
/// `"Infinity"` and `"-Infinity"` and read back as numbers. `null` reads as
/// NaN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawProb", into = "RawProb")]
pub enum Prob {
    Number(f64),
    Text(String),
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawProb {
    Number(f64),
    Text(String),
    Null,
}

impl From<RawProb> for Prob {
    fn from(raw: RawProb) -> Self {
        match raw {
            RawProb::Number(val) => Prob::Number(val),
            RawProb::Text(text) => match text.as_str() {
                "NaN" => Prob::Number(f64::NAN),
                "Infinity" | "+Infinity" => Prob::Number(f64::INFINITY),
                "-Infinity" => Prob::Number(f64::NEG_INFINITY),
                _ => Prob::Text(text),
            },
            RawProb::Null => Prob::Number(f64::NAN),
        }
    }
}

impl From<Prob> for RawProb {
    fn from(prob: Prob) -> Self {
        match prob {
            Prob::Number(val) if val.is_nan() => RawProb::Text("NaN".to_string()),
            Prob::Number(val) if val == f64::INFINITY => RawProb::Text("Infinity".to_string()),
            Prob::Number(val) if val == f64::NEG_INFINITY => {
                RawProb::Text("-Infinity".to_string())
            }
            Prob::Number(val) => RawProb::Number(val),
            Prob::Text(text) => RawProb::Text(text),
        }
    }
}

/// Counts may be written as integral floats (`4.0`) by tools that do not
/// distinguish integers from floats.
fn count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawCount {
        Integer(i64),
        Float(f64),
    }

    match RawCount::deserialize(deserializer)? {
        RawCount::Integer(val) => Ok(val),
        RawCount::Float(val) if val.fract() == 0.0 && val.abs() < i64::MAX as f64 => {
            Ok(val as i64)
        }
        RawCount::Float(val) => Err(de::Error::custom(format!(
            "expected an integer count, found {val}"
        ))),
    }
}

impl Combination {
    pub fn new(false_alarm: i64, true_alarm: i64, dismissed_alarm: i64, prob: Prob) -> Self {
        Self {
            false_alarm,
            true_alarm,
            dismissed_alarm,
            prob,
        }
    }

    pub fn matches(&self, false_alarm: i64, true_alarm: i64, dismissed_alarm: i64) -> bool {
        self.false_alarm == false_alarm
            && self.true_alarm == true_alarm
            && self.dismissed_alarm == dismissed_alarm
    }
}

impl Prob {
    /// The probability as a float. Text that does not start with a number
    /// yields NaN.
    pub fn value(&self) -> f64 {
        match self {
            Prob::Number(val) => *val,
            Prob::Text(text) => parse_float(text),
        }
    }
}

impl From<f64> for Prob {
    fn from(val: f64) -> Self {
        Prob::Number(val)
    }
}

impl From<&str> for Prob {
    fn from(text: &str) -> Self {
        Prob::Text(text.to_owned())
    }
}
