use std::io::Write;

use crate::combination::{Combination, Prob};

/// Write `records` as object literals, one per line, in the format the
/// lexer reads.
pub fn write_literal<W: Write>(records: &[Combination], mut writer: W) -> std::io::Result<()> {
    for comb in records {
        write!(
            writer,
            "{{ falseAlarm: {}, trueAlarm: {}, dismissedAlarm: {}, prob: ",
            comb.false_alarm, comb.true_alarm, comb.dismissed_alarm
        )?;
        match &comb.prob {
            Prob::Number(val) if val.is_nan() => write!(writer, "NaN")?,
            Prob::Number(val) if val.is_infinite() => {
                let sign = if *val < 0.0 { "-" } else { "" };
                write!(writer, "{sign}Infinity")?
            }
            Prob::Number(val) => write!(writer, "{val:?}")?,
            Prob::Text(text) => write!(writer, "\"{}\"", escape(text))?,
        }
        writeln!(writer, " }},")?;
    }
    writer.flush()
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + 2);
    for chr in text.chars() {
        match chr {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\t' => escaped.push_str("\\t"),
            c => escaped.push(c),
        }
    }
    escaped
}

pub fn write_json<W: Write>(records: &[Combination], writer: W) -> serde_json::Result<()> {
    serde_json::to_writer_pretty(writer, records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_literal_lines() {
        let records = vec![
            Combination::new(1, 2, 3, Prob::Number(0.5)),
            Combination::new(4, 5, 6, Prob::from("0.25")),
        ];
        let mut buf = Vec::new();
        write_literal(&records, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "{ falseAlarm: 1, trueAlarm: 2, dismissedAlarm: 3, prob: 0.5 },",
                "{ falseAlarm: 4, trueAlarm: 5, dismissedAlarm: 6, prob: \"0.25\" },",
            ]
        );
    }

    #[test]
    fn test_write_literal_keeps_float_notation() {
        let records = vec![Combination::new(0, 1, 1, Prob::Number(1.0))];
        let mut buf = Vec::new();
        write_literal(&records, &mut buf).unwrap();
        assert!(String::from_utf8(buf).unwrap().contains("prob: 1.0 }"));
    }
}
