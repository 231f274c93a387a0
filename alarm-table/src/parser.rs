use std::iter::Peekable;

use crate::{
    combination::{Combination, Prob},
    error::{Result, TableError},
    lexer::{Lexer, Spanned, Token},
};

/// Parse all object literals found in `raw_input` into combinations.
///
/// Everything between records (a surrounding `let combinations = [ ... ];`,
/// separating commas) is skipped.
pub(crate) fn parse_literal(raw_input: &str) -> Result<Vec<Combination>> {
    let tokens = Lexer::new(raw_input).walk()?;
    let mut iter = tokens.iter().peekable();
    let mut records = Vec::new();

    while let Some(spanned) = iter.next() {
        match spanned.token {
            Token::OpenBrace => records.push(parse_record(spanned.line, &mut iter)?),
            Token::CloseBrace => {
                return Err(TableError::malformed(spanned.line, "unmatched '}'"));
            }
            _ => (),
        }
    }
    log::debug!("parsed {} records", records.len());
    Ok(records)
}

/// Fields of a record as they are collected. Keys may come in any order.
#[derive(Default)]
struct PartialRecord {
    false_alarm: Option<i64>,
    true_alarm: Option<i64>,
    dismissed_alarm: Option<i64>,
    prob: Option<Prob>,
}

fn parse_record<'t, 'a: 't, I>(open_line: usize, iter: &mut Peekable<I>) -> Result<Combination>
where
    I: Iterator<Item = &'t Spanned<'a>>,
{
    let mut record = PartialRecord::default();
    loop {
        let Some(spanned) = iter.next() else {
            return Err(TableError::malformed(open_line, "record is never closed"));
        };
        let key = match &spanned.token {
            Token::CloseBrace => break,
            Token::Ident(key) => *key,
            Token::Str(key) => key.as_ref(),
            other => {
                return Err(TableError::malformed(
                    spanned.line,
                    format!("expected a key, found {other:?}"),
                ))
            }
        };

        match iter.next() {
            Some(Spanned {
                token: Token::Colon,
                ..
            }) => (),
            _ => {
                return Err(TableError::malformed(
                    spanned.line,
                    format!("expected ':' after key '{key}'"),
                ))
            }
        }

        let Some(value) = iter.next() else {
            return Err(TableError::malformed(
                spanned.line,
                format!("missing value for key '{key}'"),
            ));
        };
        record.set(key, value)?;

        match iter.next() {
            Some(Spanned {
                token: Token::Comma,
                ..
            }) => (),
            Some(Spanned {
                token: Token::CloseBrace,
                ..
            }) => break,
            Some(other) => {
                return Err(TableError::malformed(
                    other.line,
                    format!("expected ',' or '}}', found {:?}", other.token),
                ))
            }
            None => return Err(TableError::malformed(open_line, "record is never closed")),
        }
    }
    record.finish(open_line)
}

impl PartialRecord {
    fn set(&mut self, key: &str, value: &Spanned<'_>) -> Result<()> {
        let line = value.line;
        let replaced = match key {
            "falseAlarm" => self.false_alarm.replace(integer(key, value)?).is_some(),
            "trueAlarm" => self.true_alarm.replace(integer(key, value)?).is_some(),
            "dismissedAlarm" | "discardedAlarm" => {
                self.dismissed_alarm.replace(integer(key, value)?).is_some()
            }
            "prob" => self.prob.replace(probability(value)?).is_some(),
            _ => {
                log::warn!("ignoring unknown key '{}' in line {}", key, line);
                false
            }
        };
        if replaced {
            log::warn!("key '{}' given twice in line {}, keeping the last", key, line);
        }
        Ok(())
    }

    fn finish(self, line: usize) -> Result<Combination> {
        let missing = |key: &str| TableError::malformed(line, format!("record lacks '{key}'"));
        Ok(Combination {
            false_alarm: self.false_alarm.ok_or_else(|| missing("falseAlarm"))?,
            true_alarm: self.true_alarm.ok_or_else(|| missing("trueAlarm"))?,
            dismissed_alarm: self.dismissed_alarm.ok_or_else(|| missing("dismissedAlarm"))?,
            prob: self.prob.ok_or_else(|| missing("prob"))?,
        })
    }
}

fn integer(key: &str, value: &Spanned<'_>) -> Result<i64> {
    match &value.token {
        Token::Integer(val) => Ok(*val),
        // Written by tools that do not distinguish integers from floats.
        Token::Float(val) if val.fract() == 0.0 && val.abs() < i64::MAX as f64 => {
            Ok(*val as i64)
        }
        other => Err(TableError::malformed(
            value.line,
            format!("expected an integer for '{key}', found {other:?}"),
        )),
    }
}

fn probability(value: &Spanned<'_>) -> Result<Prob> {
    match &value.token {
        Token::Integer(val) => Ok(Prob::Number(*val as f64)),
        Token::Float(val) => Ok(Prob::Number(*val)),
        Token::Str(text) => Ok(Prob::Text(text.to_string())),
        Token::Ident("NaN") => Ok(Prob::Number(f64::NAN)),
        Token::Ident("Infinity" | "+Infinity") => Ok(Prob::Number(f64::INFINITY)),
        Token::Ident("-Infinity") => Ok(Prob::Number(f64::NEG_INFINITY)),
        other => Err(TableError::malformed(
            value.line,
            format!("expected a number or string for 'prob', found {other:?}"),
        )),
    }
}
