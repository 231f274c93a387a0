#![warn(clippy::all, rust_2018_idioms)]

//! Reading and writing tables of precomputed fire probabilities.
//!
//! Two formats are understood: a list of object literals as written by the
//! table generator (see [`write_literal`]) and a JSON array of the same
//! records.

mod combination;
mod error;
mod lexer;
mod number;
mod parser;
mod writer;

use std::path::Path;

pub use combination::{Combination, Prob};
pub use error::{Result, TableError};
pub use number::{parse_float, parse_int};
pub use writer::{write_json, write_literal};

/// A combinations table as read from a file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    records: Vec<Combination>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Literal,
    Json,
}

impl TableFormat {
    /// `.json` files are read as JSON, everything else as object literals.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => TableFormat::Json,
            _ => TableFormat::Literal,
        }
    }
}

impl Table {
    pub fn new(records: Vec<Combination>) -> Self {
        Self { records }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let raw_input = std::fs::read_to_string(path).map_err(|source| TableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = match TableFormat::from_path(path) {
            TableFormat::Json => Self::from_json_str(&raw_input)?,
            TableFormat::Literal => Self::from_str_literal(&raw_input)?,
        };
        log::info!("read {} combinations from {:?}", table.len(), path);
        Ok(table)
    }

    pub fn from_str_literal(raw_input: &str) -> Result<Self> {
        parser::parse_literal(raw_input).map(Self::new)
    }

    pub fn from_json_str(raw_input: &str) -> Result<Self> {
        Ok(Self::new(serde_json::from_str(raw_input)?))
    }

    /// Write the table to `path`, choosing the format by extension.
    pub fn write_path(&self, path: &Path) -> Result<()> {
        let io_err = |source| TableError::Io {
            path: path.to_path_buf(),
            source,
        };
        let file = std::io::BufWriter::new(std::fs::File::create(path).map_err(io_err)?);
        match TableFormat::from_path(path) {
            TableFormat::Json => write_json(&self.records, file)?,
            TableFormat::Literal => write_literal(&self.records, file).map_err(io_err)?,
        }
        log::info!("wrote {} combinations to {:?}", self.len(), path);
        Ok(())
    }

    pub fn records(&self) -> &[Combination] {
        &self.records
    }

    pub fn into_records(self) -> Vec<Combination> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::new(vec![
            Combination::new(5, 2, 3, Prob::from("0.1")),
            Combination::new(20, 2, 3, Prob::Number(0.9)),
        ])
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(TableFormat::from_path(Path::new("t.JSON")), TableFormat::Json);
        assert_eq!(TableFormat::from_path(Path::new("sim_out.txt")), TableFormat::Literal);
        assert_eq!(TableFormat::from_path(Path::new("table")), TableFormat::Literal);
    }

    #[test]
    fn test_write_and_read_literal_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sim_out.txt");
        sample().write_path(&path).unwrap();
        assert_eq!(Table::from_path(&path).unwrap(), sample());
    }

    #[test]
    fn test_write_and_read_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("combinations.json");
        sample().write_path(&path).unwrap();
        assert_eq!(Table::from_path(&path).unwrap(), sample());
    }

    fn unusual_probs() -> Vec<Combination> {
        vec![
            Combination::new(1, 1, 1, Prob::Number(f64::NAN)),
            Combination::new(2, 1, 1, Prob::Number(f64::INFINITY)),
            Combination::new(3, 1, 1, Prob::Number(f64::NEG_INFINITY)),
            Combination::new(4, 1, 1, Prob::from("0.\"5")),
            Combination::new(5, 1, 1, Prob::from("ends with \\")),
            Combination::new(6, 1, 1, Prob::from("two\nlines")),
        ]
    }

    #[test]
    fn test_unusual_probs_survive_both_formats() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["unusual.txt", "unusual.json"] {
            let path = dir.path().join(name);
            Table::new(unusual_probs()).write_path(&path).unwrap();
            let back = Table::from_path(&path).unwrap();
            assert_eq!(back.len(), 6, "{name}");

            let records = back.records();
            assert!(records[0].prob.value().is_nan(), "{name}");
            assert_eq!(records[1].prob, Prob::Number(f64::INFINITY), "{name}");
            assert_eq!(records[2].prob, Prob::Number(f64::NEG_INFINITY), "{name}");
            assert_eq!(&records[3..], &unusual_probs()[3..], "{name}");
        }
    }

    #[test]
    fn test_missing_file() {
        let err = Table::from_path(Path::new("/definitely/not/here.txt")).unwrap_err();
        assert!(matches!(err, TableError::Io { .. }));
    }

    #[test]
    fn test_invalid_json() {
        let err = Table::from_json_str("[{\"falseAlarm\": 1}]").unwrap_err();
        assert!(matches!(err, TableError::Json(_)));
    }
}
