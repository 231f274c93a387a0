//! State owned by the backend thread: reading, generating and writing
//! combination tables.

use std::{
    fmt::Display,
    path::{Path, PathBuf},
    sync::Arc,
};

use alarm_sim::SweepRanges;
use alarm_table::{Combination, Table};
use app_core::{backend::BackendState, string_error::ErrorStringExt};

/// Where the records of a [`Dataset`] came from.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DatasetSource {
    #[default]
    Empty,
    File(PathBuf),
    Generated,
}

/// The table that plot requests are answered from. Cloning is cheap, the
/// records are shared.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    source: DatasetSource,
    records: Arc<Vec<Combination>>,
}

impl Dataset {
    pub fn new(source: DatasetSource, records: Vec<Combination>) -> Self {
        Self {
            source,
            records: Arc::new(records),
        }
    }

    pub fn records(&self) -> &[Combination] {
        &self.records
    }

    pub fn source(&self) -> &DatasetSource {
        &self.source
    }

    pub fn path(&self) -> Option<&Path> {
        match &self.source {
            DatasetSource::File(path) => Some(path),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Display for Dataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.source {
            DatasetSource::Empty => write!(f, "no table loaded"),
            DatasetSource::File(path) => {
                write!(f, "{} combinations from {}", self.len(), path.display())
            }
            DatasetSource::Generated => write!(f, "{} generated combinations", self.len()),
        }
    }
}

pub struct BackendAppState {
    ranges: SweepRanges,
    current: Dataset,
}

impl BackendState for BackendAppState {}

impl BackendAppState {
    pub fn new(ranges: SweepRanges) -> Self {
        Self {
            ranges,
            current: Dataset::default(),
        }
    }

    pub fn load_table(&mut self, path: &Path) -> Result<Dataset, String> {
        let table = Table::from_path(path).err_to_string("unable to read table")?;
        let dataset = Dataset::new(DatasetSource::File(path.to_path_buf()), table.into_records());
        self.current = dataset.clone();
        Ok(dataset)
    }

    /// Compute a fresh table over the configured sweep ranges.
    pub fn generate_table(&mut self) -> Dataset {
        let records = alarm_sim::generate(&self.ranges);
        log::info!("generated {} combinations", records.len());
        let dataset = Dataset::new(DatasetSource::Generated, records);
        self.current = dataset.clone();
        dataset
    }

    /// Write the table most recently loaded or generated.
    pub fn write_current(&self, path: &Path) -> Result<(), String> {
        if self.current.is_empty() {
            return Err("there is no table to save".to_string());
        }
        Table::new(self.current.records().to_vec())
            .write_path(path)
            .err_to_string("unable to write table")
    }

    pub fn current(&self) -> &Dataset {
        &self.current
    }
}
