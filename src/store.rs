use crate::csv_io;
use crate::GameRecord;
use failure::Error;
use std::iter::FromIterator;
use std::path::Path;
use std::slice::Iter;

/// Ordered, read-only set of cleaned records held in memory.
#[derive(Debug, Default, Clone)]
pub struct RecordStore {
    records: Vec<GameRecord>
}

impl RecordStore {
    pub fn new(records: Vec<GameRecord>) -> RecordStore {
        RecordStore { records }
    }

    /// Loads every row of a cleaned CSV file.
    pub fn load(path: &Path) -> Result<RecordStore, Error> {
        let records = csv_io::read_records_from(path)?;
        Ok(RecordStore::new(records))
    }

    pub fn records(&self) -> &[GameRecord] {
        &self.records
    }

    pub fn iter(&self) -> Iter<GameRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<GameRecord> for RecordStore {
    fn from_iter<I: IntoIterator<Item = GameRecord>>(iter: I) -> RecordStore {
        RecordStore::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a RecordStore {
    type Item = &'a GameRecord;
    type IntoIter = Iter<'a, GameRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
