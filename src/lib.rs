pub mod aggregate;
pub mod chart;
pub mod clean;
pub mod core;
pub mod correlation;
pub mod csv_io;
pub mod filter;
pub mod rank;
pub mod rawg;
pub mod report;
pub mod store;

use serde_derive::Serialize;

/// One row of the cleaned catalog. Numeric fields are absent when the
/// source cell was empty or could not be read as a number.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct GameRecord {
    pub title: String,
    pub release_date: Option<String>,
    pub rating: Option<f64>,
    pub ratings_count: Option<i64>,
    pub added: Option<i64>,
    pub genres: Vec<String>,
    pub tags: Vec<String>,
    pub developers: Vec<String>
}

/// A record that passed the indie filter with every numeric field present.
#[derive(Debug, PartialEq, Clone)]
pub struct FilteredRecord {
    pub title: String,
    pub release_date: Option<String>,
    pub rating: f64,
    pub ratings_count: i64,
    pub added: i64,
    pub genres: Vec<String>,
    pub tags: Vec<String>,
    pub developers: Vec<String>
}

impl From<&FilteredRecord> for GameRecord {
    fn from(record: &FilteredRecord) -> GameRecord {
        GameRecord {
            title: record.title.clone(),
            release_date: record.release_date.clone(),
            rating: Some(record.rating),
            ratings_count: Some(record.ratings_count),
            added: Some(record.added),
            genres: record.genres.clone(),
            tags: record.tags.clone(),
            developers: record.developers.clone()
        }
    }
}

/// Count, sum and average of one numeric field over every record
/// carrying `key`. `count` is never zero.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct GroupStat {
    pub key: String,
    pub count: u32,
    pub sum: f64,
    pub average: f64
}
