use crate::{FilteredRecord, GroupStat};
use std::collections::BTreeMap;

pub type GroupStats = BTreeMap<String, GroupStat>;

/// Threshold that keeps every group.
pub const NO_THRESHOLD: u32 = 1;

/// Multi-valued categorical fields a record can be grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Genres,
    Tags
}

impl Field {
    pub fn tokens(self, record: &FilteredRecord) -> &[String] {
        match self {
            Field::Genres => &record.genres,
            Field::Tags => &record.tags
        }
    }
}

/// Numeric fields a group can be summed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measure {
    Added,
    Rating
}

impl Measure {
    pub fn value(self, record: &FilteredRecord) -> f64 {
        match self {
            Measure::Added => record.added as f64,
            Measure::Rating => record.rating
        }
    }
}

#[derive(Debug, Default)]
struct Tally {
    count: u32,
    sum: f64
}

/// Running count and sum per key for a single grouping pass.
#[derive(Debug, Default)]
pub struct GroupAccumulator {
    tallies: BTreeMap<String, Tally>
}

impl GroupAccumulator {
    pub fn new() -> GroupAccumulator {
        GroupAccumulator::default()
    }

    pub fn add(&mut self, key: &str, value: f64) -> () {
        if key.is_empty() {
            return;
        }
        let tally = self.tallies.entry(key.to_string()).or_default();
        tally.count += 1;
        tally.sum += value;
    }

    /// Turns the tallies into stats, dropping keys seen fewer than `min_count` times.
    pub fn finish(self, min_count: u32) -> GroupStats {
        self.tallies
            .into_iter()
            .filter(|(_, t)| t.count >= min_count)
            .map(|(key, t)| {
                let stat = GroupStat {
                    key: key.clone(),
                    count: t.count,
                    sum: t.sum,
                    average: t.sum / t.count as f64
                };
                (key, stat)
            })
            .collect()
    }
}

/// Groups `records` by every token `tokens` yields, summing `value`.
/// Duplicate tokens within one record are counted each time.
pub fn aggregate<F, N>(records: &[FilteredRecord], tokens: F, value: N, min_count: u32) -> GroupStats
    where F: Fn(&FilteredRecord) -> &[String],
          N: Fn(&FilteredRecord) -> f64 {
    let mut acc = GroupAccumulator::new();
    for record in records {
        let v = value(record);
        for token in tokens(record) {
            acc.add(token, v);
        }
    }
    acc.finish(min_count)
}

pub fn aggregate_by(records: &[FilteredRecord], field: Field, measure: Measure, min_count: u32) -> GroupStats {
    aggregate(records, |r| field.tokens(r), |r| measure.value(r), min_count)
}
