use crate::aggregate::{aggregate_by, Field, GroupStats, Measure, NO_THRESHOLD};
use crate::filter::INDIE_GENRE;
use crate::rank::{rank, RankBy};
use crate::FilteredRecord;
use failure::{Error, ResultExt};
use serde_derive::Serialize;
use serde_json::to_string_pretty;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarSeries {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// (label, value) in display order.
    pub bars: Vec<(String, f64)>
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub label: String,
    pub x: f64,
    pub y: f64
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterSeries {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<ScatterPoint>
}

/// Everything the genre charts need, ready for a plotting tool.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSet {
    pub frequency: BarSeries,
    pub average_added: BarSeries,
    pub popularity_vs_rating: ScatterSeries
}

// Every filtered record is indie, so that genre would top every chart.
// Only the exact token is dropped; a padded " indie " stays its own bar.
fn without_indie(mut stats: GroupStats) -> GroupStats {
    stats.retain(|key, _| key.to_lowercase() != INDIE_GENRE);
    stats
}

fn bar(title: &str, x_label: &str, y_label: &str, bars: Vec<(String, f64)>) -> BarSeries {
    BarSeries {
        title: title.to_string(),
        x_label: x_label.to_string(),
        y_label: y_label.to_string(),
        bars
    }
}

impl ChartSet {
    pub fn build(records: &[FilteredRecord], top_n: usize) -> ChartSet {
        let added = without_indie(aggregate_by(records, Field::Genres, Measure::Added, NO_THRESHOLD));
        let rating = without_indie(aggregate_by(records, Field::Genres, Measure::Rating, NO_THRESHOLD));

        let frequency = rank(&added, RankBy::Count, top_n)
            .into_iter()
            .map(|s| (s.key, s.count as f64))
            .collect();
        let average_added = rank(&added, RankBy::Average, top_n)
            .into_iter()
            .map(|s| (s.key, s.average))
            .collect();
        // both maps hold the same genres, grouping is independent of the measure
        let points = rating
            .values()
            .filter_map(|r| added.get(&r.key).map(|a| ScatterPoint {
                label: r.key.clone(),
                x: r.average,
                y: a.average
            }))
            .collect();

        ChartSet {
            frequency: bar("Top Genres by Frequency (Indie Games)", "Genre", "Number of Games", frequency),
            average_added: bar("Average Popularity by Genre (Indie Games)", "Genre", "Average Added", average_added),
            popularity_vs_rating: ScatterSeries {
                title: "Popularity vs Rating by Genre (Indie Games)".to_string(),
                x_label: "Average Rating".to_string(),
                y_label: "Average Added".to_string(),
                points
            }
        }
    }

    pub fn write_to(&self, path: &Path) -> Result<(), Error> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(path, to_string_pretty(self)?)
            .with_context(|_| format!("Can't write: {}", path.display()))?;
        Ok(())
    }
}

/// Horizontal text bars scaled so the largest value spans `width` cells.
pub fn bar_lines(series: &BarSeries, width: usize) -> Vec<String> {
    let label_width = series.bars.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
    let max = series.bars.iter().map(|&(_, v)| v).fold(0.0, f64::max);
    series.bars
        .iter()
        .map(|(label, value)| {
            let cells = if max > 0.0 { (value / max * width as f64).round() as usize } else { 0 };
            format!("{:<lw$} | {} {:.2}", label, "#".repeat(cells), value, lw = label_width)
        })
        .collect()
}
