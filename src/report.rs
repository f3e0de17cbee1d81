use crate::aggregate::{aggregate_by, Field, Measure, NO_THRESHOLD};
use crate::correlation::{mean, pearson, Correlation};
use crate::filter::Filtered;
use crate::rank::{rank, RankBy};
use crate::{FilteredRecord, GroupStat};
use failure::Error;
use std::fmt;

#[derive(Debug, Clone, Copy)]
pub struct ReportOptions {
    pub genre_top_n: usize,
    pub tag_top_n: usize,
    pub min_tag_count: u32
}

/// Rankings of one categorical field.
#[derive(Debug, Clone, PartialEq)]
pub struct Breakdown {
    pub by_count: Vec<GroupStat>,
    pub by_avg_added: Vec<GroupStat>,
    pub by_avg_rating: Vec<GroupStat>
}

impl Breakdown {
    /// Frequency ranking ignores `min_count`; both average rankings honour it.
    pub fn new(records: &[FilteredRecord], field: Field, top_n: usize, min_count: u32) -> Breakdown {
        let counts = aggregate_by(records, field, Measure::Added, NO_THRESHOLD);
        let added = aggregate_by(records, field, Measure::Added, min_count);
        let rating = aggregate_by(records, field, Measure::Rating, min_count);
        Breakdown {
            by_count: rank(&counts, RankBy::Count, top_n),
            by_avg_added: rank(&added, RankBy::Average, top_n),
            by_avg_rating: rank(&rating, RankBy::Average, top_n)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub avg_added: f64,
    pub avg_rating: f64,
    pub avg_ratings_count: f64,
    pub genres: Breakdown,
    pub tags: Breakdown,
    pub rating_vs_added: Correlation,
    pub ratings_count_vs_added: Correlation
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub total: usize,
    pub skipped: usize,
    /// Absent when no indie game survived filtering.
    pub summary: Option<Summary>
}

pub fn build(filtered: &Filtered, options: &ReportOptions) -> Result<Report, Error> {
    let records = &filtered.records;
    let summary = if records.is_empty() {
        None
    } else {
        let added: Vec<f64> = records.iter().map(|r| r.added as f64).collect();
        let rating: Vec<f64> = records.iter().map(|r| r.rating).collect();
        let ratings_count: Vec<f64> = records.iter().map(|r| r.ratings_count as f64).collect();
        Some(Summary {
            avg_added: mean(&added)?,
            avg_rating: mean(&rating)?,
            avg_ratings_count: mean(&ratings_count)?,
            genres: Breakdown::new(records, Field::Genres, options.genre_top_n, NO_THRESHOLD),
            tags: Breakdown::new(records, Field::Tags, options.tag_top_n, options.min_tag_count),
            rating_vs_added: pearson(&rating, &added)?,
            ratings_count_vs_added: pearson(&ratings_count, &added)?
        })
    };
    Ok(Report { total: records.len(), skipped: filtered.skipped, summary })
}

// `suffix` trails the average headings only; frequency headings always name indie games.
fn write_breakdown(f: &mut fmt::Formatter, noun: &str, suffix: &str, breakdown: &Breakdown) -> fmt::Result {
    writeln!(f, "Top {} by Frequency (Indie Games)", noun)?;
    for s in &breakdown.by_count {
        writeln!(f, "{} - count: {}", s.key, s.count)?;
    }
    writeln!(f)?;
    writeln!(f, "Top {} by Average Added{}", noun, suffix)?;
    for s in &breakdown.by_avg_added {
        writeln!(f, "{} - avg added: {:.2} | count: {}", s.key, s.average, s.count)?;
    }
    writeln!(f)?;
    writeln!(f, "Top {} by Average Rating{}", noun, suffix)?;
    for s in &breakdown.by_avg_rating {
        writeln!(f, "{} - avg rating: {:.2} | count: {}", s.key, s.average, s.count)?;
    }
    writeln!(f)
}

fn write_correlation(f: &mut fmt::Formatter, x: &str, y: &str, c: Correlation) -> fmt::Result {
    writeln!(f, "Pearson correlation between {} and {}:", x, y)?;
    match c {
        Correlation::Defined(_) => writeln!(f, "{}", c),
        Correlation::Undefined => writeln!(f, "Correlation could not be computed.")
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Total indie games: {}", self.total)?;
        if self.skipped > 0 {
            writeln!(f, "Skipped (missing numbers): {}", self.skipped)?;
        }
        writeln!(f)?;
        let s = match &self.summary {
            Some(s) => s,
            None => return writeln!(f, "Nothing to analyze.")
        };

        writeln!(f, "Descriptive Statistics (Indie Games)")?;
        writeln!(f, "Average added: {:.2}", s.avg_added)?;
        writeln!(f, "Average rating: {:.2}", s.avg_rating)?;
        writeln!(f, "Average ratings count: {:.2}", s.avg_ratings_count)?;
        writeln!(f)?;

        write_breakdown(f, "Genres", " (Indie Games)", &s.genres)?;
        write_breakdown(f, "Tags", "", &s.tags)?;

        writeln!(f, "Correlation Analysis")?;
        write_correlation(f, "rating", "added", s.rating_vs_added)?;
        write_correlation(f, "ratings_count", "added", s.ratings_count_vs_added)
    }
}
