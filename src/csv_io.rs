use crate::GameRecord;
use failure::{Error, ResultExt};
use log::debug;
use serde_derive::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io;
use std::path::Path;
use std::str::FromStr;

/// Separator of multi-valued cells (genres, tags, developers).
pub const DELIMITER: char = '|';

pub const HEADER: [&str; 8] = [
    "title",
    "release_date",
    "rating",
    "ratings_count",
    "added",
    "genres",
    "tags",
    "developers"
];

// Every cell is read as text so a bad number only costs its own field.
#[derive(Debug, Serialize, Deserialize)]
struct Row {
    title: String,
    release_date: String,
    rating: String,
    ratings_count: String,
    added: String,
    genres: String,
    tags: String,
    developers: String
}

pub fn split_tokens(cell: &str) -> Vec<String> {
    cell.split(DELIMITER)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

pub fn join_tokens(tokens: &[String]) -> String {
    tokens.join(&DELIMITER.to_string())
}

fn parse_cell<T: FromStr>(title: &str, column: &str, cell: &str) -> Option<T> {
    let cell = cell.trim();
    if cell.is_empty() {
        return None;
    }
    match cell.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            debug!("`{}`: can't read {} from `{}`", title, column, cell);
            None
        }
    }
}

fn optional(cell: String) -> Option<String> {
    if cell.is_empty() { None } else { Some(cell) }
}

fn into_record(row: Row) -> GameRecord {
    GameRecord {
        rating: parse_cell(&row.title, "rating", &row.rating),
        ratings_count: parse_cell(&row.title, "ratings_count", &row.ratings_count),
        added: parse_cell(&row.title, "added", &row.added),
        genres: split_tokens(&row.genres),
        tags: split_tokens(&row.tags),
        developers: split_tokens(&row.developers),
        release_date: optional(row.release_date),
        title: row.title
    }
}

fn cell<T: ToString>(value: &Option<T>) -> String {
    value.as_ref().map(T::to_string).unwrap_or_default()
}

fn to_row(record: &GameRecord) -> Row {
    Row {
        title: record.title.clone(),
        release_date: record.release_date.clone().unwrap_or_default(),
        rating: cell(&record.rating),
        ratings_count: cell(&record.ratings_count),
        added: cell(&record.added),
        genres: join_tokens(&record.genres),
        tags: join_tokens(&record.tags),
        developers: join_tokens(&record.developers)
    }
}

pub fn read_records<R: io::Read>(source: R) -> Result<Vec<GameRecord>, Error> {
    let mut reader = csv::Reader::from_reader(source);
    let mut records = Vec::new();
    for (i, row) in reader.deserialize::<Row>().enumerate() {
        let row = row.with_context(|_| format!("malformed row {}", i + 1))?;
        records.push(into_record(row));
    }
    Ok(records)
}

pub fn read_records_from(path: &Path) -> Result<Vec<GameRecord>, Error> {
    let file = File::open(path)
        .with_context(|_| format!("Can't open: {}", path.display()))?;
    read_records(file)
}

/// Writes the header even when `records` is empty.
pub fn write_records<W: io::Write>(sink: W, records: &[GameRecord]) -> Result<(), Error> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(sink);
    writer.write_record(&HEADER)?;
    for record in records {
        writer.serialize(to_row(record))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_records_to(path: &Path, records: &[GameRecord]) -> Result<(), Error> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = File::create(path)
        .with_context(|_| format!("Can't create: {}", path.display()))?;
    write_records(file, records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
title,release_date,rating,ratings_count,added,genres,tags,developers
Hades,2020-09-17,4.59,3800,9000,Action|Indie|RPG,Singleplayer|Roguelike,Supergiant Games
Broken,,n/a,12,,Indie,,
";

    #[test]
    fn splits_and_drops_empty_tokens() {
        assert_eq!(split_tokens("Action||Indie|"), vec!["Action", "Indie"]);
        assert!(split_tokens("").is_empty());
        assert_eq!(join_tokens(&split_tokens("a|b")), "a|b");
    }

    #[test]
    fn reads_rows_into_records() {
        let records = read_records(SAMPLE.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        let hades = &records[0];
        assert_eq!(hades.release_date.as_deref(), Some("2020-09-17"));
        assert_eq!(hades.rating, Some(4.59));
        assert_eq!(hades.added, Some(9000));
        assert_eq!(hades.genres, vec!["Action", "Indie", "RPG"]);
        assert_eq!(hades.developers, vec!["Supergiant Games"]);
    }

    #[test]
    fn bad_numbers_become_absent() {
        let records = read_records(SAMPLE.as_bytes()).unwrap();
        let broken = &records[1];
        assert_eq!(broken.rating, None);
        assert_eq!(broken.ratings_count, Some(12));
        assert_eq!(broken.added, None);
        assert_eq!(broken.release_date, None);
        assert!(broken.tags.is_empty());
    }

    #[test]
    fn written_rows_read_back() {
        let records = read_records(SAMPLE.as_bytes()).unwrap();
        let mut out = Vec::new();
        write_records(&mut out, &records).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("title,release_date,rating,ratings_count,added,genres,tags,developers"));
        assert_eq!(read_records(text.as_bytes()).unwrap(), records);
    }

    #[test]
    fn empty_set_still_has_header() {
        let mut out = Vec::new();
        write_records(&mut out, &[]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap().trim_end(), HEADER.join(","));
    }

    #[test]
    fn missing_column_is_an_error() {
        assert!(read_records("title,rating\nx,1\n".as_bytes()).is_err());
    }
}
