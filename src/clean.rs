use crate::csv_io;
use crate::GameRecord;
use failure::{Error, ResultExt};
use serde_derive::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct Named {
    name: Option<String>
}

/// The fields of a RAWG game object that survive cleaning. Everything
/// else in the payload is ignored.
#[derive(Debug, Deserialize)]
pub struct RawGame {
    name: Option<String>,
    released: Option<String>,
    // numbers stay loose: a float where an integer belongs just makes the field absent
    rating: Option<Value>,
    ratings_count: Option<Value>,
    added: Option<Value>,
    genres: Option<Vec<Named>>,
    tags: Option<Vec<Named>>,
    developers: Option<Vec<Named>>
}

fn names(list: &Option<Vec<Named>>) -> Vec<String> {
    match list {
        Some(items) => items.iter().filter_map(|n| n.name.clone()).collect(),
        None => Vec::new()
    }
}

fn integer(value: &Option<Value>) -> Option<i64> {
    value.as_ref().and_then(Value::as_i64)
}

impl From<&RawGame> for GameRecord {
    fn from(game: &RawGame) -> GameRecord {
        GameRecord {
            title: game.name.clone().unwrap_or_default(),
            release_date: game.released.clone(),
            rating: game.rating.as_ref().and_then(Value::as_f64),
            ratings_count: integer(&game.ratings_count),
            added: integer(&game.added),
            genres: names(&game.genres),
            tags: names(&game.tags),
            developers: names(&game.developers)
        }
    }
}

pub fn parse_raw(json: &str) -> Result<Vec<RawGame>, Error> {
    let games = serde_json::from_str(json)?;
    Ok(games)
}

pub fn clean_games(raw: &[RawGame]) -> Vec<GameRecord> {
    raw.iter().map(GameRecord::from).collect()
}

/// Flattens the raw API dump at `raw_path` into the CSV at `clean_path`.
pub fn clean_file(raw_path: &Path, clean_path: &Path) -> Result<usize, Error> {
    let json = fs::read_to_string(raw_path)
        .with_context(|_| format!("Can't open: {}", raw_path.display()))?;
    let raw = parse_raw(&json)
        .with_context(|_| format!("Can't parse: {}", raw_path.display()))?;
    let records = clean_games(&raw);
    csv_io::write_records_to(clean_path, &records)?;
    Ok(records.len())
}
