use crate::{FilteredRecord, GameRecord};
use log::{debug, info};

pub const INDIE_GENRE: &str = "indie";

/// Outcome of a filter pass. `skipped` counts indie records dropped
/// because a numeric field was missing.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Filtered {
    pub records: Vec<FilteredRecord>,
    pub skipped: usize
}

pub fn is_indie(genres: &[String]) -> bool {
    genres.iter().any(|g| g.trim().to_lowercase() == INDIE_GENRE)
}

/// Promotes a record once its rating, ratings count and added count are all known.
pub fn coerce(record: &GameRecord) -> Option<FilteredRecord> {
    Some(FilteredRecord {
        title: record.title.clone(),
        release_date: record.release_date.clone(),
        rating: record.rating?,
        ratings_count: record.ratings_count?,
        added: record.added?,
        genres: record.genres.clone(),
        tags: record.tags.clone(),
        developers: record.developers.clone()
    })
}

/// Keeps indie records in their original order. Records that fail
/// coercion are a data-quality skip, never an error.
pub fn indie_filter<'a, I>(records: I) -> Filtered
    where I: IntoIterator<Item = &'a GameRecord> {
    let mut filtered = Filtered::default();
    for record in records {
        if !is_indie(&record.genres) {
            continue;
        }
        match coerce(record) {
            Some(r) => filtered.records.push(r),
            None => {
                debug!("skipping `{}`: missing rating, ratings_count or added", record.title);
                filtered.skipped += 1;
            }
        }
    }
    info!("{} indie records kept, {} skipped", filtered.records.len(), filtered.skipped);
    filtered
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(title: &str, genres: &[&str], added: Option<i64>) -> GameRecord {
        GameRecord {
            title: title.to_string(),
            rating: Some(4.0),
            ratings_count: Some(10),
            added,
            genres: genres.iter().map(|g| g.to_string()).collect(),
            ..GameRecord::default()
        }
    }

    #[test]
    fn matches_indie_ignoring_case_and_padding() {
        assert!(is_indie(&[" INDIE ".to_string()]));
        assert!(is_indie(&["Action".to_string(), "Indie".to_string()]));
        assert!(!is_indie(&["Indie Puzzle".to_string()]));
        assert!(!is_indie(&[]));
    }

    #[test]
    fn drops_records_missing_numbers() {
        let games = vec![
            game("a", &["Indie"], Some(100)),
            game("b", &["Indie"], None),
            game("c", &["Action"], None),
            game("d", &["indie", "RPG"], Some(5)),
        ];
        let filtered = indie_filter(&games);
        let titles: Vec<&str> = filtered.records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "d"]);
        // non-indie records are not counted as skips
        assert_eq!(filtered.skipped, 1);
    }

    #[test]
    fn missing_rating_is_a_skip() {
        let mut g = game("a", &["Indie"], Some(1));
        g.rating = None;
        assert!(coerce(&g).is_none());
        assert_eq!(indie_filter(&[g]).skipped, 1);
    }

    #[test]
    fn filtering_twice_changes_nothing() {
        let games = vec![
            game("a", &["Indie"], Some(100)),
            game("b", &["Indie"], None),
            game("c", &["Strategy", " indie"], Some(7)),
        ];
        let once = indie_filter(&games);
        let again: Vec<GameRecord> = once.records.iter().map(GameRecord::from).collect();
        let twice = indie_filter(&again);
        assert_eq!(once.records, twice.records);
        assert_eq!(twice.skipped, 0);
    }
}
