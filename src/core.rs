use crate::chart::ChartSet;
use crate::clean;
use crate::filter::{indie_filter, Filtered};
use crate::rawg;
use crate::report::{self, Report, ReportOptions};
use crate::store::RecordStore;
use failure::{Error, ResultExt};
use log::info;
use reqwest::blocking::Client;
use serde_derive::{Deserialize, Serialize};
use serde_json::{from_str, to_string_pretty};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "app.config";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub target_games: usize, // number of games to pull from the API
    pub page_size: u32,
    pub ordering: String, // API sort order, "-added" puts the most collected first
    pub raw_path: PathBuf,
    pub clean_path: PathBuf,
    pub charts_path: PathBuf,
    pub genre_top_n: usize,
    pub tag_top_n: usize,
    pub min_tag_count: u32, // tags seen fewer times are left out of tag averages
    pub chart_top_n: usize
}

impl Default for Config {
    fn default() -> Config {
        Config {
            target_games: 750,
            page_size: 40,
            ordering: "-added".to_string(),
            raw_path: PathBuf::from("data/raw/rawg_games_raw.json"),
            clean_path: PathBuf::from("data/processed/games_clean.csv"),
            charts_path: PathBuf::from("data/processed/genre_charts.json"),
            genre_top_n: 10,
            tag_top_n: 15,
            min_tag_count: 10,
            chart_top_n: 10
        }
    }
}

impl Config {
    pub fn report_options(&self) -> ReportOptions {
        ReportOptions {
            genre_top_n: self.genre_top_n,
            tag_top_n: self.tag_top_n,
            min_tag_count: self.min_tag_count
        }
    }
}

pub fn create_structure() -> Result<(), Error> {
    let conf = to_string_pretty(&Config::default())?;
    fs::write(CONFIG_FILE_NAME, conf)?;
    Ok(())
}

/// Reads the config file, falling back to defaults when there is none.
pub fn config() -> Result<Config, Error> {
    config_from(Path::new(CONFIG_FILE_NAME))
}

pub fn config_from(path: &Path) -> Result<Config, Error> {
    if !path.exists() {
        info!("{} not found, using defaults", path.display());
        return Ok(Config::default());
    }
    let conf = fs::read_to_string(path)
        .with_context(|_| format!("Can't open: {}", path.display()))?;
    let conf = from_str(&conf)
        .with_context(|_| format!("Can't parse: {}", path.display()))?;
    Ok(conf)
}

/// Downloads the game list and stores it as raw JSON. Returns the number of games.
pub fn fetch_games(config: &Config, progress: impl Fn(usize) -> ()) -> Result<usize, Error> {
    let key = rawg::api_key()?;
    let client = Client::new();
    let pages = rawg::GameIterator::new(&client, &key, config.page_size, &config.ordering);
    let games = rawg::collect_games(pages, config.target_games, progress)?;
    if let Some(dir) = config.raw_path.parent() {
        fs::create_dir_all(dir)?;
    }
    fs::write(&config.raw_path, to_string_pretty(&games)?)
        .with_context(|_| format!("Can't write: {}", config.raw_path.display()))?;
    info!("saved {} games to {}", games.len(), config.raw_path.display());
    Ok(games.len())
}

pub fn clean_games(config: &Config) -> Result<usize, Error> {
    clean::clean_file(&config.raw_path, &config.clean_path)
}

fn load_indie(config: &Config) -> Result<Filtered, Error> {
    let store = RecordStore::load(&config.clean_path)?;
    info!("loaded {} records from {}", store.len(), config.clean_path.display());
    Ok(indie_filter(&store))
}

pub fn make_report(config: &Config) -> Result<Report, Error> {
    let filtered = load_indie(config)?;
    report::build(&filtered, &config.report_options())
}

/// Builds the genre chart series and writes them next to the cleaned data.
pub fn make_charts(config: &Config) -> Result<ChartSet, Error> {
    let filtered = load_indie(config)?;
    let charts = ChartSet::build(&filtered.records, config.chart_top_n);
    charts.write_to(&config.charts_path)?;
    Ok(charts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_path(label: &str) -> PathBuf {
        env::temp_dir().join(format!(
            "indie-stats-{}-{}",
            label,
            SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos()
        ))
    }

    #[test]
    fn missing_config_gives_defaults() {
        let conf = config_from(&temp_path("absent")).unwrap();
        assert_eq!(conf, Config::default());
        assert_eq!(conf.min_tag_count, 10);
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let path = temp_path("partial");
        fs::write(&path, r#"{"tag_top_n": 5, "clean_path": "x.csv"}"#).unwrap();
        let conf = config_from(&path).unwrap();
        assert_eq!(conf.tag_top_n, 5);
        assert_eq!(conf.clean_path, PathBuf::from("x.csv"));
        assert_eq!(conf.genre_top_n, 10);
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn broken_config_is_an_error() {
        let path = temp_path("broken");
        fs::write(&path, "{ not json").unwrap();
        assert!(config_from(&path).is_err());
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn analyzes_and_charts_cleaned_file() {
        let dir = temp_path("run");
        let conf = Config {
            clean_path: dir.join("games_clean.csv"),
            charts_path: dir.join("charts.json"),
            ..Config::default()
        };
        fs::create_dir_all(&dir).unwrap();
        fs::write(&conf.clean_path, "\
title,release_date,rating,ratings_count,added,genres,tags,developers
A,,4.0,10,100,Indie|Action,,
B,,4.5,30,300,Indie,,
C,,3.5,20,200,Indie|Action,,
D,,4.9,99,999,Shooter,,
E,,,5,50,Indie,,
").unwrap();

        let report = make_report(&conf).unwrap();
        assert_eq!(report.total, 3);
        assert_eq!(report.skipped, 1);

        let charts = make_charts(&conf).unwrap();
        assert_eq!(charts.frequency.bars, vec![("Action".to_string(), 2.0)]);
        assert!(conf.charts_path.exists());
        fs::remove_dir_all(dir).unwrap();
    }
}
