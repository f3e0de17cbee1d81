use failure::{bail, Error, ResultExt};
use log::error;
use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;
use reqwest::StatusCode;
use serde_derive::Deserialize;
use serde_json::Value;
use std::env;

pub const API_URL: &str = "https://api.rawg.io/api/games";
pub const API_KEY_VAR: &str = "RAWG_API_KEY";
const AGENT: &str = "Mozilla/5.0";

/// One page of the game list. Games are kept as raw JSON so the dump
/// holds everything the API returned.
#[derive(Debug, Deserialize)]
pub struct GamePage {
    pub results: Vec<Value>,
    pub next: Option<String>
}

pub fn api_key() -> Result<String, Error> {
    match env::var(API_KEY_VAR) {
        Ok(key) if !key.is_empty() => Ok(key),
        _ => bail!("{} is not set.", API_KEY_VAR)
    }
}

pub fn parse_page(body: &str) -> Result<GamePage, Error> {
    let page = serde_json::from_str(body)?;
    Ok(page)
}

pub fn get_games_from(client: &Client, key: &str, page: u32, page_size: u32, ordering: &str) -> Result<GamePage, Error> {
    let params = [
        ("key", key.to_string()),
        ("page", page.to_string()),
        ("page_size", page_size.to_string()),
        ("ordering", ordering.to_string())
    ];
    let resp = client.get(API_URL)
        .query(&params)
        .header(USER_AGENT, AGENT)
        .send()
        .with_context(|_| format!("could not download page `{}`", page))?;
    let status = resp.status();
    if status != StatusCode::OK {
        let body = resp.text().unwrap_or_default();
        error!("Request failed: {}\n{}", status, body);
        bail!("Can't get games from page {}. Status: {}", page, status);
    }
    let body = resp.text()?;
    parse_page(&body)
}

/// Walks the game list page by page until the API reports no next page
/// or returns an empty one. Stops after the first error.
pub struct GameIterator<'a> {
    client: &'a Client,
    key: &'a str,
    ordering: &'a str,
    page_size: u32,
    page: u32,
    done: bool
}

impl<'a> GameIterator<'a> {
    pub fn new(client: &'a Client, key: &'a str, page_size: u32, ordering: &'a str) -> GameIterator<'a> {
        GameIterator { client, key, ordering, page_size, page: 0, done: false }
    }
}

impl<'a> Iterator for GameIterator<'a> {
    type Item = Result<Vec<Value>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        self.page += 1;
        let fetched = get_games_from(self.client, self.key, self.page, self.page_size, self.ordering);
        next_page(fetched, &mut self.done)
    }
}

// An empty page ends the walk at once; a page without a `next` link is
// yielded and then ends it. Errors are yielded once.
fn next_page(fetched: Result<GamePage, Error>, done: &mut bool) -> Option<Result<Vec<Value>, Error>> {
    match fetched {
        Ok(page) => {
            if page.results.is_empty() {
                *done = true;
                return None;
            }
            *done = page.next.is_none();
            Some(Ok(page.results))
        },
        Err(e) => {
            *done = true;
            Some(Err(e))
        }
    }
}

/// Pulls games from `pages` until `target` are collected, cutting the
/// last page short. The first page error ends the run.
pub fn collect_games<I>(pages: I, target: usize, progress: impl Fn(usize) -> ()) -> Result<Vec<Value>, Error>
    where I: IntoIterator<Item = Result<Vec<Value>, Error>> {
    let mut games = Vec::with_capacity(target);
    if target == 0 {
        return Ok(games);
    }
    for page in pages {
        // nothing collected so far is kept on error
        let page = page?;
        let room = target - games.len();
        games.extend(page.into_iter().take(room));
        progress(games.len());
        if games.len() == target {
            break;
        }
    }
    Ok(games)
}
