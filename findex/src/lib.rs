use log::{error, info};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum Error {
    #[error("URL parse error: {0}")]
    UrlParseError(#[from] url::ParseError),
    #[error("HTTP Error: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("Malformed response body: {0}")]
    MalformedResponse(#[source] serde_json::Error),
}

/// A single hit returned by the engine's `/search` endpoint.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub url: String,
    pub title: String,
    pub snippet: String,
}

/// A previously issued query as stored by the engine. The engine keeps
/// query text verbatim, so entries may still carry a surrounding quote
/// pair from phrase searches.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub query: String,
}

/// Client for the findex search engine API.
///
/// Each call is a single best-effort request: no retries, no timeouts,
/// no caching. Concurrent calls are independent of each other.
pub struct FindexClient {
    client: Client,
    base_url: String,
    result_limit: Option<usize>,
}

impl FindexClient {
    const DEFAULT_API_URL: &'static str = "http://localhost:8081/api";
    const DEFAULT_RESULT_LIMIT: usize = 20;

    pub fn new(user_agent: impl ToString) -> Self {
        let client = Client::builder()
            .user_agent(user_agent.to_string())
            .build()
            .unwrap();

        FindexClient {
            client,
            base_url: Self::DEFAULT_API_URL.to_string(),
            result_limit: Some(Self::DEFAULT_RESULT_LIMIT),
        }
    }

    /// Points the client at a different API root, e.g. a mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Caps how many results `search` returns. `None` disables the cap
    /// and passes the response through untrimmed.
    pub fn with_result_limit(mut self, limit: Option<usize>) -> Self {
        self.result_limit = limit;
        self
    }

    /// Runs `query` against the engine and returns the requested page of
    /// results, trimmed to the configured limit.
    ///
    /// The query text is forwarded as-is; the engine decides what an
    /// empty or odd-looking query means.
    pub async fn search(&self, query: &str, page: u32) -> Result<Vec<SearchResult>, Error> {
        let mut url = Url::parse(&format!("{}/search", self.base_url))?;
        url.query_pairs_mut()
            .append_pair("query", query)
            .append_pair("page", &page.to_string());
        info!("searching: {url}");
        let results: Vec<SearchResult> = self.fetch(url).await?;
        Ok(match self.result_limit {
            Some(limit) => results.into_iter().take(limit).collect(),
            None => results,
        })
    }

    /// Fetches the engine's stored queries, cleaned of surrounding quote
    /// pairs and deduplicated case-insensitively. The first occurrence
    /// of each distinct cleaned query wins and order follows the
    /// engine's response.
    pub async fn get_search_history(&self) -> Result<Vec<HistoryEntry>, Error> {
        let url = Url::parse(&format!("{}/history", self.base_url))?;
        info!("getting search history: {url}");
        let entries: Vec<HistoryEntry> = self.fetch(url).await?;
        Ok(normalize_history(entries))
    }

    // One GET. Transport failures and non-success statuses come back
    // unchanged; a body that doesn't match the schema is a distinct
    // MalformedResponse.
    async fn fetch<T: serde::de::DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| {
                error!("request to {url} failed: {e}");
                e
            })?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            error!("malformed response from {url}: {e}");
            Error::MalformedResponse(e)
        })
    }
}

/// Strips exactly one matching pair of surrounding `"` or `'`.
/// Mismatched or absent quotes leave the text untouched.
fn strip_quotes(query: &str) -> &str {
    let mut chars = query.chars();
    match (chars.next(), chars.next_back()) {
        (Some(first), Some(last)) if first == last && (first == '"' || first == '\'') => {
            &query[1..query.len() - 1]
        }
        _ => query,
    }
}

fn normalize_history(entries: Vec<HistoryEntry>) -> Vec<HistoryEntry> {
    let mut seen = HashSet::new();
    entries
        .into_iter()
        .filter_map(|entry| {
            let cleaned = strip_quotes(&entry.query).to_string();
            seen.insert(cleaned.to_lowercase())
                .then_some(HistoryEntry { query: cleaned })
        })
        .collect()
}

#[cfg(test)]
mod test {
    use crate::{normalize_history, strip_quotes, HistoryEntry};

    fn entries(queries: &[&str]) -> Vec<HistoryEntry> {
        queries
            .iter()
            .map(|q| HistoryEntry {
                query: q.to_string(),
            })
            .collect()
    }

    #[test]
    fn strips_matching_quote_pairs() {
        assert_eq!(strip_quotes("\"foo\""), "foo");
        assert_eq!(strip_quotes("'foo'"), "foo");
        assert_eq!(strip_quotes("''"), "");
        assert_eq!(strip_quotes("\"\""), "");
    }

    #[test]
    fn strips_only_one_pair() {
        assert_eq!(strip_quotes("\"\"foo\"\""), "\"foo\"");
        assert_eq!(strip_quotes("''foo''"), "'foo'");
    }

    #[test]
    fn leaves_mismatched_quotes_alone() {
        assert_eq!(strip_quotes("\"foo'"), "\"foo'");
        assert_eq!(strip_quotes("'foo\""), "'foo\"");
        assert_eq!(strip_quotes("\"foo"), "\"foo");
        assert_eq!(strip_quotes("foo'"), "foo'");
        assert_eq!(strip_quotes("foo"), "foo");
        assert_eq!(strip_quotes(""), "");
        // a lone quote is not a pair
        assert_eq!(strip_quotes("\""), "\"");
        assert_eq!(strip_quotes("'"), "'");
    }

    #[test]
    fn dedups_case_insensitively_keeping_first() {
        let normalized = normalize_history(entries(&["Foo", "foo", "BAR"]));
        assert_eq!(normalized, entries(&["Foo", "BAR"]));
    }

    #[test]
    fn dedups_on_cleaned_text() {
        let normalized = normalize_history(entries(&["\"rust\"", "'Rust'", "rust", "cat"]));
        assert_eq!(normalized, entries(&["rust", "cat"]));
    }

    #[test]
    fn preserves_first_occurrence_order() {
        let normalized = normalize_history(entries(&["b", "a", "'b'", "c", "A"]));
        assert_eq!(normalized, entries(&["b", "a", "c"]));
    }
}
