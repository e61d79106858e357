//! Changelog resolution via the GitHub code-search API
//!
//! For each module the resolver derives an `owner/repo` identity from the
//! module path, issues exactly one code-search request filtered to the
//! canonical changelog filename, and accepts only a root-level hit. A hit
//! nested in a subdirectory is not authoritative; precision over recall.
//!
//! There are no retries, no pagination follow-ups, and no caching across
//! calls: each module incurs exactly one search per run.

use crate::domain::ModuleUpdate;
use crate::error::{ChangelogError, TransportError};
use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;
use std::time::Duration;

/// Canonical changelog filename, matched exactly at the repository root
const CHANGELOG_FILENAME: &str = "CHANGELOG.md";

/// GitHub code-search endpoint
const SEARCH_ENDPOINT: &str = "https://api.github.com/search/code";

/// Default timeout for search requests
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// User-Agent header (GitHub rejects requests without one)
const USER_AGENT: &str = concat!("modup/", env!("CARGO_PKG_VERSION"));

static GITHUB_REPO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"github\.com/(.+)").unwrap());

/// Code-search response body
#[derive(Debug, Clone, Deserialize)]
pub struct CodeSearchResponse {
    /// Total hits reported by the search
    pub total_count: u64,
    /// Candidate file hits
    pub items: Vec<SearchItem>,
}

/// One candidate file hit
#[derive(Debug, Clone, Deserialize)]
pub struct SearchItem {
    /// File base name
    pub name: String,
    /// Repository-relative path
    pub path: String,
    /// Browsable URL for the file
    pub html_url: String,
}

/// Performs a single code-search exchange
#[async_trait]
pub trait SearchClient {
    /// Issue one search request with the given query string
    async fn search_code(&self, query: &str) -> Result<CodeSearchResponse, TransportError>;
}

/// Search client backed by the GitHub REST API
pub struct GithubSearchClient {
    client: reqwest::Client,
}

impl GithubSearchClient {
    /// Creates a client with the default timeout
    pub fn new() -> Result<Self, TransportError> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Creates a client with a custom request timeout
    pub fn with_timeout(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| TransportError::new(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl SearchClient for GithubSearchClient {
    async fn search_code(&self, query: &str) -> Result<CodeSearchResponse, TransportError> {
        // The query uses literal `+` separators, which the search API expects
        // unencoded, so the URL is assembled by hand.
        let url = format!("{}?q={}", SEARCH_ENDPOINT, query);

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TransportError::new("search request timed out")
                } else {
                    TransportError::new(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(TransportError::new(format!(
                "search returned HTTP {}",
                response.status()
            )));
        }

        response
            .json::<CodeSearchResponse>()
            .await
            .map_err(|e| TransportError::new(format!("undecodable search response: {}", e)))
    }
}

/// Resolves one module to one authoritative changelog URL
pub struct ChangelogResolver<C> {
    client: C,
}

impl<C: SearchClient> ChangelogResolver<C> {
    /// Creates a resolver over the given search client
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Resolves the module's changelog URL, or a typed failure.
    ///
    /// Exactly one search request is issued. Among the results only an exact
    /// root-level `CHANGELOG.md` path is accepted; if several such hits were
    /// ever returned the first one wins.
    pub async fn resolve(&self, module: &ModuleUpdate) -> Result<String, ChangelogError> {
        let repo = repo_identity(&module.name)?;
        let query = format!("repo:{}+filename:{}", repo, CHANGELOG_FILENAME);

        let response = self
            .client
            .search_code(&query)
            .await
            .map_err(|source| ChangelogError::transport(&module.name, source))?;

        select_root_level(&response)
            .map(str::to_string)
            .ok_or_else(|| ChangelogError::not_found(&module.name))
    }
}

/// Derives the `owner/repo` search scope from a module path
fn repo_identity(name: &str) -> Result<&str, ChangelogError> {
    GITHUB_REPO_RE
        .captures(name)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| ChangelogError::unresolvable_identity(name))
}

/// Picks the first exact root-level changelog hit, if any
fn select_root_level(response: &CodeSearchResponse) -> Option<&str> {
    response
        .items
        .iter()
        .find(|item| item.path == CHANGELOG_FILENAME)
        .map(|item| item.html_url.as_str())
}
