//! GitHub Provider Implementation
//!
//! Lists the default branch of a repository through the git trees API and
//! fetches individual files through the contents API.
//!
//! # Examples
//!
//! ```no_run
//! use devglossary_github::{GitHubConfig, GitHubProvider};
//!
//! let provider = GitHubProvider::new(GitHubConfig::default()).expect("client");
//! ```

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use devglossary_domain::{EntryKind, ProviderError, RepoId, RepositoryProvider, TreeEntry};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Default REST API base URL
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Default timeout for REST requests (seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const USER_AGENT_VALUE: &str = "DevGlossary/1.0";

/// Connection settings for the GitHub REST API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubConfig {
    /// API base URL (override for GitHub Enterprise)
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Optional personal access token
    #[serde(default, skip_serializing)]
    pub token: Option<String>,

    /// Request timeout (seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// GitHub REST v3 repository provider
pub struct GitHubProvider {
    base: Url,
    client: reqwest::Client,
}

#[derive(Deserialize)]
struct RepoResponse {
    default_branch: String,
}

#[derive(Deserialize)]
struct TreeResponse {
    tree: Vec<TreeItem>,
    #[serde(default)]
    truncated: bool,
}

#[derive(Deserialize)]
struct TreeItem {
    path: String,
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Deserialize)]
struct ContentResponse {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    encoding: Option<String>,
    #[serde(default)]
    content: Option<String>,
}

impl GitHubProvider {
    /// Create a new provider
    ///
    /// # Errors
    ///
    /// Returns error if the base URL is invalid, the token is not a valid
    /// header value, or the HTTP client cannot be constructed
    pub fn new(config: GitHubConfig) -> Result<Self, ProviderError> {
        let base = Url::parse(&config.api_base)
            .map_err(|e| ProviderError::Other(format!("invalid API base '{}': {}", config.api_base, e)))?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github.v3+json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        if let Some(token) = config.token.as_deref().filter(|t| !t.trim().is_empty()) {
            let value = HeaderValue::from_str(&format!("token {}", token.trim()))
                .map_err(|_| ProviderError::Other("invalid GitHub token".to_string()))?;
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ProviderError::Other(format!("failed to build client: {}", e)))?;

        Ok(Self { base, client })
    }

    /// Build an API URL from path segments, percent-encoding each one
    fn url<'a, I>(&self, segments: I) -> Result<Url, ProviderError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ProviderError::Other(format!("API base '{}' cannot hold a path", self.base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Recursive tree URL; a branch such as `release/v1` keeps its slashes
    fn tree_url(&self, repo: &RepoId, branch: &str) -> Result<Url, ProviderError> {
        let mut url = self.url(
            ["repos", repo.owner.as_str(), repo.repo.as_str(), "git", "trees"]
                .into_iter()
                .chain(branch.split('/')),
        )?;
        url.query_pairs_mut().append_pair("recursive", "1");
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, what: &str) -> Result<T, ProviderError> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ProviderError::Other(format!("request for {} failed: {}", what, e)))?;

        let status = response.status();
        if !status.is_success() {
            let remaining = response
                .headers()
                .get("x-ratelimit-remaining")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            return Err(classify_status(status, remaining.as_deref(), what));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ProviderError::Other(format!("invalid response for {}: {}", what, e)))
    }

    async fn default_branch(&self, repo: &RepoId) -> Result<String, ProviderError> {
        let url = self.url(["repos", repo.owner.as_str(), repo.repo.as_str()])?;
        let data: RepoResponse = self.get_json(url, &repo.to_string()).await?;
        Ok(data.default_branch)
    }
}

#[async_trait]
impl RepositoryProvider for GitHubProvider {
    async fn list_tree(&self, repo: &RepoId) -> Result<Vec<TreeEntry>, ProviderError> {
        let branch = self.default_branch(repo).await?;

        let url = self.tree_url(repo, &branch)?;
        let data: TreeResponse = self.get_json(url, &format!("{}@{}", repo, branch)).await?;
        if data.truncated {
            warn!("Tree listing for {} was truncated by the API", repo);
        }

        Ok(data
            .tree
            .into_iter()
            .map(|item| TreeEntry {
                kind: EntryKind::from_git_type(&item.kind),
                path: item.path,
            })
            .collect())
    }

    async fn file_content(&self, repo: &RepoId, path: &str) -> Result<String, ProviderError> {
        let url = self.url(
            ["repos", repo.owner.as_str(), repo.repo.as_str(), "contents"]
                .into_iter()
                .chain(path.split('/')),
        )?;

        let data: ContentResponse = self.get_json(url, path).await?;
        file_text(path, data)
    }
}

/// Map a non-success status to the provider error taxonomy
fn classify_status(status: StatusCode, ratelimit_remaining: Option<&str>, what: &str) -> ProviderError {
    match status {
        StatusCode::NOT_FOUND => ProviderError::NotFound(what.to_string()),
        StatusCode::TOO_MANY_REQUESTS => ProviderError::RateLimited(what.to_string()),
        StatusCode::FORBIDDEN if ratelimit_remaining == Some("0") => {
            ProviderError::RateLimited(what.to_string())
        }
        _ => ProviderError::Other(format!("GitHub API error {} for {}", status, what)),
    }
}

/// Extract the text of a contents payload
///
/// Files over 1 MB come back with `encoding: "none"` and no content, and
/// empty files carry no content either; neither has text to analyze.
fn file_text(path: &str, data: ContentResponse) -> Result<String, ProviderError> {
    if data.kind != "file" {
        return Err(ProviderError::NotFound(format!("{} is not a regular file", path)));
    }

    match (data.encoding.as_deref(), data.content.as_deref()) {
        (Some("base64"), Some(encoded)) if !encoded.trim().is_empty() => decode_content(encoded),
        (Some("base64"), _) => Err(ProviderError::Decode(format!("{} has no content", path))),
        (encoding, _) => Err(ProviderError::Decode(format!(
            "{} is not available inline (encoding: {})",
            path,
            encoding.unwrap_or("missing")
        ))),
    }
}

/// Decode a base64 contents payload (GitHub wraps it at 60 columns)
fn decode_content(encoded: &str) -> Result<String, ProviderError> {
    let compact: String = encoded.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = STANDARD
        .decode(compact)
        .map_err(|e| ProviderError::Decode(format!("invalid base64: {}", e)))?;
    String::from_utf8(bytes).map_err(|_| ProviderError::Decode("content is not UTF-8 text".to_string()))
}
