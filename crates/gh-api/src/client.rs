//! HTTP client for the GitHub REST API.

use async_trait::async_trait;
use reqwest::{header, Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::config::ApiConfig;
use crate::credentials::Token;
use crate::models::{
    Issue, NewIssue, NewRepository, RepoName, RepoPage, RepoVisibility, Repository,
};
use crate::service::HostingService;
use crate::{Error, Result};

const API_VERSION_HEADER: &str = "x-github-api-version";
const API_VERSION: &str = "2022-11-28";
const MAX_PER_PAGE: u32 = 100;

/// GitHub REST client.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    config: ApiConfig,
}

impl GitHubClient {
    /// Create a client from the given configuration.
    pub fn new(config: ApiConfig) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            header::HeaderName::from_static(API_VERSION_HEADER),
            header::HeaderValue::from_static(API_VERSION),
        );

        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .build()?;

        Ok(Self { http, config })
    }

    /// Whether a credential was configured.
    pub fn is_authenticated(&self) -> bool {
        self.config.token.is_some()
    }

    fn token(&self) -> Result<&Token> {
        self.config.token.as_ref().ok_or(Error::Unauthenticated)
    }

    /// Join `path` onto the base URL, keeping any path prefix the base has
    /// (GitHub Enterprise serves the API under `/api/v3`).
    fn build_url(&self, path: &str) -> Result<Url> {
        let base = self.config.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{}/{}", base, path.trim_start_matches('/')))?)
    }

    /// Authenticate and send a request, mapping non-2xx statuses to errors.
    async fn execute(&self, request: RequestBuilder) -> Result<Response> {
        let token = self.token()?;
        let response = request.bearer_auth(token.expose()).send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        debug!(status = status.as_u16(), %body, "GitHub request failed");
        Err(Error::from_response(status.as_u16(), &body))
    }

    /// Authenticate, send, and decode a request.
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        Ok(self.execute(request).await?.json().await?)
    }

    fn repos_request(&self, visibility: RepoVisibility, per_page: u32) -> Result<RequestBuilder> {
        let url = self.build_url("/user/repos")?;
        Ok(self.http.get(url).query(&[
            ("type", visibility.as_str().to_string()),
            ("per_page", per_page.to_string()),
            ("sort", "updated".to_string()),
        ]))
    }

    /// Number of repositories matching `visibility`.
    ///
    /// Requests one repository per page so the `rel="last"` link names the
    /// total. Without a `Link` header everything fit on the single page.
    async fn count_repos(&self, visibility: RepoVisibility) -> Result<u64> {
        let response = self.execute(self.repos_request(visibility, 1)?).await?;
        let last_page = response
            .headers()
            .get(header::LINK)
            .and_then(|value| value.to_str().ok())
            .and_then(last_page);

        match last_page {
            Some(total) => Ok(total),
            None => {
                let page: Vec<serde_json::Value> = response.json().await?;
                Ok(page.len() as u64)
            }
        }
    }
}

/// Page number of the `rel="last"` entry in a GitHub `Link` header.
fn last_page(link: &str) -> Option<u64> {
    link.split(',').find_map(|entry| {
        let (target, params) = entry.split_once(';')?;
        if !params.split(';').any(|p| p.trim() == r#"rel="last""#) {
            return None;
        }
        let target = target.trim().strip_prefix('<')?.strip_suffix('>')?;
        Url::parse(target)
            .ok()?
            .query_pairs()
            .find(|(key, _)| key == "page")
            .and_then(|(_, page)| page.parse().ok())
    })
}

#[async_trait]
impl HostingService for GitHubClient {
    async fn create_repo(&self, repo: &NewRepository) -> Result<Repository> {
        let url = self.build_url("/user/repos")?;
        debug!(%url, name = %repo.name, "POST create repository");
        self.send(self.http.post(url).json(repo)).await
    }

    async fn create_issue(&self, repo: &RepoName, issue: &NewIssue) -> Result<Issue> {
        let url = self.build_url(&format!("/repos/{}/{}/issues", repo.owner, repo.name))?;
        debug!(%url, title = %issue.title, "POST create issue");
        self.send(self.http.post(url).json(issue)).await
    }

    async fn list_repos(&self, visibility: RepoVisibility, limit: u32) -> Result<RepoPage> {
        let per_page = limit.clamp(1, MAX_PER_PAGE);
        debug!(%visibility, per_page, "GET list repositories");

        let mut repos: Vec<Repository> = self.send(self.repos_request(visibility, per_page)?).await?;
        repos.truncate(per_page as usize);

        // A short first page is the whole listing.
        let total = if repos.len() < per_page as usize {
            repos.len() as u64
        } else {
            self.count_repos(visibility).await?
        };

        Ok(RepoPage { repos, total })
    }

    async fn get_repo(&self, repo: &RepoName) -> Result<Repository> {
        let url = self.build_url(&format!("/repos/{}/{}", repo.owner, repo.name))?;
        debug!(%url, "GET repository");
        self.send(self.http.get(url)).await
    }
}
