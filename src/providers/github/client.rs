use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use url::Url;

use crate::auth::Token;
use crate::error::{DashError, Result};

const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

pub struct GitHubClient {
    client: Client,
    api_url: Url,
    contributions_url: Url,
    token: Option<Token>,
}

impl GitHubClient {
    pub fn new(api_url: &str, contributions_url: &str, token: Option<Token>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("ghdash/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DashError::Config(format!("Failed to create HTTP client: {e}")))?;

        let api_url = Url::parse(api_url)
            .map_err(|e| DashError::Config(format!("Invalid GitHub API URL: {e}")))?;
        let contributions_url = Url::parse(contributions_url)
            .map_err(|e| DashError::Config(format!("Invalid contributions API URL: {e}")))?;

        Ok(Self {
            client,
            api_url,
            contributions_url,
            token,
        })
    }

    /// Only GitHub itself gets the token; the calendar API is a third party.
    fn github_request(&self, url: Url) -> RequestBuilder {
        let request = self.client.get(url).header(ACCEPT, GITHUB_ACCEPT);
        if let Some(token) = &self.token {
            request.bearer_auth(token.as_str())
        } else {
            request
        }
    }

    /// Appends path segments to `base`, percent-encoding each one.
    fn endpoint(base: &Url, segments: &[&str]) -> Result<Url> {
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|()| DashError::Config(format!("URL cannot be a base: {base}")))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json(request: RequestBuilder) -> Result<Value> {
        let response = request.send().await?.error_for_status()?;
        let body = response.json::<Value>().await?;
        Ok(body)
    }

    pub async fn fetch_user(&self, login: &str) -> Result<Value> {
        let url = Self::endpoint(&self.api_url, &["users", login])?;
        Self::get_json(self.github_request(url)).await
    }

    /// Most recently updated first.
    pub async fn fetch_repos(&self, login: &str, per_page: u32) -> Result<Value> {
        let url = Self::endpoint(&self.api_url, &["users", login, "repos"])?;
        let request = self
            .github_request(url)
            .query(&[("per_page", per_page.to_string().as_str()), ("sort", "updated")]);
        Self::get_json(request).await
    }

    /// `range` is passed through as the calendar API's `y` parameter
    /// (`last`, `all`, or a year).
    pub async fn fetch_calendar(&self, login: &str, range: &str) -> Result<Value> {
        let url = Self::endpoint(&self.contributions_url, &[login])?;
        let request = self.client.get(url).query(&[("y", range)]);
        Self::get_json(request).await
    }
}
