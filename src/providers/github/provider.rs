use chrono::{Datelike, Utc};
use futures::future::try_join3;
use log::{info, warn};

use super::client::GitHubClient;
use super::types::{parse_calendar, parse_repos, parse_user};
use crate::aggregator::aggregate;
use crate::auth::Token;
use crate::error::{DashError, Result};
use crate::records::{ContributionCalendar, RawRepo, RawUser};
use crate::snapshot::DashboardSnapshot;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_CONTRIBUTIONS_URL: &str = "https://github-contributions-api.jogruber.de/v4";
pub const DEFAULT_CALENDAR_RANGE: &str = "last";
pub const DEFAULT_PER_PAGE: u32 = 100;

#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub per_page: u32,
    pub calendar_range: String,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            per_page: DEFAULT_PER_PAGE,
            calendar_range: DEFAULT_CALENDAR_RANGE.to_string(),
        }
    }
}

/// The three feeds of one snapshot build, all present or none.
#[derive(Debug)]
pub struct RawSources {
    pub user: RawUser,
    pub repos: Vec<RawRepo>,
    pub calendar: ContributionCalendar,
}

pub struct GitHubProvider {
    client: GitHubClient,
    login: String,
    options: FetchOptions,
}

impl GitHubProvider {
    pub fn new(
        api_url: &str,
        contributions_url: &str,
        login: String,
        token: Option<Token>,
        options: FetchOptions,
    ) -> Result<Self> {
        if login.trim().is_empty() {
            return Err(DashError::Config("GitHub login must not be empty".to_string()));
        }

        let client = GitHubClient::new(api_url, contributions_url, token)?;

        Ok(Self {
            client,
            login,
            options,
        })
    }

    async fn fetch_user(&self) -> Result<RawUser> {
        self.client
            .fetch_user(&self.login)
            .await
            .and_then(parse_user)
            .map_err(|e| DashError::upstream("user profile", e))
    }

    async fn fetch_repos(&self) -> Result<Vec<RawRepo>> {
        self.client
            .fetch_repos(&self.login, self.options.per_page)
            .await
            .and_then(parse_repos)
            .map_err(|e| DashError::upstream("repositories", e))
    }

    async fn fetch_calendar(&self) -> Result<ContributionCalendar> {
        self.client
            .fetch_calendar(&self.login, &self.options.calendar_range)
            .await
            .and_then(parse_calendar)
            .map_err(|e| DashError::upstream("contribution calendar", e))
    }

    /// Fetches all three feeds concurrently; the first failure aborts the rest.
    pub async fn fetch_sources(&self) -> Result<RawSources> {
        info!("Fetching profile, repositories and calendar for {}", self.login);

        let (user, repos, calendar) =
            try_join3(self.fetch_user(), self.fetch_repos(), self.fetch_calendar()).await?;

        info!(
            "Fetched {} repositories and {} contribution days",
            repos.len(),
            calendar.days.len()
        );

        if repos.is_empty() {
            warn!("No repositories found for {}", self.login);
        }
        if calendar.days.is_empty() {
            warn!("Contribution calendar for {} has no days", self.login);
        }

        Ok(RawSources {
            user,
            repos,
            calendar,
        })
    }

    pub async fn collect_snapshot(&self) -> Result<DashboardSnapshot> {
        let sources = self.fetch_sources().await?;
        let current_year = Utc::now().year();

        Ok(aggregate(
            &sources.user,
            &sources.repos,
            &sources.calendar,
            current_year,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Mock, ServerGuard};

    const USER_BODY: &str = r#"{
        "login": "octocat",
        "name": "The Octocat",
        "bio": "hello",
        "avatar_url": "https://avatars.example/u/1",
        "followers": 12,
        "public_repos": 3,
        "html_url": "https://github.com/octocat"
    }"#;

    const REPOS_BODY: &str = r#"[
        {"name": "five", "stargazers_count": 5, "forks_count": 1, "language": "Go",
         "html_url": "https://github.com/octocat/five", "updated_at": "2024-05-01T00:00:00Z"},
        {"name": "twelve", "stargazers_count": 12, "forks_count": 2, "language": "Go",
         "html_url": "https://github.com/octocat/twelve", "updated_at": "2024-04-01T00:00:00Z"},
        {"name": "one", "stargazers_count": 1, "forks_count": 0, "language": null,
         "html_url": "https://github.com/octocat/one", "updated_at": "2024-03-01T00:00:00Z"}
    ]"#;

    const CALENDAR_BODY: &str = r#"{
        "total": {"lastYear": 9},
        "contributions": [
            {"date": "2024-01-07", "count": 4, "level": 2},
            {"date": "2024-01-08", "count": 5, "level": 3}
        ]
    }"#;

    async fn mock_user(server: &mut ServerGuard, status: usize, body: &str) -> Mock {
        server
            .mock("GET", "/users/octocat")
            .with_status(status)
            .with_body(body)
            .create_async()
            .await
    }

    async fn mock_repos(server: &mut ServerGuard, status: usize, body: &str) -> Mock {
        server
            .mock("GET", "/users/octocat/repos")
            .match_query(Matcher::Any)
            .with_status(status)
            .with_body(body)
            .create_async()
            .await
    }

    async fn mock_calendar(server: &mut ServerGuard, status: usize, body: &str) -> Mock {
        server
            .mock("GET", "/octocat")
            .match_query(Matcher::Any)
            .with_status(status)
            .with_body(body)
            .create_async()
            .await
    }

    fn provider(server: &ServerGuard) -> GitHubProvider {
        GitHubProvider::new(
            &server.url(),
            &server.url(),
            "octocat".to_string(),
            None,
            FetchOptions::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_new_rejects_empty_login() {
        let result = GitHubProvider::new(
            DEFAULT_API_URL,
            DEFAULT_CONTRIBUTIONS_URL,
            "  ".to_string(),
            None,
            FetchOptions::default(),
        );

        assert!(matches!(result, Err(DashError::Config(_))));
    }

    #[tokio::test]
    async fn test_collect_snapshot_from_all_sources() {
        let mut server = mockito::Server::new_async().await;
        let user = mock_user(&mut server, 200, USER_BODY).await;
        let repos = mock_repos(&mut server, 200, REPOS_BODY).await;
        let calendar = mock_calendar(&mut server, 200, CALENDAR_BODY).await;

        let snapshot = provider(&server).collect_snapshot().await.unwrap();

        user.assert_async().await;
        repos.assert_async().await;
        calendar.assert_async().await;
        assert_eq!(snapshot.user.login, "octocat");
        assert_eq!(snapshot.stats.total_stars, 18);
        assert_eq!(snapshot.stats.total_forks, 3);
        assert_eq!(snapshot.stats.public_repos, 3);
        assert_eq!(snapshot.languages.len(), 1);
        assert_eq!(snapshot.top_repos[0].name, "twelve");
        assert_eq!(snapshot.weekly_dist, [4, 5, 0, 0, 0, 0, 0]);
        assert_eq!(snapshot.contributions.len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_sources_fails_when_one_source_fails() {
        let mut server = mockito::Server::new_async().await;
        let _user = mock_user(&mut server, 200, USER_BODY).await;
        let _repos = mock_repos(&mut server, 500, "oops").await;
        let _calendar = mock_calendar(&mut server, 200, CALENDAR_BODY).await;

        let result = provider(&server).fetch_sources().await;

        match result {
            Err(DashError::Upstream { feed, .. }) => assert_eq!(feed, "repositories"),
            other => panic!("expected upstream failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_sources_fails_on_unparsable_calendar() {
        let mut server = mockito::Server::new_async().await;
        let _user = mock_user(&mut server, 200, USER_BODY).await;
        let _repos = mock_repos(&mut server, 200, REPOS_BODY).await;
        let _calendar = mock_calendar(&mut server, 200, "not json").await;

        let result = provider(&server).collect_snapshot().await;

        assert!(matches!(
            result,
            Err(DashError::Upstream {
                feed: "contribution calendar",
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_fetch_sources_fails_on_wrong_repo_shape() {
        let mut server = mockito::Server::new_async().await;
        let _user = mock_user(&mut server, 200, USER_BODY).await;
        let _repos = mock_repos(&mut server, 200, r#"{"message":"Bad credentials"}"#).await;
        let _calendar = mock_calendar(&mut server, 200, CALENDAR_BODY).await;

        assert!(provider(&server).fetch_sources().await.is_err());
    }

    #[tokio::test]
    async fn test_calendar_without_days_still_builds() {
        let mut server = mockito::Server::new_async().await;
        let _user = mock_user(&mut server, 200, USER_BODY).await;
        let _repos = mock_repos(&mut server, 200, "[]").await;
        let _calendar = mock_calendar(&mut server, 200, r#"{"total":{}}"#).await;

        let snapshot = provider(&server).collect_snapshot().await.unwrap();

        assert_eq!(snapshot.stats.total_stars, 0);
        assert_eq!(snapshot.stats.total_commits_this_year, 0);
        assert_eq!(snapshot.weekly_dist, [0; 7]);
        assert!(snapshot.contributions.is_empty());
    }
}
