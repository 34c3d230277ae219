use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::records::ContributionDay;

/// Message carried by [`ErrorPayload`] whenever a snapshot could not be built.
pub const FETCH_FAILURE_MESSAGE: &str = "Failed to fetch GitHub data";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub user: UserSummary,
    pub stats: DashboardStats,
    /// Contribution sums indexed Sunday = 0 .. Saturday = 6.
    pub weekly_dist: [u64; 7],
    pub monthly_commits: Vec<MonthlyCount>,
    pub languages: Vec<LanguageCount>,
    pub top_repos: Vec<RepoSummary>,
    pub contributions: Vec<ContributionDay>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub name: String,
    pub login: String,
    pub bio: Option<String>,
    pub avatar: String,
    pub followers: u64,
    pub public_repos: u64,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_stars: u64,
    pub total_forks: u64,
    pub total_commits_this_year: u64,
    pub public_repos: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyCount {
    pub month: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageCount {
    pub lang: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoSummary {
    pub name: String,
    pub stars: u64,
    pub forks: u64,
    pub language: Option<String>,
    pub url: String,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Flat failure body returned instead of a partial snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub error: String,
}

impl ErrorPayload {
    pub fn fetch_failure() -> Self {
        Self {
            error: FETCH_FAILURE_MESSAGE.to_string(),
        }
    }
}
