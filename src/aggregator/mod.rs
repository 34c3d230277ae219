//! Pure transformation from the three boundary records to a snapshot.

mod calendar;
mod ranking;

pub use calendar::weekday_index;

use crate::records::{ContributionCalendar, RawRepo, RawUser};
use crate::snapshot::{DashboardSnapshot, DashboardStats, UserSummary};

/// Builds a snapshot. `current_year` selects the per-year total used for
/// `totalCommitsThisYear`; the caller supplies it so this reads no clock.
pub fn aggregate(
    user: &RawUser,
    repos: &[RawRepo],
    contrib: &ContributionCalendar,
    current_year: i32,
) -> DashboardSnapshot {
    let stats = DashboardStats {
        total_stars: repos.iter().map(|r| r.stars).sum(),
        total_forks: repos.iter().map(|r| r.forks).sum(),
        total_commits_this_year: commits_in_year(contrib, current_year),
        public_repos: user.public_repos,
    };

    DashboardSnapshot {
        user: summarize_user(user),
        stats,
        weekly_dist: calendar::weekly_distribution(&contrib.days),
        monthly_commits: calendar::monthly_rollup(&contrib.days),
        languages: ranking::rank_languages(repos),
        top_repos: ranking::rank_top_repos(repos),
        contributions: calendar::trim_recent(&contrib.days),
    }
}

fn commits_in_year(contrib: &ContributionCalendar, year: i32) -> u64 {
    contrib
        .totals_by_year
        .get(&year.to_string())
        .copied()
        .unwrap_or(0)
}

fn summarize_user(user: &RawUser) -> UserSummary {
    UserSummary {
        name: user.name.clone(),
        login: user.login.clone(),
        bio: user.bio.clone(),
        avatar: user.avatar_url.clone(),
        followers: user.followers,
        public_repos: user.public_repos,
        url: user.html_url.clone(),
    }
}
