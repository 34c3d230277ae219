//! Validated records handed to the aggregator.
//!
//! These are produced from the wire DTOs in `providers::github::types`; every
//! field already carries its safe default, so nothing downstream has to deal
//! with partially-shaped JSON.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawUser {
    pub name: String,
    pub login: String,
    pub bio: Option<String>,
    pub avatar_url: String,
    pub followers: u64,
    pub public_repos: u64,
    pub html_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRepo {
    pub name: String,
    pub stars: u64,
    pub forks: u64,
    pub language: Option<String>,
    pub html_url: String,
    pub updated_at: Option<DateTime<Utc>>,
}

/// One calendar day. `date` is `None` when the source sent something that is
/// not a `YYYY-MM-DD` date; such days are kept in the series but never bucketed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionDay {
    pub date: Option<NaiveDate>,
    pub count: u32,
    pub level: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContributionCalendar {
    /// Yearly totals keyed the way the source keys them (`"2024"`, `"lastYear"`).
    pub totals_by_year: HashMap<String, u64>,
    pub days: Vec<ContributionDay>,
}

#[cfg(test)]
impl ContributionDay {
    pub fn new(date: NaiveDate, count: u32, level: u32) -> Self {
        Self {
            date: Some(date),
            count,
            level,
        }
    }
}
