//! Wire shapes of the GitHub REST API and the contribution calendar API,
//! and their conversion into the validated records in [`crate::records`].
//!
//! Every field is optional and deserialized leniently: a field with the wrong
//! JSON type reads as absent instead of failing the whole response.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use log::warn;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::{DashError, Result};
use crate::records::{ContributionCalendar, ContributionDay, RawRepo, RawUser};

fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Counts may arrive as floats (`3.0`); they are truncated. Non-numbers read as absent.
fn lenient_number<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    #[allow(clippy::cast_possible_truncation)]
    let number = value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.is_finite())
            .map(|f| f.trunc() as i64)
    });

    if number.is_none() && !value.is_null() {
        warn!("Ignoring non-numeric count {value}");
    }

    Ok(number)
}

#[derive(Debug, Default, Deserialize)]
pub struct UserDto {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub login: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub bio: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub avatar_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub followers: Option<i64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub public_repos: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub html_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RepoDto {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub stargazers_count: Option<i64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub forks_count: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub language: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub html_url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DayDto {
    #[serde(default, deserialize_with = "lenient")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub count: Option<i64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub level: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CalendarDto {
    #[serde(default, deserialize_with = "lenient")]
    pub total: Option<HashMap<String, Value>>,
    #[serde(default, deserialize_with = "lenient")]
    pub contributions: Option<Vec<Value>>,
}

fn non_negative(value: Option<i64>) -> u64 {
    value.and_then(|v| u64::try_from(v).ok()).unwrap_or(0)
}

fn small_count(value: Option<i64>) -> u32 {
    value
        .map(|v| u32::try_from(v.max(0)).unwrap_or(u32::MAX))
        .unwrap_or(0)
}

/// Reads the calendar date at the start of `raw`; a trailing time part is ignored.
fn parse_day_date(raw: &str) -> Option<NaiveDate> {
    let date_part = raw.trim().get(..10)?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

impl From<UserDto> for RawUser {
    fn from(dto: UserDto) -> Self {
        let login = dto.login.unwrap_or_default();
        let name = dto
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| login.clone());

        Self {
            name,
            login,
            bio: dto.bio,
            avatar_url: dto.avatar_url.unwrap_or_default(),
            followers: non_negative(dto.followers),
            public_repos: non_negative(dto.public_repos),
            html_url: dto.html_url.unwrap_or_default(),
        }
    }
}

impl From<RepoDto> for RawRepo {
    fn from(dto: RepoDto) -> Self {
        Self {
            name: dto.name.unwrap_or_default(),
            stars: non_negative(dto.stargazers_count),
            forks: non_negative(dto.forks_count),
            language: dto.language.filter(|l| !l.is_empty()),
            html_url: dto.html_url.unwrap_or_default(),
            updated_at: dto.updated_at,
        }
    }
}

impl From<DayDto> for ContributionDay {
    fn from(dto: DayDto) -> Self {
        Self {
            date: dto.date.as_deref().and_then(parse_day_date),
            count: small_count(dto.count),
            level: small_count(dto.level),
        }
    }
}

fn expect_object(body: &Value, what: &str) -> Result<()> {
    if body.is_object() {
        Ok(())
    } else {
        Err(DashError::Api(format!("expected {what} to be a JSON object")))
    }
}

pub fn parse_user(body: Value) -> Result<RawUser> {
    expect_object(&body, "user profile")?;
    let dto: UserDto = serde_json::from_value(body)?;
    Ok(dto.into())
}

pub fn parse_repos(body: Value) -> Result<Vec<RawRepo>> {
    let Value::Array(items) = body else {
        return Err(DashError::Api(
            "expected repository list to be a JSON array".to_string(),
        ));
    };

    let total = items.len();
    let repos: Vec<RawRepo> = items
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|item| serde_json::from_value::<RepoDto>(item).ok())
        .map(RawRepo::from)
        .collect();

    if repos.len() < total {
        warn!(
            "Dropped {} malformed repository entries",
            total - repos.len()
        );
    }

    Ok(repos)
}

pub fn parse_calendar(body: Value) -> Result<ContributionCalendar> {
    expect_object(&body, "contribution calendar")?;
    let dto: CalendarDto = serde_json::from_value(body)?;

    let totals_by_year = dto
        .total
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(key, value)| value.as_u64().map(|total| (key, total)))
        .collect();

    let entries = dto.contributions.unwrap_or_default();
    let total = entries.len();
    let days: Vec<ContributionDay> = entries
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|item| serde_json::from_value::<DayDto>(item).ok())
        .map(ContributionDay::from)
        .collect();

    if days.len() < total {
        warn!("Dropped {} malformed contribution entries", total - days.len());
    }

    Ok(ContributionCalendar {
        totals_by_year,
        days,
    })
}
