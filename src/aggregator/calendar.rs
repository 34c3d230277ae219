use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::records::ContributionDay;
use crate::snapshot::MonthlyCount;

pub const MAX_MONTHS: usize = 12;
pub const CONTRIBUTION_WINDOW_DAYS: usize = 364;

/// Column of `date` in a Sunday-first week.
pub fn weekday_index(date: NaiveDate) -> usize {
    date.weekday().num_days_from_sunday() as usize
}

pub fn weekly_distribution(days: &[ContributionDay]) -> [u64; 7] {
    days.iter().fold([0; 7], |mut dist, day| {
        if let Some(date) = day.date {
            dist[weekday_index(date)] += u64::from(day.count);
        }
        dist
    })
}

/// Sums per calendar month, ascending, keeping the trailing `MAX_MONTHS` groups.
pub fn monthly_rollup(days: &[ContributionDay]) -> Vec<MonthlyCount> {
    let months = days
        .iter()
        .filter_map(|day| day.date.map(|date| ((date.year(), date.month()), day.count)))
        .fold(BTreeMap::new(), |mut acc, (key, count)| {
            *acc.entry(key).or_insert(0u64) += u64::from(count);
            acc
        });

    let skip = months.len().saturating_sub(MAX_MONTHS);

    months
        .into_iter()
        .skip(skip)
        .map(|((year, month), count)| MonthlyCount {
            month: month_label(year, month),
            count,
        })
        .collect()
}

fn month_label(year: i32, month: u32) -> String {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|first| first.format("%b").to_string())
        .unwrap_or_default()
}

pub fn trim_recent(days: &[ContributionDay]) -> Vec<ContributionDay> {
    let start = days.len().saturating_sub(CONTRIBUTION_WINDOW_DAYS);
    days[start..].to_vec()
}
