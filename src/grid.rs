//! Week-aligned contribution grid for calendar rendering.

use chrono::NaiveDate;
use serde::Serialize;

use crate::aggregator::weekday_index;
use crate::records::ContributionDay;

/// Intensity palette, lowest to highest.
pub const LEVEL_COLORS: [&str; 5] = ["#1a1a1a", "#2e2e2e", "#474747", "#6e6e6e", "#f5f5f5"];

pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Unknown levels render as the lowest intensity.
pub fn color_for_level(level: u32) -> &'static str {
    usize::try_from(level)
        .ok()
        .and_then(|idx| LEVEL_COLORS.get(idx))
        .copied()
        .unwrap_or(LEVEL_COLORS[0])
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridCell {
    pub date: Option<NaiveDate>,
    pub count: u32,
    pub level: u32,
    pub color: &'static str,
}

impl GridCell {
    fn padding() -> Self {
        Self {
            date: None,
            count: 0,
            level: 0,
            color: LEVEL_COLORS[0],
        }
    }
}

impl From<&ContributionDay> for GridCell {
    fn from(day: &ContributionDay) -> Self {
        Self {
            date: day.date,
            count: day.count,
            level: day.level,
            color: color_for_level(day.level),
        }
    }
}

pub type Week = Vec<GridCell>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContributionGrid {
    pub weekdays: [&'static str; 7],
    pub weeks: Vec<Week>,
}

impl ContributionGrid {
    pub fn from_days(days: &[ContributionDay]) -> Self {
        Self {
            weekdays: WEEKDAY_LABELS,
            weeks: build_grid(days),
        }
    }
}

/// Splits `days` (already chronological) into Sunday-first weeks.
///
/// Only the first week is padded, so the first day lands under its weekday.
/// The last week is left short when the series ends mid-week.
pub fn build_grid(days: &[ContributionDay]) -> Vec<Week> {
    let Some(first) = days.first() else {
        return vec![];
    };

    let pad = first.date.map_or(0, weekday_index);

    let cells: Vec<GridCell> = std::iter::repeat_with(GridCell::padding)
        .take(pad)
        .chain(days.iter().map(GridCell::from))
        .collect();

    cells.chunks(7).map(<[GridCell]>::to_vec).collect()
}
