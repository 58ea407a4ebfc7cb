//! Calendar heatmap over daily activity.
//!
//! The grid ends on the most recent Saturday on or before today and covers
//! `weeks` whole weeks. Rows are weeks (newest first), columns are days.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use std::collections::HashMap;

use lazyvibe_core::{ActivityMetric, DailyActivity};

pub const MIN_WEEKS: usize = 4;
pub const MAX_WEEKS: usize = 12;

/// Number of week rows that fit a panel of `height` rows.
pub fn weeks_for_height(height: u16) -> usize {
    (i32::from(height) - 10).clamp(MIN_WEEKS as i32, MAX_WEEKS as i32) as usize
}

/// Most recent Saturday on or before `today`.
pub fn grid_end(today: NaiveDate) -> NaiveDate {
    let back = (today.weekday().num_days_from_sunday() + 1) % 7;
    today - Duration::days(i64::from(back))
}

/// Intensity level 0..=3 for `value` against `max`.
pub fn bucket(value: i64, max: i64) -> u8 {
    if value <= 0 || max <= 0 {
        return 0;
    }
    let ratio = value as f64 / max as f64;
    if ratio < 0.25 {
        1
    } else if ratio < 0.5 {
        2
    } else {
        3
    }
}

fn weekday_label(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Mo",
        Weekday::Tue => "Tu",
        Weekday::Wed => "We",
        Weekday::Thu => "Th",
        Weekday::Fri => "Fr",
        Weekday::Sat => "Sa",
        Weekday::Sun => "Su",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub date: NaiveDate,
    pub value: i64,
    pub level: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Week {
    pub month_label: Option<String>,
    pub cells: Vec<Cell>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub total: i64,
    pub per_day: i64,
    pub max: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heatmap {
    pub weekday_labels: Vec<&'static str>,
    pub weeks: Vec<Week>,
    /// `None` when the filtered set has no days.
    pub summary: Option<Summary>,
}

/// Build the grid for `days` (already filtered to the time range).
pub fn build(days: &[DailyActivity], metric: ActivityMetric, today: NaiveDate, weeks: usize) -> Heatmap {
    let weeks = weeks.max(1);
    let end = grid_end(today);
    let start = end - Duration::days((7 * weeks - 1) as i64);

    let values: HashMap<NaiveDate, i64> = days.iter().map(|d| (d.date, metric.value(d))).collect();
    let max = days.iter().map(|d| metric.value(d)).max().unwrap_or(0);

    let weekday_labels = (0..7)
        .map(|i| weekday_label((start + Duration::days(i)).weekday()))
        .collect();

    let mut rows = Vec::with_capacity(weeks);
    let mut last_month: Option<u32> = None;
    for w in (0..weeks).rev() {
        let week_start = start + Duration::days((w * 7) as i64);
        let month_label = if last_month != Some(week_start.month()) {
            last_month = Some(week_start.month());
            Some(week_start.format("%b").to_string())
        } else {
            None
        };

        let cells = (0..7)
            .map(|d| {
                let date = week_start + Duration::days(d);
                let value = values.get(&date).copied().unwrap_or(0);
                Cell {
                    date,
                    value,
                    level: bucket(value, max),
                }
            })
            .collect();

        rows.push(Week { month_label, cells });
    }

    let summary = (!days.is_empty()).then(|| {
        let total: i64 = days.iter().map(|d| metric.value(d)).sum();
        Summary {
            total,
            per_day: total / days.len() as i64,
            max,
        }
    });

    Heatmap {
        weekday_labels,
        weeks: rows,
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_bucket_thresholds() {
        assert_eq!(bucket(0, 100), 0);
        assert_eq!(bucket(10, 100), 1);
        assert_eq!(bucket(25, 100), 2);
        assert_eq!(bucket(50, 100), 3);
        assert_eq!(bucket(100, 100), 3);
        assert_eq!(bucket(5, 0), 0);
    }

    #[test]
    fn test_weeks_for_height() {
        assert_eq!(weeks_for_height(8), MIN_WEEKS);
        assert_eq!(weeks_for_height(17), 7);
        assert_eq!(weeks_for_height(60), MAX_WEEKS);
    }

    #[test]
    fn test_grid_end_is_saturday_on_or_before() {
        // 2024-06-15 is a Saturday
        assert_eq!(grid_end(date(2024, 6, 15)), date(2024, 6, 15));
        assert_eq!(grid_end(date(2024, 6, 16)), date(2024, 6, 15));
        assert_eq!(grid_end(date(2024, 6, 21)), date(2024, 6, 15));
    }

    #[test]
    fn test_grid_shape_and_values() {
        let days = vec![
            DailyActivity::new(date(2024, 6, 14), 100, 2, 10),
            DailyActivity::new(date(2024, 5, 20), 20, 1, 0),
        ];
        let map = build(&days, ActivityMetric::Messages, date(2024, 6, 17), 4);

        assert_eq!(map.weekday_labels, vec!["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"]);
        assert_eq!(map.weeks.len(), 4);
        assert!(map.weeks.iter().all(|w| w.cells.len() == 7));

        let newest = &map.weeks[0];
        assert_eq!(newest.cells[0].date, date(2024, 6, 9));
        assert_eq!(newest.cells[5].value, 100);
        assert_eq!(newest.cells[5].level, 3);

        let oldest = &map.weeks[3];
        assert_eq!(oldest.cells[0].date, date(2024, 5, 19));
        assert_eq!(oldest.cells[1].level, 1);

        assert_eq!(
            map.summary,
            Some(Summary {
                total: 120,
                per_day: 60,
                max: 100
            })
        );
    }

    #[test]
    fn test_month_labels_only_on_change() {
        let map = build(&[], ActivityMetric::Sessions, date(2024, 6, 17), 4);
        let labels: Vec<Option<&str>> = map.weeks.iter().map(|w| w.month_label.as_deref()).collect();
        // Week starts: Jun 9, Jun 2, May 26, May 19
        assert_eq!(labels, vec![Some("Jun"), None, Some("May"), None]);
        assert_eq!(map.summary, None);
    }
}
