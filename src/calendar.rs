use crate::date::{CivilDate, YearMonth};
use crate::errors::DateError;
use crate::models::RecordSummary;
use crate::streak::streak_dates;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Six Sunday-first weeks, so the layout never changes height between months.
pub const GRID_CELLS: usize = 42;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CellStatus {
    None,
    Completed,
    MultipleCompleted,
    OtherMonth,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarCell {
    pub date: CivilDate,
    pub day_number: u32,
    pub in_current_month: bool,
    pub is_today: bool,
    pub record_count: usize,
    pub status: CellStatus,
    pub is_streak_day: bool,
    pub records: Vec<RecordSummary>,
}

/// First and last date shown by the month's grid. Months whose grid would
/// leave the representable date range are rejected.
pub fn grid_bounds(month: YearMonth) -> Result<(CivilDate, CivilDate), DateError> {
    let out_of_range = || DateError::InvalidDate {
        year: month.year(),
        month: month.month(),
        day: 1,
    };
    let first = month.first_day();
    let start = first
        .add_days(-i64::from(first.weekday_from_sunday()))
        .ok_or_else(out_of_range)?;
    let end = start
        .add_days(GRID_CELLS as i64 - 1)
        .ok_or_else(out_of_range)?;
    Ok((start, end))
}

/// Builds the 42-cell grid for `year`/`month`.
///
/// Streak membership comes from the keys of `records_by_date`, so the map
/// should reach one day past each grid edge for runs crossing it to be seen.
pub fn build_month(
    year: i32,
    month: u32,
    records_by_date: &BTreeMap<CivilDate, Vec<RecordSummary>>,
    today: CivilDate,
) -> Result<Vec<CalendarCell>, DateError> {
    let target = YearMonth::new(year, month)?;
    let recorded: BTreeSet<CivilDate> = records_by_date
        .iter()
        .filter(|(_, records)| !records.is_empty())
        .map(|(date, _)| *date)
        .collect();
    let streaks = streak_dates(&recorded);
    let (start, _) = grid_bounds(target)?;

    let cells = std::iter::successors(Some(start), |date| date.succ())
        .take(GRID_CELLS)
        .map(|date| {
            let records = records_by_date.get(&date).cloned().unwrap_or_default();
            let in_current_month = target.contains(date);
            let status = match records.len() {
                _ if !in_current_month => CellStatus::OtherMonth,
                0 => CellStatus::None,
                1 => CellStatus::Completed,
                _ => CellStatus::MultipleCompleted,
            };

            CalendarCell {
                date,
                day_number: date.day(),
                in_current_month,
                is_today: date == today,
                record_count: records.len(),
                status,
                is_streak_day: status == CellStatus::Completed && streaks.contains(&date),
                records,
            }
        })
        .collect();

    Ok(cells)
}
