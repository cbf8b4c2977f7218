use crate::date::{CivilDate, is_consecutive};
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StreakResult {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub streak_dates: BTreeSet<CivilDate>,
}

pub fn compute_streaks(dates: &BTreeSet<CivilDate>, as_of: CivilDate) -> StreakResult {
    StreakResult {
        current_streak: current_streak(dates, as_of),
        longest_streak: longest_streak(dates),
        streak_dates: streak_dates(dates),
    }
}

/// Length of the run ending on `as_of`. A run that stopped yesterday is not current.
pub fn current_streak(dates: &BTreeSet<CivilDate>, as_of: CivilDate) -> u32 {
    if !dates.contains(&as_of) {
        return 0;
    }

    let mut streak = 1u32;
    let mut day = as_of;
    // Each step moves strictly backward, so the set size bounds the walk.
    for _ in 1..dates.len() {
        match day.pred() {
            Some(prev) if dates.contains(&prev) => {
                streak += 1;
                day = prev;
            }
            _ => break,
        }
    }
    streak
}

pub fn longest_streak(dates: &BTreeSet<CivilDate>) -> u32 {
    runs(dates).map(|run| run.len() as u32).max().unwrap_or(0)
}

/// Dates belonging to a run of two or more days. Lone days are never included.
pub fn streak_dates(dates: &BTreeSet<CivilDate>) -> BTreeSet<CivilDate> {
    runs(dates)
        .filter(|run| run.len() >= 2)
        .flatten()
        .collect()
}

/// Maximal runs of consecutive days, oldest first.
fn runs(dates: &BTreeSet<CivilDate>) -> impl Iterator<Item = Vec<CivilDate>> + '_ {
    let mut iter = dates.iter().copied().peekable();
    std::iter::from_fn(move || {
        let first = iter.next()?;
        let mut run = vec![first];
        while let Some(&next) = iter.peek() {
            let Some(&last) = run.last() else { break };
            if !is_consecutive(last, next) {
                break;
            }
            run.push(next);
            iter.next();
        }
        Some(run)
    })
}
