use crate::date::{CivilDate, YearMonth};
use crate::errors::StoreError;
use crate::models::{AppData, FamilyStatsResponse, StatsResponse};
use crate::store::RecordStore;
use crate::streak::{current_streak, longest_streak};
use std::collections::BTreeSet;

pub fn build_stats_at(
    today: CivilDate,
    store: &impl RecordStore,
    user_id: u64,
) -> Result<StatsResponse, StoreError> {
    let dates = store.list_record_dates(user_id)?;
    let month = YearMonth::of(today);
    let this_month_records = store
        .list_records_by_date(user_id, month)?
        .iter()
        .filter(|(date, _)| month.contains(**date))
        .map(|(_, records)| records.len() as u64)
        .sum();

    Ok(StatsResponse {
        total_records: store.count_total_records(user_id)?,
        current_streak: current_streak(&dates, today),
        longest_streak: longest_streak(&dates),
        this_month_records,
    })
}

pub fn build_family_stats_at(today: CivilDate, data: &AppData) -> FamilyStatsResponse {
    let month = YearMonth::of(today);
    let active: BTreeSet<u64> = data
        .records
        .iter()
        .filter(|r| month.contains(r.date))
        .map(|r| r.user_id)
        .collect();

    FamilyStatsResponse {
        total_family_records: data.records.len() as u64,
        active_family_members: active.len() as u64,
        family_records_today: data.records.iter().filter(|r| r.date == today).count() as u64,
    }
}
