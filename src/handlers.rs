use crate::calendar::build_month;
use crate::date::{YearMonth, normalize_str};
use crate::errors::{AppError, StoreError};
use crate::models::{
    CalendarQuery, CalendarResponse, DEFAULT_EXERCISE, ExerciseRecord, FamilyStatsResponse,
    NewRecord, RecordRequest, RecordResponse, StatsResponse, TodayQuery, TodayResponse, UserQuery,
};
use crate::praise::{ALREADY_RECORDED_MESSAGE, ALREADY_RECORDED_PRAISE, classify_praise_seeded};
use crate::state::AppState;
use crate::stats::{build_family_stats_at, build_stats_at};
use crate::storage::persist_data;
use crate::store::RecordStore;
use crate::streak::current_streak;
use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::SecondsFormat;
use tracing::{error, info};

pub async fn get_today(
    State(state): State<AppState>,
    Query(query): Query<TodayQuery>,
) -> Result<Json<TodayResponse>, AppError> {
    let date = state.clock.today();
    let recorded = match query.user_id {
        Some(user_id) => Some(state.data.lock().await.has_record_on(user_id, date)),
        None => None,
    };

    Ok(Json(TodayResponse { date, recorded }))
}

pub async fn get_records(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<Vec<ExerciseRecord>>, AppError> {
    let data = state.data.lock().await;
    Ok(Json(data.list_records(query.user_id)?))
}

pub async fn record(
    State(state): State<AppState>,
    Json(payload): Json<RecordRequest>,
) -> Result<Json<RecordResponse>, AppError> {
    let today = state.clock.today();
    let date = match payload.date.as_deref() {
        Some(raw) => normalize_str(raw, &state.clock.offset())?,
        None => today,
    };
    if date > today {
        return Err(AppError::bad_request("cannot record a future date"));
    }

    let exercise = payload
        .exercise
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty());
    let quick_record = exercise.is_none();
    let user_id = payload.user_id;

    let mut data = state.data.lock().await;
    // A quick record only says "I exercised today", so any record that day already covers it.
    if quick_record && data.has_record_on(user_id, date) {
        info!("user {user_id} already recorded {date}");
        return Ok(Json(already_recorded()));
    }

    let new_record = NewRecord {
        user_id,
        exercise: exercise.unwrap_or(DEFAULT_EXERCISE).to_string(),
        date,
        quick_record,
        notes: payload.notes.filter(|notes| !notes.trim().is_empty()),
        created_at: state.clock.now().to_rfc3339_opts(SecondsFormat::Secs, false),
    };
    let stored = match data.insert_record(new_record) {
        Ok(stored) => stored,
        Err(StoreError::Duplicate { exercise, .. }) => {
            info!("user {user_id} already recorded {exercise} on {date}");
            return Ok(Json(already_recorded()));
        }
        Err(err) => return Err(err.into()),
    };

    if let Err(err) = persist_data(&state.data_path, &data).await {
        error!("failed to persist record {}: {}", stored.id, err.message);
        if let Err(rollback) = data.delete_record(user_id, stored.id) {
            error!("failed to roll back record {}: {rollback}", stored.id);
        }
        return Err(err);
    }

    // Praise reads the snapshot that already includes the new record.
    let dates = data.list_record_dates(user_id)?;
    let total_records = data.count_total_records(user_id)?;
    drop(data);

    let streak = current_streak(&dates, date);
    let praise = classify_praise_seeded(streak, total_records, state.praise_seed);
    info!(
        "recorded {} for user {user_id} on {date} (streak {streak}, total {total_records})",
        stored.exercise
    );

    Ok(Json(RecordResponse {
        is_duplicate: false,
        record_id: Some(stored.id),
        message: None,
        praise: praise.message,
        praise_type: Some(praise.category),
        animation_type: Some(praise.animation),
        is_milestone: praise.is_milestone,
    }))
}

pub async fn delete_record(
    State(state): State<AppState>,
    Path(record_id): Path<u64>,
    Query(query): Query<UserQuery>,
) -> Result<Json<ExerciseRecord>, AppError> {
    let mut data = state.data.lock().await;
    let removed = data.delete_record(query.user_id, record_id)?;

    if let Err(err) = persist_data(&state.data_path, &data).await {
        error!("failed to persist removal of record {record_id}: {}", err.message);
        data.records.push(removed);
        return Err(err);
    }

    info!("deleted record {record_id} for user {}", query.user_id);
    Ok(Json(removed))
}

pub async fn get_stats(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<StatsResponse>, AppError> {
    let today = state.clock.today();
    let data = state.data.lock().await;
    Ok(Json(build_stats_at(today, &*data, query.user_id)?))
}

pub async fn get_family_stats(
    State(state): State<AppState>,
) -> Result<Json<FamilyStatsResponse>, AppError> {
    let today = state.clock.today();
    let data = state.data.lock().await;
    Ok(Json(build_family_stats_at(today, &data)))
}

pub async fn get_calendar(
    State(state): State<AppState>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<CalendarResponse>, AppError> {
    let today = state.clock.today();
    let month = match query.month.as_deref() {
        Some(raw) => raw.trim().parse::<YearMonth>()?,
        None => YearMonth::of(today),
    };

    let records_by_date = state
        .data
        .lock()
        .await
        .list_records_by_date(query.user_id, month)?;
    let days = build_month(month.year(), month.month(), &records_by_date, today)?;

    Ok(Json(CalendarResponse {
        month: month.to_string(),
        prev_month: month.prev().map(|m| m.to_string()),
        next_month: month.next().map(|m| m.to_string()),
        days,
    }))
}

fn already_recorded() -> RecordResponse {
    RecordResponse {
        is_duplicate: true,
        record_id: None,
        message: Some(ALREADY_RECORDED_MESSAGE.to_string()),
        praise: ALREADY_RECORDED_PRAISE.to_string(),
        praise_type: None,
        animation_type: None,
        is_milestone: false,
    }
}
