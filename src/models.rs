use crate::calendar::CalendarCell;
use crate::date::CivilDate;
use crate::praise::{Animation, PraiseCategory};
use serde::{Deserialize, Serialize};

pub const DEFAULT_EXERCISE: &str = "running";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExerciseRecord {
    pub id: u64,
    pub user_id: u64,
    pub exercise: String,
    pub date: CivilDate,
    #[serde(default)]
    pub quick_record: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: String,
}

/// What a calendar cell needs to know about one record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecordSummary {
    pub id: u64,
    pub exercise: String,
    pub created_at: String,
}

impl From<&ExerciseRecord> for RecordSummary {
    fn from(record: &ExerciseRecord) -> Self {
        Self {
            id: record.id,
            exercise: record.exercise.clone(),
            created_at: record.created_at.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewRecord {
    pub user_id: u64,
    pub exercise: String,
    pub date: CivilDate,
    pub quick_record: bool,
    pub notes: Option<String>,
    pub created_at: String,
}

/// Snapshot persisted to the data file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppData {
    #[serde(default)]
    pub next_id: u64,
    #[serde(default)]
    pub records: Vec<ExerciseRecord>,
}

#[derive(Debug, Deserialize)]
pub struct UserQuery {
    pub user_id: u64,
}

#[derive(Debug, Deserialize)]
pub struct TodayQuery {
    pub user_id: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    pub user_id: u64,
    pub month: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RecordRequest {
    pub user_id: u64,
    pub date: Option<String>,
    pub exercise: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TodayResponse {
    pub date: CivilDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recorded: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecordResponse {
    pub is_duplicate: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub praise: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub praise_type: Option<PraiseCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animation_type: Option<Animation>,
    pub is_milestone: bool,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatsResponse {
    pub total_records: u64,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub this_month_records: u64,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FamilyStatsResponse {
    pub total_family_records: u64,
    pub active_family_members: u64,
    pub family_records_today: u64,
}

#[derive(Debug, Serialize)]
pub struct CalendarResponse {
    pub month: String,
    pub prev_month: Option<String>,
    pub next_month: Option<String>,
    pub days: Vec<CalendarCell>,
}
