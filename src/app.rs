use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/today", get(handlers::get_today))
        .route("/api/records", get(handlers::get_records))
        .route("/api/records/:id", delete(handlers::delete_record))
        .route("/api/record", post(handlers::record))
        .route("/api/stats", get(handlers::get_stats))
        .route("/api/family-stats", get(handlers::get_family_stats))
        .route("/api/calendar", get(handlers::get_calendar))
        .with_state(state)
}
