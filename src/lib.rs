pub mod app;
pub mod calendar;
pub mod config;
pub mod date;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod praise;
pub mod state;
pub mod stats;
pub mod storage;
pub mod store;
pub mod streak;

pub use app::router;
pub use calendar::{CalendarCell, CellStatus, build_month};
pub use config::AppConfig;
pub use date::{CivilDate, Clock, FixedClock, SystemClock, YearMonth, normalize};
pub use praise::{MessagePicker, MilestoneResult, classify_praise, classify_praise_seeded};
pub use state::AppState;
pub use storage::load_data;
pub use store::RecordStore;
pub use streak::{StreakResult, compute_streaks};
