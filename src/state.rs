use crate::date::Clock;
use crate::models::AppData;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub data: Arc<Mutex<AppData>>,
    pub clock: Arc<dyn Clock>,
    pub praise_seed: Option<u64>,
}

impl AppState {
    pub fn new(data_path: PathBuf, data: AppData, clock: Arc<dyn Clock>) -> Self {
        Self {
            data_path,
            data: Arc::new(Mutex::new(data)),
            clock,
            praise_seed: None,
        }
    }

    pub fn with_praise_seed(mut self, seed: Option<u64>) -> Self {
        self.praise_seed = seed;
        self
    }
}
