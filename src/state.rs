use crate::date::DateRange;
use crate::errors::AppError;
use crate::models::AppData;
use crate::storage::persist_data;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub data: Arc<Mutex<AppData>>,
    pub range: DateRange,
}

impl AppState {
    pub fn new(data_path: PathBuf, data: AppData, range: DateRange) -> Self {
        Self {
            data_path,
            data: Arc::new(Mutex::new(data)),
            range,
        }
    }

    pub async fn read<T>(&self, f: impl FnOnce(&AppData) -> T) -> T {
        let data = self.data.lock().await;
        f(&data)
    }

    /// Applies `f` to a copy of the state and swaps it in once the file is written.
    /// When `f` or the write fails, neither memory nor disk changes.
    pub async fn update<T, E>(&self, f: impl FnOnce(&mut AppData) -> Result<T, E>) -> Result<T, AppError>
    where
        AppError: From<E>,
    {
        let mut data = self.data.lock().await;
        let mut draft = data.clone();
        let value = f(&mut draft)?;
        persist_data(&self.data_path, &draft).await?;
        *data = draft;
        Ok(value)
    }
}
