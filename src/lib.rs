pub mod app;
pub mod calculator;
pub mod config;
pub mod date;
pub mod errors;
pub mod exercises;
pub mod handlers;
pub mod models;
pub mod nutrition;
pub mod prayers;
pub mod progress;
pub mod records;
pub mod state;
pub mod storage;
pub mod study;
pub mod tasks;
pub mod ui;
pub mod vocabulary;

pub use app::router;
pub use config::Config;
pub use state::AppState;
pub use storage::{load_data, resolve_data_path};
