pub mod analytics;
pub mod app;
pub mod auth;
pub mod cache;
pub mod dashboard;
pub mod dates;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod state;
pub mod storage;

pub use app::router;
pub use state::AppState;
pub use storage::{load_data, resolve_data_path};
