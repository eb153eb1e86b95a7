pub mod config;
pub mod content;
pub mod messages;
pub mod routes;
pub mod templates;

pub use config::{load_config, FileConfig};
pub use routes::{build_app, AppState};
