//! Studybuddy gateway: the HTTP surface over chat providers, web search
//! and runtime settings.

pub mod config;
mod error;
pub mod routes;
pub mod serve;
pub mod state;
pub mod utils;

pub use config::GatewayConfig;
pub use error::ApiError;
pub use serve::{ServeHandle, serve, serve_with_config};
pub use state::AppState;
