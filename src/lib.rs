//! Client library for the StayHub lodging marketplace API: typed models,
//! one HTTP call per action, an authentication session holder, a
//! deduplicating request cache, and pure pre-submit validation.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod geocoding;
pub mod models;
pub mod session;
pub mod validation;

pub use api::ApiClient;
pub use cache::RequestCache;
pub use config::AppConfig;
pub use error::{ApiError, ApiResult};
pub use session::Session;
