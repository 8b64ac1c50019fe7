//! Data-fetching core of the browser client: form submission, ticker
//! search, prediction retrieval and the polling quote panels.

pub mod api;
pub mod config;
pub mod error;
pub mod format;
pub mod forms;
pub mod models;
pub mod route;
pub mod screens;
pub mod theme;

pub use api::{AuthApi, HttpAuthApi, HttpPredictionApi, PredictionApi};
pub use config::ClientConfig;
pub use error::ClientError;
pub use route::Route;
pub use theme::{Theme, ThemeStore};
