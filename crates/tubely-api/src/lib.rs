//! Tubely API Library
//!
//! HTTP handlers, authentication, and application setup for the upload
//! service.

mod api_doc;
mod handlers;
mod middleware;
mod telemetry;
mod utils;

pub mod auth;
pub mod error;
pub mod setup;
pub mod state;

pub use api_doc::ApiDoc;
pub use error::{ErrorResponse, HttpAppError};
pub use state::AppState;
