//! Courier API Library
//!
//! HTTP surface of the attachment ingestion service: the upload handler, error
//! responses, telemetry and application setup.

pub mod error;
pub mod handlers;
pub mod setup;
pub mod state;
pub mod telemetry;

// Re-exports
pub use error::ErrorResponse;
pub use state::AppState;
