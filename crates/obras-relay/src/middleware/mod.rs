//! HTTP middleware for the relay.

pub mod auth;
pub mod timing;

pub use auth::require_api_key;
pub use timing::timing_layer;
