// ABOUTME: HTTP middleware for authentication and cross-origin access
// ABOUTME: Bearer token authentication and CORS layer construction

/// Bearer token authentication
pub mod auth;
/// CORS layer configuration
pub mod cors;

pub use auth::{AuthenticatedUser, RequestAuthenticator};
pub use cors::setup_cors;
