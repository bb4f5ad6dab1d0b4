/// Password hashing, session tokens and login extractors
pub mod auth;
/// Domain error to HTTP response mapping
pub mod error_handling;
