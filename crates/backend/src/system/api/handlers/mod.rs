// Session handlers
pub mod auth;

// User handlers
pub mod users;
