//! HTTP middleware

mod auth;

pub use auth::Auth;
