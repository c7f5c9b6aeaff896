pub mod auth;
pub mod comments;
pub mod restaurants;
pub mod users;
