pub mod admin_service;
pub mod auth_service;
pub mod comment_service;
pub mod favorite_service;
pub mod follow_service;
pub mod like_service;
pub mod restaurant_service;
pub mod user_service;
