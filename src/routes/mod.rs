use axum::Router;

use crate::state::AppState;

pub mod admin;
pub mod auth;
pub mod comments;
pub mod doc;
pub mod favorites;
pub mod follows;
pub mod health;
pub mod likes;
pub mod params;
pub mod restaurants;
pub mod users;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .nest("/restaurants", restaurants::router())
        .nest("/comments", comments::router())
        .nest("/users", users::router())
        .nest("/favorite", favorites::router())
        .nest("/like", likes::router())
        .nest("/following", follows::router())
        .nest("/admin", admin::router())
}
