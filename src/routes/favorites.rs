use axum::{
    Json, Router,
    extract::{Path, State},
    routing::post,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    middleware::auth::AuthUser,
    models::Favorite,
    response::ApiResponse,
    services::favorite_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/{restaurant_id}", post(add_favorite).delete(remove_favorite))
}

#[utoipa::path(
    post,
    path = "/api/favorite/{restaurant_id}",
    params(
        ("restaurant_id" = Uuid, Path, description = "Restaurant ID")
    ),
    responses(
        (status = 200, description = "Added to favorites", body = ApiResponse<Favorite>),
        (status = 404, description = "Restaurant didn't exist"),
        (status = 409, description = "Already favorited")
    ),
    security(("session_cookie" = []), ("bearer_auth" = [])),
    tag = "Favorites"
)]
pub async fn add_favorite(
    State(state): State<AppState>,
    user: AuthUser,
    Path(restaurant_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Favorite>>> {
    let resp = favorite_service::add_favorite(&state, &user, restaurant_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/favorite/{restaurant_id}",
    params(
        ("restaurant_id" = Uuid, Path, description = "Restaurant ID")
    ),
    responses(
        (status = 200, description = "Removed from favorites", body = ApiResponse<serde_json::Value>),
        (status = 404, description = "Not favorited")
    ),
    security(("session_cookie" = []), ("bearer_auth" = [])),
    tag = "Favorites"
)]
pub async fn remove_favorite(
    State(state): State<AppState>,
    user: AuthUser,
    Path(restaurant_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = favorite_service::remove_favorite(&state, &user, restaurant_id).await?;
    Ok(Json(resp))
}
