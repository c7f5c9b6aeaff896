use axum::{
    Json, Router,
    extract::{Path, State},
    routing::post,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    middleware::auth::AuthUser,
    models::Like,
    response::ApiResponse,
    services::like_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/{restaurant_id}", post(add_like).delete(remove_like))
}

#[utoipa::path(
    post,
    path = "/api/like/{restaurant_id}",
    params(
        ("restaurant_id" = Uuid, Path, description = "Restaurant ID")
    ),
    responses(
        (status = 200, description = "Liked", body = ApiResponse<Like>),
        (status = 404, description = "Restaurant didn't exist"),
        (status = 409, description = "Already liked")
    ),
    security(("session_cookie" = []), ("bearer_auth" = [])),
    tag = "Likes"
)]
pub async fn add_like(
    State(state): State<AppState>,
    user: AuthUser,
    Path(restaurant_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Like>>> {
    let resp = like_service::add_like(&state, &user, restaurant_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/like/{restaurant_id}",
    params(
        ("restaurant_id" = Uuid, Path, description = "Restaurant ID")
    ),
    responses(
        (status = 200, description = "Like removed", body = ApiResponse<serde_json::Value>),
        (status = 404, description = "Not liked")
    ),
    security(("session_cookie" = []), ("bearer_auth" = [])),
    tag = "Likes"
)]
pub async fn remove_like(
    State(state): State<AppState>,
    user: AuthUser,
    Path(restaurant_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = like_service::remove_like(&state, &user, restaurant_id).await?;
    Ok(Json(resp))
}
