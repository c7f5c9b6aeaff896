use axum::{
    Json, Router,
    extract::{Path, State},
    routing::post,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    middleware::auth::AuthUser,
    models::Followship,
    response::ApiResponse,
    services::follow_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/{user_id}", post(add_following).delete(remove_following))
}

#[utoipa::path(
    post,
    path = "/api/following/{user_id}",
    params(
        ("user_id" = Uuid, Path, description = "User to follow")
    ),
    responses(
        (status = 200, description = "Followed", body = ApiResponse<Followship>),
        (status = 400, description = "Cannot follow yourself"),
        (status = 404, description = "User didn't exist"),
        (status = 409, description = "Already following")
    ),
    security(("session_cookie" = []), ("bearer_auth" = [])),
    tag = "Followships"
)]
pub async fn add_following(
    State(state): State<AppState>,
    user: AuthUser,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Followship>>> {
    let resp = follow_service::add_following(&state, &user, user_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/following/{user_id}",
    params(
        ("user_id" = Uuid, Path, description = "User to unfollow")
    ),
    responses(
        (status = 200, description = "Unfollowed", body = ApiResponse<serde_json::Value>),
        (status = 404, description = "Not following")
    ),
    security(("session_cookie" = []), ("bearer_auth" = [])),
    tag = "Followships"
)]
pub async fn remove_following(
    State(state): State<AppState>,
    user: AuthUser,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = follow_service::remove_following(&state, &user, user_id).await?;
    Ok(Json(resp))
}
