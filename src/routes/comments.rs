use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, post},
};
use uuid::Uuid;

use crate::{
    dto::comments::PostCommentRequest,
    error::AppResult,
    middleware::auth::AuthUser,
    models::Comment,
    response::ApiResponse,
    services::comment_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(post_comment))
        .route("/{id}", delete(delete_comment))
}

#[utoipa::path(
    post,
    path = "/api/comments",
    request_body = PostCommentRequest,
    responses(
        (status = 201, description = "Comment posted", body = ApiResponse<Comment>),
        (status = 400, description = "Comment text is required"),
        (status = 404, description = "Restaurant didn't exist")
    ),
    security(("session_cookie" = []), ("bearer_auth" = [])),
    tag = "Comments"
)]
pub async fn post_comment(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<PostCommentRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Comment>>)> {
    let resp = comment_service::post_comment(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    delete,
    path = "/api/comments/{id}",
    params(
        ("id" = Uuid, Path, description = "Comment ID")
    ),
    responses(
        (status = 200, description = "Comment deleted", body = ApiResponse<serde_json::Value>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Comment didn't exist")
    ),
    security(("session_cookie" = []), ("bearer_auth" = [])),
    tag = "Comments"
)]
pub async fn delete_comment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = comment_service::delete_comment(&state, &user, id).await?;
    Ok(Json(resp))
}
