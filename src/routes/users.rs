use axum::{
    Json, Router,
    extract::{Multipart, Path, State},
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::users::{TopUserList, UpdateUserForm, UpdateUserRequest, UserProfile},
    error::AppResult,
    middleware::auth::AuthUser,
    models::User,
    response::ApiResponse,
    services::user_service,
    state::AppState,
    upload::MultipartForm,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/top", get(get_top_users))
        .route("/{id}", get(get_user).put(put_user))
        .route("/{id}/edit", get(edit_user))
}

#[utoipa::path(
    get,
    path = "/api/users/top",
    responses(
        (status = 200, description = "Users ranked by follower count", body = ApiResponse<TopUserList>)
    ),
    security(("session_cookie" = []), ("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn get_top_users(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<TopUserList>>> {
    let resp = user_service::get_top_users(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User profile", body = ApiResponse<UserProfile>),
        (status = 404, description = "User didn't exist")
    ),
    security(("session_cookie" = []), ("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn get_user(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<UserProfile>>> {
    let resp = user_service::get_user(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}/edit",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Editable user", body = ApiResponse<User>),
        (status = 403, description = "Not your profile"),
        (status = 404, description = "User didn't exist")
    ),
    security(("session_cookie" = []), ("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn edit_user(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<User>>> {
    let resp = user_service::edit_user(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    request_body(content = UpdateUserForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Profile updated", body = ApiResponse<User>),
        (status = 400, description = "User name is required or file is not an image"),
        (status = 403, description = "Not your profile"),
        (status = 404, description = "User didn't exist")
    ),
    security(("session_cookie" = []), ("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn put_user(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<User>>> {
    let mut form = MultipartForm::read(multipart).await?;
    let payload = UpdateUserRequest {
        name: form.text("name"),
        image: form.image.take(),
    };
    let resp = user_service::put_user(&state, &user, id, payload).await?;
    Ok(Json(resp))
}
