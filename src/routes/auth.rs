use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, header::SET_COOKIE},
    response::{AppendHeaders, IntoResponse},
    routing::post,
};

use crate::{
    dto::auth::{SignInRequest, SignInResponse, SignUpRequest},
    error::AppResult,
    middleware::auth::{expired_session_cookie, session_cookie},
    models::User,
    response::ApiResponse,
    services::auth_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(sign_up))
        .route("/signin", post(sign_in))
        .route("/logout", post(logout))
}

#[utoipa::path(
    post,
    path = "/api/signup",
    request_body = SignUpRequest,
    responses(
        (status = 201, description = "Account created", body = ApiResponse<User>),
        (status = 400, description = "Missing fields or passwords do not match"),
        (status = 409, description = "Email already exists")
    ),
    tag = "Auth"
)]
pub async fn sign_up(
    State(state): State<AppState>,
    Json(payload): Json<SignUpRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<User>>)> {
    let resp = auth_service::sign_up(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    post,
    path = "/api/signin",
    request_body = SignInRequest,
    responses(
        (status = 200, description = "Signed in; the session cookie is set", body = ApiResponse<SignInResponse>),
        (status = 401, description = "Incorrect email or password")
    ),
    tag = "Auth"
)]
pub async fn sign_in(
    State(state): State<AppState>,
    Json(payload): Json<SignInRequest>,
) -> AppResult<impl IntoResponse> {
    let resp = auth_service::sign_in(&state, payload).await?;
    let max_age = state.config.token_ttl_hours.saturating_mul(3600);
    let cookie = match resp.data.as_ref() {
        Some(data) => session_cookie(&data.token, max_age)?,
        None => expired_session_cookie(),
    };
    Ok((AppendHeaders([(SET_COOKIE, cookie)]), Json(resp)))
}

#[utoipa::path(
    post,
    path = "/api/logout",
    responses(
        (status = 200, description = "Session cookie cleared", body = ApiResponse<serde_json::Value>)
    ),
    tag = "Auth"
)]
pub async fn logout() -> impl IntoResponse {
    (
        AppendHeaders([(SET_COOKIE, expired_session_cookie())]),
        Json(ApiResponse::ack("Logged out")),
    )
}
