use axum::{
    Json, Router,
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    routing::{get, patch},
};
use uuid::Uuid;

use crate::{
    dto::{
        restaurants::{AdminRestaurantList, RestaurantForm, RestaurantInput},
        users::UserList,
    },
    error::AppResult,
    middleware::auth::AuthUser,
    models::{Restaurant, User},
    response::ApiResponse,
    routes::params::Pagination,
    services::admin_service,
    state::AppState,
    upload::MultipartForm,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/restaurants", get(get_restaurants).post(post_restaurant))
        .route(
            "/restaurants/{id}",
            get(get_restaurant).put(put_restaurant).delete(delete_restaurant),
        )
        .route("/users", get(get_users))
        .route("/users/{id}", patch(patch_user))
}

#[utoipa::path(
    get,
    path = "/api/admin/restaurants",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20")
    ),
    responses(
        (status = 200, description = "All restaurants (admin only)", body = ApiResponse<AdminRestaurantList>),
        (status = 403, description = "Forbidden")
    ),
    security(("session_cookie" = []), ("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn get_restaurants(
    State(state): State<AppState>,
    user: AuthUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<AdminRestaurantList>>> {
    let resp = admin_service::get_restaurants(&state, &user, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/restaurants/{id}",
    params(
        ("id" = Uuid, Path, description = "Restaurant ID")
    ),
    responses(
        (status = 200, description = "Restaurant (admin only)", body = ApiResponse<Restaurant>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Restaurant didn't exist")
    ),
    security(("session_cookie" = []), ("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn get_restaurant(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Restaurant>>> {
    let resp = admin_service::get_restaurant(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/restaurants",
    request_body(content = RestaurantForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Restaurant created", body = ApiResponse<Restaurant>),
        (status = 400, description = "Restaurant name is required or file is not an image"),
        (status = 403, description = "Forbidden")
    ),
    security(("session_cookie" = []), ("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn post_restaurant(
    State(state): State<AppState>,
    user: AuthUser,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<ApiResponse<Restaurant>>)> {
    let form = MultipartForm::read(multipart).await?;
    let resp = admin_service::post_restaurant(&state, &user, RestaurantInput::from(form)).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/admin/restaurants/{id}",
    params(
        ("id" = Uuid, Path, description = "Restaurant ID")
    ),
    request_body(content = RestaurantForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Restaurant updated", body = ApiResponse<Restaurant>),
        (status = 400, description = "Restaurant name is required or file is not an image"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Restaurant didn't exist")
    ),
    security(("session_cookie" = []), ("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn put_restaurant(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<Restaurant>>> {
    let form = MultipartForm::read(multipart).await?;
    let resp =
        admin_service::put_restaurant(&state, &user, id, RestaurantInput::from(form)).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/admin/restaurants/{id}",
    params(
        ("id" = Uuid, Path, description = "Restaurant ID")
    ),
    responses(
        (status = 200, description = "Restaurant deleted", body = ApiResponse<serde_json::Value>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Restaurant didn't exist")
    ),
    security(("session_cookie" = []), ("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_restaurant(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = admin_service::delete_restaurant(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/users",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20")
    ),
    responses(
        (status = 200, description = "All users (admin only)", body = ApiResponse<UserList>),
        (status = 403, description = "Forbidden")
    ),
    security(("session_cookie" = []), ("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn get_users(
    State(state): State<AppState>,
    user: AuthUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<UserList>>> {
    let resp = admin_service::get_users(&state, &user, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/admin/users/{id}",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Role toggled between user and admin", body = ApiResponse<User>),
        (status = 400, description = "Root admin cannot be changed"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "User didn't exist")
    ),
    security(("session_cookie" = []), ("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn patch_user(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<User>>> {
    let resp = admin_service::patch_user(&state, &user, id).await?;
    Ok(Json(resp))
}
