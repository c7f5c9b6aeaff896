use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::restaurants::{RestaurantDetail, RestaurantList},
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    routes::params::Pagination,
    services::restaurant_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_restaurants))
        .route("/{id}", get(get_restaurant))
}

#[utoipa::path(
    get,
    path = "/api/restaurants",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20")
    ),
    responses(
        (status = 200, description = "List restaurants", body = ApiResponse<RestaurantList>),
        (status = 401, description = "Not signed in")
    ),
    security(("session_cookie" = []), ("bearer_auth" = [])),
    tag = "Restaurants"
)]
pub async fn list_restaurants(
    State(state): State<AppState>,
    user: AuthUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<RestaurantList>>> {
    let resp = restaurant_service::list_restaurants(&state, &user, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/restaurants/{id}",
    params(
        ("id" = Uuid, Path, description = "Restaurant ID")
    ),
    responses(
        (status = 200, description = "Restaurant with comments", body = ApiResponse<RestaurantDetail>),
        (status = 404, description = "Restaurant didn't exist")
    ),
    security(("session_cookie" = []), ("bearer_auth" = [])),
    tag = "Restaurants"
)]
pub async fn get_restaurant(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<RestaurantDetail>>> {
    let resp = restaurant_service::get_restaurant(&state, &user, id).await?;
    Ok(Json(resp))
}
