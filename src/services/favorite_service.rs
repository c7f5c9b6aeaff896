use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::{
    audit,
    entity::favorites::{self, Entity as Favorites},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::Favorite,
    response::{ApiResponse, Meta},
    services::restaurant_service::find_restaurant,
    state::AppState,
};

pub async fn add_favorite(
    state: &AppState,
    user: &AuthUser,
    restaurant_id: Uuid,
) -> AppResult<ApiResponse<Favorite>> {
    let (restaurant, existing) = tokio::try_join!(
        find_restaurant(state, restaurant_id),
        find_favorite(state, user.user_id, restaurant_id),
    )?;

    if existing.is_some() {
        return Err(AppError::Conflict(
            "You have favorited this restaurant!".into(),
        ));
    }

    let favorite = favorites::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user.user_id),
        restaurant_id: Set(restaurant.id),
        created_at: Set(Utc::now().into()),
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        state,
        Some(user.user_id),
        "favorite_add",
        "favorites",
        serde_json::json!({ "restaurant_id": restaurant_id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Added to favorites",
        Favorite::from(favorite),
        Some(Meta::empty()),
    ))
}

pub async fn remove_favorite(
    state: &AppState,
    user: &AuthUser,
    restaurant_id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let favorite = find_favorite(state, user.user_id, restaurant_id)
        .await?
        .ok_or_else(|| AppError::NotFound("You haven't favorited this restaurant!".into()))?;

    favorite.delete(&state.orm).await?;

    audit::record(
        state,
        Some(user.user_id),
        "favorite_remove",
        "favorites",
        serde_json::json!({ "restaurant_id": restaurant_id }),
    )
    .await;

    Ok(ApiResponse::ack("Removed from favorites"))
}

async fn find_favorite(
    state: &AppState,
    user_id: Uuid,
    restaurant_id: Uuid,
) -> AppResult<Option<favorites::Model>> {
    let favorite = Favorites::find()
        .filter(favorites::Column::UserId.eq(user_id))
        .filter(favorites::Column::RestaurantId.eq(restaurant_id))
        .one(&state.orm)
        .await?;
    Ok(favorite)
}
