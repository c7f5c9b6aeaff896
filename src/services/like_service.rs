use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::{
    audit,
    entity::likes::{self, Entity as Likes},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::Like,
    response::{ApiResponse, Meta},
    services::restaurant_service::find_restaurant,
    state::AppState,
};

pub async fn add_like(
    state: &AppState,
    user: &AuthUser,
    restaurant_id: Uuid,
) -> AppResult<ApiResponse<Like>> {
    let (restaurant, existing) = tokio::try_join!(
        find_restaurant(state, restaurant_id),
        find_like(state, user.user_id, restaurant_id),
    )?;

    if existing.is_some() {
        return Err(AppError::Conflict(
            "You have liked this restaurant!".into(),
        ));
    }

    let like = likes::ActiveModel {
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
        "like_add",
        "likes",
        serde_json::json!({ "restaurant_id": restaurant_id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Liked",
        Like::from(like),
        Some(Meta::empty()),
    ))
}

pub async fn remove_like(
    state: &AppState,
    user: &AuthUser,
    restaurant_id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let like = find_like(state, user.user_id, restaurant_id)
        .await?
        .ok_or_else(|| AppError::NotFound("You haven't liked this restaurant!".into()))?;

    like.delete(&state.orm).await?;

    audit::record(
        state,
        Some(user.user_id),
        "like_remove",
        "likes",
        serde_json::json!({ "restaurant_id": restaurant_id }),
    )
    .await;

    Ok(ApiResponse::ack("Like removed"))
}

async fn find_like(
    state: &AppState,
    user_id: Uuid,
    restaurant_id: Uuid,
) -> AppResult<Option<likes::Model>> {
    let like = Likes::find()
        .filter(likes::Column::UserId.eq(user_id))
        .filter(likes::Column::RestaurantId.eq(restaurant_id))
        .one(&state.orm)
        .await?;
    Ok(like)
}
