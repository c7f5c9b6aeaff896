use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::{
    audit,
    entity::followships::{self, Entity as Followships},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::Followship,
    response::{ApiResponse, Meta},
    services::user_service::find_user,
    state::AppState,
};

pub async fn add_following(
    state: &AppState,
    user: &AuthUser,
    following_id: Uuid,
) -> AppResult<ApiResponse<Followship>> {
    let (target, existing) = tokio::try_join!(
        find_user(state, following_id),
        find_followship(state, user.user_id, following_id),
    )?;

    if target.id == user.user_id {
        return Err(AppError::BadRequest("You can't follow yourself!".into()));
    }
    if existing.is_some() {
        return Err(AppError::Conflict(
            "You are already following this user!".into(),
        ));
    }

    let followship = followships::ActiveModel {
        id: Set(Uuid::new_v4()),
        follower_id: Set(user.user_id),
        following_id: Set(target.id),
        created_at: Set(Utc::now().into()),
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        state,
        Some(user.user_id),
        "following_add",
        "followships",
        serde_json::json!({ "following_id": following_id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Followed",
        Followship::from(followship),
        Some(Meta::empty()),
    ))
}

pub async fn remove_following(
    state: &AppState,
    user: &AuthUser,
    following_id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let followship = find_followship(state, user.user_id, following_id)
        .await?
        .ok_or_else(|| AppError::NotFound("You haven't followed this user!".into()))?;

    followship.delete(&state.orm).await?;

    audit::record(
        state,
        Some(user.user_id),
        "following_remove",
        "followships",
        serde_json::json!({ "following_id": following_id }),
    )
    .await;

    Ok(ApiResponse::ack("Unfollowed"))
}

async fn find_followship(
    state: &AppState,
    follower_id: Uuid,
    following_id: Uuid,
) -> AppResult<Option<followships::Model>> {
    let followship = Followships::find()
        .filter(followships::Column::FollowerId.eq(follower_id))
        .filter(followships::Column::FollowingId.eq(following_id))
        .one(&state.orm)
        .await?;
    Ok(followship)
}
