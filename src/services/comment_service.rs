use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait, ModelTrait, Set};
use uuid::Uuid;

use crate::{
    audit,
    dto::comments::PostCommentRequest,
    entity::comments::{self, Entity as Comments},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::Comment,
    response::{ApiResponse, Meta},
    services::restaurant_service::find_restaurant,
    state::AppState,
};

pub async fn post_comment(
    state: &AppState,
    user: &AuthUser,
    payload: PostCommentRequest,
) -> AppResult<ApiResponse<Comment>> {
    let text = payload.text.trim().to_string();
    if text.is_empty() {
        return Err(AppError::BadRequest("Comment text is required!".into()));
    }
    let restaurant = find_restaurant(state, payload.restaurant_id).await?;

    let comment = comments::ActiveModel {
        id: Set(Uuid::new_v4()),
        text: Set(text),
        user_id: Set(user.user_id),
        restaurant_id: Set(restaurant.id),
        created_at: Set(Utc::now().into()),
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        state,
        Some(user.user_id),
        "comment_create",
        "comments",
        serde_json::json!({ "comment_id": comment.id, "restaurant_id": restaurant.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Comment posted",
        Comment::from(comment),
        Some(Meta::empty()),
    ))
}

pub async fn delete_comment(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;
    let comment = Comments::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::NotFound("Comment didn't exist!".into()))?;

    comment.delete(&state.orm).await?;

    audit::record(
        state,
        Some(user.user_id),
        "comment_delete",
        "comments",
        serde_json::json!({ "comment_id": id }),
    )
    .await;

    Ok(ApiResponse::ack("Comment deleted"))
}
