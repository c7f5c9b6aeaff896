use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::users::{TopUser, TopUserList, UpdateUserRequest, UserProfile},
    entity::{
        comments::{self, Entity as Comments},
        favorites::{self, Entity as Favorites},
        followships::{self, Entity as Followships},
        restaurants::{self, Entity as Restaurants},
        users::{self, Entity as Users},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{Restaurant, User},
    response::{ApiResponse, Meta},
    state::AppState,
    upload::save_image,
};

pub(crate) const USER_MISSING: &str = "User didn't exist!";

pub async fn get_user(state: &AppState, id: Uuid) -> AppResult<ApiResponse<UserProfile>> {
    let user = find_user(state, id).await?;

    let favorite_ids: Vec<Uuid> = Favorites::find()
        .select_only()
        .column(favorites::Column::RestaurantId)
        .filter(favorites::Column::UserId.eq(id))
        .order_by_desc(favorites::Column::CreatedAt)
        .into_tuple()
        .all(&state.orm)
        .await?;

    let following_ids: Vec<Uuid> = Followships::find()
        .select_only()
        .column(followships::Column::FollowingId)
        .filter(followships::Column::FollowerId.eq(id))
        .into_tuple()
        .all(&state.orm)
        .await?;

    let follower_ids: Vec<Uuid> = Followships::find()
        .select_only()
        .column(followships::Column::FollowerId)
        .filter(followships::Column::FollowingId.eq(id))
        .into_tuple()
        .all(&state.orm)
        .await?;

    let commented_ids: Vec<Uuid> = Comments::find()
        .select_only()
        .column(comments::Column::RestaurantId)
        .filter(comments::Column::UserId.eq(id))
        .distinct()
        .into_tuple()
        .all(&state.orm)
        .await?;

    let profile = UserProfile {
        user: User::from(user),
        favorited_restaurants: restaurants_in_order(state, &favorite_ids).await?,
        followings: users_by_ids(state, following_ids).await?,
        followers: users_by_ids(state, follower_ids).await?,
        commented_restaurants: restaurants_in_order(state, &commented_ids).await?,
    };

    Ok(ApiResponse::success("User", profile, Some(Meta::empty())))
}

pub async fn edit_user(
    state: &AppState,
    current: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<User>> {
    ensure_self(current, id)?;
    let user = find_user(state, id).await?;
    Ok(ApiResponse::success("User", User::from(user), Some(Meta::empty())))
}

pub async fn put_user(
    state: &AppState,
    current: &AuthUser,
    id: Uuid,
    payload: UpdateUserRequest,
) -> AppResult<ApiResponse<User>> {
    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::BadRequest("User name is required!".into()));
    }
    ensure_self(current, id)?;

    let existing = find_user(state, id).await?;
    let image = save_image(&state.config.upload_dir, payload.image).await?;

    let mut active: users::ActiveModel = existing.into();
    active.name = Set(name);
    if let Some(path) = image {
        active.image = Set(Some(path));
    }
    active.updated_at = Set(Utc::now().into());
    let user = active.update(&state.orm).await?;

    audit::record(
        state,
        Some(current.user_id),
        "user_update",
        "users",
        serde_json::json!({ "user_id": user.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Profile updated",
        User::from(user),
        Some(Meta::empty()),
    ))
}

/// Every user with its follower count, most followed first.
pub async fn get_top_users(
    state: &AppState,
    current: &AuthUser,
) -> AppResult<ApiResponse<TopUserList>> {
    let items = sqlx::query_as::<_, TopUser>(
        r#"
        SELECT u.id, u.name, u.email, u.image,
               COUNT(f.id) AS follower_count,
               EXISTS (
                   SELECT 1 FROM followships mine
                   WHERE mine.follower_id = $1 AND mine.following_id = u.id
               ) AS is_followed
        FROM users u
        LEFT JOIN followships f ON f.following_id = u.id
        GROUP BY u.id
        ORDER BY follower_count DESC, u.created_at ASC, u.id ASC
        "#,
    )
    .bind(current.user_id)
    .fetch_all(&state.pool)
    .await?;

    let data = TopUserList {
        items,
        current_user_id: current.user_id,
    };
    Ok(ApiResponse::success("Top users", data, Some(Meta::empty())))
}

pub(crate) async fn find_user(state: &AppState, id: Uuid) -> AppResult<users::Model> {
    Users::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::NotFound(USER_MISSING.into()))
}

fn ensure_self(current: &AuthUser, id: Uuid) -> AppResult<()> {
    if current.user_id != id {
        return Err(AppError::Forbidden);
    }
    Ok(())
}

async fn users_by_ids(state: &AppState, ids: Vec<Uuid>) -> AppResult<Vec<User>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let users = Users::find()
        .filter(users::Column::Id.is_in(ids))
        .order_by_asc(users::Column::Name)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(User::from)
        .collect();
    Ok(users)
}

/// Load restaurants keeping the order of `ids`.
async fn restaurants_in_order(state: &AppState, ids: &[Uuid]) -> AppResult<Vec<Restaurant>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let mut found = Restaurants::find()
        .filter(restaurants::Column::Id.is_in(ids.to_vec()))
        .all(&state.orm)
        .await?;
    let mut ordered = Vec::with_capacity(found.len());
    for id in ids {
        if let Some(pos) = found.iter().position(|r| r.id == *id) {
            ordered.push(Restaurant::from(found.swap_remove(pos)));
        }
    }
    Ok(ordered)
}
