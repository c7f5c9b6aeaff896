use std::collections::HashSet;

use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect};
use uuid::Uuid;

use crate::{
    dto::{
        comments::CommentWithUser,
        restaurants::{RestaurantDetail, RestaurantList, RestaurantSummary},
    },
    entity::{
        comments::{self, Entity as Comments},
        favorites::{self, Entity as Favorites},
        likes::{self, Entity as Likes},
        restaurants::{self, Entity as Restaurants},
        users::Entity as Users,
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{Comment, Restaurant, User},
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    state::AppState,
};

pub(crate) const RESTAURANT_MISSING: &str = "Restaurant didn't exist!";

pub async fn list_restaurants(
    state: &AppState,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<RestaurantList>> {
    let (page, limit, offset) = pagination.normalize();
    let finder = Restaurants::find().order_by_desc(restaurants::Column::CreatedAt);

    let total = finder.clone().count(&state.orm).await? as i64;
    let page_items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?;

    let ids: Vec<Uuid> = page_items.iter().map(|r| r.id).collect();
    let (favorited, liked) = tokio::try_join!(
        favorited_among(state, user.user_id, &ids),
        liked_among(state, user.user_id, &ids),
    )?;

    let items = page_items
        .into_iter()
        .map(|model| RestaurantSummary {
            is_favorited: favorited.contains(&model.id),
            is_liked: liked.contains(&model.id),
            restaurant: Restaurant::from(model),
        })
        .collect();

    Ok(ApiResponse::success(
        "Restaurants",
        RestaurantList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

pub async fn get_restaurant(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<RestaurantDetail>> {
    let restaurant = find_restaurant(state, id).await?;

    let comments = Comments::find()
        .filter(comments::Column::RestaurantId.eq(id))
        .find_also_related(Users)
        .order_by_desc(comments::Column::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|(comment, author)| CommentWithUser {
            comment: Comment::from(comment),
            user: author.map(User::from),
        })
        .collect();

    let favorite_count = Favorites::find()
        .filter(favorites::Column::RestaurantId.eq(id))
        .count(&state.orm)
        .await?;
    let like_count = Likes::find()
        .filter(likes::Column::RestaurantId.eq(id))
        .count(&state.orm)
        .await?;

    let ids = [id];
    let (favorited, liked) = tokio::try_join!(
        favorited_among(state, user.user_id, &ids),
        liked_among(state, user.user_id, &ids),
    )?;

    let detail = RestaurantDetail {
        restaurant: Restaurant::from(restaurant),
        comments,
        favorite_count,
        like_count,
        is_favorited: !favorited.is_empty(),
        is_liked: !liked.is_empty(),
    };
    Ok(ApiResponse::success("Restaurant", detail, Some(Meta::empty())))
}

pub(crate) async fn find_restaurant(state: &AppState, id: Uuid) -> AppResult<restaurants::Model> {
    Restaurants::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::NotFound(RESTAURANT_MISSING.into()))
}

async fn favorited_among(
    state: &AppState,
    user_id: Uuid,
    restaurant_ids: &[Uuid],
) -> AppResult<HashSet<Uuid>> {
    if restaurant_ids.is_empty() {
        return Ok(HashSet::new());
    }
    let ids: Vec<Uuid> = Favorites::find()
        .select_only()
        .column(favorites::Column::RestaurantId)
        .filter(favorites::Column::UserId.eq(user_id))
        .filter(favorites::Column::RestaurantId.is_in(restaurant_ids.to_vec()))
        .into_tuple()
        .all(&state.orm)
        .await?;
    Ok(ids.into_iter().collect())
}

async fn liked_among(
    state: &AppState,
    user_id: Uuid,
    restaurant_ids: &[Uuid],
) -> AppResult<HashSet<Uuid>> {
    if restaurant_ids.is_empty() {
        return Ok(HashSet::new());
    }
    let ids: Vec<Uuid> = Likes::find()
        .select_only()
        .column(likes::Column::RestaurantId)
        .filter(likes::Column::UserId.eq(user_id))
        .filter(likes::Column::RestaurantId.is_in(restaurant_ids.to_vec()))
        .into_tuple()
        .all(&state.orm)
        .await?;
    Ok(ids.into_iter().collect())
}
