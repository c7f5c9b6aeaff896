use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait, QueryOrder, QuerySelect, Set};
use uuid::Uuid;

use crate::{
    audit,
    dto::{
        restaurants::{AdminRestaurantList, RestaurantInput},
        users::UserList,
    },
    entity::{
        restaurants::{self, Entity as Restaurants},
        users::{self, Entity as Users},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::{ROLE_ADMIN, ROLE_USER, Restaurant, User},
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    services::{
        restaurant_service::{RESTAURANT_MISSING, find_restaurant},
        user_service::find_user,
    },
    state::AppState,
    upload::save_image,
};

pub async fn get_restaurants(
    state: &AppState,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<AdminRestaurantList>> {
    ensure_admin(user)?;
    let (page, limit, offset) = pagination.normalize();
    let finder = Restaurants::find().order_by_desc(restaurants::Column::CreatedAt);

    let total = finder.clone().count(&state.orm).await? as i64;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Restaurant::from)
        .collect();

    Ok(ApiResponse::success(
        "Restaurants",
        AdminRestaurantList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

pub async fn get_restaurant(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<Restaurant>> {
    ensure_admin(user)?;
    let restaurant = find_restaurant(state, id).await?;
    Ok(ApiResponse::success(
        "Restaurant",
        Restaurant::from(restaurant),
        Some(Meta::empty()),
    ))
}

pub async fn post_restaurant(
    state: &AppState,
    user: &AuthUser,
    payload: RestaurantInput,
) -> AppResult<ApiResponse<Restaurant>> {
    ensure_admin(user)?;
    let name = required_name(&payload)?;
    let image = save_image(&state.config.upload_dir, payload.image).await?;

    let now = Utc::now();
    let restaurant = restaurants::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name),
        tel: Set(payload.tel.trim().to_string()),
        address: Set(payload.address.trim().to_string()),
        opening_hours: Set(payload.opening_hours.trim().to_string()),
        description: Set(payload.description),
        image: Set(image),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(restaurant_id = %restaurant.id, "restaurant created");
    audit::record(
        state,
        Some(user.user_id),
        "restaurant_create",
        "restaurants",
        serde_json::json!({ "restaurant_id": restaurant.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Restaurant was successfully created",
        Restaurant::from(restaurant),
        Some(Meta::empty()),
    ))
}

pub async fn put_restaurant(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: RestaurantInput,
) -> AppResult<ApiResponse<Restaurant>> {
    ensure_admin(user)?;
    let name = required_name(&payload)?;
    let existing = find_restaurant(state, id).await?;
    let image = save_image(&state.config.upload_dir, payload.image).await?;

    let mut active: restaurants::ActiveModel = existing.into();
    active.name = Set(name);
    active.tel = Set(payload.tel.trim().to_string());
    active.address = Set(payload.address.trim().to_string());
    active.opening_hours = Set(payload.opening_hours.trim().to_string());
    active.description = Set(payload.description);
    if let Some(path) = image {
        active.image = Set(Some(path));
    }
    active.updated_at = Set(Utc::now().into());
    let restaurant = active.update(&state.orm).await?;

    audit::record(
        state,
        Some(user.user_id),
        "restaurant_update",
        "restaurants",
        serde_json::json!({ "restaurant_id": restaurant.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Restaurant was successfully updated",
        Restaurant::from(restaurant),
        Some(Meta::empty()),
    ))
}

pub async fn delete_restaurant(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;
    let result = Restaurants::delete_by_id(id).exec(&state.orm).await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound(RESTAURANT_MISSING.into()));
    }

    audit::record(
        state,
        Some(user.user_id),
        "restaurant_delete",
        "restaurants",
        serde_json::json!({ "restaurant_id": id }),
    )
    .await;

    Ok(ApiResponse::ack("Restaurant was successfully deleted"))
}

pub async fn get_users(
    state: &AppState,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<UserList>> {
    ensure_admin(user)?;
    let (page, limit, offset) = pagination.normalize();
    let finder = Users::find().order_by_asc(users::Column::CreatedAt);

    let total = finder.clone().count(&state.orm).await? as i64;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(User::from)
        .collect();

    Ok(ApiResponse::success(
        "Users",
        UserList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

/// Flip a user between the admin and regular roles.
pub async fn patch_user(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<User>> {
    ensure_admin(user)?;
    let target = find_user(state, id).await?;

    if target.email.eq_ignore_ascii_case(&state.config.root_admin_email) {
        return Err(AppError::BadRequest(
            "Cannot change the root admin's role!".into(),
        ));
    }

    let role = toggled_role(&target.role);
    let mut active: users::ActiveModel = target.into();
    active.role = Set(role.to_string());
    active.updated_at = Set(Utc::now().into());
    let updated = active.update(&state.orm).await?;

    tracing::info!(user_id = %updated.id, role, "user role changed");
    audit::record(
        state,
        Some(user.user_id),
        "user_role_update",
        "users",
        serde_json::json!({ "user_id": updated.id, "role": role }),
    )
    .await;

    Ok(ApiResponse::success(
        "User role was successfully updated",
        User::from(updated),
        Some(Meta::empty()),
    ))
}

fn toggled_role(role: &str) -> &'static str {
    if role == ROLE_ADMIN { ROLE_USER } else { ROLE_ADMIN }
}

fn required_name(payload: &RestaurantInput) -> AppResult<String> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("Restaurant name is required!".into()));
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_toggles_both_ways() {
        assert_eq!(toggled_role(ROLE_ADMIN), ROLE_USER);
        assert_eq!(toggled_role(ROLE_USER), ROLE_ADMIN);
    }

    #[test]
    fn blank_restaurant_name_is_rejected() {
        let input = RestaurantInput {
            name: "   ".into(),
            tel: String::new(),
            address: String::new(),
            opening_hours: String::new(),
            description: None,
            image: None,
        };
        let err = required_name(&input).unwrap_err();
        assert_eq!(err.to_string(), "Restaurant name is required!");
    }
}
