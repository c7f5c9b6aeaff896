use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    models::{Restaurant, User},
    upload::ImageUpload,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct UserProfile {
    pub user: User,
    pub favorited_restaurants: Vec<Restaurant>,
    pub followings: Vec<User>,
    pub followers: Vec<User>,
    /// Each restaurant appears once however many comments the user left on it.
    pub commented_restaurants: Vec<Restaurant>,
}

#[derive(Debug)]
pub struct UpdateUserRequest {
    pub name: String,
    pub image: Option<ImageUpload>,
}

/// Multipart body accepted by `PUT /api/users/{id}`.
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct UpdateUserForm {
    pub name: String,
    #[schema(value_type = Option<String>, format = Binary)]
    pub image: Option<Vec<u8>>,
}

#[derive(Debug, Serialize, ToSchema, sqlx::FromRow)]
pub struct TopUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub image: Option<String>,
    pub follower_count: i64,
    pub is_followed: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TopUserList {
    pub items: Vec<TopUser>,
    pub current_user_id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserList {
    pub items: Vec<User>,
}
