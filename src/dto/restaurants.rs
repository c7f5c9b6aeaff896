use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    dto::comments::CommentWithUser,
    models::Restaurant,
    upload::{ImageUpload, MultipartForm},
};

/// Fields shared by restaurant create and update.
#[derive(Debug)]
pub struct RestaurantInput {
    pub name: String,
    pub tel: String,
    pub address: String,
    pub opening_hours: String,
    pub description: Option<String>,
    pub image: Option<ImageUpload>,
}

impl From<MultipartForm> for RestaurantInput {
    fn from(mut form: MultipartForm) -> Self {
        Self {
            name: form.text("name"),
            tel: form.text("tel"),
            address: form.text("address"),
            opening_hours: form.text("opening_hours"),
            description: form.optional_text("description"),
            image: form.image.take(),
        }
    }
}

/// Multipart body accepted by the admin restaurant create/update routes.
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct RestaurantForm {
    pub name: String,
    pub tel: Option<String>,
    pub address: Option<String>,
    pub opening_hours: Option<String>,
    pub description: Option<String>,
    #[schema(value_type = Option<String>, format = Binary)]
    pub image: Option<Vec<u8>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RestaurantSummary {
    #[serde(flatten)]
    pub restaurant: Restaurant,
    pub is_favorited: bool,
    pub is_liked: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RestaurantList {
    pub items: Vec<RestaurantSummary>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RestaurantDetail {
    pub restaurant: Restaurant,
    pub comments: Vec<CommentWithUser>,
    pub favorite_count: u64,
    pub like_count: u64,
    pub is_favorited: bool,
    pub is_liked: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AdminRestaurantList {
    pub items: Vec<Restaurant>,
}
