use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{Comment, User};

#[derive(Debug, Deserialize, ToSchema)]
pub struct PostCommentRequest {
    pub restaurant_id: Uuid,
    pub text: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CommentWithUser {
    #[serde(flatten)]
    pub comment: Comment,
    pub user: Option<User>,
}
