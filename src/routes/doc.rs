use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{SignInRequest, SignInResponse, SignUpRequest},
        comments::{CommentWithUser, PostCommentRequest},
        restaurants::{
            AdminRestaurantList, RestaurantDetail, RestaurantForm, RestaurantList,
            RestaurantSummary,
        },
        users::{TopUser, TopUserList, UpdateUserForm, UserList, UserProfile},
    },
    middleware::auth::SESSION_COOKIE,
    models::{Comment, Favorite, Followship, Like, Restaurant, User},
    response::{ApiResponse, Meta},
    routes::{
        admin, auth, comments, favorites, follows, health, likes, params, restaurants, users,
    },
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
        components.add_security_scheme(
            "session_cookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(SESSION_COOKIE))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::sign_up,
        auth::sign_in,
        auth::logout,
        restaurants::list_restaurants,
        restaurants::get_restaurant,
        comments::post_comment,
        comments::delete_comment,
        users::get_top_users,
        users::get_user,
        users::edit_user,
        users::put_user,
        favorites::add_favorite,
        favorites::remove_favorite,
        likes::add_like,
        likes::remove_like,
        follows::add_following,
        follows::remove_following,
        admin::get_restaurants,
        admin::get_restaurant,
        admin::post_restaurant,
        admin::put_restaurant,
        admin::delete_restaurant,
        admin::get_users,
        admin::patch_user
    ),
    components(
        schemas(
            User,
            Restaurant,
            Comment,
            Favorite,
            Like,
            Followship,
            SignUpRequest,
            SignInRequest,
            SignInResponse,
            PostCommentRequest,
            CommentWithUser,
            RestaurantForm,
            RestaurantSummary,
            RestaurantList,
            RestaurantDetail,
            AdminRestaurantList,
            UpdateUserForm,
            UserProfile,
            TopUser,
            TopUserList,
            UserList,
            params::Pagination,
            Meta,
            ApiResponse<User>,
            ApiResponse<Restaurant>,
            ApiResponse<RestaurantList>,
            ApiResponse<RestaurantDetail>,
            ApiResponse<UserProfile>,
            ApiResponse<TopUserList>
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Signup, signin and logout"),
        (name = "Restaurants", description = "Restaurant browsing"),
        (name = "Comments", description = "Restaurant comments"),
        (name = "Users", description = "Profiles and the top users board"),
        (name = "Favorites", description = "Favorite restaurants"),
        (name = "Likes", description = "Liked restaurants"),
        (name = "Followships", description = "Following other users"),
        (name = "Admin", description = "Restaurant and user management"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
