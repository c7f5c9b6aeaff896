#![allow(dead_code)]

use std::path::PathBuf;

use restaurant_forum::{
    config::AppConfig,
    db::{create_pool, run_migrations},
    dto::restaurants::RestaurantInput,
    entity::users::ActiveModel as UserActive,
    middleware::auth::AuthUser,
    models::{ROLE_ADMIN, ROLE_USER, Restaurant},
    services::{admin_service, auth_service::hash_password},
    state::AppState,
};
use sea_orm::{ActiveModelTrait, Set};
use uuid::Uuid;

pub const PASSWORD: &str = "12345678";

/// Connect to the test database, or `None` when no database is configured.
pub async fn setup_state() -> anyhow::Result<Option<AppState>> {
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration tests."
            );
            return Ok(None);
        }
    };

    let pool = create_pool(&database_url).await?;
    run_migrations(&pool).await?;

    let config = AppConfig {
        database_url,
        host: "127.0.0.1".into(),
        port: 0,
        jwt_secret: "test-secret".into(),
        token_ttl_hours: 1,
        upload_dir: std::env::temp_dir().join(format!("forum-test-{}", Uuid::new_v4())),
        max_upload_bytes: 1024 * 1024,
        root_admin_email: format!("root-{}@example.com", Uuid::new_v4()),
    };
    Ok(Some(AppState::new(pool, config)))
}

pub fn unique_email(prefix: &str) -> String {
    format!("{prefix}-{}@example.com", Uuid::new_v4())
}

pub async fn create_user(state: &AppState, name: &str, role: &str) -> anyhow::Result<AuthUser> {
    create_user_with_email(state, name, &unique_email(name), role).await
}

pub async fn create_user_with_email(
    state: &AppState,
    name: &str,
    email: &str,
    role: &str,
) -> anyhow::Result<AuthUser> {
    let now = chrono::Utc::now();
    let user = UserActive {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        email: Set(email.to_string()),
        password_hash: Set(hash_password(PASSWORD)?),
        role: Set(role.to_string()),
        image: Set(None),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(&state.orm)
    .await?;

    Ok(AuthUser {
        user_id: user.id,
        role: user.role,
    })
}

pub async fn create_member(state: &AppState, name: &str) -> anyhow::Result<AuthUser> {
    create_user(state, name, ROLE_USER).await
}

pub async fn create_admin(state: &AppState) -> anyhow::Result<AuthUser> {
    create_user(state, "admin", ROLE_ADMIN).await
}

pub fn restaurant_input(name: &str) -> RestaurantInput {
    RestaurantInput {
        name: name.to_string(),
        tel: "(02) 1234-5678".into(),
        address: "No. 1, Test Rd.".into(),
        opening_hours: "11:00 - 21:00".into(),
        description: Some("A restaurant for testing".into()),
        image: None,
    }
}

pub async fn create_restaurant(
    state: &AppState,
    admin: &AuthUser,
    name: &str,
) -> anyhow::Result<Restaurant> {
    let resp = admin_service::post_restaurant(state, admin, restaurant_input(name)).await?;
    Ok(resp.data.expect("restaurant data"))
}

pub fn upload_dir(state: &AppState) -> PathBuf {
    state.config.upload_dir.clone()
}
