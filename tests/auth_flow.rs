mod common;

use axum::{
    Json,
    extract::{FromRequestParts, State},
    http::{Request, StatusCode, header},
    response::IntoResponse,
};
use restaurant_forum::{
    dto::auth::SignInRequest,
    entity::users::Entity as Users,
    error::AppError,
    middleware::auth::{AuthUser, authenticate, ensure_admin},
    models::{ROLE_ADMIN, ROLE_USER},
    routes::{self, params::Pagination},
    services::{admin_service, auth_service},
    state::AppState,
};
use sea_orm::EntityTrait;

use common::{PASSWORD, create_admin, create_user_with_email, setup_state, unique_email};

async fn sign_in_token(state: &AppState, email: &str) -> anyhow::Result<String> {
    let resp = auth_service::sign_in(
        state,
        SignInRequest {
            email: email.to_string(),
            password: PASSWORD.into(),
        },
    )
    .await?;
    Ok(resp.data.expect("signin data").token)
}

#[tokio::test]
async fn demoted_admin_loses_access_with_an_existing_token() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let root = create_admin(&state).await?;
    let email = unique_email("staff");
    let staff = create_user_with_email(&state, "staff", &email, ROLE_ADMIN).await?;

    let token = sign_in_token(&state, &email).await?;
    let before = authenticate(&state, &token).await?;
    assert_eq!(before.user_id, staff.user_id);
    assert!(ensure_admin(&before).is_ok());

    admin_service::patch_user(&state, &root, staff.user_id).await?;

    let after = authenticate(&state, &token).await?;
    assert_eq!(after.role, ROLE_USER);
    assert!(matches!(ensure_admin(&after), Err(AppError::Forbidden)));
    let err = admin_service::get_users(&state, &after, Pagination::default())
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn deleted_user_session_is_rejected() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let email = unique_email("gone");
    let user = create_user_with_email(&state, "gone", &email, ROLE_USER).await?;
    let token = sign_in_token(&state, &email).await?;

    Users::delete_by_id(user.user_id).exec(&state.orm).await?;

    let err = authenticate(&state, &token).await.unwrap_err();
    assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn session_cookie_from_signin_is_accepted() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let email = unique_email("diner");
    let user = create_user_with_email(&state, "diner", &email, ROLE_USER).await?;

    let response = routes::auth::sign_in(
        State(state.clone()),
        Json(SignInRequest {
            email: format!("  {}  ", email.to_uppercase()),
            password: PASSWORD.into(),
        }),
    )
    .await?
    .into_response();
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("set-cookie header")
        .to_str()?
        .to_string();
    assert!(set_cookie.starts_with("session="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("Max-Age=3600"));

    let session = set_cookie.split(';').next().expect("cookie pair");
    let (mut parts, _) = Request::builder()
        .header(header::COOKIE, format!("theme=dark; {session}"))
        .body(())?
        .into_parts();
    let auth = AuthUser::from_request_parts(&mut parts, &state).await?;
    assert_eq!(auth.user_id, user.user_id);
    assert_eq!(auth.role, ROLE_USER);
    Ok(())
}
