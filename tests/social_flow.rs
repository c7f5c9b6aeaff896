mod common;

use axum::body::Bytes;
use restaurant_forum::{
    dto::{
        auth::{SignInRequest, SignUpRequest},
        comments::PostCommentRequest,
        users::UpdateUserRequest,
    },
    error::AppError,
    routes::params::Pagination,
    services::{
        auth_service, comment_service, favorite_service, follow_service, like_service,
        restaurant_service, user_service,
    },
    upload::ImageUpload,
};
use uuid::Uuid;

use common::{create_admin, create_member, create_restaurant, setup_state, unique_email};

#[tokio::test]
async fn signup_validates_and_signin_issues_token() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let email = unique_email("signup");

    let err = auth_service::sign_up(
        &state,
        SignUpRequest {
            name: "Amy".into(),
            email: email.clone(),
            password: "12345678".into(),
            password_check: "87654321".into(),
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.to_string(), "Passwords do not match!");

    let created = auth_service::sign_up(
        &state,
        SignUpRequest {
            name: "Amy".into(),
            email: email.clone(),
            password: "12345678".into(),
            password_check: "12345678".into(),
        },
    )
    .await?
    .data
    .expect("user data");
    assert_eq!(created.role, "user");

    let err = auth_service::sign_up(
        &state,
        SignUpRequest {
            name: "Amy again".into(),
            email: email.to_uppercase(),
            password: "12345678".into(),
            password_check: "12345678".into(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
    assert_eq!(err.to_string(), "Email already exists!");

    let signed_in = auth_service::sign_in(
        &state,
        SignInRequest {
            email: email.clone(),
            password: "12345678".into(),
        },
    )
    .await?
    .data
    .expect("sign in data");
    assert_eq!(signed_in.user.id, created.id);
    assert!(!signed_in.token.is_empty());

    let err = auth_service::sign_in(
        &state,
        SignInRequest {
            email,
            password: "wrong-password".into(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)));

    Ok(())
}

#[tokio::test]
async fn favoriting_twice_fails_and_removal_requires_a_favorite() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let admin = create_admin(&state).await?;
    let user = create_member(&state, "fav").await?;
    let restaurant = create_restaurant(&state, &admin, "Favorite Diner").await?;

    favorite_service::add_favorite(&state, &user, restaurant.id).await?;
    let err = favorite_service::add_favorite(&state, &user, restaurant.id)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "You have favorited this restaurant!");

    let err = favorite_service::add_favorite(&state, &user, Uuid::new_v4())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Restaurant didn't exist!");

    favorite_service::remove_favorite(&state, &user, restaurant.id).await?;
    let err = favorite_service::remove_favorite(&state, &user, restaurant.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    assert_eq!(err.to_string(), "You haven't favorited this restaurant!");

    Ok(())
}

#[tokio::test]
async fn liking_follows_the_same_rules() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let admin = create_admin(&state).await?;
    let user = create_member(&state, "like").await?;
    let restaurant = create_restaurant(&state, &admin, "Like Bistro").await?;

    let like = like_service::add_like(&state, &user, restaurant.id)
        .await?
        .data
        .expect("like data");
    assert_eq!(like.user_id, user.user_id);

    let err = like_service::add_like(&state, &user, restaurant.id)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "You have liked this restaurant!");

    let detail = restaurant_service::get_restaurant(&state, &user, restaurant.id)
        .await?
        .data
        .expect("detail");
    assert!(detail.is_liked);
    assert!(!detail.is_favorited);
    assert_eq!(detail.like_count, 1);

    like_service::remove_like(&state, &user, restaurant.id).await?;
    let err = like_service::remove_like(&state, &user, restaurant.id)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "You haven't liked this restaurant!");

    Ok(())
}

#[tokio::test]
async fn following_rules() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let alice = create_member(&state, "alice").await?;
    let bob = create_member(&state, "bob").await?;

    let err = follow_service::add_following(&state, &alice, alice.user_id)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "You can't follow yourself!");

    let err = follow_service::add_following(&state, &alice, Uuid::new_v4())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "User didn't exist!");

    follow_service::add_following(&state, &alice, bob.user_id).await?;
    let err = follow_service::add_following(&state, &alice, bob.user_id)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "You are already following this user!");

    // Follow edges are directed.
    let err = follow_service::remove_following(&state, &bob, alice.user_id)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "You haven't followed this user!");

    follow_service::remove_following(&state, &alice, bob.user_id).await?;
    Ok(())
}

#[tokio::test]
async fn profile_collects_relations_and_rejects_unknown_users() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let err = user_service::get_user(&state, Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let admin = create_admin(&state).await?;
    let carol = create_member(&state, "carol").await?;
    let dave = create_member(&state, "dave").await?;
    let noodles = create_restaurant(&state, &admin, "Noodle House").await?;
    let tea = create_restaurant(&state, &admin, "Tea Stand").await?;

    favorite_service::add_favorite(&state, &carol, tea.id).await?;
    follow_service::add_following(&state, &carol, dave.user_id).await?;
    follow_service::add_following(&state, &dave, carol.user_id).await?;
    for text in ["Great broth", "Came back again"] {
        comment_service::post_comment(
            &state,
            &carol,
            PostCommentRequest {
                restaurant_id: noodles.id,
                text: text.into(),
            },
        )
        .await?;
    }

    let profile = user_service::get_user(&state, carol.user_id)
        .await?
        .data
        .expect("profile");
    assert_eq!(profile.user.id, carol.user_id);
    assert_eq!(profile.favorited_restaurants.len(), 1);
    assert_eq!(profile.favorited_restaurants[0].id, tea.id);
    assert_eq!(profile.followings.len(), 1);
    assert_eq!(profile.followings[0].id, dave.user_id);
    assert_eq!(profile.followers.len(), 1);
    assert_eq!(profile.followers[0].id, dave.user_id);
    assert_eq!(profile.commented_restaurants.len(), 1);
    assert_eq!(profile.commented_restaurants[0].id, noodles.id);

    Ok(())
}

#[tokio::test]
async fn top_users_are_ranked_by_follower_count() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let star = create_member(&state, "star").await?;
    let rising = create_member(&state, "rising").await?;
    let fans = [
        create_member(&state, "fan1").await?,
        create_member(&state, "fan2").await?,
        create_member(&state, "fan3").await?,
    ];

    for fan in &fans {
        follow_service::add_following(&state, fan, star.user_id).await?;
    }
    follow_service::add_following(&state, &fans[0], rising.user_id).await?;

    let board = user_service::get_top_users(&state, &fans[0])
        .await?
        .data
        .expect("top users");
    assert_eq!(board.current_user_id, fans[0].user_id);

    let position = |id: Uuid| board.items.iter().position(|u| u.id == id).expect("listed");
    let star_entry = &board.items[position(star.user_id)];
    let rising_entry = &board.items[position(rising.user_id)];
    assert_eq!(star_entry.follower_count, 3);
    assert_eq!(rising_entry.follower_count, 1);
    assert!(position(star.user_id) < position(rising.user_id));
    assert!(star_entry.is_followed);
    assert!(rising_entry.is_followed);
    assert!(!board.items[position(fans[1].user_id)].is_followed);

    let counts: Vec<i64> = board.items.iter().map(|u| u.follower_count).collect();
    assert!(counts.windows(2).all(|w| w[0] >= w[1]));

    Ok(())
}

#[tokio::test]
async fn users_edit_only_their_own_profile() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let erin = create_member(&state, "erin").await?;
    let frank = create_member(&state, "frank").await?;

    let err = user_service::put_user(
        &state,
        &erin,
        erin.user_id,
        UpdateUserRequest {
            name: "  ".into(),
            image: None,
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.to_string(), "User name is required!");

    let err = user_service::edit_user(&state, &frank, erin.user_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));

    let updated = user_service::put_user(
        &state,
        &erin,
        erin.user_id,
        UpdateUserRequest {
            name: "Erin Chen".into(),
            image: Some(ImageUpload {
                file_name: Some("avatar.png".into()),
                content_type: Some("image/png".into()),
                bytes: Bytes::from_static(b"\x89PNG"),
            }),
        },
    )
    .await?
    .data
    .expect("user");
    assert_eq!(updated.name, "Erin Chen");
    let image = updated.image.clone().expect("image path");
    assert!(image.starts_with("/upload/"));

    // Without a new upload the old image stays.
    let renamed = user_service::put_user(
        &state,
        &erin,
        erin.user_id,
        UpdateUserRequest {
            name: "Erin".into(),
            image: None,
        },
    )
    .await?
    .data
    .expect("user");
    assert_eq!(renamed.image.as_deref(), Some(image.as_str()));

    tokio::fs::remove_dir_all(common::upload_dir(&state)).await.ok();
    Ok(())
}

#[tokio::test]
async fn restaurant_listing_marks_favorites_and_comments() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let admin = create_admin(&state).await?;
    let user = create_member(&state, "browser").await?;
    let restaurant = create_restaurant(&state, &admin, "Corner Cafe").await?;
    favorite_service::add_favorite(&state, &user, restaurant.id).await?;

    let err = comment_service::post_comment(
        &state,
        &user,
        PostCommentRequest {
            restaurant_id: restaurant.id,
            text: "   ".into(),
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.to_string(), "Comment text is required!");

    comment_service::post_comment(
        &state,
        &user,
        PostCommentRequest {
            restaurant_id: restaurant.id,
            text: "Lovely latte".into(),
        },
    )
    .await?;

    // Newest first, so the restaurant just created is on the first page.
    let pagination = Pagination {
        page: Some(1),
        per_page: Some(100),
    };
    let list = restaurant_service::list_restaurants(&state, &user, pagination)
        .await?
        .data
        .expect("list");
    let summary = list
        .items
        .iter()
        .find(|r| r.restaurant.id == restaurant.id)
        .expect("listed");
    assert!(summary.is_favorited);
    assert!(!summary.is_liked);

    let detail = restaurant_service::get_restaurant(&state, &user, restaurant.id)
        .await?
        .data
        .expect("detail");
    assert_eq!(detail.favorite_count, 1);
    assert_eq!(detail.comments.len(), 1);
    assert_eq!(detail.comments[0].comment.text, "Lovely latte");
    assert_eq!(
        detail.comments[0].user.as_ref().map(|u| u.id),
        Some(user.user_id)
    );

    let err = restaurant_service::get_restaurant(&state, &user, Uuid::new_v4())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Restaurant didn't exist!");

    Ok(())
}
