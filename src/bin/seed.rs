use restaurant_forum::{
    config::{AppConfig, normalize_email},
    db::{DbPool, create_pool, run_migrations},
    models::{ROLE_ADMIN, ROLE_USER},
    services::auth_service::hash_password,
};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    run_migrations(&pool).await?;

    let root_id = ensure_user(&pool, "root", &config.root_admin_email, "12345678", ROLE_ADMIN).await?;
    let user1_id = ensure_user(&pool, "user1", "user1@example.com", "12345678", ROLE_USER).await?;
    let user2_id = ensure_user(&pool, "user2", "user2@example.com", "12345678", ROLE_USER).await?;
    seed_restaurants(&pool).await?;

    println!("Seed completed. Root ID: {root_id}, user1 ID: {user1_id}, user2 ID: {user2_id}");
    Ok(())
}

async fn ensure_user(
    pool: &DbPool,
    name: &str,
    email: &str,
    password: &str,
    role: &str,
) -> anyhow::Result<Uuid> {
    let email = normalize_email(email);
    let password_hash = hash_password(password)?;

    let (user_id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO users (id, name, email, password_hash, role)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (email) DO UPDATE SET role = EXCLUDED.role
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .bind(&email)
    .bind(password_hash)
    .bind(role)
    .fetch_one(pool)
    .await?;

    println!("Ensured user {email} (role={role})");
    Ok(user_id)
}

async fn seed_restaurants(pool: &DbPool) -> anyhow::Result<()> {
    let (existing,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM restaurants")
        .fetch_one(pool)
        .await?;
    if existing > 0 {
        println!("Restaurants already seeded");
        return Ok(());
    }

    let restaurants = [
        ("Din Tai Fung", "(02) 2321-8928", "No. 194, Xinyi Rd. Sec. 2, Taipei", "10:00 - 21:00", "Soup dumplings and noodles"),
        ("Fu Hang Soy Milk", "(02) 2392-2175", "No. 108, Zhongxiao E. Rd. Sec. 1, Taipei", "05:30 - 12:30", "Breakfast with thick flatbread"),
        ("Raohe Pepper Buns", "(02) 2727-1133", "No. 249, Raohe St., Taipei", "15:00 - 23:30", "Baked pepper pork buns"),
        ("Yongkang Beef Noodles", "(02) 2351-1051", "No. 17, Ln. 31, Jinshan S. Rd. Sec. 2, Taipei", "11:00 - 21:00", "Braised beef noodle soup"),
        ("Chun Shui Tang", "(04) 2229-7991", "No. 30, Siwei St., Taichung", "08:00 - 22:00", "Bubble tea teahouse"),
    ];

    for (name, tel, address, opening_hours, description) in restaurants {
        sqlx::query(
            r#"
            INSERT INTO restaurants (id, name, tel, address, opening_hours, description)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(tel)
        .bind(address)
        .bind(opening_hours)
        .bind(description)
        .execute(pool)
        .await?;
    }

    println!("Seeded restaurants");
    Ok(())
}
