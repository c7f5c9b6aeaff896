use std::{env, path::PathBuf};

/// Session lifetime bounds; one year keeps `hours * 3600` and `Duration::hours` in range.
pub const MAX_TOKEN_TTL_HOURS: i64 = 24 * 365;
const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
    /// Account whose admin role can never be toggled off.
    pub root_admin_email: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")?;
        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET is not set"))?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let token_ttl_hours = token_ttl_hours(env::var("TOKEN_TTL_HOURS").ok().as_deref());
        let upload_dir = env::var("UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("upload"));
        let max_upload_bytes = env::var("MAX_UPLOAD_BYTES")
            .ok()
            .and_then(|b| b.parse::<usize>().ok())
            .unwrap_or(5 * 1024 * 1024);
        let root_admin_email = normalize_email(
            &env::var("ROOT_ADMIN_EMAIL").unwrap_or_else(|_| "root@example.com".to_string()),
        );
        Ok(Self {
            port,
            database_url,
            host,
            jwt_secret,
            token_ttl_hours,
            upload_dir,
            max_upload_bytes,
            root_admin_email,
        })
    }
}

/// Emails are stored and compared trimmed and lower-cased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn token_ttl_hours(raw: Option<&str>) -> i64 {
    raw.and_then(|h| h.trim().parse::<i64>().ok())
        .unwrap_or(DEFAULT_TOKEN_TTL_HOURS)
        .clamp(1, MAX_TOKEN_TTL_HOURS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_ttl_is_bounded() {
        assert_eq!(token_ttl_hours(None), DEFAULT_TOKEN_TTL_HOURS);
        assert_eq!(token_ttl_hours(Some("abc")), DEFAULT_TOKEN_TTL_HOURS);
        assert_eq!(token_ttl_hours(Some("0")), 1);
        assert_eq!(token_ttl_hours(Some(" 48 ")), 48);
        assert_eq!(
            token_ttl_hours(Some("9223372036854775807")),
            MAX_TOKEN_TTL_HOURS
        );
        assert!(chrono::Duration::try_hours(MAX_TOKEN_TTL_HOURS).is_some());
    }

    #[test]
    fn emails_are_trimmed_and_lowercased() {
        assert_eq!(normalize_email("  Root@Example.COM "), "root@example.com");
    }
}
