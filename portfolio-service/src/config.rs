/// Configuration management for the portfolio service
///
/// This module handles loading and managing configuration from environment
/// variables.
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// CORS configuration
    pub cors: CorsConfig,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Cache (Redis) configuration
    pub cache: CacheConfig,
    /// File upload configuration
    pub uploads: UploadConfig,
    /// Contact form rate limiting
    pub rate_limit: RateLimitConfig,
    /// Frontend revalidation webhook
    pub revalidate: RevalidateConfig,
    /// Admin credential
    pub admin: AdminConfig,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (dev, staging, prod)
    pub env: String,
    /// Server host to bind to
    pub host: String,
    /// Server port to bind to
    pub port: u16,
    /// Canonical public site URL used in emails and links
    pub public_url: String,
    /// Skip database probes (static build / bootstrap environments)
    pub skip_db: bool,
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated list of allowed origins
    pub allowed_origins: String,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database URL
    pub url: String,
    /// Max connections in pool
    pub max_connections: u32,
}

/// Cache (Redis) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Redis URL
    pub url: String,
}

/// File upload configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Directory where uploaded files are stored
    pub dir: String,
    /// Maximum accepted upload size in bytes
    pub max_bytes: usize,
}

/// Contact form rate limiting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Maximum number of requests per window
    pub max_requests: u32,
    /// Time window in seconds
    pub window_seconds: u64,
}

/// Frontend revalidation webhook. When unset, invalidation only clears
/// Redis namespaces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevalidateConfig {
    pub url: Option<String>,
    pub secret: Option<String>,
}

/// Admin credential used by the login endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    pub username: String,
    /// Argon2 PHC-format hash of the admin password
    pub password_hash: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        Ok(Config {
            app: AppConfig {
                env: app_env.clone(),
                host: std::env::var("PORTFOLIO_SERVICE_HOST")
                    .unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: std::env::var("PORTFOLIO_SERVICE_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(8080),
                public_url: std::env::var("PUBLIC_URL")
                    .unwrap_or_else(|_| "http://localhost:3000".to_string()),
                skip_db: std::env::var("APP_SKIP_DB")
                    .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                    .unwrap_or(false),
            },
            cors: {
                let allowed_origins = match std::env::var("CORS_ALLOWED_ORIGINS") {
                    Ok(value) => value,
                    Err(_) if app_env.eq_ignore_ascii_case("production") => {
                        return Err("CORS_ALLOWED_ORIGINS must be set in production".to_string())
                    }
                    Err(_) => "http://localhost:3000".to_string(),
                };

                if app_env.eq_ignore_ascii_case("production") && allowed_origins.trim() == "*" {
                    return Err("CORS_ALLOWED_ORIGINS cannot be '*' in production".to_string());
                }

                CorsConfig { allowed_origins }
            },
            database: DatabaseConfig {
                url: std::env::var("DATABASE_URL")
                    .unwrap_or_else(|_| "postgresql://localhost/portfolio".to_string()),
                max_connections: std::env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|c| c.parse().ok())
                    .unwrap_or(10),
            },
            cache: CacheConfig {
                url: std::env::var("REDIS_URL")
                    .unwrap_or_else(|_| "redis://localhost:6379".to_string()),
            },
            uploads: UploadConfig {
                dir: std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "./uploads".to_string()),
                max_bytes: std::env::var("UPLOAD_MAX_BYTES")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(10 * 1024 * 1024),
            },
            rate_limit: RateLimitConfig {
                max_requests: std::env::var("CONTACT_RATE_LIMIT_MAX")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(5),
                window_seconds: std::env::var("CONTACT_RATE_LIMIT_WINDOW_SECONDS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(900),
            },
            revalidate: RevalidateConfig {
                url: std::env::var("REVALIDATE_URL").ok().filter(|v| !v.is_empty()),
                secret: std::env::var("REVALIDATE_SECRET")
                    .ok()
                    .filter(|v| !v.is_empty()),
            },
            admin: {
                let password_hash = std::env::var("ADMIN_PASSWORD_HASH").unwrap_or_default();
                if app_env.eq_ignore_ascii_case("production") && password_hash.trim().is_empty() {
                    return Err("ADMIN_PASSWORD_HASH must be set in production".to_string());
                }

                AdminConfig {
                    username: std::env::var("ADMIN_USERNAME")
                        .unwrap_or_else(|_| "admin".to_string()),
                    password_hash,
                }
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_defaults() {
        // Defaults apply when the env vars are unset
        let config = Config::from_env().expect("config should load with defaults");
        assert_eq!(config.rate_limit.max_requests, 5);
        assert_eq!(config.rate_limit.window_seconds, 900);
    }
}
