use crate::config::RateLimitConfig;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use tracing::warn;

/// Fixed-window rate limiter for the contact form, one counter per client IP
pub struct RateLimiter {
    redis: ConnectionManager,
    config: RateLimitConfig,
}

impl RateLimiter {
    pub fn new(redis: ConnectionManager, config: RateLimitConfig) -> Self {
        Self { redis, config }
    }

    /// Check if a client has exceeded the limit, counting this request.
    /// Redis failures fail open: losing the contact form is worse than
    /// missing a limit.
    pub async fn is_rate_limited(&self, client_id: &str) -> bool {
        let rate_limit_key = format!("rate_limit:contact:{}", client_id);
        let mut conn = self.redis.clone();

        let current_count: u32 = match conn.get::<_, Option<u32>>(&rate_limit_key).await {
            Ok(count) => count.unwrap_or(0),
            Err(e) => {
                warn!(error = %e, "Rate limit counter unavailable, allowing request");
                return false;
            }
        };

        if current_count >= self.config.max_requests {
            return true;
        }

        let new_count = current_count + 1;
        if let Err(e) = conn
            .set_ex::<_, _, ()>(&rate_limit_key, new_count, self.config.window_seconds)
            .await
        {
            warn!(error = %e, "Rate limit counter update failed");
        }

        false
    }

    /// Current request count for a client
    pub async fn request_count(&self, client_id: &str) -> u32 {
        let rate_limit_key = format!("rate_limit:contact:{}", client_id);
        let mut conn = self.redis.clone();
        conn.get::<_, Option<u32>>(&rate_limit_key)
            .await
            .ok()
            .flatten()
            .unwrap_or(0)
    }
}
