/// Health check handlers
use actix_web::{web, HttpResponse};
use chrono::Utc;
use redis::aio::ConnectionManager;
use redis::RedisError;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;

pub struct HealthState {
    db_pool: sqlx::Pool<sqlx::Postgres>,
    redis_manager: Arc<Mutex<ConnectionManager>>,
    skip_db: bool,
}

#[derive(Serialize, Clone)]
#[serde(rename_all = "lowercase")]
enum ComponentStatus {
    Healthy,
    Skipped,
    Unhealthy,
}

#[derive(Serialize)]
struct ComponentCheck {
    status: ComponentStatus,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    latency_ms: Option<u64>,
}

#[derive(Serialize)]
struct ReadinessResponse {
    ready: bool,
    checks: HashMap<String, ComponentCheck>,
    timestamp: String,
}

impl HealthState {
    pub fn new(
        db_pool: sqlx::Pool<sqlx::Postgres>,
        redis_manager: Arc<Mutex<ConnectionManager>>,
        skip_db: bool,
    ) -> Self {
        Self {
            db_pool,
            redis_manager,
            skip_db,
        }
    }

    async fn check_postgres(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.db_pool)
            .await
            .map(|_| ())
    }

    async fn check_redis(&self) -> Result<(), RedisError> {
        let mut conn = self.redis_manager.lock().await;
        let pong: String = redis::cmd("PING").query_async(&mut *conn).await?;
        if pong == "PONG" {
            Ok(())
        } else {
            Err(RedisError::from((
                redis::ErrorKind::ResponseError,
                "unexpected PING response",
            )))
        }
    }
}

/// Basic health summary
pub async fn health_summary(state: web::Data<HealthState>) -> HttpResponse {
    if state.skip_db {
        return HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "service": "portfolio-service",
            "database": "skipped",
            "version": env!("CARGO_PKG_VERSION")
        }));
    }

    match state.check_postgres().await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "service": "portfolio-service",
            "version": env!("CARGO_PKG_VERSION")
        })),
        Err(e) => HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "status": "unhealthy",
            "error": format!("PostgreSQL connection failed: {}", e),
            "service": "portfolio-service"
        })),
    }
}

/// Readiness probe checking every dependency
pub async fn readiness_summary(state: web::Data<HealthState>) -> HttpResponse {
    let mut checks = HashMap::new();
    let mut ready = true;

    let postgres_check = if state.skip_db {
        ComponentCheck {
            status: ComponentStatus::Skipped,
            message: "database probes disabled (APP_SKIP_DB)".to_string(),
            latency_ms: None,
        }
    } else {
        let start = Instant::now();
        let pg_result = state.check_postgres().await;
        let pg_latency = Some(start.elapsed().as_millis() as u64);
        match pg_result {
            Ok(_) => ComponentCheck {
                status: ComponentStatus::Healthy,
                message: "PostgreSQL connection successful".to_string(),
                latency_ms: pg_latency,
            },
            Err(e) => {
                ready = false;
                ComponentCheck {
                    status: ComponentStatus::Unhealthy,
                    message: format!("PostgreSQL connection failed: {}", e),
                    latency_ms: pg_latency,
                }
            }
        }
    };
    checks.insert("postgresql".to_string(), postgres_check);

    let start = Instant::now();
    let redis_result = state.check_redis().await;
    let redis_latency = Some(start.elapsed().as_millis() as u64);
    let redis_check = match redis_result {
        Ok(_) => ComponentCheck {
            status: ComponentStatus::Healthy,
            message: "Redis ping successful".to_string(),
            latency_ms: redis_latency,
        },
        Err(e) => {
            ready = false;
            ComponentCheck {
                status: ComponentStatus::Unhealthy,
                message: format!("Redis ping failed: {}", e),
                latency_ms: redis_latency,
            }
        }
    };
    checks.insert("redis".to_string(), redis_check);

    let response = ReadinessResponse {
        ready,
        checks,
        timestamp: Utc::now().to_rfc3339(),
    };

    if ready {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}

/// Liveness probe
pub async fn liveness_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({"alive": true}))
}
