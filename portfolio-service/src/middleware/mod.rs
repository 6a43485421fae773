/// HTTP middleware utilities
///
/// Provides the admin session guard and client IP extraction. The rate
/// limiter for the contact form lives in `rate_limit`.
pub mod rate_limit;

pub use rate_limit::RateLimiter;

use crate::db::session_repo;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{
    error::{ErrorInternalServerError, ErrorUnauthorized},
    web, Error, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use sqlx::PgPool;
use std::future::{ready, Ready};
use std::rc::Rc;
use tracing::error;

/// Name of the admin session cookie
pub const ADMIN_SESSION_COOKIE: &str = "admin_session";

// =====================================================================
// Admin session authentication
// =====================================================================

/// Actix middleware that validates the admin session cookie against the
/// sessions table. Requests without a valid session get 401 before the
/// handler runs.
pub struct SessionAuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for SessionAuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionAuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionAuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct SessionAuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for SessionAuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let pool = req
                .app_data::<web::Data<PgPool>>()
                .cloned()
                .ok_or_else(|| ErrorInternalServerError("database pool not configured"))?;

            let token = req
                .cookie(ADMIN_SESSION_COOKIE)
                .map(|c| c.value().to_string())
                .ok_or_else(|| ErrorUnauthorized("missing admin session"))?;

            match session_repo::get_valid_session(pool.get_ref(), &token).await {
                Ok(Some(_)) => service.call(req).await,
                Ok(None) => Err(ErrorUnauthorized("invalid or expired admin session")),
                Err(e) => {
                    error!(error = %e, "Admin session lookup failed");
                    Err(ErrorInternalServerError("session lookup failed"))
                }
            }
        })
    }
}

// =====================================================================
// Client IP extraction
// =====================================================================

/// Extract the client IP, respecting X-Forwarded-For from proxies and
/// falling back to the connection peer address.
pub fn client_ip(req: &HttpRequest) -> String {
    if let Some(x_forwarded_for) = req.headers().get("X-Forwarded-For") {
        if let Ok(header_value) = x_forwarded_for.to_str() {
            // X-Forwarded-For can contain multiple IPs; take the first one
            if let Some(first_ip) = header_value.split(',').next() {
                let first_ip = first_ip.trim();
                if !first_ip.is_empty() {
                    return first_ip.to_string();
                }
            }
        }
    }

    req.peer_addr()
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| "127.0.0.1".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_client_ip_prefers_forwarded_header() {
        let req = TestRequest::default()
            .insert_header(("X-Forwarded-For", "203.0.113.7, 10.0.0.1"))
            .to_http_request();
        assert_eq!(client_ip(&req), "203.0.113.7");
    }

    #[test]
    fn test_client_ip_falls_back_without_header() {
        let req = TestRequest::default()
            .peer_addr("192.0.2.4:443".parse().unwrap())
            .to_http_request();
        assert_eq!(client_ip(&req), "192.0.2.4");
    }
}
