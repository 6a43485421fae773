/// Portfolio Service Library
///
/// Backend for a personal portfolio/blog site: public content APIs,
/// reader interactions (comments, votes, contact form, newsletter
/// subscriptions), and a session-authenticated admin surface for content
/// management, uploads, newsletter dispatch, and cache invalidation.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers
/// - `models`: Persisted entities and enumerated values
/// - `services`: Business logic (normalization, newsletter, email, images)
/// - `db`: Database access layer and repositories
/// - `cache`: Cache invalidation dispatch
/// - `middleware`: Session auth, client IP extraction, rate limiting
/// - `error`: Error types and handling
/// - `config`: Configuration management
pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
