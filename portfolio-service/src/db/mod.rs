/// Database access layer
///
/// Repository modules with plain async functions over a `PgPool`. Handlers
/// and services call into these; no query strings live anywhere else.
pub mod blog_repo;
pub mod comment_repo;
pub mod contact_repo;
pub mod project_repo;
pub mod section_repo;
pub mod session_repo;
pub mod skill_repo;
pub mod subscriber_repo;
