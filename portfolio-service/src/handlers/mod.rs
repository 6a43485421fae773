/// HTTP handlers
///
/// Public content reads, reader interactions (comments, votes, contact,
/// newsletter subscription), and the session-guarded admin surface.
pub mod auth;
pub mod blogs;
pub mod cache_admin;
pub mod comments;
pub mod contact;
pub mod health;
pub mod images;
pub mod projects;
pub mod sections;
pub mod skills;
pub mod subscribers;
pub mod uploads;

// Re-export handler functions at module level
pub use auth::{login, logout};
pub use blogs::{
    admin_list_blogs, create_blog, delete_blog, get_blog, list_blogs, send_newsletter, update_blog,
};
pub use cache_admin::invalidate_cache;
pub use comments::{
    admin_list_comments, create_comment, delete_comment, get_blog_comments, update_comment_status,
    vote_comment,
};
pub use contact::{delete_contact, list_contacts, submit_contact};
pub use health::{health_summary, liveness_check, readiness_summary, HealthState};
pub use images::serve_image;
pub use projects::{
    admin_list_projects, create_project, delete_project, get_project, list_projects, update_project,
};
pub use sections::{
    admin_list_sections, create_section, delete_section, list_sections, update_section,
};
pub use skills::{create_skill, delete_skill, list_skills, update_skill};
pub use subscribers::{list_subscribers, subscribe, unsubscribe};
pub use uploads::{upload_blog_pdf, upload_cv, upload_profile_image};
