//! Cache key schema for portfolio content
//!
//! All cached entries go through these generators so that namespace
//! invalidation patterns stay in sync with the keys they match.
//! Key format: v{VERSION}:{namespace}:{identifier}[:sub_key]

use uuid::Uuid;

/// Cache schema version - increment when changing key formats
pub const CACHE_VERSION: u32 = 1;

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    // ============= Project Keys =============

    /// Full visible-projects listing
    /// Format: v1:projects:list
    pub fn projects_list() -> String {
        format!("v{}:projects:list", CACHE_VERSION)
    }

    /// Single project by id
    /// Format: v1:projects:{id}
    pub fn project(project_id: Uuid) -> String {
        format!("v{}:projects:{}", CACHE_VERSION, project_id)
    }

    /// Pattern matching every project key
    pub fn projects_pattern() -> String {
        format!("v{}:projects:*", CACHE_VERSION)
    }

    // ============= Skill Keys =============

    /// Full skills listing
    /// Format: v1:skills:list
    pub fn skills_list() -> String {
        format!("v{}:skills:list", CACHE_VERSION)
    }

    /// Pattern matching every skill key
    pub fn skills_pattern() -> String {
        format!("v{}:skills:*", CACHE_VERSION)
    }

    // ============= Section Keys =============

    /// Visible sections in display order
    /// Format: v1:sections:list
    pub fn sections_list() -> String {
        format!("v{}:sections:list", CACHE_VERSION)
    }

    /// Pattern matching every section key
    pub fn sections_pattern() -> String {
        format!("v{}:sections:*", CACHE_VERSION)
    }

    // ============= Blog Keys =============

    /// Published blog listing page
    /// Format: v1:blogs:list:{limit}:{offset}
    pub fn blogs_list(limit: i64, offset: i64) -> String {
        format!("v{}:blogs:list:{}:{}", CACHE_VERSION, limit, offset)
    }

    /// Blog post by slug
    /// Format: v1:blogs:slug:{slug}
    pub fn blog_by_slug(slug: &str) -> String {
        format!("v{}:blogs:slug:{}", CACHE_VERSION, slug.to_lowercase())
    }

    /// Pattern matching every blog key
    pub fn blogs_pattern() -> String {
        format!("v{}:blogs:*", CACHE_VERSION)
    }

    // ============= Utility =============

    /// Extract the namespace from a key
    pub fn namespace(key: &str) -> Option<&str> {
        // Format: v{N}:{namespace}:...
        let parts: Vec<&str> = key.split(':').collect();
        if parts.len() >= 2 {
            Some(parts[1])
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_key() {
        let id = Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap();
        let key = CacheKey::project(id);
        assert_eq!(key, "v1:projects:550e8400-e29b-41d4-a716-446655440000");
    }

    #[test]
    fn test_blog_slug_key_is_lowercased() {
        assert_eq!(
            CacheKey::blog_by_slug("My-First-Post"),
            "v1:blogs:slug:my-first-post"
        );
    }

    #[test]
    fn test_patterns_cover_list_keys() {
        assert!(CacheKey::projects_list().starts_with("v1:projects:"));
        assert!(CacheKey::blogs_list(10, 0).starts_with("v1:blogs:"));
        assert!(CacheKey::sections_list().starts_with("v1:sections:"));
    }

    #[test]
    fn test_namespace() {
        assert_eq!(CacheKey::namespace("v1:projects:list"), Some("projects"));
        assert_eq!(
            CacheKey::namespace("v1:blogs:slug:hello-world"),
            Some("blogs")
        );
        assert_eq!(CacheKey::namespace("invalid"), None);
    }
}
