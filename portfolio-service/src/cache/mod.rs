/// Cache invalidation for public content
///
/// Admin mutations and the explicit invalidation endpoint both funnel
/// through here. A cache-type tag maps, via a static dispatch table, to the
/// Redis namespaces to clear and the frontend paths to revalidate. Unknown
/// tags are rejected before anything is touched.
use crate::config::RevalidateConfig;
use portfolio_cache::{CacheKey, CacheOperations, PortfolioCache};
use serde::Serialize;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{info, warn};

/// Named group of cached data that can be invalidated as a unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheType {
    All,
    Projects,
    Sections,
    Skills,
    Blogs,
}

impl CacheType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheType::All => "all",
            CacheType::Projects => "projects",
            CacheType::Sections => "sections",
            CacheType::Skills => "skills",
            CacheType::Blogs => "blogs",
        }
    }

    /// Redis key patterns cleared for this cache type
    fn patterns(&self) -> Vec<String> {
        match self {
            CacheType::All => vec![
                CacheKey::projects_pattern(),
                CacheKey::sections_pattern(),
                CacheKey::skills_pattern(),
                CacheKey::blogs_pattern(),
            ],
            CacheType::Projects => vec![CacheKey::projects_pattern()],
            CacheType::Sections => vec![CacheKey::sections_pattern()],
            CacheType::Skills => vec![CacheKey::skills_pattern()],
            CacheType::Blogs => vec![CacheKey::blogs_pattern()],
        }
    }

    /// Frontend paths revalidated for this cache type
    fn paths(&self) -> Vec<&'static str> {
        match self {
            CacheType::All => vec!["/", "/about", "/projects", "/blog"],
            CacheType::Projects => vec!["/projects"],
            CacheType::Sections => vec!["/"],
            CacheType::Skills => vec!["/about"],
            CacheType::Blogs => vec!["/blog"],
        }
    }
}

impl FromStr for CacheType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(CacheType::All),
            "projects" => Ok(CacheType::Projects),
            "sections" => Ok(CacheType::Sections),
            "skills" => Ok(CacheType::Skills),
            "blogs" => Ok(CacheType::Blogs),
            other => Err(format!("unknown cache type '{}'", other)),
        }
    }
}

/// What an invalidation actually did
#[derive(Debug, Serialize)]
pub struct InvalidationOutcome {
    pub cache_type: CacheType,
    pub cleared_namespaces: Vec<String>,
    pub keys_deleted: usize,
    pub revalidated_paths: Vec<String>,
}

/// Clears Redis namespaces and pings the frontend revalidation webhook
pub struct Invalidator {
    cache: Arc<PortfolioCache>,
    http: reqwest::Client,
    revalidate: RevalidateConfig,
}

impl Invalidator {
    pub fn new(cache: Arc<PortfolioCache>, revalidate: RevalidateConfig) -> Self {
        Self {
            cache,
            http: reqwest::Client::new(),
            revalidate,
        }
    }

    /// Apply the dispatch table for one cache type
    pub async fn invalidate(
        &self,
        cache_type: CacheType,
    ) -> Result<InvalidationOutcome, portfolio_cache::CacheError> {
        let mut keys_deleted = 0;
        let mut cleared_namespaces = Vec::new();

        for pattern in cache_type.patterns() {
            keys_deleted += self.cache.scan_del(&pattern).await?;
            cleared_namespaces.push(pattern);
        }

        let mut revalidated_paths = Vec::new();
        for path in cache_type.paths() {
            if self.revalidate_path(path).await {
                revalidated_paths.push(path.to_string());
            }
        }

        info!(
            cache_type = cache_type.as_str(),
            keys_deleted,
            revalidated = revalidated_paths.len(),
            "Cache invalidated"
        );

        Ok(InvalidationOutcome {
            cache_type,
            cleared_namespaces,
            keys_deleted,
            revalidated_paths,
        })
    }

    /// Clear one entity namespace after an admin write
    pub async fn invalidate_after_write(&self, cache_type: CacheType) {
        if let Err(e) = self.invalidate(cache_type).await {
            // Stale cache entries expire by TTL anyway
            warn!(cache_type = cache_type.as_str(), error = %e, "Post-write cache invalidation failed");
        }
    }

    /// Best-effort POST to the revalidation webhook. Returns whether the
    /// path was actually revalidated.
    async fn revalidate_path(&self, path: &str) -> bool {
        let Some(url) = self.revalidate.url.as_deref() else {
            return false;
        };

        let mut body = serde_json::json!({ "path": path });
        if let Some(secret) = self.revalidate.secret.as_deref() {
            body["secret"] = serde_json::Value::String(secret.to_string());
        }

        match self.http.post(url).json(&body).send().await {
            Ok(resp) if resp.status().is_success() => true,
            Ok(resp) => {
                warn!(path, status = %resp.status(), "Revalidation webhook rejected path");
                false
            }
            Err(e) => {
                warn!(path, error = %e, "Revalidation webhook unreachable");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_cache_type_rejected() {
        assert!("everything".parse::<CacheType>().is_err());
        assert!("".parse::<CacheType>().is_err());
        assert!("blog".parse::<CacheType>().is_err());
    }

    #[test]
    fn test_known_cache_types_parse() {
        assert_eq!("all".parse::<CacheType>().unwrap(), CacheType::All);
        assert_eq!("Projects".parse::<CacheType>().unwrap(), CacheType::Projects);
        assert_eq!(" blogs ".parse::<CacheType>().unwrap(), CacheType::Blogs);
    }

    #[test]
    fn test_all_covers_every_namespace() {
        let all = CacheType::All.patterns();
        for single in [
            CacheType::Projects,
            CacheType::Sections,
            CacheType::Skills,
            CacheType::Blogs,
        ] {
            for pattern in single.patterns() {
                assert!(all.contains(&pattern), "all missing {}", pattern);
            }
        }
    }

    #[test]
    fn test_single_type_clears_only_its_namespace() {
        let patterns = CacheType::Projects.patterns();
        assert_eq!(patterns.len(), 1);
        assert!(patterns[0].contains(":projects:"));

        assert_eq!(CacheType::Projects.paths(), vec!["/projects"]);
        assert_eq!(CacheType::Blogs.paths(), vec!["/blog"]);
    }
}
