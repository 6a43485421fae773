/// Data models for the portfolio service
///
/// This module defines the persisted entities:
/// - Project, Skill, Section: public marketing content
/// - BlogPost: bilingual blog entries
/// - Comment / CommentVote: reader feedback on blog posts
/// - ContactMessage: contact form submissions
/// - Subscriber: newsletter recipients
/// - AdminSession: rows backing the admin session cookie
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
    pub id: Uuid,
    pub title_en: String,
    pub title_es: String,
    pub description_en: String,
    pub description_es: String,
    pub technologies: Vec<String>,
    pub repo_url: Option<String>,
    pub demo_url: Option<String>,
    pub cover_image: Option<String>,
    pub display_order: i32,
    pub visible: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Skill {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub level: i32,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Section {
    pub id: Uuid,
    pub slug: String,
    pub heading_en: String,
    pub heading_es: String,
    pub body_en: String,
    pub body_es: String,
    pub display_order: i32,
    pub visible: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct BlogPost {
    pub id: Uuid,
    pub slug: String,
    pub title_en: String,
    pub title_es: String,
    pub subtitle_en: String,
    pub subtitle_es: String,
    pub content_en: String,
    pub content_es: String,
    pub footer_en: String,
    pub footer_es: String,
    pub bibliography_en: String,
    pub bibliography_es: String,
    pub tags: Vec<String>,
    pub cover_image: Option<String>,
    pub pdf_attachment: Option<String>,
    pub published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub blog_id: Uuid,
    pub author_name: String,
    pub author_email: String,
    pub body: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CommentVote {
    pub id: Uuid,
    pub comment_id: Uuid,
    pub voter_ip: String,
    pub vote: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ContactMessage {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub body: String,
    pub sender_ip: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Subscriber {
    pub id: Uuid,
    pub email: String,
    pub language: Option<String>,
    pub unsubscribe_token: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AdminSession {
    pub id: Uuid,
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Moderation status of a comment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentStatus {
    Pending,
    Approved,
    Rejected,
}

impl CommentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommentStatus::Pending => "pending",
            CommentStatus::Approved => "approved",
            CommentStatus::Rejected => "rejected",
        }
    }
}

impl FromStr for CommentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(CommentStatus::Pending),
            "approved" => Ok(CommentStatus::Approved),
            "rejected" => Ok(CommentStatus::Rejected),
            other => Err(format!("unknown comment status '{}'", other)),
        }
    }
}

/// Direction of a comment vote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteValue {
    Up,
    Down,
}

impl VoteValue {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteValue::Up => "up",
            VoteValue::Down => "down",
        }
    }
}

impl FromStr for VoteValue {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "up" => Ok(VoteValue::Up),
            "down" => Ok(VoteValue::Down),
            other => Err(format!("unknown vote value '{}'", other)),
        }
    }
}

/// Newsletter language. Anything that is not Spanish composes in English.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Es,
}

impl Language {
    /// Parse a stored preference, defaulting to English for unset or
    /// unrecognized values.
    pub fn from_preference(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_lowercase()) {
            Some(ref v) if v == "es" || v == "spanish" || v == "español" => Language::Es,
            _ => Language::En,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_defaults_to_english() {
        assert_eq!(Language::from_preference(None), Language::En);
        assert_eq!(Language::from_preference(Some("")), Language::En);
        assert_eq!(Language::from_preference(Some("fr")), Language::En);
        assert_eq!(Language::from_preference(Some("klingon")), Language::En);
    }

    #[test]
    fn test_language_spanish_variants() {
        assert_eq!(Language::from_preference(Some("es")), Language::Es);
        assert_eq!(Language::from_preference(Some("ES")), Language::Es);
        assert_eq!(Language::from_preference(Some("Spanish")), Language::Es);
    }

    #[test]
    fn test_comment_status_round_trip() {
        for status in [
            CommentStatus::Pending,
            CommentStatus::Approved,
            CommentStatus::Rejected,
        ] {
            assert_eq!(status.as_str().parse::<CommentStatus>().unwrap(), status);
        }
        assert!("published".parse::<CommentStatus>().is_err());
    }

    #[test]
    fn test_vote_value_parsing() {
        assert_eq!("up".parse::<VoteValue>().unwrap(), VoteValue::Up);
        assert_eq!("DOWN".parse::<VoteValue>().unwrap(), VoteValue::Down);
        assert!("sideways".parse::<VoteValue>().is_err());
    }
}
