/// Newsletter composition and dispatch
///
/// For each active subscriber the composer picks a language (English unless
/// the stored preference is Spanish), renders a localized subject plus HTML
/// and plain-text bodies with the post link, an unsubscribe link carrying
/// the subscriber's token, and the site logo referenced inline. Sends fan
/// out concurrently and results are collected after all complete; a failed
/// recipient never aborts the batch and nothing is retried.
use crate::models::{BlogPost, Language, Subscriber};
use crate::services::email_service::{self, EmailConfig, MailTransport, LOGO_CONTENT_ID};
use futures::future::join_all;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Aggregate outcome of a newsletter batch
#[derive(Debug, Clone, Serialize)]
pub struct DispatchReport {
    pub sent: usize,
    pub failed: Vec<String>,
}

/// Localized pieces of one newsletter email
#[derive(Debug, Clone)]
pub struct ComposedEmail {
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
}

pub struct NewsletterService {
    transport: Arc<dyn MailTransport>,
    config: EmailConfig,
    public_url: String,
}

impl NewsletterService {
    pub fn new(transport: Arc<dyn MailTransport>, config: EmailConfig, public_url: String) -> Self {
        Self {
            transport,
            config,
            public_url,
        }
    }

    /// Canonical link of a published post
    fn post_url(&self, post: &BlogPost) -> String {
        format!("{}/blog/{}", self.public_url.trim_end_matches('/'), post.slug)
    }

    /// Unsubscribe link carrying the subscriber's token
    fn unsubscribe_url(&self, token: &str) -> String {
        format!(
            "{}/api/v1/subscribe/unsubscribe?token={}",
            self.public_url.trim_end_matches('/'),
            token
        )
    }

    /// Render the localized subject and bodies for one subscriber
    pub fn compose(&self, post: &BlogPost, subscriber: &Subscriber) -> ComposedEmail {
        let language = Language::from_preference(subscriber.language.as_deref());
        let post_url = self.post_url(post);
        let unsubscribe_url = self.unsubscribe_url(&subscriber.unsubscribe_token);

        let (subject, title, subtitle, read_more, unsubscribe_label) = match language {
            Language::Es => (
                format!("Nueva publicación: {}", post.title_es),
                post.title_es.as_str(),
                post.subtitle_es.as_str(),
                "Leer la publicación",
                "Cancelar suscripción",
            ),
            Language::En => (
                format!("New post: {}", post.title_en),
                post.title_en.as_str(),
                post.subtitle_en.as_str(),
                "Read the post",
                "Unsubscribe",
            ),
        };

        let html_body = format!(
            r#"
<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <style>
        body {{ font-family: Arial, sans-serif; line-height: 1.6; color: #333; }}
        .container {{ max-width: 600px; margin: 0 auto; padding: 20px; }}
        .header {{ background-color: #1a1a2e; color: white; padding: 20px; text-align: center; border-radius: 5px 5px 0 0; }}
        .content {{ background-color: #f9f9f9; padding: 20px; border-radius: 0 0 5px 5px; }}
        .button {{ display: inline-block; background-color: #1a1a2e; color: white; padding: 12px 24px; text-decoration: none; border-radius: 4px; margin: 20px 0; }}
        .footer {{ margin-top: 20px; padding-top: 20px; border-top: 1px solid #ddd; font-size: 12px; color: #666; }}
    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <img src="cid:{logo_cid}" alt="logo" height="40">
            <h1>{title}</h1>
        </div>
        <div class="content">
            <p>{subtitle}</p>

            <p style="text-align: center;">
                <a href="{post_url}" class="button">{read_more}</a>
            </p>

            <p style="word-break: break-all; background-color: #eee; padding: 10px; border-radius: 4px;">
                {post_url}
            </p>

            <div class="footer">
                <p><a href="{unsubscribe_url}">{unsubscribe_label}</a></p>
            </div>
        </div>
    </div>
</body>
</html>
            "#,
            logo_cid = LOGO_CONTENT_ID,
            title = title,
            subtitle = subtitle,
            post_url = post_url,
            read_more = read_more,
            unsubscribe_url = unsubscribe_url,
            unsubscribe_label = unsubscribe_label,
        );

        let text_body = format!(
            "{title}\n\n{subtitle}\n\n{read_more}: {post_url}\n\n{unsubscribe_label}: {unsubscribe_url}\n",
            title = title,
            subtitle = subtitle,
            read_more = read_more,
            post_url = post_url,
            unsubscribe_label = unsubscribe_label,
            unsubscribe_url = unsubscribe_url,
        );

        ComposedEmail {
            subject,
            text_body,
            html_body,
        }
    }

    /// Send the newsletter to every subscriber, concurrently, collecting
    /// per-recipient outcomes after all sends complete.
    pub async fn dispatch(&self, post: &BlogPost, subscribers: &[Subscriber]) -> DispatchReport {
        let logo = match tokio::fs::read(&self.config.logo_path).await {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                warn!(path = %self.config.logo_path, error = %e, "Newsletter logo unavailable, sending without it");
                None
            }
        };

        let sends = subscribers.iter().map(|subscriber| {
            let composed = self.compose(post, subscriber);
            let logo = logo.clone();

            async move {
                let message = match email_service::build_message(
                    &self.config,
                    &subscriber.email,
                    &composed.subject,
                    &composed.text_body,
                    &composed.html_body,
                    logo,
                ) {
                    Ok(message) => message,
                    Err(e) => {
                        warn!(recipient = %subscriber.email, error = %e, "Newsletter message build failed");
                        return Err(subscriber.email.clone());
                    }
                };

                match self.transport.send(message).await {
                    Ok(()) => Ok(()),
                    Err(e) => {
                        warn!(recipient = %subscriber.email, error = %e, "Newsletter send failed");
                        Err(subscriber.email.clone())
                    }
                }
            }
        });

        let results = join_all(sends).await;

        let mut sent = 0;
        let mut failed = Vec::new();
        for result in results {
            match result {
                Ok(()) => sent += 1,
                Err(email) => failed.push(email),
            }
        }

        info!(
            slug = %post.slug,
            sent,
            failed = failed.len(),
            "Newsletter batch finished"
        );

        DispatchReport { sent, failed }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use async_trait::async_trait;
    use chrono::Utc;
    use lettre::Message;
    use std::collections::HashSet;
    use uuid::Uuid;

    /// Transport stub failing for a fixed set of recipients
    struct StubTransport {
        failing: HashSet<String>,
    }

    impl StubTransport {
        fn failing_for(addresses: &[&str]) -> Self {
            Self {
                failing: addresses.iter().map(|a| a.to_string()).collect(),
            }
        }
    }

    #[async_trait]
    impl MailTransport for StubTransport {
        async fn send(&self, message: Message) -> anyhow::Result<()> {
            let recipient = message
                .envelope()
                .to()
                .first()
                .map(|a| a.to_string())
                .unwrap_or_default();

            if self.failing.contains(&recipient) {
                Err(anyhow!("smtp rejected {}", recipient))
            } else {
                Ok(())
            }
        }
    }

    fn test_post() -> BlogPost {
        let now = Utc::now();
        BlogPost {
            id: Uuid::new_v4(),
            slug: "first-post".to_string(),
            title_en: "First Post".to_string(),
            title_es: "Primera Publicación".to_string(),
            subtitle_en: "An introduction".to_string(),
            subtitle_es: "Una introducción".to_string(),
            content_en: String::new(),
            content_es: String::new(),
            footer_en: String::new(),
            footer_es: String::new(),
            bibliography_en: String::new(),
            bibliography_es: String::new(),
            tags: vec![],
            cover_image: None,
            pdf_attachment: None,
            published: true,
            published_at: Some(now),
            created_at: now,
            updated_at: now,
        }
    }

    fn subscriber(email: &str, language: Option<&str>) -> Subscriber {
        let now = Utc::now();
        Subscriber {
            id: Uuid::new_v4(),
            email: email.to_string(),
            language: language.map(str::to_string),
            unsubscribe_token: format!("token-{}", email),
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn service(transport: StubTransport) -> NewsletterService {
        let config = EmailConfig {
            smtp_host: "localhost".to_string(),
            smtp_port: 1025,
            smtp_username: String::new(),
            smtp_password: String::new(),
            from_email: "noreply@portfolio.dev".to_string(),
            from_name: "Portfolio".to_string(),
            // missing on purpose: batches must still go out without a logo
            logo_path: "./does-not-exist.png".to_string(),
        };
        NewsletterService::new(Arc::new(transport), config, "https://example.dev".to_string())
    }

    #[test]
    fn test_compose_defaults_to_english() {
        let service = service(StubTransport::failing_for(&[]));
        let post = test_post();

        for language in [None, Some(""), Some("fr"), Some("nonsense")] {
            let composed = service.compose(&post, &subscriber("a@example.com", language));
            assert_eq!(composed.subject, "New post: First Post");
            assert!(composed.html_body.contains("Read the post"));
        }
    }

    #[test]
    fn test_compose_spanish() {
        let service = service(StubTransport::failing_for(&[]));
        let composed = service.compose(&test_post(), &subscriber("a@example.com", Some("es")));
        assert_eq!(composed.subject, "Nueva publicación: Primera Publicación");
        assert!(composed.html_body.contains("Leer la publicación"));
    }

    #[test]
    fn test_compose_carries_unsubscribe_token_and_link() {
        let service = service(StubTransport::failing_for(&[]));
        let composed = service.compose(&test_post(), &subscriber("a@example.com", None));
        assert!(composed
            .html_body
            .contains("unsubscribe?token=token-a@example.com"));
        assert!(composed.html_body.contains("https://example.dev/blog/first-post"));
        assert!(composed.text_body.contains("https://example.dev/blog/first-post"));
    }

    #[tokio::test]
    async fn test_dispatch_reports_partial_failure() {
        let service = service(StubTransport::failing_for(&[
            "b@example.com",
            "d@example.com",
        ]));

        let subscribers = vec![
            subscriber("a@example.com", None),
            subscriber("b@example.com", Some("es")),
            subscriber("c@example.com", None),
            subscriber("d@example.com", None),
            subscriber("e@example.com", Some("en")),
        ];

        let report = service.dispatch(&test_post(), &subscribers).await;

        assert_eq!(report.sent, 3);
        assert_eq!(report.failed.len(), 2);
        assert!(report.failed.contains(&"b@example.com".to_string()));
        assert!(report.failed.contains(&"d@example.com".to_string()));
    }

    #[tokio::test]
    async fn test_dispatch_counts_unbuildable_recipient_as_failed() {
        let service = service(StubTransport::failing_for(&[]));
        let subscribers = vec![
            subscriber("good@example.com", None),
            subscriber("not-an-address", None),
        ];

        let report = service.dispatch(&test_post(), &subscribers).await;

        assert_eq!(report.sent, 1);
        assert_eq!(report.failed, vec!["not-an-address".to_string()]);
    }

    #[tokio::test]
    async fn test_dispatch_empty_list() {
        let service = service(StubTransport::failing_for(&[]));
        let report = service.dispatch(&test_post(), &[]).await;
        assert_eq!(report.sent, 0);
        assert!(report.failed.is_empty());
    }
}
