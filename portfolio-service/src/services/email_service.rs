/// Email delivery over SMTP
/// Uses lettre for transport; message composition lives with the callers.
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Body, Message, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};

/// Configuration for SMTP email delivery
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// SMTP server host (e.g., smtp.gmail.com, smtp.sendgrid.net)
    pub smtp_host: String,
    /// SMTP server port (usually 587 for TLS, 465 for SSL)
    pub smtp_port: u16,
    /// SMTP username
    pub smtp_username: String,
    /// SMTP password
    pub smtp_password: String,
    /// Sender email address
    pub from_email: String,
    /// Sender display name
    pub from_name: String,
    /// Path of the logo embedded inline in newsletters
    pub logo_path: String,
}

impl EmailConfig {
    /// Create new email config from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(EmailConfig {
            smtp_host: std::env::var("SMTP_HOST").unwrap_or_else(|_| "localhost".to_string()),
            smtp_port: std::env::var("SMTP_PORT")
                .unwrap_or_else(|_| "587".to_string())
                .parse()
                .unwrap_or(587),
            smtp_username: std::env::var("SMTP_USERNAME").unwrap_or_default(),
            smtp_password: std::env::var("SMTP_PASSWORD").unwrap_or_default(),
            from_email: std::env::var("FROM_EMAIL")
                .unwrap_or_else(|_| "noreply@portfolio.dev".to_string()),
            from_name: std::env::var("FROM_NAME").unwrap_or_else(|_| "Portfolio".to_string()),
            logo_path: std::env::var("NEWSLETTER_LOGO_PATH")
                .unwrap_or_else(|_| "./assets/logo.png".to_string()),
        })
    }

    /// Check if the transport is usable
    pub fn is_configured(&self) -> bool {
        !self.smtp_username.is_empty()
            && !self.smtp_password.is_empty()
            && !self.smtp_host.is_empty()
    }
}

/// Transport seam so the newsletter batch can be tested without SMTP
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, message: Message) -> Result<()>;
}

/// SMTP-backed transport
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    pub fn new(config: &EmailConfig) -> Result<Self> {
        let creds = Credentials::new(
            config.smtp_username.clone(),
            config.smtp_password.clone(),
        );

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
            .map_err(|e| anyhow!("Failed to build SMTP transport: {}", e))?
            .port(config.smtp_port)
            .credentials(creds)
            .build();

        Ok(Self { transport })
    }
}

#[async_trait]
impl MailTransport for SmtpMailer {
    async fn send(&self, message: Message) -> Result<()> {
        self.transport
            .send(message)
            .await
            .map_err(|e| anyhow!("Failed to send email: {}", e))?;
        Ok(())
    }
}

/// Content-ID referenced by newsletter HTML (`cid:site-logo`)
pub const LOGO_CONTENT_ID: &str = "site-logo";

/// Build a text+HTML message, optionally with the logo attached inline
pub fn build_message(
    config: &EmailConfig,
    to_email: &str,
    subject: &str,
    text_body: &str,
    html_body: &str,
    inline_logo: Option<Vec<u8>>,
) -> Result<Message> {
    if to_email.is_empty() {
        return Err(anyhow!("Recipient email cannot be empty"));
    }

    let from = format!("{} <{}>", config.from_name, config.from_email)
        .parse()
        .map_err(|e| anyhow!("Invalid from email address: {}", e))?;

    let to = to_email
        .parse()
        .map_err(|e| anyhow!("Invalid to email address: {}", e))?;

    let text_part = SinglePart::builder()
        .header(ContentType::TEXT_PLAIN)
        .body(text_body.to_string());
    let html_part = SinglePart::builder()
        .header(ContentType::TEXT_HTML)
        .body(html_body.to_string());

    let body = match inline_logo {
        Some(bytes) => {
            let logo = Attachment::new_inline(LOGO_CONTENT_ID.to_string()).body(
                Body::new(bytes),
                ContentType::parse("image/png").expect("static content type"),
            );

            MultiPart::alternative()
                .singlepart(text_part)
                .multipart(MultiPart::related().singlepart(html_part).singlepart(logo))
        }
        None => MultiPart::alternative()
            .singlepart(text_part)
            .singlepart(html_part),
    };

    let message = Message::builder()
        .from(from)
        .to(to)
        .subject(subject)
        .multipart(body)
        .map_err(|e| anyhow!("Failed to build email message: {}", e))?;

    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> EmailConfig {
        EmailConfig {
            smtp_host: "localhost".to_string(),
            smtp_port: 1025,
            smtp_username: String::new(),
            smtp_password: String::new(),
            from_email: "test@portfolio.dev".to_string(),
            from_name: "Test".to_string(),
            logo_path: "./assets/logo.png".to_string(),
        }
    }

    #[test]
    fn test_email_config_from_env() {
        let config = EmailConfig::from_env();
        assert!(config.is_ok());
    }

    #[test]
    fn test_unconfigured_transport_detected() {
        assert!(!test_config().is_configured());
    }

    #[test]
    fn test_build_message_rejects_empty_recipient() {
        let result = build_message(&test_config(), "", "subject", "text", "<p>html</p>", None);
        assert!(result.is_err());
    }

    #[test]
    fn test_build_message_with_inline_logo() {
        let result = build_message(
            &test_config(),
            "reader@example.com",
            "subject",
            "text",
            "<p>html</p>",
            Some(vec![0u8; 8]),
        );
        assert!(result.is_ok());
    }
}
