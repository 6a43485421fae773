/// Business logic layer
///
/// - `localization`: bilingual blog payload normalization
/// - `newsletter`: newsletter composition and concurrent dispatch
/// - `email_service`: SMTP transport and message building
/// - `image_processing`: profile image size variants
pub mod email_service;
pub mod image_processing;
pub mod localization;
pub mod newsletter;

pub use email_service::{EmailConfig, MailTransport, SmtpMailer};
pub use newsletter::{DispatchReport, NewsletterService};
