//! survey-notify
//!
//! Feedback e-mail: rendering with Tera templates and delivery through
//! Mailgun. The survey service only sees the [`Notifier`] trait and whether
//! a send succeeded.

pub mod config;
pub mod error;
pub mod mailgun;
pub mod notifier;
pub mod render;

pub use config::MailConfig;
pub use error::NotifyError;
pub use mailgun::MailgunNotifier;
pub use notifier::{DisabledNotifier, Notifier};
