//! Mail Config

use std::time::Duration;

use clap::Args;
use homestay_app::notifications::SmtpConfig;

/// SMTP relay settings. Mail is disabled unless a host is given.
#[derive(Debug, Args)]
pub struct MailConfig {
    /// SMTP relay host
    #[arg(long, env = "SMTP_HOST")]
    pub smtp_host: Option<String>,

    /// SMTP relay port
    #[arg(long, env = "SMTP_PORT", default_value_t = 587_u16)]
    pub smtp_port: u16,

    /// SMTP username
    #[arg(long, env = "SMTP_USERNAME", default_value = "")]
    pub smtp_username: String,

    /// SMTP password
    #[arg(long, env = "SMTP_PASSWORD", default_value = "", hide_env_values = true)]
    pub smtp_password: String,

    /// Sender mailbox, e.g. `Homestay <bookings@example.com>`
    #[arg(long, env = "MAIL_FROM", default_value = "Homestay <no-reply@localhost>")]
    pub mail_from: String,

    /// Timeout for SMTP delivery in seconds
    #[arg(long, env = "SMTP_TIMEOUT_SECONDS", default_value_t = 10_u64)]
    pub smtp_timeout_seconds: u64,
}

impl MailConfig {
    /// Relay settings, or `None` when no host is configured.
    #[must_use]
    pub fn smtp_config(&self) -> Option<SmtpConfig> {
        let host = self.smtp_host.as_deref()?.trim();

        if host.is_empty() {
            return None;
        }

        Some(SmtpConfig {
            host: host.to_string(),
            port: self.smtp_port,
            username: self.smtp_username.clone(),
            password: self.smtp_password.clone(),
            from: self.mail_from.clone(),
            timeout: Duration::from_secs(self.smtp_timeout_seconds),
        })
    }
}
