//! Outgoing mail. Messages are composed here and handed to a [`Mailer`]:
//! SMTP when a relay is configured, the log otherwise.

use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use thiserror::Error;
use tracing::info;

use crate::config::{AppConfig, SmtpSettings};

#[derive(Debug, Error)]
#[error("mail delivery failed: {0}")]
pub struct MailError(pub String);

fn mail_error(err: impl std::fmt::Display) -> MailError {
    MailError(err.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: String,
}

pub trait Mailer: Send + Sync {
    fn send(&self, mail: &OutgoingMail) -> Result<(), MailError>;
}

/// Writes every message to the log instead of delivering it.
pub struct LogMailer;

impl Mailer for LogMailer {
    fn send(&self, mail: &OutgoingMail) -> Result<(), MailError> {
        info!(
            from = %mail.from,
            to = %mail.to,
            subject = %mail.subject,
            body = %mail.text,
            "outgoing mail"
        );
        Ok(())
    }
}

/// Delivers through an SMTP relay with STARTTLS and login credentials.
pub struct SmtpMailer {
    transport: SmtpTransport,
}

impl SmtpMailer {
    pub fn new(settings: &SmtpSettings) -> Result<Self, MailError> {
        let transport = SmtpTransport::starttls_relay(&settings.host)
            .map_err(mail_error)?
            .port(settings.port)
            .credentials(Credentials::new(
                settings.username.clone(),
                settings.password.clone(),
            ))
            .build();
        Ok(SmtpMailer { transport })
    }
}

fn build_message(mail: &OutgoingMail) -> Result<Message, MailError> {
    Message::builder()
        .from(mail.from.parse::<Mailbox>().map_err(mail_error)?)
        .to(mail.to.parse::<Mailbox>().map_err(mail_error)?)
        .subject(mail.subject.clone())
        .multipart(MultiPart::alternative_plain_html(
            mail.text.clone(),
            mail.html.clone(),
        ))
        .map_err(mail_error)
}

impl Mailer for SmtpMailer {
    fn send(&self, mail: &OutgoingMail) -> Result<(), MailError> {
        let message = build_message(mail)?;
        self.transport.send(&message).map_err(mail_error)?;
        info!(to = %mail.to, subject = %mail.subject, "mail delivered");
        Ok(())
    }
}

pub fn mailer_for(config: &AppConfig) -> Result<Box<dyn Mailer>, MailError> {
    match &config.smtp {
        Some(settings) => {
            info!(host = %settings.host, port = settings.port, "mail goes through SMTP");
            Ok(Box::new(SmtpMailer::new(settings)?))
        }
        None => Ok(Box::new(LogMailer)),
    }
}

pub fn password_reset_mail(
    from: &str,
    to: &str,
    full_name: &str,
    otp: &str,
    ttl_minutes: i64,
) -> OutgoingMail {
    OutgoingMail {
        from: from.to_string(),
        to: to.to_string(),
        subject: "Password Reset Request - Expense Tracker".to_string(),
        text: format!(
            "Hi {full_name}, your OTP for password reset is {otp}. \
             It is valid for the next {ttl_minutes} minutes. \
             If you didn't request a password reset, please ignore this email."
        ),
        html: format!(
            "<p>Hi {full_name},</p>\
             <p>Your OTP for password reset is <strong>{otp}</strong>.</p>\
             <p>It is valid for the next {ttl_minutes} minutes.</p>\
             <p>If you didn't request a password reset, please ignore this email.</p>"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reset_mail() -> OutgoingMail {
        password_reset_mail("noreply@x.test", "a@x.test", "Asha", "482913", 5)
    }

    #[test]
    fn reset_mail_states_the_enforced_expiry() {
        let mail = reset_mail();
        assert_eq!(mail.to, "a@x.test");
        assert!(mail.text.contains("482913"));
        assert!(mail.text.contains("5 minutes"));
        assert!(mail.html.contains("<strong>482913</strong>"));
        assert!(LogMailer.send(&mail).is_ok());
    }

    #[test]
    fn messages_carry_plain_and_html_parts() {
        let message = build_message(&reset_mail()).unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();
        assert!(raw.contains("multipart/alternative"));
        assert!(raw.contains("text/plain"));
        assert!(raw.contains("text/html"));
    }

    #[test]
    fn bad_addresses_are_reported() {
        let mail = OutgoingMail {
            to: "not an address".to_string(),
            ..reset_mail()
        };
        assert!(build_message(&mail).is_err());
    }

    #[test]
    fn smtp_is_used_only_when_configured() {
        assert!(mailer_for(&AppConfig::default()).is_ok());

        let config = AppConfig {
            smtp: Some(SmtpSettings {
                host: "smtp.example.com".to_string(),
                port: 587,
                username: "mailer".to_string(),
                password: "secret".to_string(),
            }),
            ..AppConfig::default()
        };
        assert!(mailer_for(&config).is_ok());
    }
}
