use std::path::PathBuf;

use chrono::Duration;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("otp_ttl_minutes must be a positive number of minutes, got {0}")]
    OtpTtl(i64),
}

/// SMTP relay used for outgoing mail. Without it mail is only logged.
#[derive(Debug, Clone, Deserialize)]
pub struct SmtpSettings {
    pub host: String,
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    pub username: String,
    pub password: String,
}

fn default_smtp_port() -> u16 {
    587
}

/// Application settings, read from the Rocket figment (`Rocket.toml`,
/// `ROCKET_*` environment variables).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database_path: PathBuf,
    pub media_dir: PathBuf,
    pub otp_ttl_minutes: i64,
    pub mail_from: String,
    pub smtp: Option<SmtpSettings>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            database_path: PathBuf::from("data/expenses.sqlite"),
            media_dir: PathBuf::from("data/media"),
            otp_ttl_minutes: 5,
            mail_from: "noreply@yourexpensetracker.com".to_string(),
            smtp: None,
        }
    }
}

impl AppConfig {
    /// Checked once at ignition so later lookups cannot fail.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.otp_ttl().map(|_| ())
    }

    pub fn otp_ttl(&self) -> Result<Duration, ConfigError> {
        if self.otp_ttl_minutes <= 0 {
            return Err(ConfigError::OtpTtl(self.otp_ttl_minutes));
        }
        Duration::try_minutes(self.otp_ttl_minutes).ok_or(ConfigError::OtpTtl(self.otp_ttl_minutes))
    }

    pub fn profile_images_dir(&self) -> PathBuf {
        self.media_dir.join("profile_images")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_ttl(minutes: i64) -> AppConfig {
        AppConfig {
            otp_ttl_minutes: minutes,
            ..AppConfig::default()
        }
    }

    #[test]
    fn default_ttl_is_five_minutes() {
        assert_eq!(AppConfig::default().otp_ttl(), Ok(Duration::minutes(5)));
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn out_of_range_ttl_is_rejected() {
        assert_eq!(with_ttl(0).validate(), Err(ConfigError::OtpTtl(0)));
        assert_eq!(with_ttl(-3).validate(), Err(ConfigError::OtpTtl(-3)));
        assert_eq!(with_ttl(i64::MAX).otp_ttl(), Err(ConfigError::OtpTtl(i64::MAX)));
    }

    #[test]
    fn smtp_port_defaults_to_submission() {
        let settings: SmtpSettings = serde_json::from_str(
            r#"{"host": "smtp.example.com", "username": "mailer", "password": "secret"}"#,
        )
        .unwrap();
        assert_eq!(settings.port, 587);
    }
}
