// config.rs
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::errors::{AppError, Result};

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub sender: String,
    pub password: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub smtp: SmtpConfig,
    pub contact_recipient: String,
    pub otp_ttl: chrono::Duration,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any variable source; `from_env` passes the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let sender = get("EMAIL").ok_or_else(|| AppError::configuration("EMAIL must be set"))?;
        let password =
            get("PASSWORD").ok_or_else(|| AppError::configuration("PASSWORD must be set"))?;

        let smtp = SmtpConfig {
            host: get("SMTP_HOST").unwrap_or_else(|| "smtp.gmail.com".to_string()),
            port: parse_or(get("SMTP_PORT"), "SMTP_PORT", 465)?,
            sender: sender.clone(),
            password,
            timeout: Duration::from_secs(parse_or(
                get("MAIL_TIMEOUT_SECONDS"),
                "MAIL_TIMEOUT_SECONDS",
                30,
            )?),
        };

        let ttl_secs: i64 = parse_or(get("OTP_TTL_SECONDS"), "OTP_TTL_SECONDS", 300)?;
        if ttl_secs <= 0 {
            return Err(AppError::configuration("OTP_TTL_SECONDS must be positive"));
        }

        Ok(AppConfig {
            smtp,
            contact_recipient: get("CONTACT_RECIPIENT").unwrap_or(sender),
            otp_ttl: chrono::Duration::seconds(ttl_secs),
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(get("PORT"), "PORT", 5000)?,
        })
    }
}

fn parse_or<T: FromStr>(raw: Option<String>, key: &str, default: T) -> Result<T> {
    match raw {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| {
                AppError::configuration(format!("{} must be a number, got {:?}", key, value))
            }),
        None => Ok(default),
    }
}
