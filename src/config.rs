use log::warn;
use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use uuid::Uuid;

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;
const DATABASE: &str = "NearbySpace";
const TOKEN_TTL_HOURS: i64 = 12;
const IP_GEOLOCATION_URL: &str = "http://ip-api.com/json";
const IP_GEOLOCATION_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, PartialEq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "{} must be set", key),
            ConfigError::Invalid { key, value } => write!(f, "{} has invalid value {:?}", key, value),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub mongo_uri: String,
    pub database: String,
    pub jwt_secret: String,
    /// Shared key exchanged for a moderator token. Moderation logins are refused when unset.
    pub moderator_key: Option<String>,
    pub token_ttl_hours: i64,
    pub ip_geolocation: bool,
    pub ip_geolocation_url: String,
    pub ip_geolocation_timeout: Duration,
}

fn parse_var<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        _ => Ok(default),
    }
}

fn optional_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let mongo_uri = optional_var("MONGODB_URI").ok_or(ConfigError::Missing("MONGODB_URI"))?;

        let jwt_secret = optional_var("JWT_SECRET").unwrap_or_else(|| {
            warn!("JWT_SECRET not set, moderator tokens will not survive a restart");
            Uuid::new_v4().to_string()
        });

        Ok(Self {
            host: optional_var("HOST").unwrap_or_else(|| HOST.to_string()),
            port: parse_var("PORT", PORT)?,
            mongo_uri,
            database: optional_var("MONGODB_DATABASE").unwrap_or_else(|| DATABASE.to_string()),
            jwt_secret,
            moderator_key: optional_var("MODERATOR_KEY"),
            token_ttl_hours: parse_var("TOKEN_TTL_HOURS", TOKEN_TTL_HOURS)?,
            ip_geolocation: parse_var("IP_GEOLOCATION", false)?,
            ip_geolocation_url: optional_var("IP_GEOLOCATION_URL")
                .unwrap_or_else(|| IP_GEOLOCATION_URL.to_string()),
            ip_geolocation_timeout: Duration::from_secs(parse_var(
                "IP_GEOLOCATION_TIMEOUT_SECS",
                IP_GEOLOCATION_TIMEOUT_SECS,
            )?),
        })
    }

    /// Settings for running without a database, used by the test suites.
    pub fn local(jwt_secret: &str, moderator_key: Option<&str>) -> Self {
        Self {
            host: HOST.to_string(),
            port: PORT,
            mongo_uri: String::new(),
            database: DATABASE.to_string(),
            jwt_secret: jwt_secret.to_string(),
            moderator_key: moderator_key.map(str::to_string),
            token_ttl_hours: TOKEN_TTL_HOURS,
            ip_geolocation: false,
            ip_geolocation_url: IP_GEOLOCATION_URL.to_string(),
            ip_geolocation_timeout: Duration::from_secs(IP_GEOLOCATION_TIMEOUT_SECS),
        }
    }
}
