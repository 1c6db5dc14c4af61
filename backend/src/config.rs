use anyhow::anyhow;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database_url: String,
    /// Timezone used when formatting timestamps for dashboards.
    pub time_zone: Tz,
    /// E-mail allow-list deciding who resolves to a professor identity.
    pub professor_emails: Vec<String>,
    /// Validity window of a freshly issued activation code, in minutes.
    pub code_ttl_minutes: i64,
    /// Length of generated activation codes.
    pub code_length: usize,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "postgres://localhost/vibecheck".to_string());

        let time_zone_name = env::var("APP_TIMEZONE").unwrap_or_else(|_| "UTC".to_string());
        let time_zone: Tz = time_zone_name
            .parse()
            .map_err(|_| anyhow!("Invalid APP_TIMEZONE value: {}", time_zone_name))?;

        let professor_emails = env::var("PROFESSOR_EMAILS")
            .map(|raw| Self::parse_email_list(&raw))
            .unwrap_or_default();

        let code_ttl_minutes = env::var("CODE_TTL_MINUTES")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .unwrap_or(30);

        let code_length = env::var("CODE_LENGTH")
            .unwrap_or_else(|_| "6".to_string())
            .parse()
            .unwrap_or(6);

        Ok(Config {
            database_url,
            time_zone,
            professor_emails,
            code_ttl_minutes,
            code_length,
        })
    }

    fn parse_email_list(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Whether the given e-mail resolves to the professor role.
    pub fn is_professor(&self, email: &str) -> bool {
        let email = email.to_lowercase();
        self.professor_emails.iter().any(|e| e == &email)
    }
}
