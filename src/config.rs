use std::time::Duration;

use crate::error::AdvisorError;
use crate::models::Owner;

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub database_url: Option<String>,
    pub user_id: Option<String>,
    pub user_email: Option<String>,
    pub simulate_latency_ms: u64,
}

impl Config {
    /// Reads settings from the process environment (after `.env` is loaded).
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let simulate_latency_ms = match lookup("SIMULATE_LATENCY_MS") {
            Some(value) if !value.trim().is_empty() => value.trim().parse::<u64>().map_err(|_| {
                anyhow::anyhow!("SIMULATE_LATENCY_MS must be a whole number of milliseconds")
            })?,
            _ => 0,
        };

        Ok(Self {
            database_url: non_empty(lookup("DATABASE_URL")),
            user_id: non_empty(lookup("ADVISOR_USER_ID")),
            user_email: non_empty(lookup("ADVISOR_USER_EMAIL")),
            simulate_latency_ms,
        })
    }

    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.simulate_latency_ms)
    }

    /// The identity every storage call runs under. Missing identity means the
    /// caller is not signed in.
    pub fn owner(&self) -> Result<Owner, AdvisorError> {
        let user_id = self.user_id.clone().ok_or_else(|| {
            AdvisorError::CollaboratorUnavailable(
                "authentication required: set ADVISOR_USER_ID or pass --user-id".to_string(),
            )
        })?;
        let email = self.user_email.clone().unwrap_or_else(|| user_id.clone());
        Ok(Owner { user_id, email })
    }

    pub fn database_url(&self) -> Result<&str, AdvisorError> {
        self.database_url.as_deref().ok_or_else(|| {
            AdvisorError::CollaboratorUnavailable(
                "DATABASE_URL must be set to a Postgres instance".to_string(),
            )
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}
