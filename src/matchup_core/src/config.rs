use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::constants::{
    DEFAULT_HEADSHOT_BASE_URL, DEFAULT_PER_MODE, DEFAULT_STATS_BASE_URL, DEFAULT_TIMEOUT_SECS,
    DEFAULT_USER_AGENT, SEASON_START_MONTH,
};
use crate::error::StatsError;

/// Settings for the stats service client.
///
/// Every field has a default, so a TOML file only needs the keys it changes:
///
/// ```toml
/// stats_base_url = "http://localhost:8080/stats"
/// timeout_secs = 10
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub stats_base_url: String,
    pub headshot_base_url: String,
    /// `PerMode` for career stats ("Totals", "PerGame", ...)
    pub per_mode: String,
    /// Season used when listing all players ("2025-26"); defaults to the
    /// season in progress on the local date
    pub season: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            stats_base_url: DEFAULT_STATS_BASE_URL.to_string(),
            headshot_base_url: DEFAULT_HEADSHOT_BASE_URL.to_string(),
            per_mode: DEFAULT_PER_MODE.to_string(),
            season: current_season(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Season label ("YYYY-YY") for a date. Seasons roll over in October, so
/// spring dates belong to the season that started the previous autumn.
pub fn season_for(date: NaiveDate) -> String {
    let start = if date.month() >= SEASON_START_MONTH {
        date.year()
    } else {
        date.year() - 1
    };
    format!("{}-{:02}", start, (start + 1).rem_euclid(100))
}

pub fn current_season() -> String {
    season_for(Local::now().date_naive())
}

impl ClientConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, StatsError> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, StatsError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Headshot image URL for a player id.
    pub fn headshot_url(&self, player_id: u32) -> String {
        format!("{}/{}.png", self.headshot_base_url.trim_end_matches('/'), player_id)
    }
}
