use thiserror::Error;

/// Reasons a player's stats could not be produced.
///
/// None of these abort a matchup; the player is scored as empty and the
/// cause is kept for logging and reporting.
#[derive(Error, Debug)]
pub enum StatsError {
    #[error("Player not found: {0}")]
    PlayerNotFound(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Stats service returned {status} for {url}")]
    Status { status: u16, url: String },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unexpected response shape: {0}")]
    UnexpectedShape(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid player directory line {line}: {reason}")]
    InvalidDirectoryLine { line: usize, reason: String },

    #[error("Invalid config: {0}")]
    Config(#[from] toml::de::Error),
}

impl StatsError {
    /// Short failure class used in logs and reports.
    pub fn kind(&self) -> &'static str {
        match self {
            StatsError::PlayerNotFound(_) => "not_found",
            StatsError::Http(_) => "transport",
            StatsError::Status { .. } => "status",
            StatsError::Json(_) | StatsError::UnexpectedShape(_) => "parse",
            StatsError::Io(_) | StatsError::InvalidDirectoryLine { .. } | StatsError::Config(_) => {
                "local"
            }
        }
    }
}

#[derive(Error, Debug)]
pub enum MatchupError {
    #[error("Roster must have exactly {expected} players, got {got}")]
    InvalidRoster { expected: usize, got: usize },

    #[error(transparent)]
    Stats(#[from] StatsError),
}

pub type Result<T> = std::result::Result<T, MatchupError>;
