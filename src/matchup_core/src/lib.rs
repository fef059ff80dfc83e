//! Matchup Core - NBA dream matchup scoring library.
//!
//! Scores two five-player rosters from career-average statistics, with a
//! random clutch multiplier per player, and decides which team wins.
//! Python bindings are available behind the `python` feature.

pub mod config;
pub mod constants;
pub mod directory;
pub mod error;
pub mod matchup;
pub mod nba;
pub mod provider;
pub mod roster;
pub mod score;
pub mod stats;

#[cfg(feature = "python")]
mod python;

pub use config::ClientConfig;
pub use constants::{CLUTCH_MAX, CLUTCH_MIN, ROSTER_SIZE};
pub use directory::{PlayerDirectory, PlayerId};
pub use error::{MatchupError, Result, StatsError};
pub use matchup::{
    decide_outcome, simulate_matchup, team_total, MatchupReport, MatchupSimulator, Outcome,
    PlayerReport, TeamReport,
};
pub use nba::NbaStatsClient;
pub use provider::{StaticStatsProvider, StatsLookup, StatsProvider};
pub use roster::{Position, Roster};
pub use score::{base_score, compute_score, compute_score_with_clutch, round2, ScoreResult};
pub use stats::{PlayerStatRecord, StatKey};
