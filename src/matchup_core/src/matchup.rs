use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use tracing::{debug, info};

use crate::directory::PlayerId;
use crate::error::Result;
use crate::provider::StatsProvider;
use crate::roster::{Position, Roster};
use crate::score::{compute_score, round2};
use crate::stats::PlayerStatRecord;

pub const TEAM_A_LABEL: &str = "Team A";
pub const TEAM_B_LABEL: &str = "Team B";

/// Result of comparing two team totals.
#[cfg_attr(feature = "python", pyo3::pyclass(eq, eq_int))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    TeamAWins,
    TeamBWins,
    Tie,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::TeamAWins => write!(f, "{} wins", TEAM_A_LABEL),
            Outcome::TeamBWins => write!(f, "{} wins", TEAM_B_LABEL),
            Outcome::Tie => f.write_str("Tie"),
        }
    }
}

/// A rounded score as a whole number of hundredths.
pub fn to_hundredths(score: f64) -> i64 {
    (score * 100.0).round() as i64
}

/// Compare two team totals to the hundredth. Equal hundredths is a tie.
pub fn decide_outcome(total_a: f64, total_b: f64) -> Outcome {
    match to_hundredths(total_a).cmp(&to_hundredths(total_b)) {
        Ordering::Greater => Outcome::TeamAWins,
        Ordering::Less => Outcome::TeamBWins,
        Ordering::Equal => Outcome::Tie,
    }
}

/// Sum of already-rounded player scores.
///
/// Summed in integer hundredths so the result does not depend on order.
pub fn team_total<I: IntoIterator<Item = f64>>(scores: I) -> f64 {
    let hundredths: i64 = scores.into_iter().map(to_hundredths).sum();
    hundredths as f64 / 100.0
}

/// One player's line in a matchup.
#[cfg_attr(feature = "python", pyo3::pyclass(get_all))]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerReport {
    pub position: Position,
    pub name: String,
    pub player_id: Option<PlayerId>,
    pub headshot_url: Option<String>,
    pub score: f64,
    pub clutch: f64,
    pub stats: PlayerStatRecord,
    /// Why stats were missing, if they were
    pub unavailable: Option<String>,
}

#[cfg_attr(feature = "python", pyo3::pyclass(get_all))]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TeamReport {
    pub label: String,
    pub players: Vec<PlayerReport>,
    pub total: f64,
}

impl TeamReport {
    pub fn display_total(&self) -> f64 {
        round2(self.total)
    }
}

#[cfg_attr(feature = "python", pyo3::pyclass(get_all))]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchupReport {
    pub team_a: TeamReport,
    pub team_b: TeamReport,
    pub outcome: Outcome,
}

/// Fetch and score a single roster slot.
pub fn score_player<P, R>(provider: &P, position: Position, name: &str, rng: &mut R) -> PlayerReport
where
    P: StatsProvider + ?Sized,
    R: Rng + ?Sized,
{
    let lookup = provider.career_averages(name);
    let result = compute_score(&lookup.record, rng);
    debug!(player = name, %position, score = result.score, clutch = result.clutch, "scored player");

    PlayerReport {
        position,
        name: name.to_string(),
        player_id: lookup.player_id,
        headshot_url: lookup.player_id.and_then(|id| provider.headshot_url(id)),
        score: result.score,
        clutch: result.clutch,
        stats: lookup.record,
        unavailable: lookup.unavailable,
    }
}

/// Score all five slots of a roster in order.
pub fn score_team<P, R>(provider: &P, label: &str, roster: &Roster, rng: &mut R) -> TeamReport
where
    P: StatsProvider + ?Sized,
    R: Rng + ?Sized,
{
    let players: Vec<PlayerReport> = roster
        .slots()
        .map(|(position, name)| score_player(provider, position, name, rng))
        .collect();
    let total = team_total(players.iter().map(|p| p.score));

    TeamReport {
        label: label.to_string(),
        players,
        total,
    }
}

/// Score both rosters and decide the winner.
///
/// Team A is fully scored before Team B, so with a seeded rng the draws
/// follow slot order. Unavailable players score 0; this never fails.
pub fn simulate_matchup<P, R>(provider: &P, team_a: &Roster, team_b: &Roster, rng: &mut R) -> MatchupReport
where
    P: StatsProvider + ?Sized,
    R: Rng + ?Sized,
{
    let team_a = score_team(provider, TEAM_A_LABEL, team_a, rng);
    let team_b = score_team(provider, TEAM_B_LABEL, team_b, rng);
    let outcome = decide_outcome(team_a.total, team_b.total);

    info!(
        team_a = team_a.display_total(),
        team_b = team_b.display_total(),
        %outcome,
        "matchup simulated"
    );

    MatchupReport {
        team_a,
        team_b,
        outcome,
    }
}

/// Runs matchups against a provider with an optional fixed seed.
///
/// Each run fetches every player again; nothing is kept between runs.
pub struct MatchupSimulator<P> {
    provider: P,
    seed: Option<u64>,
}

impl<P: StatsProvider> MatchupSimulator<P> {
    pub fn new(provider: P) -> Self {
        MatchupSimulator { provider, seed: None }
    }

    /// Pin the clutch draws so runs are reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn run(&self, team_a: &Roster, team_b: &Roster) -> MatchupReport {
        let mut rng = match self.seed {
            Some(s) => ChaCha8Rng::seed_from_u64(s),
            None => ChaCha8Rng::from_entropy(),
        };
        simulate_matchup(&self.provider, team_a, team_b, &mut rng)
    }

    /// Validate raw name lists as rosters, then run.
    pub fn run_names<A, B, S>(&self, team_a: A, team_b: B) -> Result<MatchupReport>
    where
        A: IntoIterator<Item = S>,
        B: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let team_a = Roster::new(team_a)?;
        let team_b = Roster::new(team_b)?;
        Ok(self.run(&team_a, &team_b))
    }
}
