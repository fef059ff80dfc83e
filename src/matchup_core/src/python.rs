use pyo3::exceptions::{PyIOError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::{BTreeMap, HashMap};

use crate::config::ClientConfig;
use crate::constants::{
    AST_WEIGHT, BLK_WEIGHT, CLUTCH_MAX, CLUTCH_MIN, FG3_PCT_WEIGHT, FG_PCT_WEIGHT, FT_PCT_WEIGHT,
    PTS_WEIGHT, REB_WEIGHT, STL_WEIGHT, TOV_WEIGHT,
};
use crate::directory::PlayerDirectory;
use crate::error::{MatchupError, StatsError};
use crate::matchup::{MatchupReport, MatchupSimulator, Outcome, PlayerReport, TeamReport};
use crate::nba::NbaStatsClient;
use crate::roster::Position;
use crate::score::{self, ScoreResult};
use crate::stats::PlayerStatRecord;

fn to_py_err(err: MatchupError) -> PyErr {
    match err {
        MatchupError::InvalidRoster { .. } => PyValueError::new_err(err.to_string()),
        MatchupError::Stats(StatsError::Io(e)) => PyIOError::new_err(e.to_string()),
        MatchupError::Stats(e) => PyRuntimeError::new_err(e.to_string()),
    }
}

/// Score one player from a dict of career averages.
///
/// Returns (score, clutch_multiplier).
#[pyfunction]
#[pyo3(signature = (stats, seed = None))]
fn compute_score(stats: HashMap<String, f64>, seed: Option<u64>) -> (f64, f64) {
    let record = PlayerStatRecord::from_pairs(stats);
    let mut rng = match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    };
    let ScoreResult { score, clutch } = score::compute_score(&record, &mut rng);
    (score, clutch)
}

/// Weighted base score before the clutch multiplier.
#[pyfunction]
fn base_score(stats: HashMap<String, f64>) -> f64 {
    score::base_score(&PlayerStatRecord::from_pairs(stats))
}

/// Fetch both rosters from the stats service and simulate the matchup.
///
/// The player directory comes from `players_csv` when given, otherwise from
/// the service itself. If the service directory cannot be fetched, every
/// player scores 0 and the matchup still completes.
#[pyfunction]
#[pyo3(signature = (team_a, team_b, seed = None, players_csv = None, base_url = None))]
fn simulate_matchup(
    py: Python<'_>,
    team_a: Vec<String>,
    team_b: Vec<String>,
    seed: Option<u64>,
    players_csv: Option<String>,
    base_url: Option<String>,
) -> PyResult<MatchupReport> {
    let mut config = ClientConfig::default();
    if let Some(url) = base_url {
        config.stats_base_url = url;
    }

    py.allow_threads(move || -> crate::error::Result<MatchupReport> {
        let client = match players_csv {
            Some(path) => {
                let directory = PlayerDirectory::read_from_file(path)?;
                NbaStatsClient::new(config, directory)?
            }
            None => NbaStatsClient::with_remote_directory_or_empty(config)?,
        };

        let mut simulator = MatchupSimulator::new(client);
        if let Some(s) = seed {
            simulator = simulator.with_seed(s);
        }
        simulator.run_names(team_a, team_b)
    })
    .map_err(to_py_err)
}

/// Sorted player names from a directory CSV, for selection lists.
#[pyfunction]
fn player_names(players_csv: &str) -> PyResult<Vec<String>> {
    PlayerDirectory::read_from_file(players_csv)
        .map(|d| d.names())
        .map_err(|e| to_py_err(e.into()))
}

#[pymethods]
impl PlayerStatRecord {
    #[new]
    #[pyo3(signature = (values = None))]
    fn py_new(values: Option<BTreeMap<String, f64>>) -> Self {
        PlayerStatRecord {
            values: values.unwrap_or_default(),
        }
    }

    fn __len__(&self) -> usize {
        self.len()
    }

    fn __repr__(&self) -> String {
        format!("PlayerStatRecord({} stats)", self.len())
    }
}

#[pymethods]
impl ScoreResult {
    fn __repr__(&self) -> String {
        format!("ScoreResult(score={}, clutch={:.2})", self.score, self.clutch)
    }
}

#[pymethods]
impl PlayerReport {
    fn __repr__(&self) -> String {
        format!("{} - Score: {} | Clutch: {:.2}", self.name, self.score, self.clutch)
    }
}

#[pymethods]
impl TeamReport {
    #[pyo3(name = "display_total")]
    fn py_display_total(&self) -> f64 {
        self.display_total()
    }

    fn __repr__(&self) -> String {
        format!("TeamReport({}, total={})", self.label, self.display_total())
    }
}

#[pymethods]
impl MatchupReport {
    fn __repr__(&self) -> String {
        format!(
            "MatchupReport({} - {}: {})",
            self.team_a.display_total(),
            self.team_b.display_total(),
            self.outcome
        )
    }
}

#[pymethods]
impl Outcome {
    fn __str__(&self) -> String {
        self.to_string()
    }
}

/// Python module definition
#[pymodule]
fn matchup_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Classes
    m.add_class::<PlayerStatRecord>()?;
    m.add_class::<ScoreResult>()?;
    m.add_class::<Position>()?;
    m.add_class::<PlayerReport>()?;
    m.add_class::<TeamReport>()?;
    m.add_class::<MatchupReport>()?;
    m.add_class::<Outcome>()?;

    // Functions
    m.add_function(wrap_pyfunction!(compute_score, m)?)?;
    m.add_function(wrap_pyfunction!(base_score, m)?)?;
    m.add_function(wrap_pyfunction!(simulate_matchup, m)?)?;
    m.add_function(wrap_pyfunction!(player_names, m)?)?;

    // Constants
    m.add("PTS_WEIGHT", PTS_WEIGHT)?;
    m.add("REB_WEIGHT", REB_WEIGHT)?;
    m.add("AST_WEIGHT", AST_WEIGHT)?;
    m.add("STL_WEIGHT", STL_WEIGHT)?;
    m.add("BLK_WEIGHT", BLK_WEIGHT)?;
    m.add("FG_PCT_WEIGHT", FG_PCT_WEIGHT)?;
    m.add("FT_PCT_WEIGHT", FT_PCT_WEIGHT)?;
    m.add("FG3_PCT_WEIGHT", FG3_PCT_WEIGHT)?;
    m.add("TOV_WEIGHT", TOV_WEIGHT)?;
    m.add("CLUTCH_MIN", CLUTCH_MIN)?;
    m.add("CLUTCH_MAX", CLUTCH_MAX)?;

    Ok(())
}
