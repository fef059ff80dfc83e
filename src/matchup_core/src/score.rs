use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{stat_weights, CLUTCH_MAX, CLUTCH_MIN, NEUTRAL_CLUTCH, PCT_SCALE};
use crate::stats::PlayerStatRecord;

/// Score for one player plus the clutch multiplier drawn for it.
#[cfg_attr(feature = "python", pyo3::pyclass(get_all))]
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Rounded to 2 decimal places
    pub score: f64,

    /// Multiplier applied to the base score (1.0 when nothing was scored)
    pub clutch: f64,
}

impl ScoreResult {
    /// Result for a player with no stats: zero score, neutral clutch.
    pub fn unscored() -> Self {
        ScoreResult {
            score: 0.0,
            clutch: NEUTRAL_CLUTCH,
        }
    }
}

/// Round to 2 decimal places, halves away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Weighted linear combination of career stats, before the clutch multiplier.
///
/// Missing stats count as 0. Shooting percentages are fractions and are scaled
/// by 100 before weighting; turnovers subtract.
pub fn base_score(record: &PlayerStatRecord) -> f64 {
    stat_weights()
        .iter()
        .fold(0.0, |acc, &(key, weight, is_pct)| {
            let value = record.get_or_zero(key);
            let value = if is_pct { value * PCT_SCALE } else { value };
            acc + value * weight
        })
}

/// Score a player with a caller-supplied clutch multiplier.
///
/// Blank records (no stats, or only zeros) ignore `clutch` and return the
/// unscored result.
pub fn compute_score_with_clutch(record: &PlayerStatRecord, clutch: f64) -> ScoreResult {
    if record.is_blank() {
        return ScoreResult::unscored();
    }

    ScoreResult {
        score: round2(base_score(record) * clutch),
        clutch,
    }
}

/// Draw a clutch multiplier in [CLUTCH_MIN, CLUTCH_MAX).
pub fn draw_clutch<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen_range(CLUTCH_MIN..CLUTCH_MAX)
}

/// Score a player, drawing a fresh clutch multiplier from `rng`.
///
/// Nothing is drawn for a blank record, so the rng is left untouched.
pub fn compute_score<R: Rng + ?Sized>(record: &PlayerStatRecord, rng: &mut R) -> ScoreResult {
    if record.is_blank() {
        return ScoreResult::unscored();
    }

    compute_score_with_clutch(record, draw_clutch(rng))
}
