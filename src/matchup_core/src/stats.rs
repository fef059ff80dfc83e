use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Statistics that feed the matchup score.
///
/// The string form matches the column headers returned by the stats service.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatKey {
    Pts,
    Reb,
    Ast,
    Stl,
    Blk,
    FgPct,
    FtPct,
    Fg3Pct,
    Tov,
}

impl StatKey {
    pub const ALL: [StatKey; 9] = [
        StatKey::Pts,
        StatKey::Reb,
        StatKey::Ast,
        StatKey::Stl,
        StatKey::Blk,
        StatKey::FgPct,
        StatKey::FtPct,
        StatKey::Fg3Pct,
        StatKey::Tov,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StatKey::Pts => "PTS",
            StatKey::Reb => "REB",
            StatKey::Ast => "AST",
            StatKey::Stl => "STL",
            StatKey::Blk => "BLK",
            StatKey::FgPct => "FG_PCT",
            StatKey::FtPct => "FT_PCT",
            StatKey::Fg3Pct => "FG3_PCT",
            StatKey::Tov => "TOV",
        }
    }
}

impl fmt::Display for StatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Career-average statistics for one player, keyed by column name.
///
/// Holds every numeric column the provider returned (GP, MIN, PTS, ...), not
/// just the scored ones, so the full table can be shown next to the score.
/// An empty record stands for a player whose stats were unavailable.
#[cfg_attr(feature = "python", pyo3::pyclass(get_all))]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerStatRecord {
    pub values: BTreeMap<String, f64>,
}

impl PlayerStatRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record for a player with no usable stats.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        PlayerStatRecord {
            values: pairs.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Average every numeric column across season rows.
    ///
    /// `None` cells are skipped per column, and a column with no numeric cell
    /// is left out entirely. Zero rows yields an empty record.
    pub fn career_average(headers: &[String], rows: &[Vec<Option<f64>>]) -> Self {
        let mut values = BTreeMap::new();

        for (col, header) in headers.iter().enumerate() {
            let (sum, count) = rows
                .iter()
                .filter_map(|row| row.get(col).copied().flatten())
                .filter(|v| v.is_finite())
                .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));

            if count > 0 {
                values.insert(header.clone(), sum / count as f64);
            }
        }

        PlayerStatRecord { values }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: f64) {
        self.values.insert(key.into(), value);
    }

    /// Value of a column, if present.
    pub fn get(&self, key: &str) -> Option<f64> {
        self.values.get(key).copied()
    }

    /// Value of a scored stat, 0 when missing or not finite.
    pub fn get_or_zero(&self, key: StatKey) -> f64 {
        self.get(key.as_str())
            .filter(|v| v.is_finite())
            .unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// True when there is nothing to score: no columns, or every column is
    /// 0 or not finite.
    pub fn is_blank(&self) -> bool {
        self.values.values().all(|&v| v == 0.0 || !v.is_finite())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, &v)| (k.as_str(), v))
    }
}
