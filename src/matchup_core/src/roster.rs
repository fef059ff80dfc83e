use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::ROSTER_SIZE;
use crate::error::MatchupError;

/// Position slot on a roster. Only used for labelling.
#[cfg_attr(feature = "python", pyo3::pyclass(eq, eq_int))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    PG,
    SG,
    SF,
    PF,
    C,
}

impl Position {
    /// Slots in roster order
    pub const ALL: [Position; ROSTER_SIZE] =
        [Position::PG, Position::SG, Position::SF, Position::PF, Position::C];

    pub fn label(&self) -> &'static str {
        match self {
            Position::PG => "PG",
            Position::SG => "SG",
            Position::SF => "SF",
            Position::PF => "PF",
            Position::C => "C",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Five player names, one per position slot.
///
/// Nothing stops the same player from filling several slots, or from
/// appearing on both rosters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    players: [String; ROSTER_SIZE],
}

impl Roster {
    /// Build a roster from exactly five names, in PG, SG, SF, PF, C order.
    pub fn new<I, S>(names: I) -> Result<Self, MatchupError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let got = names.len();
        let players: [String; ROSTER_SIZE] = names
            .try_into()
            .map_err(|_| MatchupError::InvalidRoster { expected: ROSTER_SIZE, got })?;
        Ok(Roster { players })
    }

    pub fn players(&self) -> &[String] {
        &self.players
    }

    /// (position, name) pairs in slot order.
    pub fn slots(&self) -> impl Iterator<Item = (Position, &str)> {
        Position::ALL
            .iter()
            .copied()
            .zip(self.players.iter().map(String::as_str))
    }

    pub fn player_at(&self, position: Position) -> &str {
        &self.players[position as usize]
    }
}
