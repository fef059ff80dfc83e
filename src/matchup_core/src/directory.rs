use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::StatsError;

/// Numeric player id used by the stats service
pub type PlayerId = u32;

/// Lookup from a player's full display name to their id.
///
/// Names match exactly (case and punctuation included). When two players
/// share a name, the first one added wins.
#[derive(Clone, Debug, Default)]
pub struct PlayerDirectory {
    by_name: HashMap<String, PlayerId>,
}

impl PlayerDirectory {
    pub fn new() -> Self {
        PlayerDirectory {
            by_name: HashMap::new(),
        }
    }

    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (PlayerId, S)>,
        S: Into<String>,
    {
        let mut directory = PlayerDirectory::new();
        for (id, name) in pairs {
            directory.add(id, name);
        }
        directory
    }

    /// Read a directory from a CSV file.
    /// Format: id,full_name
    ///
    /// Blank lines, `#` comments and a non-numeric header on the first line
    /// are skipped. Everything after the first comma is the name.
    pub fn read_from_file(filepath: impl AsRef<Path>) -> Result<Self, StatsError> {
        let file = File::open(filepath)?;
        Self::read_from(BufReader::new(file))
    }

    pub fn read_from<R: BufRead>(reader: R) -> Result<Self, StatsError> {
        let mut directory = PlayerDirectory::new();

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((id, name)) = line.split_once(',') else {
                continue;
            };
            let name = name.trim();
            if name.is_empty() {
                continue;
            }

            match id.trim().parse::<PlayerId>() {
                Ok(id) => directory.add(id, name),
                Err(_) if idx == 0 => continue,
                Err(e) => {
                    return Err(StatsError::InvalidDirectoryLine {
                        line: idx + 1,
                        reason: format!("invalid player id {:?}: {}", id.trim(), e),
                    })
                }
            }
        }

        Ok(directory)
    }

    /// Add a player, keeping any existing entry for the same name.
    pub fn add(&mut self, id: PlayerId, full_name: impl Into<String>) {
        self.by_name.entry(full_name.into()).or_insert(id);
    }

    pub fn lookup(&self, full_name: &str) -> Option<PlayerId> {
        self.by_name.get(full_name).copied()
    }

    /// All names, sorted, for roster selection lists.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.by_name.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}
