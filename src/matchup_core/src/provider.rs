use std::collections::HashMap;
use tracing::{debug, warn};

use crate::directory::{PlayerDirectory, PlayerId};
use crate::error::StatsError;
use crate::stats::PlayerStatRecord;

/// Result of asking a provider for one player's career averages.
///
/// Always carries a record; when stats were unavailable the record is empty
/// and `unavailable` says why.
#[derive(Clone, Debug, PartialEq)]
pub struct StatsLookup {
    pub player_id: Option<PlayerId>,
    pub record: PlayerStatRecord,
    pub unavailable: Option<String>,
}

impl StatsLookup {
    pub fn found(player_id: PlayerId, record: PlayerStatRecord) -> Self {
        StatsLookup {
            player_id: Some(player_id),
            record,
            unavailable: None,
        }
    }

    pub fn unavailable(player_id: Option<PlayerId>, err: &StatsError) -> Self {
        StatsLookup {
            player_id,
            record: PlayerStatRecord::empty(),
            unavailable: Some(err.to_string()),
        }
    }
}

/// Source of career-average stats by player name.
pub trait StatsProvider {
    fn lookup_player_id(&self, full_name: &str) -> Result<PlayerId, StatsError>;

    fn fetch_career_averages(&self, player_id: PlayerId) -> Result<PlayerStatRecord, StatsError>;

    fn headshot_url(&self, _player_id: PlayerId) -> Option<String> {
        None
    }

    /// Look up and fetch in one step, folding every failure into an empty
    /// record. The failure class is logged so causes stay distinguishable.
    fn career_averages(&self, full_name: &str) -> StatsLookup {
        let player_id = match self.lookup_player_id(full_name) {
            Ok(id) => id,
            Err(err) => {
                log_unavailable(full_name, None, &err);
                return StatsLookup::unavailable(None, &err);
            }
        };

        match self.fetch_career_averages(player_id) {
            Ok(record) => {
                debug!(player = full_name, player_id, columns = record.len(), "fetched career averages");
                StatsLookup::found(player_id, record)
            }
            Err(err) => {
                log_unavailable(full_name, Some(player_id), &err);
                StatsLookup::unavailable(Some(player_id), &err)
            }
        }
    }
}

fn log_unavailable(player: &str, player_id: Option<PlayerId>, err: &StatsError) {
    match err {
        StatsError::PlayerNotFound(_) => {
            warn!(player, "player not in directory, scoring as empty")
        }
        StatsError::Http(_) => {
            warn!(player, ?player_id, error = %err, "stats request failed, scoring as empty")
        }
        StatsError::Status { status, .. } => {
            warn!(player, ?player_id, status, "stats service rejected request, scoring as empty")
        }
        _ => warn!(
            player,
            ?player_id,
            cause = err.kind(),
            error = %err,
            "could not read career stats, scoring as empty"
        ),
    }
}

impl<P: StatsProvider + ?Sized> StatsProvider for &P {
    fn lookup_player_id(&self, full_name: &str) -> Result<PlayerId, StatsError> {
        (**self).lookup_player_id(full_name)
    }

    fn fetch_career_averages(&self, player_id: PlayerId) -> Result<PlayerStatRecord, StatsError> {
        (**self).fetch_career_averages(player_id)
    }

    fn headshot_url(&self, player_id: PlayerId) -> Option<String> {
        (**self).headshot_url(player_id)
    }
}

/// In-memory provider backed by a directory and pre-built records.
///
/// A known player without a stored record has no recorded seasons and
/// yields an empty record.
#[derive(Clone, Debug, Default)]
pub struct StaticStatsProvider {
    directory: PlayerDirectory,
    records: HashMap<PlayerId, PlayerStatRecord>,
}

impl StaticStatsProvider {
    pub fn new(directory: PlayerDirectory) -> Self {
        StaticStatsProvider {
            directory,
            records: HashMap::new(),
        }
    }

    pub fn with_player(mut self, id: PlayerId, full_name: &str, record: PlayerStatRecord) -> Self {
        self.add_player(id, full_name, record);
        self
    }

    pub fn add_player(&mut self, id: PlayerId, full_name: &str, record: PlayerStatRecord) {
        self.directory.add(id, full_name);
        self.records.insert(id, record);
    }

    pub fn directory(&self) -> &PlayerDirectory {
        &self.directory
    }
}

impl StatsProvider for StaticStatsProvider {
    fn lookup_player_id(&self, full_name: &str) -> Result<PlayerId, StatsError> {
        self.directory
            .lookup(full_name)
            .ok_or_else(|| StatsError::PlayerNotFound(full_name.to_string()))
    }

    fn fetch_career_averages(&self, player_id: PlayerId) -> Result<PlayerStatRecord, StatsError> {
        Ok(self.records.get(&player_id).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingProvider;

    impl StatsProvider for FailingProvider {
        fn lookup_player_id(&self, _full_name: &str) -> Result<PlayerId, StatsError> {
            Ok(1)
        }

        fn fetch_career_averages(&self, _player_id: PlayerId) -> Result<PlayerStatRecord, StatsError> {
            Err(StatsError::UnexpectedShape("no resultSets".to_string()))
        }
    }

    fn provider() -> StaticStatsProvider {
        StaticStatsProvider::default()
            .with_player(2544, "LeBron James", PlayerStatRecord::from_pairs([("PTS", 27.1)]))
            .with_player(1, "Rookie Nobody", PlayerStatRecord::empty())
    }

    #[test]
    fn test_known_player() {
        let lookup = provider().career_averages("LeBron James");
        assert_eq!(lookup.player_id, Some(2544));
        assert_eq!(lookup.record.get("PTS"), Some(27.1));
        assert!(lookup.unavailable.is_none());
    }

    #[test]
    fn test_unknown_player_is_empty() {
        let lookup = provider().career_averages("Not A Player");
        assert_eq!(lookup.player_id, None);
        assert!(lookup.record.is_empty());
        assert_eq!(lookup.unavailable.as_deref(), Some("Player not found: Not A Player"));
    }

    #[test]
    fn test_known_player_without_seasons() {
        let lookup = provider().career_averages("Rookie Nobody");
        assert_eq!(lookup.player_id, Some(1));
        assert!(lookup.record.is_empty());
        assert!(lookup.unavailable.is_none());
    }

    #[test]
    fn test_fetch_error_is_empty() {
        let lookup = FailingProvider.career_averages("Anyone");
        assert_eq!(lookup.player_id, Some(1));
        assert!(lookup.record.is_empty());
        assert!(lookup.unavailable.unwrap().contains("no resultSets"));
    }

    #[test]
    fn test_provider_by_reference() {
        let provider = provider();
        let by_ref = &provider;
        assert_eq!(by_ref.lookup_player_id("LeBron James").unwrap(), 2544);
    }
}
