//! Client for the public NBA stats service.

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, ORIGIN, REFERER};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::directory::{PlayerDirectory, PlayerId};
use crate::error::StatsError;
use crate::provider::StatsProvider;
use crate::stats::PlayerStatRecord;

const CAREER_STATS_ENDPOINT: &str = "playercareerstats";
const ALL_PLAYERS_ENDPOINT: &str = "commonallplayers";
const REGULAR_SEASON_SET: &str = "SeasonTotalsRegularSeason";
const LEAGUE_ID: &str = "00";

#[derive(Debug, Deserialize)]
struct StatsResponse {
    #[serde(rename = "resultSets")]
    result_sets: Vec<ResultSet>,
}

#[derive(Debug, Deserialize)]
struct ResultSet {
    #[serde(default)]
    name: String,
    headers: Vec<String>,
    #[serde(rename = "rowSet")]
    row_set: Vec<Vec<Value>>,
}

impl ResultSet {
    fn column(&self, header: &str) -> Result<usize, StatsError> {
        self.headers
            .iter()
            .position(|h| h == header)
            .ok_or_else(|| StatsError::UnexpectedShape(format!("{} has no {} column", self.name, header)))
    }
}

/// Synchronous stats client.
///
/// Names resolve through a [`PlayerDirectory`], supplied up front or pulled
/// from the service with [`NbaStatsClient::with_remote_directory`].
#[derive(Debug, Clone)]
pub struct NbaStatsClient {
    client: Client,
    config: ClientConfig,
    directory: PlayerDirectory,
}

impl NbaStatsClient {
    pub fn new(config: ClientConfig, directory: PlayerDirectory) -> Result<Self, StatsError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json, text/plain, */*"));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
        headers.insert(REFERER, HeaderValue::from_static("https://stats.nba.com/"));
        headers.insert(ORIGIN, HeaderValue::from_static("https://stats.nba.com"));

        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .timeout(config.timeout())
            .build()?;

        Ok(NbaStatsClient {
            client,
            config,
            directory,
        })
    }

    /// Build a client whose directory is fetched from the all-players endpoint.
    pub fn with_remote_directory(config: ClientConfig) -> Result<Self, StatsError> {
        let mut client = Self::new(config, PlayerDirectory::new())?;
        client.directory = client.fetch_player_directory()?;
        info!(players = client.directory.len(), "loaded player directory");
        Ok(client)
    }

    /// Like [`NbaStatsClient::with_remote_directory`], but a failed directory
    /// fetch leaves the directory empty so every player is scored as not found.
    /// Only failing to build the HTTP client is an error.
    pub fn with_remote_directory_or_empty(config: ClientConfig) -> Result<Self, StatsError> {
        let mut client = Self::new(config, PlayerDirectory::new())?;
        match client.fetch_player_directory() {
            Ok(directory) => {
                info!(players = directory.len(), "loaded player directory");
                client.directory = directory;
            }
            Err(err) => {
                warn!(cause = err.kind(), error = %err, "player directory unavailable, all players will score 0");
            }
        }
        Ok(client)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn directory(&self) -> &PlayerDirectory {
        &self.directory
    }

    fn get(&self, endpoint: &str, query: &[(&str, String)]) -> Result<StatsResponse, StatsError> {
        let url = format!("{}/{}", self.config.stats_base_url.trim_end_matches('/'), endpoint);
        debug!(%url, ?query, "stats request");

        let response = self.client.get(&url).query(query).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(StatsError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text()?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Every player the service knows about, current and historical.
    pub fn fetch_player_directory(&self) -> Result<PlayerDirectory, StatsError> {
        let response = self.get(
            ALL_PLAYERS_ENDPOINT,
            &[
                ("LeagueID", LEAGUE_ID.to_string()),
                ("Season", self.config.season.clone()),
                ("IsOnlyCurrentSeason", "0".to_string()),
            ],
        )?;

        let set = response
            .result_sets
            .first()
            .ok_or_else(|| StatsError::UnexpectedShape("empty resultSets".to_string()))?;
        let id_col = set.column("PERSON_ID")?;
        let name_col = set.column("DISPLAY_FIRST_LAST")?;

        let mut directory = PlayerDirectory::new();
        for row in &set.row_set {
            let id = row.get(id_col).and_then(Value::as_u64).and_then(|id| PlayerId::try_from(id).ok());
            let name = row.get(name_col).and_then(Value::as_str);
            if let (Some(id), Some(name)) = (id, name) {
                directory.add(id, name);
            }
        }

        Ok(directory)
    }
}

impl StatsProvider for NbaStatsClient {
    fn lookup_player_id(&self, full_name: &str) -> Result<PlayerId, StatsError> {
        self.directory
            .lookup(full_name)
            .ok_or_else(|| StatsError::PlayerNotFound(full_name.to_string()))
    }

    /// Average of the regular-season rows, one row per season (and per team
    /// for traded seasons, as the service reports them).
    fn fetch_career_averages(&self, player_id: PlayerId) -> Result<PlayerStatRecord, StatsError> {
        let response = self.get(
            CAREER_STATS_ENDPOINT,
            &[
                ("PlayerID", player_id.to_string()),
                ("PerMode", self.config.per_mode.clone()),
                ("LeagueID", LEAGUE_ID.to_string()),
            ],
        )?;

        let set = response
            .result_sets
            .iter()
            .find(|set| set.name == REGULAR_SEASON_SET)
            .or_else(|| response.result_sets.first())
            .ok_or_else(|| StatsError::UnexpectedShape("empty resultSets".to_string()))?;

        let rows: Vec<Vec<Option<f64>>> = set
            .row_set
            .iter()
            .map(|row| row.iter().map(Value::as_f64).collect())
            .collect();

        Ok(PlayerStatRecord::career_average(&set.headers, &rows))
    }

    fn headshot_url(&self, player_id: PlayerId) -> Option<String> {
        Some(self.config.headshot_url(player_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matchup::{MatchupSimulator, Outcome};
    use httpmock::Method::GET;
    use httpmock::MockServer;
    use serde_json::json;

    fn client_for(server: &MockServer, directory: PlayerDirectory) -> NbaStatsClient {
        let config = ClientConfig {
            stats_base_url: format!("{}/stats", server.base_url()),
            timeout_secs: 5,
            ..ClientConfig::default()
        };
        NbaStatsClient::new(config, directory).unwrap()
    }

    fn career_body() -> Value {
        json!({
            "resource": "playercareerstats",
            "resultSets": [
                {
                    "name": "SeasonTotalsRegularSeason",
                    "headers": ["PLAYER_ID", "SEASON_ID", "TEAM_ABBREVIATION", "GP", "PTS", "FG_PCT", "FG3_PCT"],
                    "rowSet": [
                        [2544, "2003-04", "CLE", 79, 1654, 0.417, 0.29],
                        [2544, "2004-05", "CLE", 80, 2175, 0.472, null]
                    ]
                },
                {
                    "name": "CareerTotalsRegularSeason",
                    "headers": ["PLAYER_ID", "PTS"],
                    "rowSet": [[2544, 40000]]
                }
            ]
        })
    }

    #[test]
    fn test_fetch_career_averages() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/stats/playercareerstats")
                .query_param("PlayerID", "2544")
                .query_param("PerMode", "Totals");
            then.status(200).json_body(career_body());
        });

        let client = client_for(&server, PlayerDirectory::from_pairs([(2544, "LeBron James")]));
        let record = client.fetch_career_averages(2544).unwrap();

        mock.assert();
        assert!((record.get("PTS").unwrap() - 1914.5).abs() < 1e-9);
        assert!((record.get("GP").unwrap() - 79.5).abs() < 1e-9);
        assert!((record.get("FG3_PCT").unwrap() - 0.29).abs() < 1e-9);
        assert_eq!(record.get("SEASON_ID"), None);
        assert_eq!(record.get("TEAM_ABBREVIATION"), None);
    }

    #[test]
    fn test_career_averages_by_name() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/stats/playercareerstats");
            then.status(200).json_body(career_body());
        });

        let client = client_for(&server, PlayerDirectory::from_pairs([(2544, "LeBron James")]));
        let lookup = client.career_averages("LeBron James");
        assert_eq!(lookup.player_id, Some(2544));
        assert!(!lookup.record.is_empty());
        assert_eq!(
            client.headshot_url(2544).as_deref(),
            Some("https://cdn.nba.com/headshots/nba/latest/1040x760/2544.png")
        );
    }

    #[test]
    fn test_no_seasons_is_empty_record() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/stats/playercareerstats");
            then.status(200).json_body(json!({
                "resultSets": [{"name": "SeasonTotalsRegularSeason", "headers": ["PTS"], "rowSet": []}]
            }));
        });

        let client = client_for(&server, PlayerDirectory::new());
        assert!(client.fetch_career_averages(1).unwrap().is_empty());
    }

    #[test]
    fn test_error_status() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/stats/playercareerstats");
            then.status(500);
        });

        let client = client_for(&server, PlayerDirectory::from_pairs([(2544, "LeBron James")]));
        let err = client.fetch_career_averages(2544).unwrap_err();
        assert!(matches!(err, StatsError::Status { status: 500, .. }));

        let lookup = client.career_averages("LeBron James");
        assert!(lookup.record.is_empty());
        assert!(lookup.unavailable.is_some());
    }

    #[test]
    fn test_malformed_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/stats/playercareerstats");
            then.status(200).body("<html>blocked</html>");
        });

        let client = client_for(&server, PlayerDirectory::new());
        let err = client.fetch_career_averages(2544).unwrap_err();
        assert!(matches!(err, StatsError::Json(_)));
        assert_eq!(err.kind(), "parse");
    }

    #[test]
    fn test_unknown_name_skips_request() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/stats/playercareerstats");
            then.status(200).json_body(career_body());
        });

        let client = client_for(&server, PlayerDirectory::new());
        let lookup = client.career_averages("Nobody Special");
        assert!(lookup.record.is_empty());
        mock.assert_hits(0);
    }

    #[test]
    fn test_fetch_player_directory() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/stats/commonallplayers")
                .query_param("LeagueID", "00")
                .query_param("IsOnlyCurrentSeason", "0");
            then.status(200).json_body(json!({
                "resultSets": [{
                    "name": "CommonAllPlayers",
                    "headers": ["PERSON_ID", "DISPLAY_LAST_COMMA_FIRST", "DISPLAY_FIRST_LAST", "ROSTERSTATUS"],
                    "rowSet": [
                        [2544, "James, LeBron", "LeBron James", 1],
                        [893, "Jordan, Michael", "Michael Jordan", 0],
                        [null, "Broken, Row", "Broken Row", 0]
                    ]
                }]
            }));
        });

        let config = ClientConfig {
            stats_base_url: format!("{}/stats", server.base_url()),
            ..ClientConfig::default()
        };
        let client = NbaStatsClient::with_remote_directory(config).unwrap();

        mock.assert();
        assert_eq!(client.directory().len(), 2);
        assert_eq!(client.lookup_player_id("Michael Jordan").unwrap(), 893);
        assert!(client.lookup_player_id("Broken Row").is_err());
    }

    #[test]
    fn test_directory_outage_still_produces_report() {
        let server = MockServer::start();
        let directory_mock = server.mock(|when, then| {
            when.method(GET).path("/stats/commonallplayers");
            then.status(503);
        });

        let config = ClientConfig {
            stats_base_url: format!("{}/stats", server.base_url()),
            timeout_secs: 5,
            ..ClientConfig::default()
        };
        assert!(matches!(
            NbaStatsClient::with_remote_directory(config.clone()),
            Err(StatsError::Status { status: 503, .. })
        ));

        let client = NbaStatsClient::with_remote_directory_or_empty(config).unwrap();
        assert!(client.directory().is_empty());

        let report = MatchupSimulator::new(client)
            .with_seed(1)
            .run_names(vec!["LeBron James"; 5], vec!["Stephen Curry"; 5])
            .unwrap();

        directory_mock.assert_hits(2);
        assert_eq!(report.outcome, Outcome::Tie);
        for player in report.team_a.players.iter().chain(&report.team_b.players) {
            assert_eq!(player.score, 0.0);
            assert_eq!(player.clutch, 1.0);
            assert!(player.stats.is_empty());
            assert!(player.unavailable.as_deref().unwrap().starts_with("Player not found"));
        }
    }

    #[test]
    fn test_directory_missing_column() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/stats/commonallplayers");
            then.status(200).json_body(json!({
                "resultSets": [{"name": "CommonAllPlayers", "headers": ["PERSON_ID"], "rowSet": []}]
            }));
        });

        let client = client_for(&server, PlayerDirectory::new());
        let err = client.fetch_player_directory().unwrap_err();
        assert!(matches!(err, StatsError::UnexpectedShape(_)));
    }
}
