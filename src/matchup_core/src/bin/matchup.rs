use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use matchup_core::{
    ClientConfig, MatchupReport, MatchupSimulator, NbaStatsClient, PlayerDirectory, Roster,
    TeamReport,
};

#[derive(Parser)]
#[command(name = "matchup")]
#[command(version = "0.1.0")]
#[command(about = "NBA dream matchup simulator", long_about = None)]
struct Cli {
    /// Team A players in PG SG SF PF C order
    #[arg(long, num_args = 5, value_name = "NAME", required_unless_present = "list_players")]
    team_a: Vec<String>,

    /// Team B players in PG SG SF PF C order
    #[arg(long, num_args = 5, value_name = "NAME", required_unless_present = "list_players")]
    team_b: Vec<String>,

    /// CSV of id,full_name; fetched from the stats service when omitted
    #[arg(long, env = "MATCHUP_PLAYERS_CSV")]
    players_csv: Option<String>,

    /// TOML client config file
    #[arg(short, long)]
    config: Option<String>,

    /// Stats service base URL (overrides config)
    #[arg(long, env = "MATCHUP_STATS_URL")]
    stats_url: Option<String>,

    /// Season for the player list, e.g. 2023-24 (overrides config; defaults
    /// to the season in progress)
    #[arg(long, env = "MATCHUP_SEASON")]
    season: Option<String>,

    /// Request timeout in seconds (overrides config)
    #[arg(long, env = "MATCHUP_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    /// Fix the clutch draws for a reproducible run
    #[arg(long, env = "MATCHUP_SEED")]
    seed: Option<u64>,

    /// Print each player's career stat table
    #[arg(long)]
    show_stats: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// List every known player name and exit
    #[arg(long)]
    list_players: bool,
}

impl Cli {
    fn client_config(&self) -> Result<ClientConfig> {
        let mut config = match &self.config {
            Some(path) => ClientConfig::from_toml_file(path)
                .with_context(|| format!("failed to load config from {}", path))?,
            None => ClientConfig::default(),
        };
        if let Some(url) = &self.stats_url {
            config.stats_base_url = url.clone();
        }
        if let Some(season) = &self.season {
            config.season = season.clone();
        }
        if let Some(timeout) = self.timeout_secs {
            config.timeout_secs = timeout;
        }
        Ok(config)
    }

    /// With `strict`, a directory that cannot be fetched is an error; otherwise
    /// the run goes ahead and every player scores 0.
    fn stats_client(&self, strict: bool) -> Result<NbaStatsClient> {
        let config = self.client_config()?;
        let client = match &self.players_csv {
            Some(path) => {
                let directory = PlayerDirectory::read_from_file(path)
                    .with_context(|| format!("failed to read players from {}", path))?;
                NbaStatsClient::new(config, directory)?
            }
            None if strict => NbaStatsClient::with_remote_directory(config)
                .context("failed to load player directory")?,
            None => NbaStatsClient::with_remote_directory_or_empty(config)?,
        };
        Ok(client)
    }
}

fn print_team(team: &TeamReport, show_stats: bool) {
    println!("{} Player Stats & Scores", team.label);
    for player in &team.players {
        println!(
            "  [{}] {} - Score: {} | Clutch: {:.2}",
            player.position, player.name, player.score, player.clutch
        );
        if let Some(reason) = &player.unavailable {
            println!("       stats unavailable: {}", reason);
        }
        if let Some(url) = &player.headshot_url {
            println!("       {}", url);
        }
        if show_stats {
            for (stat, value) in player.stats.iter() {
                println!("       {:<18} {:>12.3}", stat, value);
            }
        }
    }
    println!();
}

fn print_report(report: &MatchupReport, show_stats: bool) {
    print_team(&report.team_a, show_stats);
    print_team(&report.team_b, show_stats);

    println!("---");
    println!("Final Results");
    println!("{} Total Score: {}", report.team_a.label, report.team_a.display_total());
    println!("{} Total Score: {}", report.team_b.label, report.team_b.display_total());
    println!("{}", report.outcome);
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("matchup_core=info,warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.list_players {
        let client = cli.stats_client(true)?;
        for name in client.directory().names() {
            println!("{}", name);
        }
        return Ok(());
    }

    let team_a = Roster::new(cli.team_a.clone())?;
    let team_b = Roster::new(cli.team_b.clone())?;
    for (label, roster) in [("Team A", &team_a), ("Team B", &team_b)] {
        let lineup: Vec<String> = roster
            .slots()
            .map(|(position, name)| format!("{}={}", position, name))
            .collect();
        tracing::debug!(team = label, lineup = %lineup.join(", "), "roster selected");
    }

    let client = cli.stats_client(false)?;
    let mut simulator = MatchupSimulator::new(client);
    if let Some(seed) = cli.seed {
        simulator = simulator.with_seed(seed);
    }
    let report = simulator.run(&team_a, &team_b);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report, cli.show_stats);
    }

    Ok(())
}
