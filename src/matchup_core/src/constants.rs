/// Weight applied to career points
pub const PTS_WEIGHT: f64 = 1.0;

/// Weight applied to career rebounds
pub const REB_WEIGHT: f64 = 0.8;

/// Weight applied to career assists
pub const AST_WEIGHT: f64 = 0.8;

/// Weight applied to career steals
pub const STL_WEIGHT: f64 = 1.5;

/// Weight applied to career blocks
pub const BLK_WEIGHT: f64 = 1.5;

/// Weight applied to field-goal percentage (after scaling to 0-100)
pub const FG_PCT_WEIGHT: f64 = 1.2;

/// Weight applied to free-throw percentage (after scaling to 0-100)
pub const FT_PCT_WEIGHT: f64 = 0.8;

/// Weight applied to three-point percentage (after scaling to 0-100)
pub const FG3_PCT_WEIGHT: f64 = 0.6;

/// Penalty applied per career turnover
pub const TOV_WEIGHT: f64 = 1.5;

/// Shooting percentages arrive as fractions and are scaled to points
pub const PCT_SCALE: f64 = 100.0;

/// Lower bound of the clutch multiplier
pub const CLUTCH_MIN: f64 = 0.85;

/// Upper bound of the clutch multiplier
pub const CLUTCH_MAX: f64 = 1.15;

/// Multiplier reported for players that were never scored
pub const NEUTRAL_CLUTCH: f64 = 1.0;

/// Players per roster
pub const ROSTER_SIZE: usize = 5;

/// Base URL of the public NBA stats service
pub const DEFAULT_STATS_BASE_URL: &str = "https://stats.nba.com/stats";

/// Base URL of player headshot images
pub const DEFAULT_HEADSHOT_BASE_URL: &str = "https://cdn.nba.com/headshots/nba/latest/1040x760";

/// Per-mode requested from the career stats endpoint
pub const DEFAULT_PER_MODE: &str = "Totals";

/// Month (1-12) in which a new NBA season starts
pub const SEASON_START_MONTH: u32 = 10;

/// HTTP timeout for stats requests, in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User agent sent to the stats service
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

/// Weighted stat table in scoring order: (stat, weight, scaled as percentage)
pub fn stat_weights() -> [(crate::stats::StatKey, f64, bool); 9] {
    use crate::stats::StatKey::*;
    [
        (Pts, PTS_WEIGHT, false),
        (Reb, REB_WEIGHT, false),
        (Ast, AST_WEIGHT, false),
        (Stl, STL_WEIGHT, false),
        (Blk, BLK_WEIGHT, false),
        (FgPct, FG_PCT_WEIGHT, true),
        (FtPct, FT_PCT_WEIGHT, true),
        (Fg3Pct, FG3_PCT_WEIGHT, true),
        (Tov, -TOV_WEIGHT, false),
    ]
}
