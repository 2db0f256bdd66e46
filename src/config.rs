use clap::Args;

pub const DEFAULT_HOME_MARKER: &str = "Brown Univ";
pub const DEFAULT_DOMESTIC_TOKEN: &str = "USA.";
pub const DEFAULT_REPRINT_MARKER: &str = "(Reprint Author)";
pub const DEFAULT_MIN_HOME_RATIO: f64 = 0.2;
pub const DEFAULT_TEAM_SIZE_EXEMPT_BELOW: usize = 20;

/// Knobs controlling how affiliation blocks are classified and which
/// publications survive the team-size filter.
#[derive(Args, Debug, Clone, PartialEq)]
pub struct Config {
    /// Substring identifying the home institution in an affiliation line
    #[arg(long, default_value = DEFAULT_HOME_MARKER)]
    pub home_marker: String,

    /// Trailing token marking a domestic (non-foreign) affiliation line
    #[arg(long, default_value = DEFAULT_DOMESTIC_TOKEN)]
    pub domestic_token: String,

    /// Annotation flagging the corresponding-author entry
    #[arg(long, default_value = DEFAULT_REPRINT_MARKER)]
    pub reprint_marker: String,

    /// Minimum share of home authors for large teams to be kept
    #[arg(long, default_value_t = DEFAULT_MIN_HOME_RATIO)]
    pub min_home_ratio: f64,

    /// Publications with fewer authors than this are always kept
    #[arg(long, default_value_t = DEFAULT_TEAM_SIZE_EXEMPT_BELOW)]
    pub team_size_exempt_below: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            home_marker: DEFAULT_HOME_MARKER.to_string(),
            domestic_token: DEFAULT_DOMESTIC_TOKEN.to_string(),
            reprint_marker: DEFAULT_REPRINT_MARKER.to_string(),
            min_home_ratio: DEFAULT_MIN_HOME_RATIO,
            team_size_exempt_below: DEFAULT_TEAM_SIZE_EXEMPT_BELOW,
        }
    }
}

impl Config {
    pub fn is_reprint(&self, author: &str) -> bool {
        !self.reprint_marker.is_empty() && author.contains(&self.reprint_marker)
    }

    /// A publication is kept when its team is small, or when home authors
    /// make up more than `min_home_ratio` of it. `total_authors` must be
    /// non-zero.
    pub fn keeps(&self, home_authors: usize, total_authors: usize) -> bool {
        total_authors < self.team_size_exempt_below
            || (home_authors as f64 / total_authors as f64) > self.min_home_ratio
    }
}
