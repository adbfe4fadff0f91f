use std::env;
use std::error::Error;
use std::fmt;
use std::str::FromStr;

/// How the executor decides that the stored route has nothing left to collect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StalePolicy {
    /// Re-sum every cell of the stored route, visited ones included.
    #[default]
    FullPath,
    /// Only sum the cells the agent hasn't reached yet.
    RemainingSuffix,
}

impl FromStr for StalePolicy {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "full-path" | "full_path" | "full" => Ok(StalePolicy::FullPath),
            "remaining-suffix" | "remaining_suffix" | "suffix" => Ok(StalePolicy::RemainingSuffix),
            _ => Err(ConfigError::InvalidValue {
                key: "GRIDBOT_STALE_POLICY".to_string(),
                value: value.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BotConfig {
    pub stale_policy: StalePolicy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidValue { key: String, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::InvalidValue { key, value } => {
                write!(formatter, "Invalid value '{}' for {}", value, key)
            }
        }
    }
}

impl Error for ConfigError {}

/// Largest accepted maze width or height.
pub const MAX_DIMENSION: i32 = 1024;

/// Settings for a local match, read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchConfig {
    pub bot: BotConfig,
    pub width: i32,
    pub height: i32,
    pub turns: i32,
    pub seed: Option<u64>,
    pub wall_percent: u32,
    pub maze_file: Option<String>,
    pub replays_folder: Option<String>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            bot: BotConfig::default(),
            width: 10,
            height: 10,
            turns: 60,
            seed: None,
            wall_percent: 20,
            maze_file: None,
            replays_folder: None,
        }
    }
}

impl MatchConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let stale_policy = match lookup("GRIDBOT_STALE_POLICY") {
            Some(value) => value.parse()?,
            None => defaults.bot.stale_policy,
        };

        Ok(Self {
            bot: BotConfig { stale_policy },
            width: parse_dimension(&lookup, "GRIDBOT_WIDTH")?.unwrap_or(defaults.width),
            height: parse_dimension(&lookup, "GRIDBOT_HEIGHT")?.unwrap_or(defaults.height),
            turns: parse_var(&lookup, "GRIDBOT_TURNS")?.unwrap_or(defaults.turns),
            seed: parse_var(&lookup, "GRIDBOT_SEED")?,
            wall_percent: parse_var(&lookup, "GRIDBOT_WALL_PERCENT")?
                .unwrap_or(defaults.wall_percent),
            maze_file: lookup("GRIDBOT_MAZE_FILE"),
            replays_folder: lookup("GRIDBOT_REPLAYS_FOLDER"),
        })
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                value,
            }),
        None => Ok(None),
    }
}

fn parse_dimension<F>(lookup: &F, key: &str) -> Result<Option<i32>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match parse_var::<F, i32>(lookup, key)? {
        Some(value) if !(1..=MAX_DIMENSION).contains(&value) => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
        value => Ok(value),
    }
}
