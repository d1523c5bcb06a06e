//! Demo configuration structures and loaders.
use std::env;
use std::path::PathBuf;

use game_core::GameConfig;

/// Configuration for one demo run.
#[derive(Clone, Debug, Default)]
pub struct CliConfig {
    pub creature: CreatureConfig,
    pub game: GameConfig,
    pub output: OutputFormat,
    pub log_dir: Option<PathBuf>,
}

impl CliConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `GOBLIN_NAME` - Creature name (default: Goblin)
    /// - `GOBLIN_ATTACK` - Base attack (default: 2)
    /// - `GOBLIN_DEFENSE` - Base defense (default: 2)
    /// - `DEFENSE_BONUS` - Amount added by the defense modifier (default: 3)
    /// - `OUTPUT_FORMAT` - `text` or `json` (default: text)
    /// - `LOG_DIR` - Also write logs to `<LOG_DIR>/broker-chain.log` (default: unset)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reads values through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(name) = lookup("GOBLIN_NAME").filter(|name| !name.trim().is_empty()) {
            config.creature.name = name;
        }
        if let Some(attack) = parse(&lookup, "GOBLIN_ATTACK") {
            config.creature.attack = attack;
        }
        if let Some(defense) = parse(&lookup, "GOBLIN_DEFENSE") {
            config.creature.defense = defense;
        }
        if let Some(bonus) = parse(&lookup, "DEFENSE_BONUS") {
            config.game.defense_bonus = bonus;
        }
        if let Some(output) = parse(&lookup, "OUTPUT_FORMAT") {
            config.output = output;
        }

        config.log_dir = lookup("LOG_DIR").map(PathBuf::from);

        config
    }
}

/// The creature the demo spawns.
#[derive(Clone, Debug)]
pub struct CreatureConfig {
    pub name: String,
    pub attack: i32,
    pub defense: i32,
}

impl Default for CreatureConfig {
    fn default() -> Self {
        Self {
            name: "Goblin".to_string(),
            attack: 2,
            defense: 2,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::EnumString, strum::Display)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn parse<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    lookup(key)?.trim().parse().ok()
}
