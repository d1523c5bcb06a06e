/// Tunable parameters shared by a game session.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Flat defense bonus used by [`crate::IncreaseDefense::from_config`].
    pub defense_bonus: i32,
}

impl GameConfig {
    pub const DEFAULT_DEFENSE_BONUS: i32 = 3;

    pub fn new() -> Self {
        Self {
            defense_bonus: Self::DEFAULT_DEFENSE_BONUS,
        }
    }

    pub fn with_defense_bonus(defense_bonus: i32) -> Self {
        Self { defense_bonus }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
