//! Stock modifiers.
use crate::config::GameConfig;
use crate::query::QueryKind;

use super::QueryModifier;

/// Doubles attack.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DoubleAttack;

impl QueryModifier for DoubleAttack {
    fn name(&self) -> &'static str {
        "double_attack"
    }

    fn kind(&self) -> QueryKind {
        QueryKind::Attack
    }

    fn apply(&self, value: i32) -> i32 {
        value.saturating_mul(2)
    }
}

/// Adds a flat amount to defense.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IncreaseDefense {
    pub amount: i32,
}

impl IncreaseDefense {
    pub fn new(amount: i32) -> Self {
        Self { amount }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.defense_bonus)
    }
}

impl Default for IncreaseDefense {
    fn default() -> Self {
        Self::new(GameConfig::DEFAULT_DEFENSE_BONUS)
    }
}

impl QueryModifier for IncreaseDefense {
    fn name(&self) -> &'static str {
        "increase_defense"
    }

    fn kind(&self) -> QueryKind {
        QueryKind::Defense
    }

    fn apply(&self, value: i32) -> i32 {
        value.saturating_add(self.amount)
    }
}

/// Multiplies any attribute by a factor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Multiply {
    pub kind: QueryKind,
    pub factor: i32,
}

impl Multiply {
    pub fn new(kind: QueryKind, factor: i32) -> Self {
        Self { kind, factor }
    }
}

impl QueryModifier for Multiply {
    fn name(&self) -> &'static str {
        "multiply"
    }

    fn kind(&self) -> QueryKind {
        self.kind
    }

    fn apply(&self, value: i32) -> i32 {
        value.saturating_mul(self.factor)
    }
}

/// Adds a flat amount (possibly negative) to any attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Flat {
    pub kind: QueryKind,
    pub amount: i32,
}

impl Flat {
    pub fn new(kind: QueryKind, amount: i32) -> Self {
        Self { kind, amount }
    }
}

impl QueryModifier for Flat {
    fn name(&self) -> &'static str {
        "flat"
    }

    fn kind(&self) -> QueryKind {
        self.kind
    }

    fn apply(&self, value: i32) -> i32 {
        value.saturating_add(self.amount)
    }
}
