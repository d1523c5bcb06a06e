//! Linked command chain over stored creature stats.
//!
//! Unlike the query broker, links here permanently rewrite a
//! [`CreatureStats`] record. Links run in insertion order and any link can
//! end the chain by returning [`ChainFlow::Stop`].
use tracing::debug;

use crate::creature::CreatureStats;

/// Whether the chain continues past the current link.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChainFlow {
    Continue,
    Stop,
}

/// One handler in a [`ModifierChain`].
pub trait ChainLink {
    fn name(&self) -> &'static str;

    fn handle(&self, stats: &mut CreatureStats) -> ChainFlow;
}

/// Ordered list of [`ChainLink`]s.
#[derive(Default)]
pub struct ModifierChain {
    links: Vec<Box<dyn ChainLink>>,
}

impl ModifierChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `link` to the end of the chain.
    pub fn add(&mut self, link: impl ChainLink + 'static) -> &mut Self {
        self.links.push(Box::new(link));
        self
    }

    /// Runs the links against `stats` until one stops the chain.
    ///
    /// Returns the number of links that ran, including the one that stopped.
    pub fn handle(&self, stats: &mut CreatureStats) -> usize {
        let mut ran = 0;
        for link in &self.links {
            ran += 1;
            debug!(
                target: "game_core::chain",
                link = link.name(),
                creature = %stats.name,
                "Applying link"
            );
            if link.handle(stats) == ChainFlow::Stop {
                debug!(
                    target: "game_core::chain",
                    link = link.name(),
                    skipped = self.links.len() - ran,
                    "Chain stopped"
                );
                break;
            }
        }
        ran
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

/// Doubles stored attack.
#[derive(Clone, Copy, Debug, Default)]
pub struct DoubleAttackLink;

impl ChainLink for DoubleAttackLink {
    fn name(&self) -> &'static str {
        "double_attack"
    }

    fn handle(&self, stats: &mut CreatureStats) -> ChainFlow {
        stats.attack = stats.attack.saturating_mul(2);
        ChainFlow::Continue
    }
}

/// Adds a flat amount to stored defense.
#[derive(Clone, Copy, Debug)]
pub struct IncreaseDefenseLink {
    pub amount: i32,
}

impl IncreaseDefenseLink {
    pub fn new(amount: i32) -> Self {
        Self { amount }
    }
}

impl Default for IncreaseDefenseLink {
    fn default() -> Self {
        Self::new(crate::GameConfig::DEFAULT_DEFENSE_BONUS)
    }
}

impl ChainLink for IncreaseDefenseLink {
    fn name(&self) -> &'static str {
        "increase_defense"
    }

    fn handle(&self, stats: &mut CreatureStats) -> ChainFlow {
        stats.defense = stats.defense.saturating_add(self.amount);
        ChainFlow::Continue
    }
}

/// Curse that blocks every link after it.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoBonusesLink;

impl ChainLink for NoBonusesLink {
    fn name(&self) -> &'static str {
        "no_bonuses"
    }

    fn handle(&self, _stats: &mut CreatureStats) -> ChainFlow {
        ChainFlow::Stop
    }
}
