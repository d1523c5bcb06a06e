//! Creatures, queries and modifiers wired through the query broker.
//!
//! A [`Game`] owns one [`broker::Event<Query>`]. [`Creature`]s publish a
//! [`Query`] for each attribute read; [`CreatureModifier`]s subscribe to the
//! same broker and rewrite matching queries in place. Creatures and modifiers
//! never reference each other, and attribute values are recomputed on every
//! read.
//!
//! [`chain`] holds the older linked chain that rewrites stored stats
//! directly and can be cut short by a link.
pub mod chain;
pub mod config;
pub mod creature;
pub mod game;
pub mod modifier;
pub mod query;

pub use chain::{
    ChainFlow, ChainLink, DoubleAttackLink, IncreaseDefenseLink, ModifierChain, NoBonusesLink,
};
pub use config::GameConfig;
pub use creature::{Creature, CreatureStats};
pub use game::Game;
pub use modifier::{
    CreatureModifier, DoubleAttack, Flat, IncreaseDefense, ModifierState, Multiply, QueryModifier,
};
pub use query::{CreatureId, Query, QueryKind};
