//! Subject whose attributes are computed through the query broker.
use std::fmt;

use broker::Result;
use tracing::trace;

use crate::game::Game;
use crate::query::{CreatureId, Query, QueryKind};

/// Plain name/attack/defense record.
///
/// Used both as the mutable target of the command chain and as the result of
/// [`Creature::snapshot`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreatureStats {
    pub name: String,
    pub attack: i32,
    pub defense: i32,
}

impl CreatureStats {
    pub fn new(name: impl Into<String>, attack: i32, defense: i32) -> Self {
        Self {
            name: name.into(),
            attack,
            defense,
        }
    }
}

impl fmt::Display for CreatureStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Name: {}, Attack: {}, Defense: {}",
            self.name, self.attack, self.defense
        )
    }
}

/// A creature with fixed base attributes.
///
/// The creature never stores modified values and knows nothing about its
/// modifiers. Every read of [`attack`](Self::attack) or
/// [`defense`](Self::defense) builds a fresh [`Query`] seeded with the base
/// value, publishes it through the game's broker and returns whatever the
/// handlers left in it.
#[derive(Debug)]
pub struct Creature {
    id: CreatureId,
    name: String,
    base_attack: i32,
    base_defense: i32,
    game: Game,
}

impl Creature {
    pub fn new(game: &Game, name: impl Into<String>, attack: i32, defense: i32) -> Self {
        Self {
            id: game.allocate_creature_id(),
            name: name.into(),
            base_attack: attack,
            base_defense: defense,
            game: game.clone(),
        }
    }

    pub fn id(&self) -> CreatureId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Unmodified value of `kind`.
    pub fn base(&self, kind: QueryKind) -> i32 {
        match kind {
            QueryKind::Attack => self.base_attack,
            QueryKind::Defense => self.base_defense,
        }
    }

    pub fn attack(&self) -> Result<i32> {
        self.query(QueryKind::Attack)
    }

    pub fn defense(&self) -> Result<i32> {
        self.query(QueryKind::Defense)
    }

    /// Reads `kind` through the broker.
    pub fn query(&self, kind: QueryKind) -> Result<i32> {
        let base = self.base(kind);
        let mut query = Query::new(self.id, kind, base);
        let handled = self.game.queries().publish(&mut query)?;

        trace!(
            target: "game_core::creature",
            creature = %self.id,
            kind = %kind,
            base,
            value = query.value,
            handled,
            "Attribute read"
        );

        Ok(query.value)
    }

    /// Current attribute values, each read through the broker.
    pub fn snapshot(&self) -> Result<CreatureStats> {
        Ok(CreatureStats {
            name: self.name.clone(),
            attack: self.attack()?,
            defense: self.defense()?,
        })
    }
}
