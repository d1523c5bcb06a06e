//! Session mediator shared by creatures and modifiers.
use std::cell::Cell;
use std::rc::Rc;

use broker::Event;

use crate::config::GameConfig;
use crate::creature::Creature;
use crate::query::{CreatureId, Query};

/// Owns the query broker for one session.
///
/// Creatures publish their attribute reads through [`queries`](Self::queries)
/// and modifiers subscribe to it, so neither side holds a reference to the
/// other. Cloning is cheap and shares the same broker and id sequence.
#[derive(Clone, Debug)]
pub struct Game {
    config: GameConfig,
    queries: Event<Query>,
    next_creature: Rc<Cell<u32>>,
}

impl Game {
    pub fn new() -> Self {
        Self::with_config(GameConfig::default())
    }

    pub fn with_config(config: GameConfig) -> Self {
        Self {
            config,
            queries: Event::new(),
            next_creature: Rc::new(Cell::new(0)),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn queries(&self) -> &Event<Query> {
        &self.queries
    }

    /// Creates a creature registered with this game.
    pub fn spawn(&self, name: impl Into<String>, attack: i32, defense: i32) -> Creature {
        Creature::new(self, name, attack, defense)
    }

    /// # Panics
    ///
    /// Panics if the game has spawned `u32::MAX` creatures.
    pub(crate) fn allocate_creature_id(&self) -> CreatureId {
        let id = self.next_creature.get();
        self.next_creature
            .set(id.checked_add(1).expect("CreatureId overflow"));
        CreatureId(id)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
