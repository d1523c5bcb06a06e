//! Modifier participants that intercept creature queries.
//!
//! A participant pairs one creature with one [`QueryModifier`]. Attaching it
//! subscribes to the creature's game broker; disposing it unsubscribes. The
//! creature/kind filter is applied here, before the modifier sees the query,
//! so concrete modifiers are plain value transforms and the aggregate result
//! does not depend on attach order across different kinds.
//!
//! # State
//!
//! - **Active**: subscribed; matching queries are transformed.
//! - **Disposed**: unsubscribed; the handler is inert.
//!
//! The only transition is [`Disposable::dispose`]. Dropping an active
//! participant without disposing it leaves a dead entry in the broker, which
//! is skipped on every publish until purged.

mod kinds;

pub use kinds::{DoubleAttack, Flat, IncreaseDefense, Multiply};

use std::rc::Rc;

use broker::{Disposable, Subscription, SubscriptionId};
use tracing::{debug, trace};

use crate::creature::Creature;
use crate::query::{CreatureId, Query, QueryKind};

/// A pure transform of one attribute value.
pub trait QueryModifier: 'static {
    /// Short label used in logs.
    fn name(&self) -> &'static str;

    /// Attribute this modifier applies to.
    fn kind(&self) -> QueryKind;

    /// Returns the transformed value. Must not have side effects.
    fn apply(&self, value: i32) -> i32;
}

/// Lifecycle of a [`CreatureModifier`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum ModifierState {
    Active,
    Disposed,
}

/// Broker target: the creature being watched plus the transform.
struct ModifierTarget<M> {
    creature: CreatureId,
    modifier: M,
}

impl<M: QueryModifier> ModifierTarget<M> {
    fn handle(&self, query: &mut Query) {
        if !query.targets(self.creature, self.modifier.kind()) {
            return;
        }

        let before = query.value;
        query.value = self.modifier.apply(before);

        trace!(
            target: "game_core::modifier",
            modifier = self.modifier.name(),
            creature = %self.creature,
            kind = %query.kind,
            before,
            after = query.value,
            "Query modified"
        );
    }
}

/// A modifier bound to one creature through the game's query broker.
pub struct CreatureModifier<M> {
    target: Rc<ModifierTarget<M>>,
    subscription: Subscription,
}

impl<M: QueryModifier> CreatureModifier<M> {
    /// Subscribes `modifier` to queries about `creature`.
    ///
    /// Takes effect from the next attribute read.
    pub fn attach(creature: &Creature, modifier: M) -> Self {
        let target = Rc::new(ModifierTarget {
            creature: creature.id(),
            modifier,
        });
        let subscription = creature
            .game()
            .queries()
            .subscribe(&target, ModifierTarget::<M>::handle);

        debug!(
            target: "game_core::modifier",
            modifier = target.modifier.name(),
            creature = %target.creature,
            kind = %target.modifier.kind(),
            subscription = %subscription.id(),
            "Modifier attached"
        );

        Self {
            target,
            subscription,
        }
    }

    pub fn creature(&self) -> CreatureId {
        self.target.creature
    }

    pub fn modifier(&self) -> &M {
        &self.target.modifier
    }

    pub fn subscription_id(&self) -> SubscriptionId {
        self.subscription.id()
    }

    pub fn state(&self) -> ModifierState {
        if self.subscription.is_active() {
            ModifierState::Active
        } else {
            ModifierState::Disposed
        }
    }

    pub fn is_active(&self) -> bool {
        self.state() == ModifierState::Active
    }
}

impl<M: QueryModifier> Disposable for CreatureModifier<M> {
    fn dispose(&self) {
        if !self.is_active() {
            return;
        }
        self.subscription.dispose();

        debug!(
            target: "game_core::modifier",
            modifier = self.target.modifier.name(),
            creature = %self.target.creature,
            "Modifier disposed"
        );
    }
}

impl<M: QueryModifier> std::fmt::Debug for CreatureModifier<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreatureModifier")
            .field("modifier", &self.target.modifier.name())
            .field("creature", &self.target.creature)
            .field("state", &self.state())
            .finish()
    }
}
