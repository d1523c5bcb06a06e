//! Subscription records and the disposal handle returned by `subscribe`.
//!
//! A subscription is split in two halves that share one `active` flag:
//! - [`Binding`] lives inside the broker. It owns the handler and a [`Weak`]
//!   reference to the target, and is stored behind the erased [`Invocable`] seam.
//! - [`Subscription`] is handed back to the subscriber. Its only capability is
//!   [`Disposable::dispose`].

use std::any::Any;
use std::cell::Cell;
use std::fmt;
use std::marker::PhantomData;
use std::rc::{Rc, Weak};

use crate::error::{BrokerError, Result};
use crate::event::Registry;

/// Identity of a subscription within one broker.
///
/// Ids are assigned monotonically and never reused, so removal is by identity:
/// two subscriptions with identical targets and handlers stay independently
/// disposable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(pub u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Anything that can revoke its own registration.
///
/// Disposal is explicit and idempotent. Nothing in this crate disposes on
/// `Drop`, because handlers must be able to dispose other participants in the
/// middle of a publish.
pub trait Disposable {
    fn dispose(&self);
}

/// Outcome of offering a payload to one subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Dispatch {
    /// The handler ran.
    Invoked,
    /// The target was dropped; the handler was skipped.
    Expired,
}

/// Erased invocation interface stored by the broker.
///
/// The broker never sees target or payload types; each [`Binding`] downcasts
/// the payload back to its own query type.
pub(crate) trait Invocable {
    fn id(&self) -> SubscriptionId;

    fn is_alive(&self) -> bool;

    fn deactivate(&self);

    fn invoke(&self, payload: &mut dyn Any) -> Result<Dispatch>;
}

/// Broker-side half of a subscription, generic over the target type `T`, the
/// payload type `Q` and the handler `F`.
pub(crate) struct Binding<T, Q, F> {
    id: SubscriptionId,
    target: Weak<T>,
    handler: F,
    active: Rc<Cell<bool>>,
    _payload: PhantomData<fn(&mut Q)>,
}

impl<T, Q, F> Binding<T, Q, F>
where
    F: Fn(&T, &mut Q),
{
    pub(crate) fn new(
        id: SubscriptionId,
        target: &Rc<T>,
        handler: F,
        active: Rc<Cell<bool>>,
    ) -> Self {
        Self {
            id,
            target: Rc::downgrade(target),
            handler,
            active,
            _payload: PhantomData,
        }
    }
}

impl<T, Q, F> Invocable for Binding<T, Q, F>
where
    T: 'static,
    Q: 'static,
    F: Fn(&T, &mut Q) + 'static,
{
    fn id(&self) -> SubscriptionId {
        self.id
    }

    fn is_alive(&self) -> bool {
        self.target.strong_count() > 0
    }

    fn deactivate(&self) {
        self.active.set(false);
    }

    fn invoke(&self, payload: &mut dyn Any) -> Result<Dispatch> {
        let Some(target) = self.target.upgrade() else {
            return Ok(Dispatch::Expired);
        };
        let query = payload
            .downcast_mut::<Q>()
            .ok_or(BrokerError::InvariantViolation {
                subscription: self.id,
                expected: std::any::type_name::<Q>(),
            })?;

        (self.handler)(&target, query);
        Ok(Dispatch::Invoked)
    }
}

/// Subscriber-side handle returned by [`Event::subscribe`](crate::Event::subscribe).
///
/// Holds only the subscription id, the shared `active` flag and a weak link to
/// the broker, so keeping a handle never keeps the broker alive.
pub struct Subscription {
    id: SubscriptionId,
    active: Rc<Cell<bool>>,
    registry: Weak<Registry>,
}

impl Subscription {
    pub(crate) fn new(
        id: SubscriptionId,
        active: Rc<Cell<bool>>,
        registry: Weak<Registry>,
    ) -> Self {
        Self {
            id,
            active,
            registry,
        }
    }

    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Returns false once the subscription has been disposed or purged.
    pub fn is_active(&self) -> bool {
        self.active.get()
    }
}

impl Disposable for Subscription {
    fn dispose(&self) {
        if !self.active.replace(false) {
            return;
        }
        if let Some(registry) = self.registry.upgrade() {
            registry.remove(self.id);
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.active.get())
            .finish()
    }
}
