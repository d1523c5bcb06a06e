//! Typed event broker over an erased subscription list.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::marker::PhantomData;
use std::rc::Rc;

use tracing::{debug, error, trace};

use crate::error::{BrokerError, Result};
use crate::subscription::{Binding, Dispatch, Invocable, Subscription, SubscriptionId};

/// Shared state behind an [`Event`]: the ordered subscription list plus the
/// bookkeeping needed for ids and re-entrancy detection.
///
/// The list is only borrowed for mutation and for taking a snapshot; it is
/// never borrowed while a handler runs, so handlers may subscribe, dispose or
/// publish other payloads.
pub(crate) struct Registry {
    name: &'static str,
    entries: RefCell<Vec<Rc<dyn Invocable>>>,
    next_id: Cell<u64>,
    /// Addresses of the payloads currently being dispatched, innermost last.
    in_flight: RefCell<Vec<*const ()>>,
}

impl Registry {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            entries: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
            in_flight: RefCell::new(Vec::new()),
        }
    }

    /// # Panics
    ///
    /// Panics if the broker has handed out `u64::MAX` subscription ids.
    fn allocate_id(&self) -> SubscriptionId {
        let id = self.next_id.get();
        self.next_id
            .set(id.checked_add(1).expect("SubscriptionId overflow"));
        SubscriptionId(id)
    }

    fn push(&self, entry: Rc<dyn Invocable>) {
        self.entries.borrow_mut().push(entry);
    }

    /// Removes the entry with the given id. Remaining entries keep their order.
    pub(crate) fn remove(&self, id: SubscriptionId) {
        let mut entries = self.entries.borrow_mut();
        if let Some(index) = entries.iter().position(|entry| entry.id() == id) {
            entries.remove(index);
            debug!(
                target: "broker::event",
                event = self.name,
                subscription = %id,
                remaining = entries.len(),
                "Subscription disposed"
            );
        }
    }

    fn snapshot(&self) -> Vec<Rc<dyn Invocable>> {
        self.entries.borrow().clone()
    }

    /// Marks `payload` as in flight. Fails if that same payload is already
    /// being dispatched further up the stack.
    fn enter(&self, payload: *const ()) -> Result<DispatchGuard<'_>> {
        let mut in_flight = self.in_flight.borrow_mut();
        if in_flight.contains(&payload) {
            return Err(BrokerError::ReentrancyViolation { event: self.name });
        }
        in_flight.push(payload);
        Ok(DispatchGuard { registry: self })
    }
}

/// Pops the innermost in-flight payload when a publish ends, including by
/// unwinding.
struct DispatchGuard<'a> {
    registry: &'a Registry,
}

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        self.registry.in_flight.borrow_mut().pop();
    }
}

/// Publish/subscribe broker for one payload type `Q`.
///
/// Subscribers register a target together with a handler; the broker keeps
/// only a weak reference to the target, so it never extends the target's
/// lifetime. [`publish`](Self::publish) hands the same `&mut Q` to every live
/// handler in subscription order, and each handler sees the mutations of the
/// ones before it.
///
/// The broker is single-threaded: it is neither `Send` nor `Sync`.
/// Cloning yields another handle to the same subscription list.
pub struct Event<Q> {
    registry: Rc<Registry>,
    _payload: PhantomData<fn(&mut Q)>,
}

impl<Q: 'static> Event<Q> {
    pub fn new() -> Self {
        Self {
            registry: Rc::new(Registry::new(std::any::type_name::<Q>())),
            _payload: PhantomData,
        }
    }

    /// Registers `handler` to be called with `target` on every publish.
    ///
    /// The target only needs to live for the duration of this call. Once it
    /// is dropped the subscription is silently skipped.
    pub fn subscribe<T, F>(&self, target: &Rc<T>, handler: F) -> Subscription
    where
        T: 'static,
        F: Fn(&T, &mut Q) + 'static,
    {
        let id = self.registry.allocate_id();
        let active = Rc::new(Cell::new(true));
        let binding = Binding::new(id, target, handler, Rc::clone(&active));
        self.registry.push(Rc::new(binding));

        debug!(
            target: "broker::event",
            event = self.registry.name,
            subscription = %id,
            subscriber = std::any::type_name::<T>(),
            "Subscribed"
        );

        Subscription::new(id, active, Rc::downgrade(&self.registry))
    }

    /// Runs every live handler against `query`, in subscription order.
    ///
    /// The handler list is fixed when the publish starts: subscriptions made
    /// by a handler run from the next publish, and subscriptions disposed by a
    /// handler still run once in this one.
    ///
    /// A handler may publish other payloads through the same broker (for
    /// example to read another creature), but handing the payload it is
    /// currently processing back to `publish` fails with
    /// [`BrokerError::ReentrancyViolation`].
    ///
    /// Returns the number of handlers that ran.
    pub fn publish(&self, query: &mut Q) -> Result<usize> {
        self.publish_any(query)
    }

    /// Erased form of [`publish`](Self::publish).
    ///
    /// Each subscription downcasts the payload itself; a payload that is not a
    /// `Q` fails with [`BrokerError::InvariantViolation`] at the first live
    /// subscription and aborts the publish.
    pub fn publish_any(&self, payload: &mut dyn Any) -> Result<usize> {
        let _guard = self
            .registry
            .enter(&*payload as *const dyn Any as *const ())?;

        // Iterate a snapshot so that handlers may subscribe or dispose without
        // disturbing the entries still to be visited.
        let snapshot = self.registry.snapshot();
        let mut invoked = 0;

        for entry in &snapshot {
            match entry.invoke(payload) {
                Ok(Dispatch::Invoked) => {
                    invoked += 1;
                    trace!(
                        target: "broker::event",
                        event = self.registry.name,
                        subscription = %entry.id(),
                        "Handler invoked"
                    );
                }
                Ok(Dispatch::Expired) => trace!(
                    target: "broker::event",
                    event = self.registry.name,
                    subscription = %entry.id(),
                    "Target dropped, skipping"
                ),
                Err(e) => {
                    error!(
                        target: "broker::event",
                        event = self.registry.name,
                        subscription = %entry.id(),
                        error = %e,
                        "Publish aborted"
                    );
                    return Err(e);
                }
            }
        }

        Ok(invoked)
    }

    /// Removes subscriptions whose target has been dropped.
    ///
    /// Returns the number of entries removed. Their handles report inactive
    /// afterwards.
    pub fn purge_expired(&self) -> usize {
        let mut entries = self.registry.entries.borrow_mut();
        let before = entries.len();
        entries.retain(|entry| {
            let alive = entry.is_alive();
            if !alive {
                entry.deactivate();
            }
            alive
        });
        let purged = before - entries.len();

        if purged > 0 {
            debug!(
                target: "broker::event",
                event = self.registry.name,
                purged,
                "Purged expired subscriptions"
            );
        }
        purged
    }

    /// Number of registered subscriptions, including ones whose target has
    /// been dropped but which have not been disposed or purged.
    pub fn len(&self) -> usize {
        self.registry.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.entries.borrow().is_empty()
    }

    /// Returns true while a publish is running on this broker.
    pub fn is_dispatching(&self) -> bool {
        !self.registry.in_flight.borrow().is_empty()
    }
}

impl<Q: 'static> Default for Event<Q> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Q> Clone for Event<Q> {
    fn clone(&self) -> Self {
        Self {
            registry: Rc::clone(&self.registry),
            _payload: PhantomData,
        }
    }
}

impl<Q> std::fmt::Debug for Event<Q> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Event")
            .field("payload", &self.registry.name)
            .field("subscriptions", &self.registry.entries.borrow().len())
            .finish()
    }
}
