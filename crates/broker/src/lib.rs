//! Generic, single-threaded publish/subscribe broker with weak targets.
//!
//! An [`Event<Q>`] routes one mutable payload of type `Q` through every live
//! subscription, in the order the subscriptions were made. It is the
//! interception point of the query chain: subjects publish a query, and
//! independently constructed participants rewrite it on the way through
//! without the subject knowing they exist.
//!
//! Modules are organized by responsibility:
//! - [`event`] hosts the broker and its subscription list
//! - [`subscription`] defines the erased invocation seam and disposal handles
//! - [`error`] holds the error taxonomy for wiring mistakes
//!
//! # Lifetimes
//!
//! The broker holds targets weakly. A target that is dropped without being
//! disposed is skipped on publish; it is not an error. Disposal is explicit and
//! idempotent. It takes effect from the next publish: a publish already
//! running keeps the handler list it started with.
pub mod error;
pub mod event;
pub mod subscription;

pub use error::{BrokerError, ErrorSeverity, Result};
pub use event::Event;
pub use subscription::{Disposable, Subscription, SubscriptionId};
