//! Coalesced change notifications for UI components.
//!
//! The observer hub lets UI components re-render when a parameter changes
//! without ever involving the render domain. Notifications are *coalesced*:
//! a burst of commits to one address before the UI drains collapses to a
//! single changed signal carrying the latest value. Consumers therefore read
//! current state from the store rather than treating notifications as a
//! queue.
//!
//! Everything here runs in the UI domain; an internal mutex is fine because
//! the render thread never touches it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use crate::types::{ParamAddress, ParamValue};

/// What a subscription listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObserverScope {
    /// Changes to one parameter address.
    Parameter(ParamAddress),
    /// Changes to any parameter in the named group.
    Group(&'static str),
}

impl ObserverScope {
    fn matches(&self, address: ParamAddress, group: &'static str) -> bool {
        match self {
            Self::Parameter(scoped) => *scoped == address,
            Self::Group(scoped) => *scoped == group,
        }
    }
}

/// Token identifying an active subscription.
///
/// Pass back to [`unsubscribe`](crate::store::ParameterStore::unsubscribe)
/// to release it. Releasing an already-released subscription is a no-op.
#[derive(Debug, PartialEq, Eq)]
pub struct Subscription {
    id: u64,
}

/// Callback invoked with the changed address and its latest value.
pub type ChangeCallback = Box<dyn FnMut(ParamAddress, ParamValue) + Send>;

struct Subscriber {
    id: u64,
    scope: ObserverScope,
    callback: ChangeCallback,
}

/// Registry of subscriptions plus the pending changed-address set.
///
/// Owned by the [`ParameterStore`](crate::store::ParameterStore); the store
/// marks addresses changed on commit and resolves latest values at drain
/// time.
pub struct ObserverHub {
    subscribers: Mutex<Vec<Subscriber>>,
    pending: Mutex<Vec<ParamAddress>>,
    next_id: AtomicU64,
}

impl ObserverHub {
    pub(crate) fn new() -> Self {
        Self {
            subscribers: Mutex::new(Vec::new()),
            pending: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    pub(crate) fn subscribe(&self, scope: ObserverScope, callback: ChangeCallback) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let mut subscribers = self.subscribers.lock().unwrap();
        subscribers.push(Subscriber {
            id,
            scope,
            callback,
        });
        Subscription { id }
    }

    pub(crate) fn unsubscribe(&self, subscription: &Subscription) {
        let mut subscribers = self.subscribers.lock().unwrap();
        // No-op if the subscription is already gone
        subscribers.retain(|subscriber| subscriber.id != subscription.id);
    }

    /// Record that an address changed. Repeated marks before a drain
    /// coalesce into one.
    pub(crate) fn mark_changed(&self, address: ParamAddress) {
        let mut pending = self.pending.lock().unwrap();
        if !pending.contains(&address) {
            pending.push(address);
        }
    }

    /// Deliver one coalesced notification per pending address.
    ///
    /// `resolve` maps an address to its latest value and owning group;
    /// addresses it cannot resolve are dropped silently. The subscriber
    /// list is locked for the duration, so callbacks must not subscribe or
    /// unsubscribe re-entrantly.
    pub(crate) fn drain(
        &self,
        mut resolve: impl FnMut(ParamAddress) -> Option<(ParamValue, &'static str)>,
    ) {
        let pending = std::mem::take(&mut *self.pending.lock().unwrap());
        if pending.is_empty() {
            return;
        }
        let mut subscribers = self.subscribers.lock().unwrap();
        for address in pending {
            let Some((value, group)) = resolve(address) else {
                continue;
            };
            for subscriber in subscribers.iter_mut() {
                if subscriber.scope.matches(address, group) {
                    (subscriber.callback)(address, value);
                }
            }
        }
    }

    #[cfg(test)]
    fn pending_len(&self) -> usize {
        self.pending.lock().unwrap().len()
    }
}
