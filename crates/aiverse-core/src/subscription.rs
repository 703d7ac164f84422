//! Listener registration with scoped release.
//!
//! Both the session store and identity providers hand out [`Subscription`]
//! guards. Dropping the guard (or calling [`Subscription::unsubscribe`])
//! removes the listener, so a view that registers on mount is detached on
//! teardown even when it unwinds.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError, Weak};

/// Callback registered with a [`ListenerRegistry`].
pub type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Handle for a registered listener. Cancels on drop.
#[must_use = "dropping a Subscription immediately unregisters the listener"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    /// Wraps an arbitrary cancel action.
    pub fn new(cancel: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// A subscription with nothing to cancel.
    pub fn noop() -> Self {
        Self { cancel: None }
    }

    /// Unregisters the listener now.
    pub fn unsubscribe(mut self) {
        self.cancel_now();
    }

    fn cancel_now(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel_now();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

struct Slots<T> {
    next_id: u64,
    listeners: BTreeMap<u64, Listener<T>>,
}

/// A set of listeners notified in registration order.
///
/// Listeners are invoked outside the internal lock, so a listener may
/// register or cancel subscriptions while being notified.
pub struct ListenerRegistry<T> {
    slots: Arc<Mutex<Slots<T>>>,
}

impl<T: 'static> ListenerRegistry<T> {
    pub fn new() -> Self {
        Self {
            slots: Arc::new(Mutex::new(Slots {
                next_id: 0,
                listeners: BTreeMap::new(),
            })),
        }
    }

    /// Registers `listener`; the returned guard removes it again.
    pub fn register(&self, listener: Listener<T>) -> Subscription {
        let id = {
            let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
            let id = slots.next_id;
            slots.next_id += 1;
            slots.listeners.insert(id, listener);
            id
        };

        let weak: Weak<Mutex<Slots<T>>> = Arc::downgrade(&self.slots);
        Subscription::new(move || {
            // The registry may already be gone.
            if let Some(slots) = weak.upgrade() {
                slots
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .listeners
                    .remove(&id);
            }
        })
    }

    /// Calls every registered listener with `value`.
    pub fn notify(&self, value: &T) {
        let listeners: Vec<Listener<T>> = {
            let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
            slots.listeners.values().cloned().collect()
        };
        for listener in listeners {
            listener(value);
        }
    }

    pub fn len(&self) -> usize {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .listeners
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: 'static> Default for ListenerRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_notify_reaches_registered_listeners() {
        let registry = ListenerRegistry::<u32>::new();
        let total = Arc::new(AtomicUsize::new(0));

        let t = total.clone();
        let _a = registry.register(Arc::new(move |v: &u32| {
            t.fetch_add(*v as usize, Ordering::SeqCst);
        }));
        let t = total.clone();
        let _b = registry.register(Arc::new(move |v: &u32| {
            t.fetch_add(*v as usize, Ordering::SeqCst);
        }));

        registry.notify(&5);
        assert_eq!(total.load(Ordering::SeqCst), 10);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let registry = ListenerRegistry::<u32>::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let c = calls.clone();
        let sub = registry.register(Arc::new(move |_: &u32| {
            c.fetch_add(1, Ordering::SeqCst);
        }));
        assert_eq!(registry.len(), 1);

        drop(sub);
        registry.notify(&1);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_explicit_unsubscribe() {
        let registry = ListenerRegistry::<u32>::new();
        let sub = registry.register(Arc::new(|_: &u32| {}));
        sub.unsubscribe();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_subscription_outlives_registry() {
        let registry = ListenerRegistry::<u32>::new();
        let sub = registry.register(Arc::new(|_: &u32| {}));
        drop(registry);
        // Cancelling after the registry is gone must be harmless.
        drop(sub);
    }

    #[test]
    fn test_listener_may_unsubscribe_during_notify() {
        let registry = Arc::new(ListenerRegistry::<u32>::new());
        let slot: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));

        let s = slot.clone();
        let sub = registry.register(Arc::new(move |_: &u32| {
            s.lock().unwrap().take();
        }));
        *slot.lock().unwrap() = Some(sub);

        registry.notify(&1);
        assert!(registry.is_empty());
    }
}
