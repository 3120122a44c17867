//! Keyed publish/subscribe used to propagate state changes to presentation.
//!
//! Listeners are registered per key and invoked synchronously, in registration
//! order, every time a value is published for that key. Registration returns a
//! [`Subscription`] handle; dropping it removes the listener.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::rc::{Rc, Weak};

type Callback<V> = Rc<dyn Fn(&V)>;

struct Listeners<K, V> {
    next_id: u64,
    by_key: HashMap<K, Vec<(u64, Callback<V>)>>,
}

/// A single-threaded event emitter keyed by `K`, carrying values of type `V`.
pub struct Notifier<K, V> {
    listeners: Rc<RefCell<Listeners<K, V>>>,
}

impl<K, V> Notifier<K, V>
where
    K: Eq + Hash + Clone + 'static,
    V: 'static,
{
    pub fn new() -> Self {
        Self {
            listeners: Rc::new(RefCell::new(Listeners {
                next_id: 0,
                by_key: HashMap::new(),
            })),
        }
    }

    /// Register `callback` for `key`.
    ///
    /// The callback stays registered until the returned [`Subscription`] is
    /// dropped or [`Subscription::unsubscribe`] is called.
    pub fn subscribe(&self, key: K, callback: impl Fn(&V) + 'static) -> Subscription {
        let id = {
            let mut listeners = self.listeners.borrow_mut();
            let id = listeners.next_id;
            listeners.next_id += 1;
            listeners
                .by_key
                .entry(key.clone())
                .or_default()
                .push((id, Rc::new(callback)));
            id
        };

        let weak: Weak<RefCell<Listeners<K, V>>> = Rc::downgrade(&self.listeners);
        Subscription {
            detach: Some(Box::new(move || {
                if let Some(listeners) = weak.upgrade() {
                    let mut listeners = listeners.borrow_mut();
                    if let Some(list) = listeners.by_key.get_mut(&key) {
                        list.retain(|(existing, _)| *existing != id);
                        if list.is_empty() {
                            listeners.by_key.remove(&key);
                        }
                    }
                }
            })),
        }
    }

    /// Invoke every listener registered for `key` with `value`.
    ///
    /// The listener list is captured before the first call, so listeners added
    /// or removed by a callback take effect from the next notification.
    pub fn notify(&self, key: &K, value: &V) {
        let callbacks: Vec<Callback<V>> = match self.listeners.borrow().by_key.get(key) {
            Some(list) => list.iter().map(|(_, cb)| Rc::clone(cb)).collect(),
            None => return,
        };

        for callback in callbacks {
            callback(value);
        }
    }

    /// Number of live listeners for `key`.
    pub fn listener_count(&self, key: &K) -> usize {
        self.listeners
            .borrow()
            .by_key
            .get(key)
            .map_or(0, Vec::len)
    }
}

impl<K, V> Default for Notifier<K, V>
where
    K: Eq + Hash + Clone + 'static,
    V: 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for Notifier<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let listeners = self.listeners.borrow();
        let total: usize = listeners.by_key.values().map(Vec::len).sum();
        f.debug_struct("Notifier").field("listeners", &total).finish()
    }
}

/// Handle to a registered listener. Dropping it unsubscribes.
#[must_use = "dropping a Subscription immediately unsubscribes the listener"]
pub struct Subscription {
    detach: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Remove the listener now.
    pub fn unsubscribe(mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }

    /// Keep the listener registered for as long as the notifier lives.
    pub fn forever(mut self) {
        self.detach = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.detach.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_listeners_run_in_registration_order() {
        let notifier: Notifier<&str, u32> = Notifier::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let first = {
            let log = Rc::clone(&log);
            notifier.subscribe("page", move |v| log.borrow_mut().push(("first", *v)))
        };
        let second = {
            let log = Rc::clone(&log);
            notifier.subscribe("page", move |v| log.borrow_mut().push(("second", *v)))
        };

        notifier.notify(&"page", &7);
        assert_eq!(*log.borrow(), vec![("first", 7), ("second", 7)]);

        drop(first);
        drop(second);
    }

    #[test]
    fn test_only_matching_key_is_notified() {
        let notifier: Notifier<&str, u32> = Notifier::new();
        let hits = Rc::new(Cell::new(0));

        let hits_clone = Rc::clone(&hits);
        let _sub = notifier.subscribe("zoom", move |_| hits_clone.set(hits_clone.get() + 1));

        notifier.notify(&"page", &1);
        assert_eq!(hits.get(), 0);
        notifier.notify(&"zoom", &110);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let notifier: Notifier<&str, u32> = Notifier::new();
        let hits = Rc::new(Cell::new(0));

        let hits_clone = Rc::clone(&hits);
        let sub = notifier.subscribe("page", move |_| hits_clone.set(hits_clone.get() + 1));
        assert_eq!(notifier.listener_count(&"page"), 1);

        drop(sub);
        notifier.notify(&"page", &2);
        assert_eq!(hits.get(), 0);
        assert_eq!(notifier.listener_count(&"page"), 0);
    }

    #[test]
    fn test_explicit_unsubscribe_and_forever() {
        let notifier: Notifier<&str, u32> = Notifier::new();
        let hits = Rc::new(Cell::new(0));

        let a = Rc::clone(&hits);
        notifier
            .subscribe("page", move |_| a.set(a.get() + 1))
            .forever();
        let b = Rc::clone(&hits);
        let sub = notifier.subscribe("page", move |_| b.set(b.get() + 10));
        sub.unsubscribe();

        notifier.notify(&"page", &3);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_subscribe_from_callback_applies_next_time() {
        let notifier: Rc<Notifier<&str, u32>> = Rc::new(Notifier::new());
        let hits = Rc::new(Cell::new(0));

        let inner_notifier = Rc::clone(&notifier);
        let inner_hits = Rc::clone(&hits);
        notifier
            .subscribe("page", move |_| {
                let h = Rc::clone(&inner_hits);
                inner_notifier
                    .subscribe("page", move |_| h.set(h.get() + 1))
                    .forever();
            })
            .forever();

        notifier.notify(&"page", &1);
        assert_eq!(hits.get(), 0);
        notifier.notify(&"page", &2);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_subscription_outliving_notifier_is_harmless() {
        let notifier: Notifier<&str, u32> = Notifier::new();
        let sub = notifier.subscribe("page", |_| {});
        drop(notifier);
        drop(sub);
    }
}
