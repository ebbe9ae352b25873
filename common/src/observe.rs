//! A small single-threaded publish/subscribe registry.
//!
//! Listeners are removed when their [`Subscription`] guard is dropped, so a
//! component that holds the guard in its state unsubscribes on destroy.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type Listener<T> = Rc<dyn Fn(&T)>;

struct Registry<T> {
    next_key: u64,
    listeners: Vec<(u64, Listener<T>)>,
}

pub struct Subscribers<T> {
    registry: Rc<RefCell<Registry<T>>>,
}

impl<T> Default for Subscribers<T> {
    fn default() -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry { next_key: 0, listeners: Vec::new() })),
        }
    }
}

impl<T> Clone for Subscribers<T> {
    fn clone(&self) -> Self {
        Self { registry: Rc::clone(&self.registry) }
    }
}

impl<T> PartialEq for Subscribers<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.registry, &other.registry)
    }
}

impl<T> fmt::Debug for Subscribers<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let listeners = self.registry.borrow().listeners.len();
        f.debug_struct("Subscribers").field("listeners", &listeners).finish()
    }
}

impl<T: 'static> Subscribers<T> {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "the listener is removed as soon as the subscription is dropped"]
    pub fn subscribe(&self, listener: impl Fn(&T) + 'static) -> Subscription {
        let key = {
            let mut registry = self.registry.borrow_mut();
            let key = registry.next_key;
            registry.next_key += 1;
            registry.listeners.push((key, Rc::new(listener)));
            key
        };
        let weak: Weak<RefCell<Registry<T>>> = Rc::downgrade(&self.registry);
        Subscription {
            cancel: Some(Box::new(move || {
                if let Some(registry) = weak.upgrade() {
                    registry.borrow_mut().listeners.retain(|(k, _)| *k != key);
                }
            })),
        }
    }

    /// Calls every listener registered at the time of the call.
    ///
    /// Listeners may subscribe or unsubscribe while being notified.
    pub fn notify(&self, value: &T) {
        let listeners: Vec<Listener<T>> = self
            .registry
            .borrow()
            .listeners
            .iter()
            .map(|(_, l)| Rc::clone(l))
            .collect();
        for listener in listeners {
            listener(value);
        }
    }

    pub fn len(&self) -> usize {
        self.registry.borrow().listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Guard returned by [`Subscribers::subscribe`].
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
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
        f.debug_struct("Subscription").field("active", &self.cancel.is_some()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn dropped_guard_stops_delivery() {
        let subscribers = Subscribers::<u32>::new();
        let seen = Rc::new(Cell::new(0));
        let sink = Rc::clone(&seen);
        let guard = subscribers.subscribe(move |v| sink.set(sink.get() + v));

        subscribers.notify(&2);
        drop(guard);
        subscribers.notify(&5);

        assert_eq!(seen.get(), 2);
        assert!(subscribers.is_empty());
    }

    #[test]
    fn only_the_dropped_listener_is_removed() {
        let subscribers = Subscribers::<()>::new();
        let hits = Rc::new(Cell::new(0));
        let (a, b) = (Rc::clone(&hits), Rc::clone(&hits));
        let first = subscribers.subscribe(move |_| a.set(a.get() + 1));
        let _second = subscribers.subscribe(move |_| b.set(b.get() + 10));

        first.unsubscribe();
        subscribers.notify(&());

        assert_eq!(hits.get(), 10);
        assert_eq!(subscribers.len(), 1);
    }

    #[test]
    fn listener_may_subscribe_during_notify() {
        let subscribers = Subscribers::<()>::new();
        let extra: Rc<RefCell<Vec<Subscription>>> = Rc::default();
        let (inner, store) = (subscribers.clone(), Rc::clone(&extra));
        let _guard = subscribers.subscribe(move |_| {
            store.borrow_mut().push(inner.subscribe(|_| {}));
        });

        subscribers.notify(&());
        assert_eq!(subscribers.len(), 2);
    }

    #[test]
    fn debug_reports_listener_count() {
        let subscribers = Subscribers::<String>::new();
        let _guard = subscribers.subscribe(|_| {});
        assert_eq!(format!("{subscribers:?}"), "Subscribers { listeners: 1 }");
    }

    #[test]
    fn guard_outliving_registry_is_harmless() {
        let subscribers = Subscribers::<()>::new();
        let guard = subscribers.subscribe(|_| {});
        drop(subscribers);
        drop(guard);
    }
}
