//! Scoped subscriptions to platform input.
//!
//! An `EventSource` hands out `Subscription`s; dropping one (or calling
//! `dispose`) removes the listener, so nothing outlives the view that
//! registered it.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::trace;

use crate::input::{Disposition, KeyEvent, WheelEvent};

pub type KeyListener = Box<dyn FnMut(&KeyEvent) -> Disposition>;
pub type WheelListener = Box<dyn FnMut(&WheelEvent) -> Disposition>;

pub trait EventSource {
    fn subscribe_keys(&self, listener: KeyListener) -> Subscription;
    fn subscribe_wheel(&self, listener: WheelListener) -> Subscription;
}

/// Disposer for one listener. Released on drop.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    dispose: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(dispose: impl FnOnce() + 'static) -> Self {
        Self {
            dispose: Some(Box::new(dispose)),
        }
    }

    pub fn dispose(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(dispose) = self.dispose.take() {
            dispose();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

type Shared<T> = Rc<RefCell<T>>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    keys: Vec<(u64, Shared<KeyListener>)>,
    wheel: Vec<(u64, Shared<WheelListener>)>,
}

/// In-process event source. The window loop (or a replay script) pushes
/// events in with `dispatch_*`; listeners run synchronously, in
/// subscription order.
#[derive(Clone, Default)]
pub struct EventBus {
    listeners: Shared<Listeners>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `Handled` when at least one listener handled the event.
    pub fn dispatch_key(&self, event: &KeyEvent) -> Disposition {
        // Snapshot first so a listener may unsubscribe while being called.
        let snapshot: Vec<_> = self
            .listeners
            .borrow()
            .keys
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        trace!("events: key {:?} to {} listener(s)", event.key, snapshot.len());
        combine(snapshot.iter().map(|listener| match listener.try_borrow_mut() {
            Ok(mut listener) => (*listener)(event),
            Err(_) => {
                trace!("events: re-entered key listener skipped");
                Disposition::Ignored
            }
        }))
    }

    pub fn dispatch_wheel(&self, event: &WheelEvent) -> Disposition {
        let snapshot: Vec<_> = self
            .listeners
            .borrow()
            .wheel
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        trace!("events: wheel {} to {} listener(s)", event.delta_y, snapshot.len());
        combine(snapshot.iter().map(|listener| match listener.try_borrow_mut() {
            Ok(mut listener) => (*listener)(event),
            Err(_) => {
                trace!("events: re-entered wheel listener skipped");
                Disposition::Ignored
            }
        }))
    }

    pub fn key_listener_count(&self) -> usize {
        self.listeners.borrow().keys.len()
    }

    pub fn wheel_listener_count(&self) -> usize {
        self.listeners.borrow().wheel.len()
    }

    fn next_id(&self) -> u64 {
        let mut listeners = self.listeners.borrow_mut();
        listeners.next_id += 1;
        listeners.next_id
    }

    fn disposer(&self, id: u64, keys: bool) -> Subscription {
        let weak: Weak<RefCell<Listeners>> = Rc::downgrade(&self.listeners);
        Subscription::new(move || {
            if let Some(listeners) = weak.upgrade() {
                let mut listeners = listeners.borrow_mut();
                if keys {
                    listeners.keys.retain(|(listener_id, _)| *listener_id != id);
                } else {
                    listeners.wheel.retain(|(listener_id, _)| *listener_id != id);
                }
                trace!("events: listener {} released", id);
            }
        })
    }
}

impl EventSource for EventBus {
    fn subscribe_keys(&self, listener: KeyListener) -> Subscription {
        let id = self.next_id();
        self.listeners
            .borrow_mut()
            .keys
            .push((id, Rc::new(RefCell::new(listener))));
        self.disposer(id, true)
    }

    fn subscribe_wheel(&self, listener: WheelListener) -> Subscription {
        let id = self.next_id();
        self.listeners
            .borrow_mut()
            .wheel
            .push((id, Rc::new(RefCell::new(listener))));
        self.disposer(id, false)
    }
}

// Every listener runs; no short-circuit.
fn combine(results: impl Iterator<Item = Disposition>) -> Disposition {
    results.fold(Disposition::Ignored, |acc, result| {
        if result == Disposition::Handled {
            Disposition::Handled
        } else {
            acc
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn dropping_the_subscription_removes_the_listener() {
        let bus = EventBus::new();
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let subscription = bus.subscribe_keys(Box::new(move |_| {
            counter.set(counter.get() + 1);
            Disposition::Handled
        }));

        assert_eq!(bus.dispatch_key(&KeyEvent::new("ArrowDown")), Disposition::Handled);
        assert_eq!(bus.key_listener_count(), 1);

        drop(subscription);
        assert_eq!(bus.key_listener_count(), 0);
        assert_eq!(bus.dispatch_key(&KeyEvent::new("ArrowDown")), Disposition::Ignored);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn all_listeners_run_and_any_handled_wins() {
        let bus = EventBus::new();
        let calls = Rc::new(Cell::new(0));
        let first = Rc::clone(&calls);
        let second = Rc::clone(&calls);
        let _a = bus.subscribe_wheel(Box::new(move |_| {
            first.set(first.get() + 1);
            Disposition::Handled
        }));
        let _b = bus.subscribe_wheel(Box::new(move |_| {
            second.set(second.get() + 1);
            Disposition::Ignored
        }));

        assert_eq!(bus.dispatch_wheel(&WheelEvent { delta_y: 40.0 }), Disposition::Handled);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn listener_dispatching_on_its_own_bus_is_skipped_when_re_entered() {
        let bus = EventBus::new();
        let inner = Rc::new(Cell::new(None));
        let calls = Rc::new(Cell::new(0));

        let handle = bus.clone();
        let seen = Rc::clone(&inner);
        let counter = Rc::clone(&calls);
        let _subscription = bus.subscribe_keys(Box::new(move |event: &KeyEvent| {
            counter.set(counter.get() + 1);
            if event.key == crate::input::Key::ArrowDown {
                seen.set(Some(handle.dispatch_key(&KeyEvent::new("ArrowDown"))));
            }
            Disposition::Handled
        }));

        assert_eq!(bus.dispatch_key(&KeyEvent::new("ArrowDown")), Disposition::Handled);
        assert_eq!(inner.get(), Some(Disposition::Ignored));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn subscription_outliving_the_bus_is_harmless() {
        let bus = EventBus::new();
        let subscription = bus.subscribe_wheel(Box::new(|_| Disposition::Ignored));
        drop(bus);
        subscription.dispose();
    }
}
