use std::cell::RefCell;
use std::rc::Rc;

use tracing::trace;

pub type ObserverId = u64;

type Observer = Rc<RefCell<Box<dyn FnMut(usize)>>>;

/// Index observers, called in registration order.
#[derive(Default)]
pub struct ObserverList {
    next_id: ObserverId,
    observers: Vec<(ObserverId, Observer)>,
}

impl ObserverList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: impl FnMut(usize) + 'static) -> ObserverId {
        let id = self.next_id;
        self.next_id += 1;
        let observer: Box<dyn FnMut(usize)> = Box::new(observer);
        self.observers.push((id, Rc::new(RefCell::new(observer))));
        id
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(observer_id, _)| *observer_id != id);
        before != self.observers.len()
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    pub fn notify(&self, index: usize) {
        call_all(self.snapshot(), index);
    }

    fn snapshot(&self) -> Vec<Observer> {
        self.observers
            .iter()
            .map(|(_, observer)| Rc::clone(observer))
            .collect()
    }
}

/// Notifies the observers of a shared list without holding its borrow, so
/// an observer may subscribe or unsubscribe while it runs.
pub fn notify_shared(list: &RefCell<ObserverList>, index: usize) {
    let snapshot = list.borrow().snapshot();
    call_all(snapshot, index);
}

fn call_all(observers: Vec<Observer>, index: usize) {
    for observer in observers {
        match observer.try_borrow_mut() {
            Ok(mut observer) => (*observer)(index),
            Err(_) => trace!("observer: re-entered observer skipped for index {}", index),
        }
    }
}
