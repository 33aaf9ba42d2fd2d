//! A mounted presentation view.
//!
//! Mounting acquires a key and a wheel subscription on the given event
//! source and routes them through the adapters into the controller.
//! Unmounting (explicitly or by drop) releases both subscriptions and
//! cancels any pending cool-down clear.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use tracing::{info, warn};

use crate::clock::Clock;
use crate::config::NavigationConfig;
use crate::controller::NavigationController;
use crate::error::Result;
use crate::events::{EventSource, Subscription};
use crate::input::{Disposition, KeyboardAdapter, WheelAdapter};
use crate::observer::{notify_shared, ObserverId, ObserverList};
use crate::slide::SlideSequence;

pub struct PresentationSession {
    controller: Rc<RefCell<NavigationController>>,
    observers: Rc<RefCell<ObserverList>>,
    subscriptions: Vec<Subscription>,
    mounted: bool,
}

impl PresentationSession {
    pub fn mount(source: &dyn EventSource, controller: NavigationController) -> Self {
        let wheel_adapter = WheelAdapter::new(controller.config().wheel_threshold);
        let total = controller.total_slides();
        let controller = Rc::new(RefCell::new(controller));
        let observers = Rc::new(RefCell::new(ObserverList::new()));

        let keys = {
            let nav = Rc::clone(&controller);
            let observers = Rc::clone(&observers);
            let keyboard = KeyboardAdapter;
            source.subscribe_keys(Box::new(move |event| {
                drive(&nav, &observers, |nav| keyboard.handle(nav, event)).unwrap_or_else(|| {
                    warn!("session: key event while the controller is borrowed; dropped");
                    Disposition::Ignored
                })
            }))
        };

        let wheel = {
            let nav = Rc::clone(&controller);
            let observers = Rc::clone(&observers);
            source.subscribe_wheel(Box::new(move |event| {
                drive(&nav, &observers, |nav| wheel_adapter.handle(nav, event)).unwrap_or_else(|| {
                    warn!("session: wheel event while the controller is borrowed; dropped");
                    Disposition::Ignored
                })
            }))
        };

        info!("session: mounted with {} slide(s)", total);

        Self {
            controller,
            observers,
            subscriptions: vec![keys, wheel],
            mounted: true,
        }
    }

    /// Builds the controller and mounts it in one step.
    pub fn mount_new(
        source: &dyn EventSource,
        slides: SlideSequence,
        config: NavigationConfig,
        clock: impl Clock + 'static,
    ) -> Result<Self> {
        let controller = NavigationController::new(slides, config, clock)?;
        Ok(Self::mount(source, controller))
    }

    pub fn go_to_index(&self, target: i64) {
        self.drive(|nav| nav.go_to_index(target));
    }

    pub fn go_to_next(&self) {
        self.drive(NavigationController::go_to_next);
    }

    pub fn go_to_previous(&self) {
        self.drive(NavigationController::go_to_previous);
    }

    /// Runs due cool-down clears; call once per frame.
    pub fn tick(&self) -> bool {
        self.drive(NavigationController::tick).unwrap_or(false)
    }

    /// Registers `observer`, called with the new index after every accepted
    /// move. The controller is no longer borrowed when it runs, so the observer
    /// may read it through `controller_handle`.
    pub fn subscribe(&self, observer: impl FnMut(usize) + 'static) -> ObserverId {
        self.observers.borrow_mut().subscribe(observer)
    }

    pub fn unsubscribe(&self, id: ObserverId) -> bool {
        self.observers.borrow_mut().unsubscribe(id)
    }

    fn drive<R>(&self, f: impl FnOnce(&mut NavigationController) -> R) -> Option<R> {
        let result = drive(&self.controller, &self.observers, f);
        if result.is_none() {
            warn!("session: request while the controller is borrowed; dropped");
        }
        result
    }

    pub fn current_index(&self) -> usize {
        self.controller.borrow().current_index()
    }

    pub fn controller(&self) -> Ref<'_, NavigationController> {
        self.controller.borrow()
    }

    /// Shared handle for consumers that outlive a borrow, such as a render loop.
    pub fn controller_handle(&self) -> Rc<RefCell<NavigationController>> {
        Rc::clone(&self.controller)
    }

    /// Page scrolling stays locked while the view is mounted; wheel input
    /// belongs to navigation.
    pub fn scroll_locked(&self) -> bool {
        self.mounted
    }

    pub fn unmount(mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        for subscription in self.subscriptions.drain(..) {
            subscription.dispose();
        }
        if let Ok(mut nav) = self.controller.try_borrow_mut() {
            nav.cancel_pending();
        }
        info!("session: unmounted");
    }
}

impl Drop for PresentationSession {
    fn drop(&mut self) {
        self.teardown();
    }
}

// Runs `f` on the controller, then notifies observers once the borrow is
// released. `None` when the controller is already borrowed.
fn drive<R>(
    controller: &RefCell<NavigationController>,
    observers: &RefCell<ObserverList>,
    f: impl FnOnce(&mut NavigationController) -> R,
) -> Option<R> {
    let (result, moved_to) = {
        let mut nav = controller.try_borrow_mut().ok()?;
        let before = nav.move_count();
        let result = f(&mut nav);
        let moved_to = (nav.move_count() != before).then(|| nav.current_index());
        (result, moved_to)
    };
    if let Some(index) = moved_to {
        notify_shared(observers, index);
    }
    Some(result)
}
