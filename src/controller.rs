//! The slide navigation controller.
//!
//! Owns the active slide index and serializes changes to it. Every accepted
//! move opens a cool-down window during which further requests are absorbed,
//! so a burst of input (a held key, one trackpad swipe) yields a single step.
//!
//! Two guards enforce the window and both use the configured cool-down:
//! a busy flag cleared by a deferred callback, and a minimum interval since
//! the last accepted move. Deferred clears are tagged with the move that armed
//! them; a clear left over from an older move is dropped.

use std::time::Duration;

use tracing::{debug, trace};

use crate::clock::Clock;
use crate::config::NavigationConfig;
use crate::error::Result;
use crate::observer::{ObserverId, ObserverList};
use crate::slide::{SlideId, SlideSequence};
use crate::state::{NavigationPhase, Rejection};
use crate::timer::TimerQueue;

pub struct NavigationController {
    slides: SlideSequence,
    config: NavigationConfig,
    clock: Box<dyn Clock>,

    current_index: usize,
    is_transitioning: bool,
    last_change: Option<Duration>,

    move_seq: u64,
    timers: TimerQueue,

    observers: ObserverList,

    last_rejection: Option<Rejection>,
}

impl NavigationController {
    pub fn new(
        slides: SlideSequence,
        config: NavigationConfig,
        clock: impl Clock + 'static,
    ) -> Result<Self> {
        let config = config.validate()?;
        Ok(Self {
            slides,
            config,
            clock: Box::new(clock),
            current_index: 0,
            is_transitioning: false,
            last_change: None,
            move_seq: 0,
            timers: TimerQueue::new(),
            observers: ObserverList::new(),
            last_rejection: None,
        })
    }

    // --- Moves ---

    /// Requests a move to `target`. Out-of-range targets and requests during
    /// the cool-down window are silently ignored.
    pub fn go_to_index(&mut self, target: i64) {
        // Deferred clears that are already due run before the new request,
        // as they would in an event loop.
        self.tick();

        let now = self.clock.now();

        let Some(index) = self.index_in_range(target) else {
            self.reject(Rejection::OutOfRange { target });
            return;
        };
        if self.is_transitioning {
            self.reject(Rejection::Busy);
            return;
        }
        let cool_down = self.config.cool_down;
        if self
            .last_change
            .is_some_and(|last| now.saturating_sub(last) < cool_down)
        {
            self.reject(Rejection::TooSoon);
            return;
        }

        self.current_index = index;
        self.is_transitioning = true;
        self.last_change = Some(now);
        self.move_seq += 1;
        self.timers.schedule(self.move_seq, now + self.config.cool_down);
        self.last_rejection = None;

        debug!(
            "nav: move #{} to {} ({}/{}) at {:?}",
            self.move_seq,
            self.slides.get(index).map_or("?", SlideId::as_str),
            index + 1,
            self.slides.len(),
            now
        );

        self.observers.notify(index);
    }

    pub fn go_to_next(&mut self) {
        self.go_to_index(self.current_index as i64 + 1);
    }

    pub fn go_to_previous(&mut self) {
        self.go_to_index(self.current_index as i64 - 1);
    }

    pub fn go_to_first(&mut self) {
        self.go_to_index(0);
    }

    pub fn go_to_last(&mut self) {
        self.go_to_index(self.slides.last_index() as i64);
    }

    // --- Deferred callbacks ---

    /// Runs the cool-down clears that are due. Returns true when the busy
    /// flag went from set to clear.
    pub fn tick(&mut self) -> bool {
        let now = self.clock.now();
        let mut cleared = false;
        for clear in self.timers.take_due(now) {
            if clear.move_id != self.move_seq {
                trace!("nav: dropping stale clear from move #{}", clear.move_id);
                continue;
            }
            if self.is_transitioning {
                self.is_transitioning = false;
                cleared = true;
                debug!("nav: cool-down of move #{} over at {:?}", clear.move_id, now);
            }
        }
        cleared
    }

    /// Drops pending clears. Used at teardown; leaves the controller idle.
    pub fn cancel_pending(&mut self) {
        let cancelled = self.timers.cancel_all();
        if cancelled > 0 {
            debug!("nav: cancelled {} pending cool-down clear(s)", cancelled);
        }
        self.is_transitioning = false;
    }

    // --- Observers ---

    /// Registers `observer`, called with the new index after every accepted move.
    pub fn subscribe(&mut self, observer: impl FnMut(usize) + 'static) -> ObserverId {
        self.observers.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }

    // --- Accessors ---

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_slide(&self) -> &SlideId {
        &self.slides[self.current_index]
    }

    pub fn total_slides(&self) -> usize {
        self.slides.len()
    }

    pub fn is_first(&self) -> bool {
        self.current_index == 0
    }

    pub fn is_last(&self) -> bool {
        self.current_index == self.slides.last_index()
    }

    pub fn is_transitioning(&self) -> bool {
        self.is_transitioning
    }

    pub fn phase(&self) -> NavigationPhase {
        if self.is_transitioning {
            NavigationPhase::CoolingDown
        } else {
            NavigationPhase::Idle
        }
    }

    /// Number of accepted moves so far.
    pub fn move_count(&self) -> u64 {
        self.move_seq
    }

    pub fn last_change(&self) -> Option<Duration> {
        self.last_change
    }

    pub fn last_rejection(&self) -> Option<Rejection> {
        self.last_rejection
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn slides(&self) -> &SlideSequence {
        &self.slides
    }

    pub fn config(&self) -> &NavigationConfig {
        &self.config
    }

    fn index_in_range(&self, target: i64) -> Option<usize> {
        usize::try_from(target)
            .ok()
            .filter(|&index| index < self.slides.len())
    }

    fn reject(&mut self, rejection: Rejection) {
        trace!("nav: request ignored: {:?}", rejection);
        self.last_rejection = Some(rejection);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn controller(n: usize) -> (NavigationController, ManualClock) {
        let clock = ManualClock::new();
        let ids: Vec<String> = (0..n).map(|i| format!("slide-{i}")).collect();
        let slides = SlideSequence::new(ids).unwrap();
        let nav = NavigationController::new(slides, NavigationConfig::default(), clock.clone())
            .unwrap();
        (nav, clock)
    }

    #[test]
    fn starts_idle_on_the_first_slide() {
        let (nav, _) = controller(3);
        assert_eq!(nav.current_index(), 0);
        assert_eq!(nav.total_slides(), 3);
        assert!(nav.is_first());
        assert!(!nav.is_last());
        assert_eq!(nav.phase(), NavigationPhase::Idle);
        assert_eq!(nav.current_slide().as_str(), "slide-0");
    }

    #[test]
    fn accepted_move_notifies_observers_immediately() {
        let (mut nav, _) = controller(5);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        nav.subscribe(move |index| sink.borrow_mut().push(index));

        nav.go_to_index(3);
        assert_eq!(nav.current_index(), 3);
        assert_eq!(*seen.borrow(), vec![3]);
        assert_eq!(nav.move_count(), 1);
        assert_eq!(nav.phase(), NavigationPhase::CoolingDown);
    }

    #[test]
    fn out_of_range_targets_are_ignored() {
        let (mut nav, _) = controller(4);
        nav.go_to_index(-1);
        assert_eq!(nav.current_index(), 0);
        assert_eq!(nav.last_rejection(), Some(Rejection::OutOfRange { target: -1 }));

        nav.go_to_index(4);
        assert_eq!(nav.current_index(), 0);
        assert_eq!(nav.phase(), NavigationPhase::Idle);
        assert_eq!(nav.pending_timers(), 0);
    }

    #[test]
    fn requests_inside_the_cool_down_are_absorbed() {
        let (mut nav, clock) = controller(5);
        nav.go_to_next();
        clock.advance_ms(100);
        nav.go_to_next();
        assert_eq!(nav.current_index(), 1);
        assert_eq!(nav.last_rejection(), Some(Rejection::Busy));

        clock.advance_ms(1000);
        nav.go_to_next();
        assert_eq!(nav.current_index(), 2);
    }

    #[test]
    fn cool_down_ends_exactly_at_the_configured_duration() {
        let (mut nav, clock) = controller(5);
        nav.go_to_next();
        clock.advance_ms(999);
        assert!(!nav.tick());
        assert!(nav.is_transitioning());

        clock.advance_ms(1);
        assert!(nav.tick());
        assert_eq!(nav.phase(), NavigationPhase::Idle);
        nav.go_to_next();
        assert_eq!(nav.current_index(), 2);
    }

    #[test]
    fn timestamp_guard_backs_up_a_prematurely_cleared_flag() {
        let (mut nav, clock) = controller(5);
        nav.go_to_next();
        // Simulates a teardown-style clear while the window is still open.
        nav.cancel_pending();
        assert!(!nav.is_transitioning());

        clock.advance_ms(200);
        nav.go_to_next();
        assert_eq!(nav.current_index(), 1);
        assert_eq!(nav.last_rejection(), Some(Rejection::TooSoon));
    }

    #[test]
    fn stale_clear_does_not_end_a_newer_cool_down() {
        let (mut nav, clock) = controller(5);
        nav.go_to_next(); // move #1, clear due at 1000
        nav.cancel_pending();
        // Re-arm a clear for move #1 by hand, as a leftover timer would be.
        nav.timers.schedule(1, Duration::from_millis(1500));

        clock.advance_ms(1000);
        nav.go_to_next(); // move #2 at 1000, clear due at 2000
        assert_eq!(nav.current_index(), 2);

        clock.advance_ms(500); // leftover for move #1 fires at 1500
        assert!(!nav.tick());
        assert!(nav.is_transitioning());

        clock.advance_ms(500);
        assert!(nav.tick());
    }

    #[test]
    fn unsubscribed_observer_is_not_called() {
        let (mut nav, _) = controller(3);
        let calls = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&calls);
        let id = nav.subscribe(move |_| *counter.borrow_mut() += 1);
        assert!(nav.unsubscribe(id));
        assert!(!nav.unsubscribe(id));

        nav.go_to_next();
        assert_eq!(*calls.borrow(), 0);
    }

    #[test]
    fn single_slide_never_moves() {
        let (mut nav, _) = controller(1);
        assert!(nav.is_first());
        assert!(nav.is_last());
        nav.go_to_next();
        nav.go_to_previous();
        assert_eq!(nav.current_index(), 0);
    }

    #[test]
    fn rejects_invalid_config() {
        let slides = SlideSequence::new(["only"]).unwrap();
        let config = NavigationConfig {
            cool_down: Duration::ZERO,
            ..NavigationConfig::default()
        };
        assert!(NavigationController::new(slides, config, ManualClock::new()).is_err());
    }
}
