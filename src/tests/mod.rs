mod replay_tests;

use crate::clock::ManualClock;
use crate::config::NavigationConfig;
use crate::constants::DEFAULT_SECTION_IDS;
use crate::events::EventBus;
use crate::session::PresentationSession;
use crate::slide::SlideSequence;

/// Seven default sections mounted on a fresh bus with a manual clock.
fn mounted() -> (PresentationSession, EventBus, ManualClock) {
    let clock = ManualClock::new();
    let bus = EventBus::new();
    let slides = SlideSequence::new(DEFAULT_SECTION_IDS).expect("default sections");
    let session = PresentationSession::mount_new(&bus, slides, NavigationConfig::default(), clock.clone())
        .expect("mount");
    (session, bus, clock)
}
