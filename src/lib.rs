//! Keyboard and wheel navigation for slide-deck style presentations.
//!
//! A [`NavigationController`] owns the active slide index. Input reaches it
//! through [`PresentationSession`], which subscribes the keyboard and wheel
//! adapters to an [`EventSource`] for as long as the view is mounted.

pub mod clock;
pub mod config;
pub mod constants;
pub mod controller;
pub mod error;
pub mod events;
pub mod input;
pub mod observer;
pub mod progress;
pub mod replay;
pub mod session;
pub mod slide;
pub mod state;
pub mod timer;

#[cfg(feature = "viewer")]
pub mod viewer;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::NavigationConfig;
pub use controller::NavigationController;
pub use error::{ReplayError, ShowcaseError};
pub use events::{EventBus, EventSource, Subscription};
pub use input::{Disposition, EventTarget, Key, KeyEvent, KeyboardAdapter, WheelAdapter, WheelEvent};
pub use observer::ObserverId;
pub use progress::ProgressIndicator;
pub use session::PresentationSession;
pub use slide::{SlideId, SlideSequence};
pub use state::{NavigationPhase, Rejection};

#[cfg(test)]
mod tests;
