//! Scripted input replay.
//!
//! A script is one event per line, timestamps in milliseconds since mount:
//!
//! ```text
//! # three quick presses, then one after the cool-down
//! 0     key ArrowDown
//! 50    key ArrowDown
//! 1200  key ArrowDown
//! 1300  key ArrowDown text-input
//! 2500  wheel 50
//! 3600  goto 0
//! 4700  tick
//! ```
//!
//! The script runs against a mounted session on a manual clock, so the
//! result is the same on every run.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use tracing::debug;

use crate::clock::{Clock, ManualClock};
use crate::config::NavigationConfig;
use crate::error::ReplayError;
use crate::events::EventBus;
use crate::input::{Disposition, EventTarget, KeyEvent, WheelEvent};
use crate::session::PresentationSession;
use crate::slide::SlideSequence;
use crate::state::Rejection;

#[derive(Debug, Clone, PartialEq)]
pub enum ScriptAction {
    Key(KeyEvent),
    Wheel(WheelEvent),
    GoTo(i64),
    Tick,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScriptEvent {
    pub line: usize,
    pub at_ms: u64,
    pub action: ScriptAction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub at_ms: u64,
    pub index: usize,
    pub slide: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayReport {
    pub transitions: Vec<Transition>,
    pub final_index: usize,
    pub handled: usize,
    pub ignored: usize,
}

pub fn parse_script(text: &str) -> Result<Vec<ScriptEvent>, ReplayError> {
    let mut events = Vec::new();
    let mut previous_ms = 0;

    for (number, raw) in text.lines().enumerate() {
        let line = number + 1;
        let content = raw.split('#').next().unwrap_or("").trim();
        if content.is_empty() {
            continue;
        }

        let tokens: Vec<&str> = content.split_whitespace().collect();
        let at_ms = parse_timestamp(tokens[0])
            .ok_or_else(|| ReplayError::parse(line, format!("bad timestamp `{}`", tokens[0])))?;
        if at_ms < previous_ms {
            return Err(ReplayError::OutOfOrder {
                line,
                at_ms,
                previous_ms,
            });
        }
        previous_ms = at_ms;

        let action = match (tokens.get(1).copied(), &tokens[2.min(tokens.len())..]) {
            (Some("key"), [name]) => ScriptAction::Key(KeyEvent::new(*name)),
            (Some("key"), [name, target]) => {
                let target = parse_target(target).ok_or_else(|| {
                    ReplayError::parse(line, format!("unknown key target `{target}`"))
                })?;
                ScriptAction::Key(KeyEvent::new(*name).on(target))
            }
            (Some("wheel"), [delta]) => {
                let delta_y = delta
                    .parse::<f32>()
                    .map_err(|_| ReplayError::parse(line, format!("bad wheel delta `{delta}`")))?;
                ScriptAction::Wheel(WheelEvent { delta_y })
            }
            (Some("goto"), [index]) => {
                let index = index
                    .parse::<i64>()
                    .map_err(|_| ReplayError::parse(line, format!("bad index `{index}`")))?;
                ScriptAction::GoTo(index)
            }
            (Some("tick"), []) => ScriptAction::Tick,
            (Some(kind @ ("key" | "wheel" | "goto" | "tick")), _) => {
                return Err(ReplayError::parse(
                    line,
                    format!("wrong number of arguments for `{kind}`"),
                ));
            }
            (Some(kind), _) => {
                return Err(ReplayError::parse(line, format!("unknown event `{kind}`")));
            }
            (None, _) => return Err(ReplayError::parse(line, "missing event kind")),
        };

        events.push(ScriptEvent {
            line,
            at_ms,
            action,
        });
    }

    Ok(events)
}

/// Runs `script` from a freshly mounted session and reports every accepted move.
pub fn run(
    script: &[ScriptEvent],
    slides: SlideSequence,
    config: NavigationConfig,
) -> Result<ReplayReport, ReplayError> {
    let clock = ManualClock::new();
    let bus = EventBus::new();
    let session = PresentationSession::mount_new(&bus, slides.clone(), config, clock.clone())?;

    let transitions = Rc::new(RefCell::new(Vec::new()));
    {
        let transitions = Rc::clone(&transitions);
        let clock = clock.clone();
        session.subscribe(move |index| {
            transitions.borrow_mut().push(Transition {
                at_ms: clock.now().as_millis() as u64,
                index,
                slide: slides[index].to_string(),
            });
        });
    }

    let mut handled = 0;
    let mut ignored = 0;
    for event in script {
        clock.set(Duration::from_millis(event.at_ms));
        session.tick();

        let disposition = match &event.action {
            ScriptAction::Key(key) => bus.dispatch_key(key),
            ScriptAction::Wheel(wheel) => bus.dispatch_wheel(wheel),
            ScriptAction::GoTo(index) => {
                session.go_to_index(*index);
                // A jump absorbed by the cool-down still counts as handled,
                // like a key press; one outside the deck does not.
                match session.controller().last_rejection() {
                    Some(Rejection::OutOfRange { .. }) => Disposition::Ignored,
                    _ => Disposition::Handled,
                }
            }
            ScriptAction::Tick => continue,
        };
        match disposition {
            Disposition::Handled => handled += 1,
            Disposition::Ignored => ignored += 1,
        }
        debug!(
            "replay: line {} at {} ms -> {:?}, index {}",
            event.line,
            event.at_ms,
            disposition,
            session.current_index()
        );
    }

    let final_index = session.current_index();
    session.unmount();

    let transitions = transitions.borrow().clone();
    Ok(ReplayReport {
        transitions,
        final_index,
        handled,
        ignored,
    })
}

fn parse_timestamp(token: &str) -> Option<u64> {
    token.strip_suffix("ms").unwrap_or(token).parse().ok()
}

fn parse_target(token: &str) -> Option<EventTarget> {
    match token {
        "document" => Some(EventTarget::Document),
        "text-input" | "input" => Some(EventTarget::TextInput),
        "text-area" | "textarea" => Some(EventTarget::TextArea),
        _ => None,
    }
}
