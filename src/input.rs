//! Raw input events and the adapters that turn them into moves.

use tracing::trace;

use crate::controller::NavigationController;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    ArrowDown,
    ArrowRight,
    Space,
    PageDown,
    ArrowUp,
    ArrowLeft,
    PageUp,
    Home,
    End,
    Other(String),
}

impl Key {
    /// Parses a DOM `KeyboardEvent.key` style name. Space is accepted both
    /// as `" "` and as `"Space"`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "ArrowDown" => Key::ArrowDown,
            "ArrowRight" => Key::ArrowRight,
            " " | "Space" | "Spacebar" => Key::Space,
            "PageDown" => Key::PageDown,
            "ArrowUp" => Key::ArrowUp,
            "ArrowLeft" => Key::ArrowLeft,
            "PageUp" => Key::PageUp,
            "Home" => Key::Home,
            "End" => Key::End,
            other => Key::Other(other.to_string()),
        }
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Key::from_name(name)
    }
}

/// Element that had focus when a key event was raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventTarget {
    #[default]
    Document,
    TextInput,
    TextArea,
}

impl EventTarget {
    pub fn is_editable(self) -> bool {
        matches!(self, EventTarget::TextInput | EventTarget::TextArea)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub target: EventTarget,
}

impl KeyEvent {
    pub fn new(key: impl Into<Key>) -> Self {
        Self {
            key: key.into(),
            target: EventTarget::Document,
        }
    }

    pub fn on(mut self, target: EventTarget) -> Self {
        self.target = target;
        self
    }
}

/// Positive `delta_y` scrolls down / forward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelEvent {
    pub delta_y: f32,
}

/// What the event source should do with the platform's default action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Recognized as navigation input; default action suppressed.
    Handled,
    /// Not navigation input; left alone.
    Ignored,
}

impl Disposition {
    pub fn prevents_default(self) -> bool {
        self == Disposition::Handled
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavCommand {
    Next,
    Previous,
    First,
    Last,
}

impl NavCommand {
    pub fn apply(self, nav: &mut NavigationController) {
        match self {
            NavCommand::Next => nav.go_to_next(),
            NavCommand::Previous => nav.go_to_previous(),
            NavCommand::First => nav.go_to_first(),
            NavCommand::Last => nav.go_to_last(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct KeyboardAdapter;

impl KeyboardAdapter {
    pub fn command_for(event: &KeyEvent) -> Option<NavCommand> {
        if event.target.is_editable() {
            return None;
        }
        match event.key {
            Key::ArrowDown | Key::ArrowRight | Key::Space | Key::PageDown => Some(NavCommand::Next),
            Key::ArrowUp | Key::ArrowLeft | Key::PageUp => Some(NavCommand::Previous),
            Key::Home => Some(NavCommand::First),
            Key::End => Some(NavCommand::Last),
            Key::Other(_) => None,
        }
    }

    /// Handled keys are suppressed even when the move itself is absorbed by
    /// the cool-down.
    pub fn handle(&self, nav: &mut NavigationController, event: &KeyEvent) -> Disposition {
        match Self::command_for(event) {
            Some(command) => {
                command.apply(nav);
                Disposition::Handled
            }
            None => {
                trace!("input: key {:?} on {:?} ignored", event.key, event.target);
                Disposition::Ignored
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct WheelAdapter {
    threshold: f32,
}

impl WheelAdapter {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    pub fn command_for(&self, event: &WheelEvent) -> Option<NavCommand> {
        if event.delta_y.is_nan() || event.delta_y.abs() <= self.threshold {
            return None;
        }
        if event.delta_y > 0.0 {
            Some(NavCommand::Next)
        } else {
            Some(NavCommand::Previous)
        }
    }

    pub fn handle(&self, nav: &mut NavigationController, event: &WheelEvent) -> Disposition {
        match self.command_for(event) {
            Some(command) => {
                command.apply(nav);
                Disposition::Handled
            }
            None => {
                trace!("input: wheel delta {} below threshold", event.delta_y);
                Disposition::Ignored
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dom_key_names() {
        assert_eq!(Key::from_name(" "), Key::Space);
        assert_eq!(Key::from_name("Space"), Key::Space);
        assert_eq!(Key::from_name("PageUp"), Key::PageUp);
        assert_eq!(Key::from_name("a"), Key::Other("a".into()));
    }

    #[test]
    fn maps_keys_to_commands() {
        let cases = [
            ("ArrowDown", Some(NavCommand::Next)),
            ("ArrowRight", Some(NavCommand::Next)),
            (" ", Some(NavCommand::Next)),
            ("PageDown", Some(NavCommand::Next)),
            ("ArrowUp", Some(NavCommand::Previous)),
            ("ArrowLeft", Some(NavCommand::Previous)),
            ("PageUp", Some(NavCommand::Previous)),
            ("Home", Some(NavCommand::First)),
            ("End", Some(NavCommand::Last)),
            ("Enter", None),
        ];
        for (name, expected) in cases {
            assert_eq!(KeyboardAdapter::command_for(&KeyEvent::new(name)), expected, "{name}");
        }
    }

    #[test]
    fn keys_typed_into_editable_targets_are_ignored() {
        let event = KeyEvent::new("ArrowDown").on(EventTarget::TextInput);
        assert_eq!(KeyboardAdapter::command_for(&event), None);
        let event = KeyEvent::new(" ").on(EventTarget::TextArea);
        assert_eq!(KeyboardAdapter::command_for(&event), None);
    }

    #[test]
    fn wheel_threshold_is_exclusive() {
        let wheel = WheelAdapter::new(10.0);
        assert_eq!(wheel.command_for(&WheelEvent { delta_y: 10.0 }), None);
        assert_eq!(wheel.command_for(&WheelEvent { delta_y: -10.0 }), None);
        assert_eq!(wheel.command_for(&WheelEvent { delta_y: f32::NAN }), None);
        assert_eq!(
            wheel.command_for(&WheelEvent { delta_y: 10.5 }),
            Some(NavCommand::Next)
        );
        assert_eq!(
            wheel.command_for(&WheelEvent { delta_y: -50.0 }),
            Some(NavCommand::Previous)
        );
    }
}
