use glam::Vec2;

/// Keyboard keys the controller reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    KeyW,
    KeyA,
    KeyS,
    KeyD,
    KeyR,
    KeyF,
    Shift,
    /// Any key without a movement binding
    Other,
}

impl Key {
    /// Map a legacy DOM `keyCode`
    pub fn from_key_code(code: u32) -> Self {
        match code {
            38 => Key::ArrowUp,
            37 => Key::ArrowLeft,
            40 => Key::ArrowDown,
            39 => Key::ArrowRight,
            87 => Key::KeyW,
            65 => Key::KeyA,
            83 => Key::KeyS,
            68 => Key::KeyD,
            82 => Key::KeyR,
            70 => Key::KeyF,
            16 => Key::Shift,
            _ => Key::Other,
        }
    }
}

/// Mouse buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Primary,
    Secondary,
    Auxiliary,
}

/// Event categories a listener can subscribe to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    ContextMenu,
    PointerMove,
    PointerDown,
    PointerUp,
    KeyDown,
    KeyUp,
}

/// Event payload
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEventData {
    ContextMenu,
    /// Raw movement since the previous pointer event
    PointerMove { movement: Vec2 },
    PointerDown { button: PointerButton },
    PointerUp { button: PointerButton },
    KeyDown { key: Key },
    KeyUp { key: Key },
}

impl InputEventData {
    pub fn kind(&self) -> EventKind {
        match self {
            InputEventData::ContextMenu => EventKind::ContextMenu,
            InputEventData::PointerMove { .. } => EventKind::PointerMove,
            InputEventData::PointerDown { .. } => EventKind::PointerDown,
            InputEventData::PointerUp { .. } => EventKind::PointerUp,
            InputEventData::KeyDown { .. } => EventKind::KeyDown,
            InputEventData::KeyUp { .. } => EventKind::KeyUp,
        }
    }
}

/// An event in flight, carrying the suppression flags listeners may set
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputEvent {
    pub data: InputEventData,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl InputEvent {
    pub fn new(data: InputEventData) -> Self {
        Self {
            data,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    pub fn kind(&self) -> EventKind {
        self.data.kind()
    }

    /// Suppress the host's default action for this event
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Keep the event from bubbling past the current surface
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_legacy_key_codes() {
        assert_eq!(Key::from_key_code(38), Key::ArrowUp);
        assert_eq!(Key::from_key_code(87), Key::KeyW);
        assert_eq!(Key::from_key_code(37), Key::ArrowLeft);
        assert_eq!(Key::from_key_code(65), Key::KeyA);
        assert_eq!(Key::from_key_code(40), Key::ArrowDown);
        assert_eq!(Key::from_key_code(83), Key::KeyS);
        assert_eq!(Key::from_key_code(39), Key::ArrowRight);
        assert_eq!(Key::from_key_code(68), Key::KeyD);
        assert_eq!(Key::from_key_code(82), Key::KeyR);
        assert_eq!(Key::from_key_code(70), Key::KeyF);
        assert_eq!(Key::from_key_code(16), Key::Shift);
    }

    #[test]
    fn test_unbound_key_code() {
        assert_eq!(Key::from_key_code(32), Key::Other);
        assert_eq!(Key::from_key_code(0), Key::Other);
    }

    #[test]
    fn test_event_kind_matches_payload() {
        let cases = [
            (InputEventData::ContextMenu, EventKind::ContextMenu),
            (
                InputEventData::PointerMove {
                    movement: Vec2::new(1.0, 2.0),
                },
                EventKind::PointerMove,
            ),
            (
                InputEventData::PointerDown {
                    button: PointerButton::Primary,
                },
                EventKind::PointerDown,
            ),
            (
                InputEventData::PointerUp {
                    button: PointerButton::Primary,
                },
                EventKind::PointerUp,
            ),
            (InputEventData::KeyDown { key: Key::KeyW }, EventKind::KeyDown),
            (InputEventData::KeyUp { key: Key::KeyW }, EventKind::KeyUp),
        ];

        for (data, kind) in cases {
            assert_eq!(InputEvent::new(data).kind(), kind);
        }
    }

    #[test]
    fn test_suppression_flags() {
        let mut event = InputEvent::new(InputEventData::ContextMenu);
        assert!(!event.default_prevented());
        assert!(!event.propagation_stopped());

        event.prevent_default();
        assert!(event.default_prevented());
        assert!(!event.propagation_stopped());

        event.stop_propagation();
        assert!(event.propagation_stopped());
    }

    #[test]
    fn test_event_kind_hash() {
        let mut set = HashSet::new();
        set.insert(EventKind::KeyDown);
        set.insert(EventKind::KeyDown);
        set.insert(EventKind::KeyUp);
        assert_eq!(set.len(), 2);
    }
}
