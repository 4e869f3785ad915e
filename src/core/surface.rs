use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::core::input::{EventKind, InputEvent, InputEventData};
use crate::traits::surface::{same_listener, InputSurface, Listener};

/// In-memory input surface.
///
/// Keeps a listener table per event kind and records focus and pointer-lock
/// requests so a host (a winit window, a test) can act on them.
#[derive(Default)]
pub struct EventSurface {
    name: String,
    listeners: RefCell<Vec<(EventKind, Listener)>>,
    focusable: Cell<bool>,
    focused: Cell<bool>,
    pointer_locked: Cell<bool>,
}

impl EventSurface {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Deliver an event to every listener registered for its kind, in
    /// registration order. Returns the event with its suppression flags.
    pub fn dispatch(&self, data: InputEventData) -> InputEvent {
        let mut event = InputEvent::new(data);
        let kind = event.kind();

        // Snapshot so listeners may add or remove listeners while running
        let targets: Vec<Listener> = self
            .listeners
            .borrow()
            .iter()
            .filter(|(k, _)| *k == kind)
            .map(|(_, l)| Rc::clone(l))
            .collect();

        for listener in targets {
            listener(&mut event);
        }

        event
    }

    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners
            .borrow()
            .iter()
            .filter(|(k, _)| *k == kind)
            .count()
    }

    pub fn total_listeners(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn is_focusable(&self) -> bool {
        self.focusable.get()
    }

    pub fn is_focused(&self) -> bool {
        self.focused.get()
    }

    /// Drop focus, e.g. when the host window loses it
    pub fn blur(&self) {
        self.focused.set(false);
    }

    pub fn is_pointer_locked(&self) -> bool {
        self.pointer_locked.get()
    }
}

impl InputSurface for EventSurface {
    fn add_listener(&self, kind: EventKind, listener: Listener) {
        let mut listeners = self.listeners.borrow_mut();
        let registered = listeners
            .iter()
            .any(|(k, l)| *k == kind && same_listener(l, &listener));

        // Same handle twice is a no-op
        if !registered {
            listeners.push((kind, listener));
        }
    }

    fn remove_listener(&self, kind: EventKind, listener: &Listener) {
        self.listeners
            .borrow_mut()
            .retain(|(k, l)| !(*k == kind && same_listener(l, listener)));
    }

    fn set_focusable(&self) {
        self.focusable.set(true);
    }

    fn focus(&self) {
        self.focused.set(true);
    }

    fn request_pointer_lock(&self) {
        self.pointer_locked.set(true);
    }

    fn exit_pointer_lock(&self) {
        self.pointer_locked.set(false);
    }
}

impl std::fmt::Debug for EventSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventSurface")
            .field("name", &self.name)
            .field("listeners", &self.total_listeners())
            .field("focusable", &self.focusable.get())
            .field("focused", &self.focused.get())
            .field("pointer_locked", &self.pointer_locked.get())
            .finish()
    }
}

/// The process-wide surfaces a controller falls back to: the document (used
/// when no element is given) and the window (keyboard events).
#[derive(Clone)]
pub struct InputHost {
    pub document: Rc<dyn InputSurface>,
    pub window: Rc<dyn InputSurface>,
}

impl InputHost {
    pub fn new(document: Rc<dyn InputSurface>, window: Rc<dyn InputSurface>) -> Self {
        Self { document, window }
    }

    /// Host backed by two fresh [`EventSurface`]s, returned alongside so the
    /// caller can dispatch into them
    pub fn headless() -> (Self, Rc<EventSurface>, Rc<EventSurface>) {
        let document = Rc::new(EventSurface::new("document"));
        let window = Rc::new(EventSurface::new("window"));
        let host = Self::new(document.clone(), window.clone());
        (host, document, window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::Key;

    fn counter_listener(hits: Rc<Cell<u32>>) -> Listener {
        Rc::new(move |_event: &mut InputEvent| hits.set(hits.get() + 1))
    }

    #[test]
    fn test_dispatch_reaches_matching_kind_only() {
        let surface = EventSurface::new("test");
        let hits = Rc::new(Cell::new(0));
        surface.add_listener(EventKind::KeyDown, counter_listener(hits.clone()));

        surface.dispatch(InputEventData::KeyDown { key: Key::KeyW });
        surface.dispatch(InputEventData::KeyUp { key: Key::KeyW });

        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_duplicate_registration_ignored() {
        let surface = EventSurface::new("test");
        let hits = Rc::new(Cell::new(0));
        let listener = counter_listener(hits.clone());

        surface.add_listener(EventKind::ContextMenu, listener.clone());
        surface.add_listener(EventKind::ContextMenu, listener);
        surface.dispatch(InputEventData::ContextMenu);

        assert_eq!(surface.listener_count(EventKind::ContextMenu), 1);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_remove_by_identity() {
        let surface = EventSurface::new("test");
        let hits = Rc::new(Cell::new(0));
        let kept = counter_listener(hits.clone());
        let removed = counter_listener(hits.clone());

        surface.add_listener(EventKind::ContextMenu, kept);
        surface.add_listener(EventKind::ContextMenu, removed.clone());
        surface.remove_listener(EventKind::ContextMenu, &removed);
        surface.dispatch(InputEventData::ContextMenu);

        assert_eq!(surface.listener_count(EventKind::ContextMenu), 1);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_remove_wrong_kind_keeps_listener() {
        let surface = EventSurface::new("test");
        let listener = counter_listener(Rc::new(Cell::new(0)));

        surface.add_listener(EventKind::KeyUp, listener.clone());
        surface.remove_listener(EventKind::KeyDown, &listener);

        assert_eq!(surface.total_listeners(), 1);
    }

    #[test]
    fn test_dispatch_returns_suppression_flags() {
        let surface = EventSurface::new("test");
        surface.add_listener(
            EventKind::ContextMenu,
            Rc::new(|event: &mut InputEvent| event.prevent_default()),
        );

        let event = surface.dispatch(InputEventData::ContextMenu);
        assert!(event.default_prevented());
        assert!(!event.propagation_stopped());
    }

    #[test]
    fn test_focus_and_pointer_lock_state() {
        let surface = EventSurface::new("canvas");
        assert!(!surface.is_focusable());
        assert!(!surface.is_focused());
        assert!(!surface.is_pointer_locked());

        surface.set_focusable();
        surface.focus();
        surface.request_pointer_lock();
        assert!(surface.is_focusable());
        assert!(surface.is_focused());
        assert!(surface.is_pointer_locked());

        surface.exit_pointer_lock();
        surface.blur();
        assert!(!surface.is_pointer_locked());
        assert!(!surface.is_focused());
    }

    #[test]
    fn test_headless_host_shares_surfaces() {
        let (host, document, window) = InputHost::headless();
        host.window
            .add_listener(EventKind::KeyDown, counter_listener(Rc::new(Cell::new(0))));

        assert_eq!(window.listener_count(EventKind::KeyDown), 1);
        assert_eq!(document.total_listeners(), 0);
    }
}
