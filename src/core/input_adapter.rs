use glam::Vec2;
use std::rc::Rc;
use winit::event::{DeviceEvent, ElementState, MouseButton, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{CursorGrabMode, Window};

use super::input::{InputEvent, InputEventData, Key, PointerButton};
use super::surface::{EventSurface, InputHost};
use crate::traits::surface::InputSurface;

/// Bridges winit events onto an element surface (pointer events) and a
/// window surface (keyboard events)
#[derive(Debug, Clone)]
pub struct WinitInput {
    element: Rc<EventSurface>,
    window: Rc<EventSurface>,
    document: Rc<EventSurface>,
    /// Pointer-lock state last applied to the winit window
    cursor_grabbed: bool,
}

impl WinitInput {
    pub fn new() -> Self {
        Self {
            element: Rc::new(EventSurface::new("canvas")),
            window: Rc::new(EventSurface::new("window")),
            document: Rc::new(EventSurface::new("document")),
            cursor_grabbed: false,
        }
    }

    /// Host surfaces to construct a controller against
    pub fn host(&self) -> InputHost {
        InputHost::new(self.document.clone(), self.window.clone())
    }

    pub fn element(&self) -> &Rc<EventSurface> {
        &self.element
    }

    pub fn window_surface(&self) -> &Rc<EventSurface> {
        &self.window
    }

    /// Translate a window event. Returns the dispatched events with the
    /// suppression flags their listeners set.
    pub fn process_window_event(&mut self, event: &WindowEvent) -> Vec<InputEvent> {
        let mut dispatched = Vec::new();

        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(keycode) = event.physical_key {
                    let key = Self::keycode_to_key(keycode);
                    let data = match event.state {
                        ElementState::Pressed => InputEventData::KeyDown { key },
                        ElementState::Released => InputEventData::KeyUp { key },
                    };
                    dispatched.push(self.window.dispatch(data));
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(button) = Self::mouse_button_to_pointer(*button) {
                    let data = match state {
                        ElementState::Pressed => InputEventData::PointerDown { button },
                        ElementState::Released => InputEventData::PointerUp { button },
                    };
                    dispatched.push(self.element.dispatch(data));

                    if button == PointerButton::Secondary && state.is_pressed() {
                        dispatched.push(self.element.dispatch(InputEventData::ContextMenu));
                    }
                }
            }
            WindowEvent::Focused(false) => self.element.blur(),
            _ => {}
        }

        dispatched
    }

    /// Raw mouse motion arrives as a device event, unaffected by cursor
    /// position or window bounds
    pub fn process_device_event(&mut self, event: &DeviceEvent) -> Option<InputEvent> {
        match event {
            DeviceEvent::MouseMotion { delta } => {
                let data = InputEventData::PointerMove {
                    movement: Vec2::new(delta.0 as f32, delta.1 as f32),
                };
                Some(self.element.dispatch(data))
            }
            _ => None,
        }
    }

    /// Mirror the element's pointer-lock state onto the winit window
    pub fn apply_pointer_lock(&mut self, window: &Window) {
        let Some(wanted) = self.pending_pointer_lock() else {
            return;
        };

        if wanted {
            let grabbed = window
                .set_cursor_grab(CursorGrabMode::Locked)
                .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));

            if let Err(e) = grabbed {
                log::warn!("Pointer lock unavailable: {}", e);
                self.abandon_pointer_lock();
                return;
            }
            window.set_cursor_visible(false);
        } else {
            if let Err(e) = window.set_cursor_grab(CursorGrabMode::None) {
                log::warn!("Failed to release cursor: {}", e);
            }
            window.set_cursor_visible(true);
        }

        self.cursor_grabbed = wanted;
    }

    /// Lock state the element asks for, if it differs from what was last
    /// applied to the window
    pub fn pending_pointer_lock(&self) -> Option<bool> {
        let wanted = self.element.is_pointer_locked();
        (wanted != self.cursor_grabbed).then_some(wanted)
    }

    /// The platform refused the grab, so withdraw the element's request
    fn abandon_pointer_lock(&mut self) {
        self.element.exit_pointer_lock();
    }

    pub fn cursor_grabbed(&self) -> bool {
        self.cursor_grabbed
    }

    /// Map winit KeyCode to Key
    fn keycode_to_key(keycode: KeyCode) -> Key {
        match keycode {
            KeyCode::ArrowUp => Key::ArrowUp,
            KeyCode::ArrowDown => Key::ArrowDown,
            KeyCode::ArrowLeft => Key::ArrowLeft,
            KeyCode::ArrowRight => Key::ArrowRight,
            KeyCode::KeyW => Key::KeyW,
            KeyCode::KeyA => Key::KeyA,
            KeyCode::KeyS => Key::KeyS,
            KeyCode::KeyD => Key::KeyD,
            KeyCode::KeyR => Key::KeyR,
            KeyCode::KeyF => Key::KeyF,
            KeyCode::ShiftLeft | KeyCode::ShiftRight => Key::Shift,
            _ => Key::Other,
        }
    }

    /// Map winit MouseButton to PointerButton
    fn mouse_button_to_pointer(button: MouseButton) -> Option<PointerButton> {
        match button {
            MouseButton::Left => Some(PointerButton::Primary),
            MouseButton::Right => Some(PointerButton::Secondary),
            MouseButton::Middle => Some(PointerButton::Auxiliary),
            _ => None,
        }
    }
}

impl Default for WinitInput {
    fn default() -> Self {
        Self::new()
    }
}
