use glam::{Mat4, Vec2, Vec3};
use std::cell::{Cell, RefCell};
use std::f32::consts::PI;
use std::rc::{Rc, Weak};

use crate::core::input::{EventKind, InputEvent, InputEventData, Key};
use crate::core::surface::InputHost;
use crate::math::{clamp_unordered, map_linear, Spherical};
use crate::settings::ControllerSettings;
use crate::traits::camera::{CameraController, SceneCamera};
use crate::traits::surface::{same_surface, InputSurface, Listener};

/// Latitude limit in degrees, keeps the view off the poles
pub const MAX_LATITUDE: f32 = 85.0;

/// Held-key flags
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MovementState {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub sprint: bool,
}

impl MovementState {
    fn flag_mut(&mut self, key: Key) -> Option<&mut bool> {
        match key {
            Key::ArrowUp | Key::KeyW => Some(&mut self.forward),
            Key::ArrowLeft | Key::KeyA => Some(&mut self.left),
            Key::ArrowDown | Key::KeyS => Some(&mut self.backward),
            Key::ArrowRight | Key::KeyD => Some(&mut self.right),
            Key::KeyR => Some(&mut self.up),
            Key::KeyF => Some(&mut self.down),
            Key::Shift => Some(&mut self.sprint),
            Key::Other => None,
        }
    }
}

/// State written by the event listeners and consumed by `update()`
#[derive(Debug)]
struct InputState {
    movement: MovementState,
    dragging: bool,
    /// Latest pointer movement, cleared every update
    mouse_delta: Vec2,
    /// Sprint multiplier, >= 1.0
    incremental_velocity: f32,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            movement: MovementState::default(),
            dragging: false,
            mouse_delta: Vec2::ZERO,
            incremental_velocity: 1.0,
        }
    }
}

/// A listener attached at construction, kept so the exact handle can be
/// detached again
struct Binding {
    surface: Rc<dyn InputSurface>,
    kind: EventKind,
    listener: Listener,
}

impl Binding {
    fn new(surface: &Rc<dyn InputSurface>, kind: EventKind, listener: Listener) -> Self {
        Self {
            surface: Rc::clone(surface),
            kind,
            listener,
        }
    }
}

/// First-person camera controls: drag with the mouse to look around, and
/// while dragging use WASD/arrows to move, R/F to rise and sink and Shift to
/// accelerate.
pub struct FirstPersonController<C: SceneCamera> {
    camera: C,
    element: Rc<dyn InputSurface>,
    settings: Rc<Cell<ControllerSettings>>,
    input: Rc<RefCell<InputState>>,
    bindings: Vec<Binding>,
    /// Degrees
    lat: f32,
    /// Degrees
    lon: f32,
    auto_speed_factor: f32,
}

impl<C: SceneCamera> FirstPersonController<C> {
    /// Attach to `element`, or to the host document when `element` is `None`.
    /// Keyboard events are always taken from the host window.
    pub fn new(camera: C, host: &InputHost, element: Option<Rc<dyn InputSurface>>) -> Self {
        let element = match element {
            Some(element) => element,
            None => {
                log::warn!("FirstPersonController: no input element given, falling back to the document");
                Rc::clone(&host.document)
            }
        };

        let is_document = same_surface(&element, &host.document);
        if !is_document {
            element.set_focusable();
        }

        let settings = Rc::new(Cell::new(ControllerSettings::default()));
        let input = Rc::new(RefCell::new(InputState::default()));

        let bindings = vec![
            Binding::new(&element, EventKind::ContextMenu, Rc::new(on_context_menu)),
            Binding::new(&element, EventKind::PointerMove, pointer_move_listener(&input)),
            Binding::new(
                &element,
                EventKind::PointerDown,
                pointer_down_listener(&element, is_document, &settings, &input),
            ),
            Binding::new(&element, EventKind::PointerUp, pointer_up_listener(&element, &input)),
            Binding::new(&host.window, EventKind::KeyDown, key_down_listener(&input)),
            Binding::new(&host.window, EventKind::KeyUp, key_up_listener(&input)),
        ];

        for binding in &bindings {
            binding
                .surface
                .add_listener(binding.kind, Rc::clone(&binding.listener));
        }
        log::debug!("FirstPersonController: attached {} listeners", bindings.len());

        let mut controller = Self {
            camera,
            element,
            settings,
            input,
            bindings,
            lat: 0.0,
            lon: 0.0,
            auto_speed_factor: 0.0,
        };
        controller.sync_orientation();
        controller
    }

    pub fn with_settings(self, settings: ControllerSettings) -> Self {
        self.settings.set(settings);
        self
    }

    pub fn settings(&self) -> ControllerSettings {
        self.settings.get()
    }

    pub fn set_settings(&self, settings: ControllerSettings) {
        self.settings.set(settings);
    }

    /// Edit settings in place
    pub fn configure(&self, f: impl FnOnce(&mut ControllerSettings)) {
        let mut settings = self.settings.get();
        f(&mut settings);
        self.settings.set(settings);
    }

    pub fn movement(&self) -> MovementState {
        self.input.borrow().movement
    }

    /// Overwrite the held-key flags directly, bypassing the keyboard
    pub fn set_movement(&self, movement: MovementState) {
        self.input.borrow_mut().movement = movement;
    }

    pub fn is_dragging(&self) -> bool {
        self.input.borrow().dragging
    }

    pub fn incremental_velocity(&self) -> f32 {
        self.input.borrow().incremental_velocity
    }

    /// Pointer movement waiting to be consumed by the next update
    pub fn mouse_delta(&self) -> Vec2 {
        self.input.borrow().mouse_delta
    }

    /// Accumulated pitch in degrees, within +-[`MAX_LATITUDE`] after an update
    pub fn latitude(&self) -> f32 {
        self.lat
    }

    /// Accumulated yaw in degrees
    pub fn longitude(&self) -> f32 {
        self.lon
    }

    /// Distance bonus from altitude applied on the last update
    pub fn auto_speed_factor(&self) -> f32 {
        self.auto_speed_factor
    }

    /// Direction the controller steers toward, as unit spherical coordinates
    pub fn view_angles(&self) -> Spherical {
        steering_angles(self.lat, self.lon, &self.settings.get())
    }

    pub fn camera(&self) -> &C {
        &self.camera
    }

    /// Orientation changes made through this handle are not picked up until
    /// the next [`look_at`](Self::look_at)
    pub fn camera_mut(&mut self) -> &mut C {
        &mut self.camera
    }

    pub fn element(&self) -> &Rc<dyn InputSurface> {
        &self.element
    }

    pub fn is_disposed(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Turn the camera toward `target` and restart mouse-look from there.
    /// Accepts a `Vec3`, `[x, y, z]` or `(x, y, z)`.
    pub fn look_at(&mut self, target: impl Into<Vec3>) -> &mut Self {
        let target = target.into();
        self.camera.look_at(target);
        self.sync_orientation();
        log::debug!(
            "FirstPersonController: look at {:?} (lat {:.2}, lon {:.2})",
            target,
            self.lat,
            self.lon
        );
        self
    }

    /// Advance one frame: apply held movement, consume pointer movement and
    /// re-aim the camera
    pub fn update(&mut self, delta: f32) {
        let settings = self.settings.get();
        if !settings.enabled {
            return;
        }

        self.auto_speed_factor = if settings.height_speed {
            let y = clamp_unordered(
                self.camera.position().y,
                settings.height_min,
                settings.height_max,
            );
            let height_delta = y - settings.height_min;
            delta * (height_delta * settings.height_coef)
        } else {
            0.0
        };

        let mut input = self.input.borrow_mut();

        if input.movement.sprint {
            input.incremental_velocity += settings.movement_acceleration;
        }

        let actual_move_speed = (delta * settings.movement_speed * input.incremental_velocity)
            .min(settings.max_movement_speed);
        let movement = input.movement;

        if movement.forward || (settings.auto_forward && !movement.backward) {
            self.camera
                .translate_z(-(actual_move_speed + self.auto_speed_factor));
        }
        if movement.backward {
            self.camera.translate_z(actual_move_speed);
        }

        if movement.left {
            self.camera.translate_x(-actual_move_speed);
        }
        if movement.right {
            self.camera.translate_x(actual_move_speed);
        }

        // Height moves in world space
        if movement.up {
            let mut position = self.camera.position();
            position.y += actual_move_speed;
            self.camera.set_position(position);
        }
        if movement.down {
            let mut position = self.camera.position();
            position.y -= actual_move_speed;
            self.camera.set_position(position);
        }

        let actual_look_speed = if !settings.active_look || !input.dragging {
            0.0
        } else {
            settings.look_speed
        };

        let vertical_look_ratio = if settings.constrain_vertical {
            PI / (settings.vertical_max - settings.vertical_min)
        } else {
            1.0
        };

        self.lon -= input.mouse_delta.x * actual_look_speed;
        if settings.look_vertical {
            self.lat -= input.mouse_delta.y * actual_look_speed * vertical_look_ratio;
        }
        self.lat = self.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE);

        let target = steering_angles(self.lat, self.lon, &settings).to_vec3() + self.camera.position();

        input.mouse_delta = Vec2::ZERO;
        drop(input);

        self.camera.look_at(target);
    }

    /// Detach every listener registered at construction. Further calls do
    /// nothing.
    pub fn dispose(&mut self) {
        if self.bindings.is_empty() {
            return;
        }

        for binding in self.bindings.drain(..) {
            binding
                .surface
                .remove_listener(binding.kind, &binding.listener);
        }
        log::debug!("FirstPersonController: listeners detached");
    }

    /// Derive lat/lon from where the camera currently faces
    fn sync_orientation(&mut self) {
        let direction = self.camera.orientation() * Vec3::NEG_Z;
        let spherical = Spherical::from_vec3(direction);

        self.lat = 90.0 - spherical.phi.to_degrees();
        self.lon = spherical.theta.to_degrees();
    }
}

impl<C: SceneCamera> Drop for FirstPersonController<C> {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl<C: SceneCamera> CameraController for FirstPersonController<C> {
    fn update(&mut self, delta_time: f32) {
        Self::update(self, delta_time);
    }

    fn view_matrix(&self) -> [[f32; 4]; 4] {
        Mat4::from_rotation_translation(self.camera.orientation(), self.camera.position())
            .inverse()
            .to_cols_array_2d()
    }

    fn position(&self) -> [f32; 3] {
        self.camera.position().to_array()
    }

    fn forward(&self) -> [f32; 3] {
        self.camera.forward().to_array()
    }
}

/// Polar/azimuth angles for a latitude/longitude pair, remapped into the
/// vertical range when it is constrained
fn steering_angles(lat: f32, lon: f32, settings: &ControllerSettings) -> Spherical {
    let mut phi = (90.0 - lat).to_radians();
    let theta = lon.to_radians();

    if settings.constrain_vertical {
        phi = map_linear(phi, 0.0, PI, settings.vertical_min, settings.vertical_max);
    }

    Spherical::new(1.0, phi, theta)
}

fn on_context_menu(event: &mut InputEvent) {
    event.prevent_default();
}

fn pointer_move_listener(input: &Rc<RefCell<InputState>>) -> Listener {
    let input = Rc::clone(input);
    Rc::new(move |event: &mut InputEvent| {
        if let InputEventData::PointerMove { movement } = event.data {
            input.borrow_mut().mouse_delta = movement;
        }
    })
}

fn pointer_down_listener(
    element: &Rc<dyn InputSurface>,
    is_document: bool,
    settings: &Rc<Cell<ControllerSettings>>,
    input: &Rc<RefCell<InputState>>,
) -> Listener {
    // Weak: the element owns this listener
    let element: Weak<dyn InputSurface> = Rc::downgrade(element);
    let settings = Rc::clone(settings);
    let input = Rc::clone(input);

    Rc::new(move |event: &mut InputEvent| {
        let element = element.upgrade();

        if let Some(element) = element.as_ref().filter(|_| !is_document) {
            element.focus();
        }

        event.prevent_default();
        event.stop_propagation();

        if settings.get().capture_mouse {
            if let Some(element) = element.as_ref() {
                element.request_pointer_lock();
            }
        }

        input.borrow_mut().dragging = true;
    })
}

fn pointer_up_listener(element: &Rc<dyn InputSurface>, input: &Rc<RefCell<InputState>>) -> Listener {
    let element: Weak<dyn InputSurface> = Rc::downgrade(element);
    let input = Rc::clone(input);

    Rc::new(move |event: &mut InputEvent| {
        event.prevent_default();
        event.stop_propagation();

        if let Some(element) = element.upgrade() {
            element.exit_pointer_lock();
        }

        input.borrow_mut().dragging = false;
    })
}

fn key_down_listener(input: &Rc<RefCell<InputState>>) -> Listener {
    let input = Rc::clone(input);
    Rc::new(move |event: &mut InputEvent| {
        let InputEventData::KeyDown { key } = event.data else {
            return;
        };

        let mut input = input.borrow_mut();
        if !input.dragging {
            return;
        }

        if let Some(flag) = input.movement.flag_mut(key) {
            *flag = true;
        }
    })
}

fn key_up_listener(input: &Rc<RefCell<InputState>>) -> Listener {
    let input = Rc::clone(input);
    Rc::new(move |event: &mut InputEvent| {
        let InputEventData::KeyUp { key } = event.data else {
            return;
        };

        let mut input = input.borrow_mut();
        if let Some(flag) = input.movement.flag_mut(key) {
            *flag = false;
        }

        if key == Key::Shift {
            input.incremental_velocity = 1.0;
        }
    })
}
