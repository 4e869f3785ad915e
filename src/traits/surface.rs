use std::rc::Rc;

use crate::core::input::{EventKind, InputEvent};

/// Shared handle to an event callback.
///
/// Listeners are compared by identity, so the exact handle passed to
/// [`InputSurface::add_listener`] must be kept to remove it again.
pub type Listener = Rc<dyn Fn(&mut InputEvent)>;

/// Host input surface - the element (or document/window) that delivers
/// pointer and keyboard events.
pub trait InputSurface {
    /// Register `listener` for events of `kind`
    fn add_listener(&self, kind: EventKind, listener: Listener);

    /// Remove a listener previously registered with the same handle
    fn remove_listener(&self, kind: EventKind, listener: &Listener);

    /// Allow the surface to receive keyboard focus
    fn set_focusable(&self);

    /// Give the surface input focus
    fn focus(&self);

    /// Ask for exclusive pointer capture (raw deltas, hidden cursor)
    fn request_pointer_lock(&self);

    /// Release pointer capture
    fn exit_pointer_lock(&self);
}

/// Whether two surface handles refer to the same object
pub fn same_surface(a: &Rc<dyn InputSurface>, b: &Rc<dyn InputSurface>) -> bool {
    std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}

/// Whether two listener handles refer to the same callback
pub fn same_listener(a: &Listener, b: &Listener) -> bool {
    std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}
