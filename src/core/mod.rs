pub mod clock;
pub mod input;
pub mod input_adapter;
pub mod surface;

pub use clock::FrameClock;
pub use input::{EventKind, InputEvent, InputEventData, Key, PointerButton};
pub use input_adapter::WinitInput;
pub use surface::{EventSurface, InputHost};
