//! MarkPen Core Library
//!
//! Image-agnostic data structures and editing logic for the MarkPen
//! annotation editor.

pub mod input;
pub mod mark;
pub mod message;
pub mod selection;
pub mod session;
pub mod store;
pub mod viewport;

pub use input::{Key, Modifiers, MouseButton};
pub use mark::{Mark, MarkStyle, DEFAULT_COLOR, DEFAULT_LINE_WIDTH};
pub use message::HostMessage;
pub use selection::{Corner, Handle, MoveState, ResizeState, HANDLE_SIZE};
pub use session::{EditorSession, Gesture, Mode, MIN_MARK_SIZE};
pub use store::MarkStore;
pub use viewport::{Viewport, ZoomDirection, MAX_SCALE, MIN_SCALE};
