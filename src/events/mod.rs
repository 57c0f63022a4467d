pub mod keyboard;
pub mod pointer;

pub use keyboard::{wire_global_keydown, KeyWiring};
pub use pointer::{wire_pointer_handlers, PointerWiring};
