pub mod asset;
pub mod constants;
pub mod cursor;
pub mod easing;
pub mod physics;
pub mod ready;
pub mod scene;
pub mod scroll;
pub mod sound;
pub mod state;
pub mod target;
pub mod terminal;
pub mod timeline;
pub mod trigger;

pub use asset::*;
pub use constants::*;
pub use easing::*;
pub use ready::*;
pub use scene::*;
pub use scroll::*;
pub use state::*;
pub use target::*;
pub use timeline::*;
pub use trigger::*;

// Shaders bundled as string constants
pub static MESH_WGSL: &str = include_str!("../shaders/mesh.wgsl");
pub static POST_WGSL: &str = include_str!("../shaders/post.wgsl");
