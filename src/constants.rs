// Page wiring and frame tuning constants for the web front-end.
// Scene tuning shared with the core lives in `folio_core::constants`.

// DOM hooks
pub const CANVAS_ID: &str = "webgl-canvas";
pub const SIDE_CONTENT_SELECTOR: &str = ".side-content";
pub const CURSOR_ID: &str = "cursor";
pub const TERMINAL_ID: &str = "terminal";
pub const TERMINAL_OUTPUT_ID: &str = "terminal-output";
pub const TERMINAL_INPUT_ID: &str = "terminal-input";
pub const MODAL_OPEN_ATTR: &str = "data-modal-open";
pub const MODAL_CLOSE_SELECTOR: &str = ".modal-close";
pub const HOVER_SELECTOR: &str = "a, button, [data-hover]";
pub const HIDDEN_CLASS: &str = "hidden";

// Canvas overrides
pub const MODEL_URL_ATTR: &str = "data-model-url";
pub const SCRUB_ATTR: &str = "data-scrub";
pub const DEFAULT_MODEL_URL: &str = "luffy_hat/scene.gltf";

// Backing store is capped at 2x to keep fill rate sane on dense screens.
pub const MAX_PIXEL_RATIO: f64 = 2.0;

// Upper bound on a single frame step (tab switches produce huge gaps)
pub const MAX_FRAME_DT_SEC: f32 = 0.1;

// Seed for the nudge body's scatter generator
pub const NUDGE_SEED: u64 = 0x5eed_f011;

// Pointer hits test against the model's bounding sphere scaled by this.
pub const PICK_RADIUS_SCALE: f32 = 0.8;

// Clear colour behind the model; alpha 0 lets the page show through.
pub const CLEAR_RGBA: [f64; 4] = [0.0, 0.0, 0.0, 0.0];

// UI sound output level before per-tone gain
pub const UI_MASTER_GAIN: f32 = 0.6;
