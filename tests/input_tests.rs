// Host-side tests for pure input functions.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod input {
    include!("../src/input.rs");
}

use glam::Vec2;
use input::*;

#[test]
fn css_position_maps_onto_backing_store() {
    // 800x600 CSS box at (100, 50) backed by a 2x store
    let px = css_to_backing_px(
        Vec2::new(500.0, 350.0),
        Vec2::new(100.0, 50.0),
        Vec2::new(800.0, 600.0),
        Vec2::new(1600.0, 1200.0),
    );
    assert_eq!(px, Vec2::new(800.0, 600.0));
}

#[test]
fn empty_rect_maps_to_origin() {
    let px = css_to_backing_px(
        Vec2::new(10.0, 10.0),
        Vec2::ZERO,
        Vec2::new(0.0, 600.0),
        Vec2::new(1600.0, 1200.0),
    );
    assert_eq!(px, Vec2::ZERO);
}

#[test]
fn ndc_corners_and_centre() {
    let size = Vec2::new(1600.0, 1200.0);
    assert_eq!(px_to_ndc(Vec2::new(800.0, 600.0), size), Vec2::ZERO);
    assert_eq!(px_to_ndc(Vec2::ZERO, size), Vec2::new(-1.0, 1.0));
    assert_eq!(px_to_ndc(size, size), Vec2::new(1.0, -1.0));
}

#[test]
fn ndc_tolerates_zero_size() {
    let ndc = px_to_ndc(Vec2::new(0.5, 0.5), Vec2::ZERO);
    assert!(ndc.x.is_finite() && ndc.y.is_finite());
}

#[test]
fn pointer_state_defaults_to_unseen() {
    let ps = PointerState::default();
    assert!(!ps.seen);
    assert!(!ps.hovering);
}
