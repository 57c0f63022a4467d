use crate::input::px_to_ndc;
use folio_core::Camera;
use glam::{Vec2, Vec3};
use web_sys as web;

/// World-space ray through a canvas pixel (backing-store coordinates).
///
/// Returns `(ray_origin, ray_direction)`.
#[inline]
pub fn screen_to_world_ray(
    canvas: &web::HtmlCanvasElement,
    camera: &Camera,
    sx: f32,
    sy: f32,
) -> (Vec3, Vec3) {
    let size = Vec2::new(canvas.width() as f32, canvas.height() as f32);
    let ndc = px_to_ndc(Vec2::new(sx, sy), size);
    camera.ray_from_ndc(ndc.x, ndc.y)
}
