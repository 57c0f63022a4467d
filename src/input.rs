use glam::Vec2;
use web_sys as web;

/// Latest pointer sample in viewport CSS pixels, for the cursor follower.
#[derive(Default, Clone, Copy, Debug)]
pub struct PointerState {
    pub client: Vec2,
    pub hovering: bool,
    pub seen: bool,
}

/// Map a CSS-pixel position inside an element rect onto its backing store.
#[inline]
pub fn css_to_backing_px(
    client: Vec2,
    rect_origin: Vec2,
    rect_size: Vec2,
    backing_size: Vec2,
) -> Vec2 {
    if rect_size.x <= 0.0 || rect_size.y <= 0.0 {
        return Vec2::ZERO;
    }
    (client - rect_origin) / rect_size * backing_size
}

/// Backing-store pixels to normalised device coordinates (+Y up).
#[inline]
pub fn px_to_ndc(px: Vec2, backing_size: Vec2) -> Vec2 {
    let w = backing_size.x.max(1.0);
    let h = backing_size.y.max(1.0);
    Vec2::new(2.0 * px.x / w - 1.0, 1.0 - 2.0 * px.y / h)
}

#[inline]
pub fn pointer_canvas_px(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    css_to_backing_px(
        Vec2::new(ev.client_x() as f32, ev.client_y() as f32),
        Vec2::new(rect.left() as f32, rect.top() as f32),
        Vec2::new(rect.width() as f32, rect.height() as f32),
        Vec2::new(canvas.width() as f32, canvas.height() as f32),
    )
}
