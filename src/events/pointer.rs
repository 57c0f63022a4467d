use crate::audio::UiAudio;
use crate::constants::{HOVER_SELECTOR, PICK_RADIUS_SCALE};
use crate::input::{self, PointerState};
use crate::render;
use folio_core::constants::NUDGE_IMPULSE;
use folio_core::physics::{ray_sphere, NudgeBody};
use folio_core::sound::UiSound;
use folio_core::{ModelMesh, OnReady, SceneContext};
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct PointerWiring {
    pub canvas: web::HtmlCanvasElement,
    pub pointer: Rc<RefCell<PointerState>>,
    pub scene: Rc<RefCell<SceneContext>>,
    pub model: Rc<RefCell<OnReady<ModelMesh>>>,
    pub nudge: Rc<RefCell<NudgeBody>>,
    pub audio: Rc<RefCell<UiAudio>>,
}

pub fn wire_pointer_handlers(w: PointerWiring) {
    wire_pointermove(&w);
    wire_pointerdown(&w);
}

fn over_hover_target(ev: &web::PointerEvent) -> bool {
    ev.target()
        .and_then(|t| t.dyn_into::<web::Element>().ok())
        .and_then(|el| el.closest(HOVER_SELECTOR).ok().flatten())
        .is_some()
}

fn wire_pointermove(w: &PointerWiring) {
    let w = w.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let hovering = over_hover_target(&ev);
        let entered = {
            let mut ps = w.pointer.borrow_mut();
            ps.client = Vec2::new(ev.client_x() as f32, ev.client_y() as f32);
            ps.seen = true;
            let entered = hovering && !ps.hovering;
            ps.hovering = hovering;
            entered
        };
        if entered {
            w.audio.borrow_mut().play(UiSound::Hover);
        }
    }) as Box<dyn FnMut(_)>);
    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_pointerdown(w: &PointerWiring) {
    let w = w.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        w.audio.borrow_mut().unlock();
        if over_hover_target(&ev) {
            w.audio.borrow_mut().play(UiSound::Click);
            return;
        }
        let pos = input::pointer_canvas_px(&ev, &w.canvas);
        if let Some(dir) = pick_model(&w, pos) {
            w.nudge.borrow_mut().impulse(dir, NUDGE_IMPULSE);
            log::debug!("[nudge] hit at ({:.0},{:.0})", pos.x, pos.y);
        }
    }) as Box<dyn FnMut(_)>);
    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

/// Ray-test the model's bounding sphere; returns the push direction on a hit.
fn pick_model(w: &PointerWiring, px: Vec2) -> Option<glam::Vec3> {
    let model = w.model.borrow();
    let mesh = model.value()?;
    let scene = w.scene.borrow();
    let transform = scene.model()?;
    let (local_center, local_radius) = mesh.bounding_sphere();
    let center = transform.matrix().transform_point3(local_center);
    let radius = local_radius * transform.scale * PICK_RADIUS_SCALE;
    let (ro, rd) = render::screen_to_world_ray(&w.canvas, &scene.camera, px.x, px.y);
    ray_sphere(ro, rd, center, radius)?;
    Some(rd)
}
