use crate::audio::UiAudio;
use crate::constants::{CURSOR_ID, MAX_FRAME_DT_SEC};
use crate::input::PointerState;
use crate::render;
use crate::terminal::TerminalUi;
use folio_core::cursor::CursorFollower;
use folio_core::physics::NudgeBody;
use folio_core::sound::UiSound;
use folio_core::{
    idle_float_y, ModelMesh, OnReady, SceneContext, ScrollState, ScrollTimeline, Scrub,
    MODEL_POSITION,
};
use glam::Mat4;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub scene: Rc<RefCell<SceneContext>>,
    pub player: Rc<RefCell<ScrollTimeline>>,
    pub scroll: Rc<RefCell<ScrollState>>,
    pub model: Rc<RefCell<OnReady<ModelMesh>>>,
    pub nudge: Rc<RefCell<NudgeBody>>,
    pub pointer: Rc<RefCell<PointerState>>,
    pub audio: Rc<RefCell<UiAudio>>,
    pub terminal: Option<Rc<RefCell<TerminalUi>>>,

    pub canvas: web::HtmlCanvasElement,
    pub cursor_el: Option<web::HtmlElement>,
    pub gpu: Option<render::GpuState<'a>>,

    pub scrub: Scrub,
    pub cursor: CursorFollower,
    pub scroll_target: f32,
    pub last_applied: Option<f32>,
    pub model_seen: bool,
    pub last_instant: Instant,
}

impl<'a> FrameContext<'a> {
    pub fn new(
        scene: Rc<RefCell<SceneContext>>,
        player: Rc<RefCell<ScrollTimeline>>,
        scroll: Rc<RefCell<ScrollState>>,
        model: Rc<RefCell<OnReady<ModelMesh>>>,
        nudge: Rc<RefCell<NudgeBody>>,
        canvas: web::HtmlCanvasElement,
        scrub_lag_sec: f32,
    ) -> Self {
        let cursor_el = crate::dom::window_document()
            .and_then(|d| crate::dom::html_element_by_id(&d, CURSOR_ID));
        Self {
            scene,
            player,
            scroll,
            model,
            nudge,
            pointer: Rc::new(RefCell::new(PointerState::default())),
            audio: Rc::new(RefCell::new(UiAudio::new())),
            terminal: None,
            canvas,
            cursor_el,
            gpu: None,
            scrub: Scrub::new(scrub_lag_sec),
            cursor: CursorFollower::new(),
            scroll_target: 0.0,
            last_applied: None,
            model_seen: false,
            last_instant: Instant::now(),
        }
    }

    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32().min(MAX_FRAME_DT_SEC);
        self.last_instant = now;

        self.advance_timeline(dt_sec);
        self.apply_idle_float();
        self.nudge.borrow_mut().step(dt_sec);
        self.update_cursor(dt_sec);
        self.tick_terminal(dt_sec);
        self.draw(dt_sec);
    }

    /// At most one player evaluation per frame, and none while the
    /// scrubbed progress is at rest and the player is unchanged.
    fn advance_timeline(&mut self, dt_sec: f32) {
        let stale = {
            let mut scroll = self.scroll.borrow_mut();
            if let Some(p) = scroll.take_pending() {
                self.scroll_target = p;
            }
            scroll.take_stale()
        };
        let progress = self.scrub.step(self.scroll_target, dt_sec);
        // The model target appears asynchronously and needs one evaluation
        // at the current progress before its first draw.
        let has_model = self.scene.borrow().model().is_some();
        let model_landed = has_model && !self.model_seen;
        self.model_seen = has_model;
        if self.last_applied == Some(progress) && !model_landed && !stale {
            return;
        }
        // Triggers may borrow other shared state, so keep the scene borrow
        // scoped to this call.
        let fired = {
            let mut scene = self.scene.borrow_mut();
            self.player.borrow_mut().apply(progress, &mut scene.targets)
        };
        if !fired.is_empty() {
            log::debug!("[scroll] p={progress:.3} fired {:?}", fired.as_slice());
        }
        self.last_applied = Some(progress);
    }

    fn apply_idle_float(&mut self) {
        let mut scene = self.scene.borrow_mut();
        if let Some(model) = scene.model_mut() {
            model.position.y = idle_float_y(MODEL_POSITION.y, js_sys::Date::now());
        }
    }

    fn update_cursor(&mut self, dt_sec: f32) {
        let Some(el) = &self.cursor_el else {
            return;
        };
        let ps = *self.pointer.borrow();
        if !ps.seen {
            return;
        }
        self.cursor.step(ps.client, ps.hovering, dt_sec);
        _ = el
            .style()
            .set_property("transform", &self.cursor.css_transform());
    }

    fn tick_terminal(&mut self, dt_sec: f32) {
        let Some(t) = &self.terminal else {
            return;
        };
        let revealed = t.borrow_mut().tick(dt_sec);
        if revealed > 0 {
            self.audio.borrow_mut().play(UiSound::Key);
        }
    }

    fn draw(&mut self, dt_sec: f32) {
        let Some(g) = &mut self.gpu else {
            return;
        };
        if !g.has_model() {
            if let Some(mesh) = self.model.borrow().value() {
                g.upload_model(mesh);
            }
        }
        let w = self.canvas.width();
        let h = self.canvas.height();
        g.resize_if_needed(w, h);
        let mut scene = self.scene.borrow_mut();
        scene.camera.set_viewport(w, h);
        let offset = self.nudge.borrow().offset;
        let model_matrix = scene
            .model()
            .map(|m| Mat4::from_translation(offset) * m.matrix());
        if let Err(e) = g.render(dt_sec, &scene, model_matrix) {
            log::error!("render error: {:?}", e);
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
