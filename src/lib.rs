#![cfg(target_arch = "wasm32")]
use crate::config::PageConfig;
use crate::constants::{CANVAS_ID, MODEL_URL_ATTR, NUDGE_SEED, SCRUB_ATTR};
use folio_core::physics::NudgeBody;
use folio_core::{ModelMesh, OnReady, SceneContext, ScrollState, ScrollTimeline, Timeline};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod camera;
mod config;
mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod loader;
mod modal;
mod render;
mod scroll;
mod terminal;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("folio-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{CANVAS_ID}"))?;
    let config = PageConfig::from_attrs(
        canvas_el.get_attribute(MODEL_URL_ATTR),
        canvas_el.get_attribute(SCRUB_ATTR),
    );
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    log::info!(
        "[config] model={} scrub={}s",
        config.model_url,
        config.scrub_lag_sec
    );
    dom::sync_canvas_backing_size(&canvas);

    // Shared state, constructed once and handed to every consumer
    let scene = Rc::new(RefCell::new(SceneContext::new()));
    let nudge = Rc::new(RefCell::new(NudgeBody::new(NUDGE_SEED)));
    let scroll_state = Rc::new(RefCell::new(ScrollState::default()));
    let model: Rc<RefCell<OnReady<ModelMesh>>> = Rc::new(RefCell::new(OnReady::new()));

    let (timeline, layout) = match scroll::build_timeline(&document, &nudge) {
        Ok((t, l)) => (t, Some(l)),
        Err(e) => {
            log::warn!("[scroll] no scroll timeline: {e:#}");
            (Timeline::new(), None)
        }
    };
    let player = Rc::new(RefCell::new(ScrollTimeline::new(timeline)));

    // The model target exists only once the asset is in.
    {
        let scene = scene.clone();
        model.borrow_mut().on_ready(move |mesh: &ModelMesh| {
            scene.borrow_mut().install_model();
            log::info!("[asset] ready: {} triangles", mesh.triangle_count());
        });
    }
    loader::spawn_model_load(config.model_url.clone(), model.clone());

    scroll::wire_scroll(scroll::ScrollWiring {
        document: document.clone(),
        canvas: canvas.clone(),
        scroll: scroll_state.clone(),
        player: player.clone(),
        layout: Rc::new(RefCell::new(layout)),
        nudge: nudge.clone(),
    });

    let mut frame_ctx = frame::FrameContext::new(
        scene.clone(),
        player,
        scroll_state,
        model.clone(),
        nudge.clone(),
        canvas.clone(),
        config.scrub_lag_sec,
    );
    let terminal = terminal::TerminalUi::from_document(&document).map(|t| Rc::new(RefCell::new(t)));
    frame_ctx.terminal = terminal.clone();

    modal::wire_modals(&document, frame_ctx.audio.clone());
    events::wire_global_keydown(events::KeyWiring {
        document: document.clone(),
        terminal,
        audio: frame_ctx.audio.clone(),
    });
    events::wire_pointer_handlers(events::PointerWiring {
        canvas: canvas.clone(),
        pointer: frame_ctx.pointer.clone(),
        scene,
        model,
        nudge,
        audio: frame_ctx.audio.clone(),
    });

    // Page stays usable without WebGPU; the loop still drives UI effects.
    frame_ctx.gpu = frame::init_gpu(&canvas).await;
    frame::start_loop(Rc::new(RefCell::new(frame_ctx)));
    Ok(())
}
