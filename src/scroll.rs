//! Scroll and resize listeners feeding the timeline player.

use crate::constants::SIDE_CONTENT_SELECTOR;
use crate::dom;
use anyhow::anyhow;
use folio_core::physics::NudgeBody;
use folio_core::{document_progress, portfolio_timeline, PageLayout, ScrollState, ScrollTimeline, Timeline};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct ScrollWiring {
    pub document: web::Document,
    pub canvas: web::HtmlCanvasElement,
    pub scroll: Rc<RefCell<ScrollState>>,
    pub player: Rc<RefCell<ScrollTimeline>>,
    pub layout: Rc<RefCell<Option<PageLayout>>>,
    pub nudge: Rc<RefCell<NudgeBody>>,
}

/// Measure the page and build the site timeline against it.
pub fn build_timeline(
    document: &web::Document,
    nudge: &Rc<RefCell<NudgeBody>>,
) -> anyhow::Result<(Timeline, PageLayout)> {
    let layout = dom::measure_layout(document, SIDE_CONTENT_SELECTOR)
        .ok_or_else(|| anyhow!("missing {SIDE_CONTENT_SELECTOR}"))?;
    let nudge = nudge.clone();
    let timeline = portfolio_timeline(&layout, move || nudge.borrow_mut().reseed())?;
    Ok((timeline, layout))
}

impl ScrollWiring {
    fn record(&self) {
        if let Some(layout) = self.layout.borrow().as_ref() {
            let p = document_progress(dom::scroll_y(), layout);
            self.scroll.borrow_mut().record(p);
        }
    }

    /// Re-measure and swap in a fresh timeline, keeping trigger latches and
    /// resolved starts. The next frame re-evaluates even if progress is unchanged.
    pub fn refresh(&self) {
        dom::sync_canvas_backing_size(&self.canvas);
        match build_timeline(&self.document, &self.nudge) {
            Ok((timeline, layout)) => {
                let mut player = self.player.borrow_mut();
                let old = std::mem::replace(&mut *player, ScrollTimeline::new(Timeline::new()));
                *player = ScrollTimeline::with_memory(timeline, old.into_memory());
                *self.layout.borrow_mut() = Some(layout);
                self.scroll.borrow_mut().invalidate();
            }
            Err(e) => log::warn!("[scroll] layout refresh failed: {e:#}"),
        }
        self.record();
    }
}

pub fn wire_scroll(w: ScrollWiring) {
    let Some(window) = web::window() else {
        return;
    };
    let on_scroll = {
        let w = w.clone();
        Closure::wrap(Box::new(move || w.record()) as Box<dyn FnMut()>)
    };
    _ = window.add_event_listener_with_callback("scroll", on_scroll.as_ref().unchecked_ref());
    on_scroll.forget();

    let on_resize = {
        let w = w.clone();
        Closure::wrap(Box::new(move || w.refresh()) as Box<dyn FnMut()>)
    };
    _ = window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref());
    on_resize.forget();

    // Initial position (the page may open scrolled).
    w.record();
}
