use crate::constants::MAX_PIXEL_RATIO;
use folio_core::PageLayout;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn add_element_click(el: &web::Element, mut handler: impl FnMut() + 'static) {
    let closure =
        wasm_bindgen::closure::Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
    _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}

/// All elements matching `selector`; empty on a bad selector.
pub fn query_all(document: &web::Document, selector: &str) -> Vec<web::Element> {
    let Ok(list) = document.query_selector_all(selector) else {
        log::warn!("bad selector {selector:?}");
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|n| n.dyn_into::<web::Element>().ok())
        .collect()
}

pub fn html_element_by_id(document: &web::Document, id: &str) -> Option<web::HtmlElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio().min(MAX_PIXEL_RATIO);
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

pub fn scroll_y() -> f32 {
    web::window()
        .and_then(|w| w.scroll_y().ok())
        .unwrap_or(0.0) as f32
}

/// Measure the trigger element against the document, in document pixels.
pub fn measure_layout(document: &web::Document, selector: &str) -> Option<PageLayout> {
    let window = web::window()?;
    let el = document.query_selector(selector).ok().flatten()?;
    let viewport_height = window.inner_height().ok()?.as_f64()? as f32;
    let scroll_height = document
        .document_element()
        .map(|root| root.scroll_height())
        .unwrap_or(0) as f32;
    let rect = el.get_bounding_client_rect();
    Some(PageLayout {
        element_top: rect.top() as f32 + scroll_y(),
        element_height: rect.height() as f32,
        viewport_height,
        scroll_height,
    })
}

/// True when keystrokes are going into a text field.
pub fn is_editable_target(ev: &web::Event) -> bool {
    let Some(el) = ev.target().and_then(|t| t.dyn_into::<web::Element>().ok()) else {
        return false;
    };
    let tag = el.tag_name();
    if tag.eq_ignore_ascii_case("input") || tag.eq_ignore_ascii_case("textarea") {
        return true;
    }
    el.dyn_into::<web::HtmlElement>()
        .map(|h| h.is_content_editable())
        .unwrap_or(false)
}
