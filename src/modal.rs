use crate::audio::UiAudio;
use crate::constants::{HIDDEN_CLASS, MODAL_CLOSE_SELECTOR, MODAL_OPEN_ATTR};
use crate::dom;
use folio_core::sound::UiSound;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

#[inline]
pub fn show(el: &web::Element) {
    _ = el.class_list().remove_1(HIDDEN_CLASS);
    _ = el.set_attribute("aria-hidden", "false");
}

#[inline]
pub fn hide(el: &web::Element) {
    _ = el.class_list().add_1(HIDDEN_CLASS);
    _ = el.set_attribute("aria-hidden", "true");
}

#[inline]
pub fn is_hidden(el: &web::Element) -> bool {
    el.class_list().contains(HIDDEN_CLASS)
}

/// Dialog elements referenced by any opener on the page.
fn modal_ids(document: &web::Document) -> Vec<String> {
    let mut ids: Vec<String> = dom::query_all(document, &format!("[{MODAL_OPEN_ATTR}]"))
        .iter()
        .filter_map(|el| el.get_attribute(MODAL_OPEN_ATTR))
        .collect();
    ids.sort();
    ids.dedup();
    ids
}

/// Hide every open dialog; returns whether any was open.
pub fn close_all(document: &web::Document) -> bool {
    let mut closed = false;
    for id in modal_ids(document) {
        if let Some(el) = document.get_element_by_id(&id) {
            if !is_hidden(&el) {
                hide(&el);
                closed = true;
            }
        }
    }
    closed
}

pub fn wire_modals(document: &web::Document, audio: Rc<RefCell<UiAudio>>) {
    for opener in dom::query_all(document, &format!("[{MODAL_OPEN_ATTR}]")) {
        let Some(id) = opener.get_attribute(MODAL_OPEN_ATTR) else {
            continue;
        };
        let doc = document.clone();
        let audio = audio.clone();
        dom::add_element_click(&opener, move || {
            if let Some(el) = doc.get_element_by_id(&id) {
                show(&el);
                audio.borrow_mut().play(UiSound::Open);
            } else {
                log::warn!("no dialog #{id}");
            }
        });
    }
    for closer in dom::query_all(document, MODAL_CLOSE_SELECTOR) {
        let doc = document.clone();
        let audio = audio.clone();
        let closer_el = closer.clone();
        dom::add_element_click(&closer, move || {
            // Close the dialog this button sits in, or all of them.
            let target = modal_ids(&doc)
                .into_iter()
                .filter_map(|id| doc.get_element_by_id(&id))
                .find(|m| m.contains(Some(closer_el.as_ref())));
            match target {
                Some(m) => hide(&m),
                None => {
                    close_all(&doc);
                }
            }
            audio.borrow_mut().play(UiSound::Close);
        });
    }
}
