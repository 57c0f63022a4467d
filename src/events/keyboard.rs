use crate::audio::UiAudio;
use crate::terminal::TerminalUi;
use crate::{dom, modal};
use folio_core::sound::UiSound;
use folio_core::terminal::SecretDetector;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct KeyWiring {
    pub document: web::Document,
    pub terminal: Option<Rc<RefCell<TerminalUi>>>,
    pub audio: Rc<RefCell<UiAudio>>,
}

/// Keys typed into the terminal prompt.
fn handle_terminal_key(ev: &web::KeyboardEvent, terminal: &RefCell<TerminalUi>, audio: &RefCell<UiAudio>) {
    match ev.key().as_str() {
        "Enter" => {
            terminal.borrow_mut().submit();
            audio.borrow_mut().play(UiSound::Click);
            ev.prevent_default();
        }
        "Escape" => {
            terminal.borrow_mut().close();
            audio.borrow_mut().play(UiSound::Close);
        }
        _ => audio.borrow_mut().play(UiSound::Key),
    }
}

pub fn handle_global_keydown(ev: &web::KeyboardEvent, w: &KeyWiring, detector: &mut SecretDetector) {
    w.audio.borrow_mut().unlock();
    if let Some(t) = &w.terminal {
        let in_prompt = t.borrow().is_input(ev);
        if in_prompt {
            handle_terminal_key(ev, t, &w.audio);
            return;
        }
    }
    let key = ev.key();
    if key == "Escape" {
        let mut closed = modal::close_all(&w.document);
        if let Some(t) = &w.terminal {
            let mut t = t.borrow_mut();
            closed |= t.is_open();
            t.close();
        }
        if closed {
            w.audio.borrow_mut().play(UiSound::Close);
        }
        return;
    }
    if dom::is_editable_target(ev) || ev.ctrl_key() || ev.meta_key() || ev.alt_key() {
        return;
    }
    if key == "m" || key == "M" {
        w.audio.borrow_mut().toggle_mute();
    }
    if detector.push_key(&key) {
        if let Some(t) = &w.terminal {
            t.borrow_mut().open();
            w.audio.borrow_mut().play(UiSound::Open);
        }
    }
}

pub fn wire_global_keydown(w: KeyWiring) {
    if let Some(window) = web::window() {
        let mut detector = SecretDetector::default();
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                handle_global_keydown(&ev, &w, &mut detector);
            }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
