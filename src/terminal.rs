use crate::constants::{TERMINAL_ID, TERMINAL_INPUT_ID, TERMINAL_OUTPUT_ID};
use crate::{dom, modal};
use folio_core::terminal::{Output, Terminal, Typewriter, PROMPT, TYPE_CHARS_PER_SEC};
use wasm_bindgen::JsCast;
use web_sys as web;

/// DOM side of the hidden terminal.
pub struct TerminalUi {
    shell: Terminal,
    typewriter: Typewriter,
    root: web::Element,
    output: web::HtmlElement,
    input: web::HtmlInputElement,
    open: bool,
    greeted: bool,
}

impl TerminalUi {
    /// `None` when the page has no terminal markup.
    pub fn from_document(document: &web::Document) -> Option<Self> {
        let root = document.get_element_by_id(TERMINAL_ID)?;
        let output = dom::html_element_by_id(document, TERMINAL_OUTPUT_ID)?;
        let input = document
            .get_element_by_id(TERMINAL_INPUT_ID)?
            .dyn_into::<web::HtmlInputElement>()
            .ok()?;
        Some(Self {
            shell: Terminal::new(),
            typewriter: Typewriter::new(),
            open: !modal::is_hidden(&root),
            greeted: false,
            root,
            output,
            input,
        })
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_input(&self, ev: &web::Event) -> bool {
        ev.target()
            .and_then(|t| t.dyn_into::<web::Element>().ok())
            .map(|el| el.id() == TERMINAL_INPUT_ID)
            .unwrap_or(false)
    }

    pub fn open(&mut self) {
        if self.open {
            return;
        }
        self.open = true;
        modal::show(&self.root);
        if !self.greeted {
            self.greeted = true;
            for line in Terminal::banner() {
                self.typewriter.push_line(&line);
            }
        }
        _ = self.input.focus();
        log::info!("[terminal] opened");
    }

    pub fn close(&mut self) {
        if !self.open {
            return;
        }
        self.open = false;
        modal::hide(&self.root);
        _ = self.input.blur();
    }

    /// Run the current input line.
    pub fn submit(&mut self) {
        let line = self.input.value();
        self.input.set_value("");
        self.typewriter.push_instant(&format!("{PROMPT}{line}"));
        match self.shell.run(&line) {
            Output::Lines(lines) => {
                for l in lines {
                    self.typewriter.push_line(&l);
                }
            }
            Output::Clear => self.typewriter.clear(),
            Output::Exit => self.close(),
        }
        self.render();
    }

    /// Advance the typewriter; returns the number of characters revealed.
    pub fn tick(&mut self, dt_sec: f32) -> usize {
        if !self.open {
            return 0;
        }
        let n = self.typewriter.step(dt_sec, TYPE_CHARS_PER_SEC);
        if n > 0 {
            self.render();
        }
        n
    }

    fn render(&self) {
        self.output.set_text_content(Some(self.typewriter.visible()));
        self.output.set_scroll_top(self.output.scroll_height());
    }
}
