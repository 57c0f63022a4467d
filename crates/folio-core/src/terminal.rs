//! Hidden terminal opened by typing a secret word anywhere on the page.

use std::collections::VecDeque;

pub const SECRET_WORD: &str = "hello";
pub const PROMPT: &str = "guest@folio:~$ ";
pub const TYPE_CHARS_PER_SEC: f32 = 90.0;
const HISTORY_MAX: usize = 50;

/// Watches keystrokes for the secret word.
#[derive(Clone, Debug)]
pub struct SecretDetector {
    word: String,
    buf: VecDeque<char>,
}

impl Default for SecretDetector {
    fn default() -> Self {
        Self::new(SECRET_WORD)
    }
}

impl SecretDetector {
    pub fn new(word: &str) -> Self {
        Self {
            word: word.to_lowercase(),
            buf: VecDeque::new(),
        }
    }

    /// Feed a `KeyboardEvent.key` value. Named keys (`"Shift"`, `"Enter"`, ...)
    /// reset the buffer. Returns `true` when the word has just been completed.
    pub fn push_key(&mut self, key: &str) -> bool {
        let mut chars = key.chars();
        let (Some(c), None) = (chars.next(), chars.next()) else {
            self.buf.clear();
            return false;
        };
        self.buf.extend(c.to_lowercase());
        let want = self.word.chars().count();
        while self.buf.len() > want {
            self.buf.pop_front();
        }
        if self.buf.iter().copied().eq(self.word.chars()) {
            self.buf.clear();
            return true;
        }
        false
    }
}

/// Result of running one command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Output {
    Lines(Vec<String>),
    Clear,
    Exit,
}

#[derive(Clone, Debug, Default)]
pub struct Terminal {
    history: Vec<String>,
}

fn lines(items: &[&str]) -> Output {
    Output::Lines(items.iter().map(|s| s.to_string()).collect())
}

impl Terminal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn banner() -> Vec<String> {
        vec![
            "folio shell: type `help` for commands".to_string(),
            String::new(),
        ]
    }

    pub fn run(&mut self, input: &str) -> Output {
        let line = input.trim();
        if line.is_empty() {
            return Output::Lines(Vec::new());
        }
        self.history.push(line.to_string());
        if self.history.len() > HISTORY_MAX {
            self.history.remove(0);
        }
        let (cmd, rest) = match line.split_once(char::is_whitespace) {
            Some((c, r)) => (c, r.trim()),
            None => (line, ""),
        };
        log::debug!("[terminal] {cmd}");
        match cmd.to_lowercase().as_str() {
            "help" => lines(&[
                "about     who is behind this page",
                "projects  things I have built",
                "contact   where to reach me",
                "history   commands typed so far",
                "echo      print the arguments",
                "clear     clear the screen",
                "exit      close the terminal",
            ]),
            "about" => lines(&[
                "Developer who likes graphics, audio and small fast tools.",
                "This page is Rust compiled to WebAssembly, drawn with WebGPU.",
            ]),
            "projects" => lines(&[
                "folio     this site: scroll-driven 3D in Rust/WASM",
                "geno-1    generative music visualizer (WebGPU + WebAudio)",
            ]),
            "contact" => lines(&["mail   hello@example.com", "github github.com/rgilks"]),
            "whoami" => lines(&["guest"]),
            "history" => Output::Lines(
                self.history
                    .iter()
                    .enumerate()
                    .map(|(i, h)| format!("{:>3}  {h}", i + 1))
                    .collect(),
            ),
            "echo" => Output::Lines(vec![rest.to_string()]),
            "sudo" => lines(&["guest is not in the sudoers file. This incident will be reported."]),
            "clear" => Output::Clear,
            "exit" | "quit" => Output::Exit,
            other => Output::Lines(vec![format!("command not found: {other}")]),
        }
    }
}

/// Reveals queued text a character at a time.
#[derive(Clone, Debug, Default)]
pub struct Typewriter {
    full: String,
    shown: usize,
    total: usize,
    carry: f32,
}

impl Typewriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_line(&mut self, line: &str) {
        self.full.push_str(line);
        self.full.push('\n');
        self.total = self.full.chars().count();
    }

    /// Append text that is shown immediately (the echoed command line).
    pub fn push_instant(&mut self, line: &str) {
        self.push_line(line);
        self.shown = self.total;
        self.carry = 0.0;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_done(&self) -> bool {
        self.shown >= self.total
    }

    /// Advance by `dt_sec`; returns how many characters were revealed.
    pub fn step(&mut self, dt_sec: f32, chars_per_sec: f32) -> usize {
        if self.is_done() {
            self.carry = 0.0;
            return 0;
        }
        self.carry += dt_sec.max(0.0) * chars_per_sec;
        let n = (self.carry.floor() as usize).min(self.total - self.shown);
        self.carry -= n as f32;
        self.shown += n;
        n
    }

    pub fn visible(&self) -> &str {
        let end = self
            .full
            .char_indices()
            .nth(self.shown)
            .map(|(i, _)| i)
            .unwrap_or(self.full.len());
        &self.full[..end]
    }
}
