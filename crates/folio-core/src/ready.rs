//! Single-shot readiness slot for the asynchronously loaded model.
//!
//! Callbacks registered with [`OnReady::on_ready`] run exactly once when the
//! value arrives, or never if loading fails.

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ReadyError {
    #[error("ready slot already settled")]
    AlreadySettled,
}

type Callback<T> = Box<dyn FnOnce(&T)>;

pub enum OnReady<T> {
    Pending(Vec<Callback<T>>),
    Ready(T),
    Failed(String),
}

impl<T> Default for OnReady<T> {
    fn default() -> Self {
        OnReady::Pending(Vec::new())
    }
}

impl<T> std::fmt::Debug for OnReady<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OnReady::Pending(cbs) => write!(f, "Pending({} callbacks)", cbs.len()),
            OnReady::Ready(_) => f.write_str("Ready"),
            OnReady::Failed(reason) => write!(f, "Failed({reason})"),
        }
    }
}

impl<T> OnReady<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, OnReady::Ready(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, OnReady::Failed(_))
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            OnReady::Ready(v) => Some(v),
            _ => None,
        }
    }

    /// Run `cb` when the value is available: immediately if it already is,
    /// later if loading is in flight, never if loading failed.
    pub fn on_ready(&mut self, cb: impl FnOnce(&T) + 'static) {
        match self {
            OnReady::Pending(cbs) => cbs.push(Box::new(cb)),
            OnReady::Ready(v) => cb(v),
            OnReady::Failed(_) => {}
        }
    }

    pub fn resolve(&mut self, value: T) -> Result<(), ReadyError> {
        let cbs = match self {
            OnReady::Pending(cbs) => std::mem::take(cbs),
            _ => return Err(ReadyError::AlreadySettled),
        };
        *self = OnReady::Ready(value);
        if let OnReady::Ready(v) = self {
            for cb in cbs {
                cb(v);
            }
        }
        Ok(())
    }

    pub fn fail(&mut self, reason: impl Into<String>) -> Result<(), ReadyError> {
        if !matches!(self, OnReady::Pending(_)) {
            return Err(ReadyError::AlreadySettled);
        }
        let reason = reason.into();
        log::warn!("[asset] load failed: {reason}");
        *self = OnReady::Failed(reason);
        Ok(())
    }
}
