/// Page configuration read from attributes on the canvas element.
///
/// `data-model-url` replaces the default model path and `data-scrub`
/// sets the scrub lag in seconds (`"true"` means no lag, like GSAP).
#[derive(Clone, Debug, PartialEq)]
pub struct PageConfig {
    pub model_url: String,
    pub scrub_lag_sec: f32,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            model_url: crate::constants::DEFAULT_MODEL_URL.to_string(),
            scrub_lag_sec: folio_core::DEFAULT_SCRUB_LAG_SEC,
        }
    }
}

impl PageConfig {
    pub fn from_attrs(model_url: Option<String>, scrub: Option<String>) -> Self {
        let mut cfg = Self::default();
        if let Some(url) = model_url.map(|u| u.trim().to_string()) {
            if !url.is_empty() {
                cfg.model_url = url;
            }
        }
        if let Some(raw) = scrub {
            match parse_scrub(&raw) {
                Some(lag) => cfg.scrub_lag_sec = lag,
                None => log::warn!("[config] ignoring data-scrub={raw:?}"),
            }
        }
        cfg
    }
}

/// `"true"` → 0, a finite non-negative number → that many seconds.
pub fn parse_scrub(raw: &str) -> Option<f32> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("true") {
        return Some(0.0);
    }
    raw.parse::<f32>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}
