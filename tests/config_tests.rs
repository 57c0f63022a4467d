// Host-side tests for the canvas attribute overrides.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod config {
    include!("../src/config.rs");
}

use config::*;

#[test]
fn defaults_without_attributes() {
    let cfg = PageConfig::from_attrs(None, None);
    assert_eq!(cfg, PageConfig::default());
    assert_eq!(cfg.model_url, constants::DEFAULT_MODEL_URL);
    assert_eq!(cfg.scrub_lag_sec, folio_core::DEFAULT_SCRUB_LAG_SEC);
}

#[test]
fn attributes_override_defaults() {
    let cfg = PageConfig::from_attrs(Some(" models/hat.gltf ".into()), Some("0.5".into()));
    assert_eq!(cfg.model_url, "models/hat.gltf");
    assert_eq!(cfg.scrub_lag_sec, 0.5);
}

#[test]
fn blank_or_bad_values_are_ignored() {
    let cfg = PageConfig::from_attrs(Some("   ".into()), Some("fast".into()));
    assert_eq!(cfg, PageConfig::default());
}

#[test]
fn scrub_parsing() {
    assert_eq!(parse_scrub("true"), Some(0.0));
    assert_eq!(parse_scrub("TRUE"), Some(0.0));
    assert_eq!(parse_scrub("2"), Some(2.0));
    assert_eq!(parse_scrub("-1"), None);
    assert_eq!(parse_scrub("NaN"), None);
    assert_eq!(parse_scrub("inf"), None);
    assert_eq!(parse_scrub(""), None);
}
