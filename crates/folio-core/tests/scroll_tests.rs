// Host-side tests for scroll anchors, progress mapping and scrub smoothing.

use folio_core::*;

fn layout() -> PageLayout {
    // 1000px viewport, 4000px document, section at 1500..2500.
    PageLayout {
        element_top: 1500.0,
        element_height: 1000.0,
        viewport_height: 1000.0,
        scroll_height: 4000.0,
    }
}

#[test]
fn anchors_parse_keywords_percentages_and_pixels() {
    let a: Anchor = "top bottom".parse().unwrap();
    assert_eq!(a.element, Edge::Fraction(0.0));
    assert_eq!(a.viewport, Edge::Fraction(1.0));
    let b: Anchor = "25% 100px".parse().unwrap();
    assert_eq!(b.element, Edge::Fraction(0.25));
    assert_eq!(b.viewport, Edge::Pixels(100.0));
    assert!("top".parse::<Anchor>().is_err());
    assert!("top middle".parse::<Anchor>().is_err());
    assert!("top center bottom".parse::<Anchor>().is_err());
}

#[test]
fn anchor_offsets_line_up_edges() {
    let l = layout();
    let top_bottom: Anchor = "top bottom".parse().unwrap();
    assert_eq!(top_bottom.scroll_offset(&l), 500.0);
    let top_center: Anchor = "top center".parse().unwrap();
    assert_eq!(top_center.scroll_offset(&l), 1000.0);
    let bottom_center: Anchor = "bottom center".parse().unwrap();
    assert_eq!(bottom_center.scroll_offset(&l), 2000.0);
}

#[test]
fn ranges_map_to_document_progress() {
    let l = layout();
    let range = ScrollRange::parse("top bottom", "top center").unwrap();
    let (a, b) = range.to_progress(&l);
    assert!((a - 500.0 / 3000.0).abs() < 1e-6);
    assert!((b - 1000.0 / 3000.0).abs() < 1e-6);
}

#[test]
fn ranges_clamp_and_never_invert() {
    let short = PageLayout {
        element_top: 200.0,
        element_height: 100.0,
        viewport_height: 800.0,
        scroll_height: 1000.0,
    };
    let range = ScrollRange::parse("top bottom", "bottom top").unwrap();
    let (a, b) = range.to_progress(&short);
    assert_eq!(a, 0.0);
    assert_eq!(b, 1.0);
    let backwards = ScrollRange::parse("bottom top", "top bottom").unwrap();
    let (a, b) = backwards.to_progress(&short);
    assert!(a <= b);
}

#[test]
fn page_without_scroll_maps_to_zero() {
    let flat = PageLayout {
        element_top: 0.0,
        element_height: 100.0,
        viewport_height: 900.0,
        scroll_height: 900.0,
    };
    let range = ScrollRange::parse("top bottom", "top center").unwrap();
    assert_eq!(range.to_progress(&flat), (0.0, 0.0));
    assert_eq!(document_progress(300.0, &flat), 0.0);
}

#[test]
fn document_progress_is_clamped() {
    let l = layout();
    assert_eq!(document_progress(-50.0, &l), 0.0);
    assert_eq!(document_progress(1500.0, &l), 0.5);
    assert_eq!(document_progress(9000.0, &l), 1.0);
}

#[test]
fn scroll_state_coalesces_events_between_frames() {
    let mut state = ScrollState::default();
    assert_eq!(state.take_pending(), None);
    state.record(0.2);
    state.record(0.3);
    state.record(1.7);
    assert_eq!(state.take_pending(), Some(1.0));
    assert_eq!(state.take_pending(), None);
    assert_eq!(state.progress(), 1.0);
}

#[test]
fn invalidation_is_reported_once() {
    let mut state = ScrollState::default();
    assert!(!state.take_stale());
    state.invalidate();
    assert_eq!(state.take_pending(), None);
    assert!(state.take_stale());
    assert!(!state.take_stale());
}

#[test]
fn scrub_snaps_on_first_step_then_lags() {
    let mut scrub = Scrub::new(1.0);
    assert_eq!(scrub.value(), None);
    assert_eq!(scrub.step(0.2, 0.016), 0.2);
    let v = scrub.step(0.8, 0.016);
    assert!(v > 0.2 && v < 0.3, "lagged value {v}");
}

#[test]
fn scrub_is_frame_rate_independent() {
    let mut fast = Scrub::new(1.0);
    let mut slow = Scrub::new(1.0);
    fast.snap(0.0);
    slow.snap(0.0);
    for _ in 0..120 {
        fast.step(1.0, 1.0 / 120.0);
    }
    for _ in 0..30 {
        slow.step(1.0, 1.0 / 30.0);
    }
    let (f, s) = (fast.value().unwrap(), slow.value().unwrap());
    assert!((f - s).abs() < 1e-3, "{f} vs {s}");
    // After the lag the gap is about 5%.
    assert!((0.93..0.97).contains(&f));
}

#[test]
fn scrub_settles_exactly() {
    let mut scrub = Scrub::new(0.5);
    scrub.snap(0.0);
    for _ in 0..600 {
        scrub.step(0.6, 1.0 / 60.0);
    }
    assert_eq!(scrub.value(), Some(0.6));
    assert!(scrub.is_settled(0.6));
}

#[test]
fn zero_lag_scrub_tracks_input() {
    let mut scrub = Scrub::new(0.0);
    scrub.snap(0.1);
    assert_eq!(scrub.step(0.9, 0.016), 0.9);
}
