// Host-side tests for trigger crossing detection and latching.

use folio_core::*;
use std::cell::Cell;
use std::rc::Rc;

fn counting(at: f32, direction: Direction) -> (Vec<Trigger>, Rc<Cell<u32>>) {
    let hits = Rc::new(Cell::new(0));
    let h = hits.clone();
    let trig = Trigger::new("t", at, direction, move || h.set(h.get() + 1));
    (vec![trig], hits)
}

#[test]
fn forward_trigger_fires_once_per_crossing() {
    let (mut triggers, hits) = counting(0.5, Direction::Forward);
    let mut latches = TriggerLatches::new();
    latches.update(0.49, &mut triggers);
    assert_eq!(hits.get(), 0);
    latches.update(0.51, &mut triggers);
    assert_eq!(hits.get(), 1);
    latches.update(0.52, &mut triggers);
    latches.update(0.55, &mut triggers);
    assert_eq!(hits.get(), 1);
    latches.update(0.48, &mut triggers);
    assert_eq!(hits.get(), 1, "backward crossing must not fire a forward trigger");
    latches.update(0.52, &mut triggers);
    assert_eq!(hits.get(), 2);
}

#[test]
fn jitter_inside_hysteresis_band_does_not_refire() {
    let (mut triggers, hits) = counting(0.5, Direction::Forward);
    let mut latches = TriggerLatches::with_hysteresis(0.01);
    latches.update(0.4, &mut triggers);
    latches.update(0.505, &mut triggers);
    for p in [0.498, 0.502, 0.495, 0.51, 0.499, 0.5] {
        latches.update(p, &mut triggers);
    }
    assert_eq!(hits.get(), 1);
    assert!(latches.is_latched("t", Crossing::Forward));
    latches.update(0.45, &mut triggers);
    assert!(!latches.is_latched("t", Crossing::Forward));
    latches.update(0.6, &mut triggers);
    assert_eq!(hits.get(), 2);
}

#[test]
fn backward_trigger_fires_only_when_scrolling_up() {
    let (mut triggers, hits) = counting(0.3, Direction::Backward);
    let mut latches = TriggerLatches::new();
    latches.update(0.5, &mut triggers);
    assert_eq!(hits.get(), 0);
    latches.update(0.2, &mut triggers);
    assert_eq!(hits.get(), 1);
    latches.update(0.1, &mut triggers);
    latches.update(0.4, &mut triggers);
    assert_eq!(hits.get(), 1);
    latches.update(0.25, &mut triggers);
    assert_eq!(hits.get(), 2);
}

#[test]
fn both_directions_fire_on_each_crossing() {
    let (mut triggers, hits) = counting(0.5, Direction::Both);
    let mut latches = TriggerLatches::new();
    for p in [0.6, 0.4, 0.6, 0.4] {
        latches.update(p, &mut triggers);
    }
    assert_eq!(hits.get(), 4);
}

#[test]
fn first_observation_counts_from_the_top_of_the_page() {
    let (mut triggers, hits) = counting(0.5, Direction::Forward);
    let mut latches = TriggerLatches::new();
    assert_eq!(latches.last_progress(), None);
    // Page restored mid-scroll: the threshold was passed on the way here.
    latches.update(0.8, &mut triggers);
    assert_eq!(hits.get(), 1);
    assert_eq!(latches.last_progress(), Some(0.8));
}

#[test]
fn large_jump_across_threshold_fires_once() {
    let (mut triggers, hits) = counting(0.5, Direction::Forward);
    let mut latches = TriggerLatches::new();
    latches.update(0.0, &mut triggers);
    let fired = latches.update(1.0, &mut triggers);
    assert_eq!(fired.len(), 1);
    assert_eq!(hits.get(), 1);
}

#[test]
fn trigger_at_start_fires_when_leaving_the_top() {
    let (mut triggers, hits) = counting(0.0, Direction::Forward);
    let mut latches = TriggerLatches::new();
    for p in [0.0, 0.5, 1.0, 0.0, 0.5] {
        latches.update(p, &mut triggers);
    }
    assert_eq!(hits.get(), 2);
}

#[test]
fn trigger_at_start_fires_both_ways() {
    let (mut triggers, hits) = counting(0.0, Direction::Both);
    let mut latches = TriggerLatches::new();
    latches.update(0.3, &mut triggers);
    assert_eq!(hits.get(), 1);
    latches.update(0.0, &mut triggers);
    assert_eq!(hits.get(), 2);
    latches.update(0.0, &mut triggers);
    assert_eq!(hits.get(), 2);
}

#[test]
fn trigger_at_end_rearms_after_returning_to_the_end() {
    let (mut triggers, hits) = counting(1.0, Direction::Backward);
    let mut latches = TriggerLatches::new();
    for p in [1.0, 0.8, 1.0, 0.9] {
        latches.update(p, &mut triggers);
    }
    assert_eq!(hits.get(), 2);
}
