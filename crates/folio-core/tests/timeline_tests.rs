// Host-side tests for the scroll timeline player.

use folio_core::*;
use std::cell::Cell;
use std::rc::Rc;

fn model_targets() -> Targets {
    let mut targets = Targets::new();
    targets.insert("model", Target::Transform(Transform::default()));
    targets
}

fn x_of(targets: &Targets) -> f32 {
    targets.transform(&TargetId::from("model")).unwrap().position.x
}

fn linear_x(range: (f32, f32), from: f32, to: f32) -> ScrollTimeline {
    let timeline = Timeline::new()
        .tween("model", "position.x", Some(from), to, range, "linear")
        .unwrap();
    ScrollTimeline::new(timeline)
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

#[test]
fn boundary_values_hold_before_and_after_the_segment() {
    let mut player = linear_x((0.2, 0.4), 0.0, 10.0);
    let mut targets = model_targets();
    for (p, want) in [(0.2, 0.0), (0.3, 5.0), (0.4, 10.0), (0.1, 0.0), (0.5, 10.0)] {
        player.apply(p, &mut targets);
        assert!(approx(x_of(&targets), want), "p={p}: got {}", x_of(&targets));
    }
}

#[test]
fn apply_is_idempotent() {
    let mut player = linear_x((0.0, 1.0), -3.0, 7.0);
    let mut once = model_targets();
    player.apply(0.37, &mut once);
    let mut many = model_targets();
    for _ in 0..5 {
        player.apply(0.37, &mut many);
    }
    assert_eq!(x_of(&once), x_of(&many));
}

#[test]
fn apply_is_path_independent() {
    let mut direct = model_targets();
    let mut player = linear_x((0.1, 0.9), 0.0, 4.0);
    player.apply(0.65, &mut direct);

    let mut jumped = model_targets();
    let mut player = linear_x((0.1, 0.9), 0.0, 4.0);
    for p in [0.0, 1.0, 0.3, 0.99, 0.12] {
        player.apply(p, &mut jumped);
    }
    player.apply(0.65, &mut jumped);
    assert_eq!(x_of(&direct), x_of(&jumped));
}

#[test]
fn progress_outside_unit_range_is_clamped() {
    let mut player = linear_x((0.0, 1.0), 1.0, 2.0);
    let mut a = model_targets();
    let mut b = model_targets();
    player.apply(-0.5, &mut a);
    player.apply(0.0, &mut b);
    assert_eq!(x_of(&a), x_of(&b));

    player.apply(1.5, &mut a);
    player.apply(1.0, &mut b);
    assert_eq!(x_of(&a), x_of(&b));
    assert!(approx(x_of(&a), 2.0));

    player.apply(f32::NAN, &mut a);
    assert!(approx(x_of(&a), 1.0));
}

#[test]
fn degenerate_segment_is_a_step() {
    let mut player = linear_x((0.5, 0.5), 0.0, 1.0);
    let mut targets = model_targets();
    player.apply(0.49, &mut targets);
    assert_eq!(x_of(&targets), 0.0);
    player.apply(0.5, &mut targets);
    assert_eq!(x_of(&targets), 1.0);
    player.apply(0.8, &mut targets);
    assert_eq!(x_of(&targets), 1.0);
}

#[test]
fn later_segment_wins_where_ranges_overlap() {
    let timeline = Timeline::new()
        .tween("model", "position.x", Some(0.0), 10.0, (0.0, 1.0), "linear")
        .unwrap()
        .tween("model", "position.x", Some(100.0), 200.0, (0.4, 0.6), "linear")
        .unwrap();
    let mut player = ScrollTimeline::new(timeline);
    let mut targets = model_targets();
    player.apply(0.5, &mut targets);
    assert!(approx(x_of(&targets), 150.0));
    // Outside its range the later segment gives way to the one still active.
    player.apply(0.9, &mut targets);
    assert!(approx(x_of(&targets), 9.0));
}

#[test]
fn chained_segments_compose_in_declaration_order() {
    let timeline = Timeline::new()
        .tween("model", "position.x", Some(0.0), 1.0, (0.0, 0.5), "linear")
        .unwrap()
        .tween("model", "position.x", None, 3.0, (0.5, 1.0), "linear")
        .unwrap();
    let mut player = ScrollTimeline::new(timeline);
    let mut targets = model_targets();
    player.apply(0.25, &mut targets);
    // The active first segment decides; the second's start is already latched.
    assert!(approx(x_of(&targets), 0.5));
    assert_eq!(player.resolved_from(1), Some(1.0));
    player.apply(0.5, &mut targets);
    assert!(approx(x_of(&targets), 1.0));
    player.apply(0.75, &mut targets);
    assert!(approx(x_of(&targets), 2.0));
}

#[test]
fn nearest_segment_decides_inside_a_gap() {
    let timeline = Timeline::new()
        .tween("model", "position.x", Some(0.0), 1.0, (0.0, 0.25), "linear")
        .unwrap()
        .tween("model", "position.x", Some(5.0), 6.0, (0.75, 1.0), "linear")
        .unwrap();
    let mut player = ScrollTimeline::new(timeline);
    let mut targets = model_targets();
    player.apply(0.3, &mut targets);
    assert!(approx(x_of(&targets), 1.0));
    player.apply(0.7, &mut targets);
    assert!(approx(x_of(&targets), 5.0));
    // Equidistant: the later declaration wins.
    player.apply(0.5, &mut targets);
    assert!(approx(x_of(&targets), 5.0));
}

#[test]
fn missing_target_is_skipped_until_it_appears() {
    let timeline = Timeline::new()
        .tween("model", "rotation.y", None, 1.0, (0.0, 1.0), "linear")
        .unwrap()
        .tween("post", "bloom_strength", Some(0.0), 1.0, (0.0, 1.0), "linear")
        .unwrap();
    let mut player = ScrollTimeline::new(timeline);
    let mut targets = Targets::new();
    targets.insert("post", Target::Post(PostParams::new().with("bloom_strength", 0.0)));

    player.apply(0.5, &mut targets);
    assert!(approx(
        targets.post(&TargetId::from("post")).unwrap().value("bloom_strength").unwrap(),
        0.5
    ));
    assert_eq!(player.resolved_from(0), None);

    let mut t = Transform::default();
    t.rotation.y = 0.5;
    targets.insert("model", Target::Transform(t));
    player.apply(0.5, &mut targets);
    let rot = targets.transform(&TargetId::from("model")).unwrap().rotation.y;
    assert_eq!(player.resolved_from(0), Some(0.5));
    assert!(approx(rot, 0.75));
}

#[test]
fn no_targets_means_no_op() {
    let mut player = linear_x((0.0, 1.0), 0.0, 1.0);
    let mut targets = Targets::new();
    let fired = player.apply(0.7, &mut targets);
    assert!(targets.is_empty());
    assert!(fired.is_empty());
}

#[test]
fn unknown_field_is_skipped_without_touching_other_fields() {
    let timeline = Timeline::new()
        .tween("model", "opacity", Some(0.0), 1.0, (0.0, 1.0), "linear")
        .unwrap()
        .tween("model", "scale", Some(1.0), 2.0, (0.0, 1.0), "linear")
        .unwrap();
    let mut player = ScrollTimeline::new(timeline);
    let mut targets = model_targets();
    player.apply(1.0, &mut targets);
    let t = targets.transform(&TargetId::from("model")).unwrap();
    assert!(approx(t.scale, 2.0));
}

#[test]
fn easing_shapes_the_interpolation() {
    let timeline = Timeline::new()
        .tween("model", "position.x", Some(0.0), 1.0, (0.0, 1.0), "power2.in")
        .unwrap();
    let mut player = ScrollTimeline::new(timeline);
    let mut targets = model_targets();
    player.apply(0.5, &mut targets);
    assert!(approx(x_of(&targets), 0.125));
}

#[test]
fn segment_constructor_validates_ranges() {
    let inverted = Segment::new("m", "scale", None, 1.0, 0.6, 0.4, Easing::Linear);
    assert!(matches!(inverted, Err(TimelineError::Inverted { .. })));
    let out = Segment::new("m", "scale", None, 1.0, -0.1, 0.4, Easing::Linear);
    assert_eq!(out, Err(TimelineError::OutOfRange(-0.1)));
    let bad_ease = Timeline::new().tween("m", "scale", None, 1.0, (0.0, 1.0), "wobble");
    assert!(matches!(bad_ease, Err(TimelineError::Easing(_))));
}

#[test]
fn apply_reports_fired_triggers() {
    let hits = Rc::new(Cell::new(0));
    let h = hits.clone();
    let timeline = Timeline::new().trigger(Trigger::new("half", 0.5, Direction::Forward, move || {
        h.set(h.get() + 1)
    }));
    let mut player = ScrollTimeline::new(timeline);
    let mut targets = Targets::new();
    assert!(player.apply(0.4, &mut targets).is_empty());
    let fired = player.apply(0.6, &mut targets);
    assert_eq!(fired.as_slice(), ["half".to_string()]);
    assert_eq!(hits.get(), 1);
}

#[test]
fn latches_survive_a_rebuild() {
    let hits = Rc::new(Cell::new(0));
    let make = |hits: Rc<Cell<u32>>| {
        Timeline::new().trigger(Trigger::new("t", 0.5, Direction::Forward, move || {
            hits.set(hits.get() + 1)
        }))
    };
    let mut targets = Targets::new();
    let mut player = ScrollTimeline::new(make(hits.clone()));
    player.apply(0.6, &mut targets);
    assert_eq!(hits.get(), 1);

    let mut rebuilt = ScrollTimeline::with_memory(make(hits.clone()), player.into_memory());
    rebuilt.apply(0.61, &mut targets);
    assert_eq!(hits.get(), 1, "rebuild must not re-fire a latched trigger");
}

#[test]
fn rebuild_keeps_resolved_starts() {
    let make = || {
        Timeline::new()
            .tween("model", "position.x", None, 10.0, (0.0, 1.0), "linear")
            .unwrap()
    };
    let mut targets = model_targets();
    let mut player = ScrollTimeline::new(make());
    player.apply(0.5, &mut targets);
    assert!(approx(x_of(&targets), 5.0));

    let mut rebuilt = ScrollTimeline::with_memory(make(), player.into_memory());
    assert_eq!(rebuilt.resolved_from(0), Some(0.0));
    rebuilt.apply(0.5, &mut targets);
    assert!(approx(x_of(&targets), 5.0), "x = {}", x_of(&targets));
    rebuilt.apply(0.0, &mut targets);
    assert!(approx(x_of(&targets), 0.0));
}

#[test]
fn rebuild_matches_starts_by_field_and_ordinal() {
    let make = |end: f32| {
        Timeline::new()
            .tween("model", "scale", None, 3.0, (0.0, end), "linear")
            .unwrap()
            .tween("model", "position.x", None, 10.0, (0.0, end), "linear")
            .unwrap()
    };
    let mut targets = model_targets();
    if let Some(m) = targets.transform_mut(&TargetId::from("model")) {
        m.position.x = 2.0;
    }
    let mut player = ScrollTimeline::new(make(1.0));
    player.apply(1.0, &mut targets);

    // New ranges after a layout change; starts still come from the first build.
    let mut rebuilt = ScrollTimeline::with_memory(make(0.5), player.into_memory());
    assert_eq!(rebuilt.resolved_from(0), Some(1.0));
    assert_eq!(rebuilt.resolved_from(1), Some(2.0));
    rebuilt.apply(0.25, &mut targets);
    assert!(approx(x_of(&targets), 6.0));
}
