// Host-side tests for the easing registry.

use folio_core::*;

#[test]
fn every_registered_curve_starts_at_zero_and_ends_at_one() {
    for (name, easing) in EASING_NAMES {
        assert_eq!(easing.apply(0.0), 0.0, "{name} at 0");
        assert_eq!(easing.apply(1.0), 1.0, "{name} at 1");
    }
}

#[test]
fn input_is_clamped() {
    for (_, easing) in EASING_NAMES {
        assert_eq!(easing.apply(-2.0), 0.0);
        assert_eq!(easing.apply(3.0), 1.0);
        assert_eq!(easing.apply(f32::NAN), 0.0);
    }
}

#[test]
fn monotonic_curves_do_not_overshoot() {
    let monotonic = [
        Easing::Linear,
        Easing::QuadInOut,
        Easing::CubicOut,
        Easing::QuartIn,
        Easing::SineInOut,
        Easing::ExpoInOut,
    ];
    for e in monotonic {
        let mut prev = 0.0;
        for i in 1..=100 {
            let v = e.apply(i as f32 / 100.0);
            assert!(v >= prev - 1e-6, "{e:?} decreased at {i}");
            assert!((0.0..=1.0).contains(&v), "{e:?} left [0,1] at {i}");
            prev = v;
        }
    }
}

#[test]
fn back_and_elastic_overshoot() {
    assert!(Easing::BackIn.apply(0.2) < 0.0);
    assert!(Easing::BackOut.apply(0.8) > 1.0);
    let peak = (1..100)
        .map(|i| Easing::ElasticOut.apply(i as f32 / 100.0))
        .fold(f32::MIN, f32::max);
    assert!(peak > 1.0);
}

#[test]
fn lookup_by_gsap_and_short_names() {
    assert_eq!(Easing::from_name("none"), Ok(Easing::Linear));
    assert_eq!(Easing::from_name("power2.inOut"), Ok(Easing::CubicInOut));
    assert_eq!("cubic-in-out".parse::<Easing>(), Ok(Easing::CubicInOut));
    assert_eq!(Easing::from_name(" expo.out "), Ok(Easing::ExpoOut));
    assert_eq!(
        Easing::from_name("bounce.out"),
        Err(EasingError::Unknown("bounce.out".to_string()))
    );
}

#[test]
fn display_uses_registry_name() {
    assert_eq!(Easing::BackOut.to_string(), "back.out");
    assert_eq!(
        Easing::from_name(&Easing::ElasticInOut.to_string()),
        Ok(Easing::ElasticInOut)
    );
}

#[test]
fn cubic_bezier_matches_css_ease_midpoint() {
    // CSS `ease` is cubic-bezier(0.25, 0.1, 0.25, 1.0); at x = 0.5, y ≈ 0.8024.
    let ease = Easing::CubicBezier(0.25, 0.1, 0.25, 1.0);
    assert!((ease.apply(0.5) - 0.8024).abs() < 1e-3);
    let linear = Easing::CubicBezier(0.0, 0.0, 1.0, 1.0);
    assert!((linear.apply(0.3) - 0.3).abs() < 1e-4);
}
