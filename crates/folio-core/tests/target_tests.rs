// Host-side tests for animatable targets.

use folio_core::*;
use glam::Vec3;

#[test]
fn field_names_parse_and_display() {
    for name in ["position.x", "position.y", "position.z", "rotation.x", "rotation.y", "rotation.z", "scale"] {
        assert_eq!(Field::from(name).to_string(), name);
    }
    assert_eq!(Field::from("x"), Field::PositionX);
    assert_eq!(
        "bloom_strength".parse::<Field>(),
        Ok(Field::Param("bloom_strength".to_string()))
    );
}

#[test]
fn transform_exposes_spatial_fields_only() {
    let mut t = Transform::default();
    assert!(t.set(&Field::RotationY, 1.5));
    assert!(t.set(&Field::Scale, 4.0));
    assert_eq!(t.get(&Field::RotationY), Some(1.5));
    assert_eq!(t.scale, 4.0);
    assert!(!t.set(&Field::from("exposure"), 2.0));
    assert_eq!(t.get(&Field::from("exposure")), None);
}

#[test]
fn transform_matrix_places_the_origin_at_position() {
    let t = Transform {
        position: Vec3::new(1.0, -1.0, 0.5),
        rotation: Vec3::new(0.0, 0.7, 0.0),
        scale: 2.0,
    };
    let origin = t.matrix().transform_point3(Vec3::ZERO);
    assert!((origin - t.position).length() < 1e-5);
}

#[test]
fn post_params_write_only_declared_names() {
    let mut p = PostParams::new().with(PARAM_EXPOSURE, 1.0);
    assert!(p.set(&Field::from(PARAM_EXPOSURE), 1.4));
    assert_eq!(p.value(PARAM_EXPOSURE), Some(1.4));
    assert!(!p.set(&Field::from(PARAM_BLOOM_STRENGTH), 3.0));
    assert_eq!(p.value_or(PARAM_BLOOM_STRENGTH, 0.25), 0.25);
    assert!(!p.set(&Field::PositionX, 1.0));
}

#[test]
fn registry_tracks_slots_by_id() {
    let mut targets = Targets::new();
    assert!(targets.is_empty());
    let id = TargetId::from("model");
    assert!(targets.insert("model", Target::Transform(Transform::default())).is_none());
    assert!(targets.contains(&id));
    assert!(targets.transform(&id).is_some());
    assert!(targets.post(&id).is_none());

    if let Some(m) = targets.transform_mut(&id) {
        m.position.y = -1.0;
    }
    assert_eq!(targets.get(&id).and_then(|t| t.get(&Field::PositionY)), Some(-1.0));

    assert!(targets.remove(&id).is_some());
    assert_eq!(targets.len(), 0);
    assert!(targets.get_mut(&id).is_none());
}
