//! Integration tests for coordinate notation

use voxecute_foundation::{Rotation, Vec3};
use voxecute_language::{CoordKind, PositionExpr, RotationExpr};

fn close(a: Vec3, b: Vec3) -> bool {
    a.distance(b) < 1e-9
}

#[test]
fn relative_positions_follow_the_origin() {
    let expr = PositionExpr::parse("~1 ~-1 ~1").unwrap();
    for origin in [Vec3::ZERO, Vec3::new(10.0, 64.0, -3.5), Vec3::new(-7.25, 0.0, 2.0)] {
        let at = expr.resolve(origin, Rotation::new(33.0, 12.0)).unwrap();
        assert!(close(at, origin + Vec3::new(1.0, -1.0, 1.0)));
    }
}

#[test]
fn absolute_positions_ignore_the_origin() {
    let expr = PositionExpr::parse("1 2 3").unwrap();
    for origin in [Vec3::ZERO, Vec3::new(10.0, 64.0, -3.5)] {
        assert_eq!(expr.resolve(origin, Rotation::default()).unwrap(), Vec3::new(1.0, 2.0, 3.0));
    }
}

#[test]
fn centred_parse_shifts_integer_x_and_z() {
    let expr = PositionExpr::parse_centered("1 2 3").unwrap();
    assert_eq!(expr.resolve(Vec3::ZERO, Rotation::default()).unwrap(), Vec3::new(1.5, 2.0, 3.5));
    let fractional = PositionExpr::parse_centered("1.25 2 ~").unwrap();
    assert_eq!(
        fractional.resolve(Vec3::new(0.0, 0.0, 4.0), Rotation::default()).unwrap(),
        Vec3::new(1.25, 2.0, 4.0)
    );
}

#[test]
fn local_positions_use_the_rotation() {
    let expr = PositionExpr::parse("^ ^ ^2").unwrap();
    assert!(expr.is_local());
    let origin = Vec3::new(0.0, 64.0, 0.0);
    let south = expr.resolve(origin, Rotation::new(0.0, 0.0)).unwrap();
    assert!(close(south, Vec3::new(0.0, 64.0, 2.0)));
    let west = expr.resolve(origin, Rotation::new(90.0, 0.0)).unwrap();
    assert!(close(west, Vec3::new(-2.0, 64.0, 0.0)));
}

#[test]
fn mixing_local_and_world_components_fails_at_resolve() {
    let expr = PositionExpr::parse("^1 ~ 3").unwrap();
    let err = expr.resolve(Vec3::ZERO, Rotation::default()).unwrap_err();
    assert!(err.is_notation());
}

#[test]
fn malformed_positions_fail_to_parse() {
    for text in ["~ ~", "1 2 3 4", "a b c", "~~~~"] {
        assert!(PositionExpr::parse(text).unwrap_err().is_parse(), "{text}");
    }
}

#[test]
fn rotations() {
    let expr = RotationExpr::parse("~90 -30").unwrap();
    assert_eq!(expr.coords()[0].kind, CoordKind::Relative);
    let r = expr.resolve(Rotation::new(100.0, 10.0)).unwrap();
    assert_eq!(r, Rotation::new(-170.0, -30.0));

    let local = RotationExpr::parse("^ ^").unwrap();
    assert!(local.resolve(Rotation::default()).unwrap_err().is_notation());
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn relative_offsets_add_to_the_origin(
            offset in prop::array::uniform3(-1000i32..1000),
            origin in prop::array::uniform3(-1.0e4f64..1.0e4),
        ) {
            let text = format!("~{} ~{} ~{}", offset[0], offset[1], offset[2]);
            let origin = Vec3::new(origin[0], origin[1], origin[2]);
            let resolved = PositionExpr::parse(&text).unwrap().resolve(origin, Rotation::default()).unwrap();
            let expected = origin + Vec3::new(offset[0].into(), offset[1].into(), offset[2].into());
            prop_assert!(close(resolved, expected));
        }

        #[test]
        fn arbitrary_text_never_panics(text in "[~^0-9 .\\-a-z]{0,16}") {
            let _ = PositionExpr::parse(&text);
            let _ = RotationExpr::parse(&text);
        }
    }
}
