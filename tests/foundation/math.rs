//! Integration tests for spatial math
//!
//! Tests vectors, block positions, rotations, and local frames.

use voxecute_foundation::{BlockPos, Rotation, Vec3};

fn close(a: Vec3, b: Vec3) -> bool {
    a.distance(b) < 1e-9
}

// =============================================================================
// Vectors and Blocks
// =============================================================================

#[test]
fn vector_arithmetic() {
    let a = Vec3::new(1.0, 2.0, 3.0);
    let b = Vec3::new(0.5, -1.0, 2.0);
    assert_eq!(a + b, Vec3::new(1.5, 1.0, 5.0));
    assert_eq!(a - b, Vec3::new(0.5, 3.0, 1.0));
    assert_eq!(a * 2.0, Vec3::new(2.0, 4.0, 6.0));
    assert_eq!(a.axis(1), 2.0);
    assert_eq!(a.with_axis(2, 0.0), Vec3::new(1.0, 2.0, 0.0));
}

#[test]
fn block_containing_floors() {
    assert_eq!(BlockPos::containing(Vec3::new(-0.5, 64.9, 3.0)), BlockPos::new(-1, 64, 3));
    assert_eq!(BlockPos::new(2, 5, -3).bottom_center(), Vec3::new(2.5, 5.0, -2.5));
}

// =============================================================================
// Rotations
// =============================================================================

#[test]
fn rotation_is_normalized() {
    let r = Rotation::new(270.0, 120.0);
    assert_eq!(r.yaw(), -90.0);
    assert_eq!(r.pitch(), 90.0);
    let nan = Rotation::new(f64::NAN, f64::NAN);
    assert_eq!((nan.yaw(), nan.pitch()), (0.0, 0.0));
}

#[test]
fn local_frame_at_zero_rotation() {
    let frame = Rotation::new(0.0, 0.0).local_frame();
    let origin = Vec3::new(10.0, 64.0, 10.0);
    assert!(close(frame.offset(origin, 0.0, 0.0, 1.0), Vec3::new(10.0, 64.0, 11.0)));
    assert!(close(frame.offset(origin, 1.0, 0.0, 0.0), Vec3::new(11.0, 64.0, 10.0)));
    assert!(close(frame.offset(origin, 0.0, 1.0, 0.0), Vec3::new(10.0, 65.0, 10.0)));
}

#[test]
fn look_at_points_forward() {
    let eye = Vec3::new(0.0, 0.0, 0.0);
    let r = eye.look_at(Vec3::new(0.0, 0.0, 10.0));
    assert!(r.yaw().abs() < 1e-9);
    let forward = r.local_frame().offset(eye, 0.0, 0.0, 1.0);
    assert!(close(forward, Vec3::new(0.0, 0.0, 1.0)));

    let up = eye.look_at(Vec3::new(0.0, 5.0, 5.0));
    assert!((up.pitch() + 45.0).abs() < 1e-9);
}
