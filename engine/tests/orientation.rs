use engine::orientation::OrientationLock;
use glam::Quat;

fn assert_quat_eq(a: Quat, b: Quat) {
    // Same rotation, allowing for sign ambiguity.
    assert!(a.dot(b).abs() > 1.0 - 1e-5, "{a:?} != {b:?}");
}

#[test]
fn disengaged_lock_yields_nothing() {
    let lock = OrientationLock::default();
    assert!(!lock.engaged());
    assert!(lock.globe_rotation(Quat::from_rotation_y(0.7)).is_none());
}

#[test]
fn globe_tracks_camera_relative_to_capture() {
    let r0 = Quat::from_euler(glam::EulerRot::YXZ, 0.4, -0.2, 0.0);
    let mut lock = OrientationLock::default();
    lock.engage(r0);

    // At the capture rotation the globe is upright.
    assert_quat_eq(lock.globe_rotation(r0).unwrap(), Quat::IDENTITY);

    // Camera rotated to R: globe = normalize(R * inverse(R0)).
    let r = Quat::from_euler(glam::EulerRot::YXZ, 1.3, 0.5, 0.0);
    let expected = (r * r0.inverse()).normalize();
    assert_quat_eq(lock.globe_rotation(r).unwrap(), expected);
}

#[test]
fn result_is_normalized() {
    let r0 = Quat::from_rotation_x(0.3);
    let mut lock = OrientationLock::default();
    lock.engage(r0);
    let q = lock.globe_rotation(Quat::from_rotation_y(2.1)).unwrap();
    assert!((q.length() - 1.0).abs() < 1e-6);
}

#[test]
fn release_keeps_last_rotation_and_reengage_recaptures() {
    let mut lock = OrientationLock::default();
    lock.engage(Quat::from_rotation_y(0.5));
    let last = lock.globe_rotation(Quat::from_rotation_y(1.0)).unwrap();

    lock.release();
    // No further updates come from the lock; the caller keeps `last` as-is.
    assert!(lock.globe_rotation(Quat::from_rotation_y(2.0)).is_none());
    let _ = last;

    // Re-enabling captures a fresh reference, not the old one.
    let r1 = Quat::from_rotation_y(2.0);
    lock.engage(r1);
    assert_quat_eq(lock.globe_rotation(r1).unwrap(), Quat::IDENTITY);
}
