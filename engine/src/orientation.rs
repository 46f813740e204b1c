//! Camera-relative orientation lock.

use glam::Quat;

/// Keeps the globe's apparent orientation fixed relative to the camera.
///
/// On enable, the inverse of the camera rotation is captured as a reference.
/// Each frame while engaged, the globe rotation is recomputed as
/// `camera * reference`, so however the camera orbits, the face the user
/// sees stays put.
#[derive(Clone, Copy, Debug, Default)]
pub struct OrientationLock {
    reference: Option<Quat>,
}

impl OrientationLock {
    /// Capture the reference from the current camera rotation.
    /// Re-engaging recaptures; an old reference is never reused.
    pub fn engage(&mut self, camera_rotation: Quat) {
        self.reference = Some(camera_rotation.inverse());
    }

    /// Drop the reference. The globe keeps whatever rotation it last had.
    pub fn release(&mut self) {
        self.reference = None;
    }

    /// True while engaged.
    #[must_use]
    pub fn engaged(&self) -> bool {
        self.reference.is_some()
    }

    /// Globe rotation for this frame, `normalize(camera * reference)`, or
    /// `None` while the lock is off.
    #[must_use]
    pub fn globe_rotation(&self, camera_rotation: Quat) -> Option<Quat> {
        self.reference.map(|r| (camera_rotation * r).normalize())
    }
}
