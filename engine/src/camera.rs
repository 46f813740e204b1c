//! Orthographic framing: fixed vertical extent, aspect-derived bounds.

use glam::Mat4;

/// Fixed vertical visible extent of the orthographic camera.
pub const FRUSTUM_SIZE: f32 = 7.0;

/// Orthographic projection bounds derived from the window aspect ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrthoBounds {
    /// Left plane.
    pub left: f32,
    /// Right plane.
    pub right: f32,
    /// Top plane.
    pub top: f32,
    /// Bottom plane.
    pub bottom: f32,
}

impl OrthoBounds {
    /// Bounds for `aspect = width / height` with the vertical extent fixed
    /// at `frustum_size`. Recomputed on every resize; near/far and the
    /// camera position are untouched.
    #[must_use]
    pub fn from_aspect(frustum_size: f32, aspect: f32) -> Self {
        let half_h = frustum_size / 2.0;
        let half_w = frustum_size * aspect / 2.0;
        Self { left: -half_w, right: half_w, top: half_h, bottom: -half_h }
    }

    /// Projection matrix with the bounds scaled by `1 / zoom`.
    /// Dollying an orthographic camera changes zoom, not position.
    #[must_use]
    pub fn projection(&self, znear: f32, zfar: f32, zoom: f32) -> Mat4 {
        let z = zoom.max(1e-4);
        Mat4::orthographic_rh(
            self.left / z,
            self.right / z,
            self.bottom / z,
            self.top / z,
            znear,
            zfar,
        )
    }
}
