use glam::{Mat4, Quat, Vec3};

/// Orbit rig with damped inertia and orthographic zoom.
///
/// Dragging sets an angular velocity that decays by `damping` each frame,
/// so releases coast to a stop. Dolly acts on `zoom` because the projection
/// is orthographic.
pub struct OrbitCamera {
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    pub zoom: f32,
    pub damping: f32,
    yaw_vel: f32,
    pitch_vel: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            // Start on +Z, matching the initial camera position.
            yaw: core::f32::consts::FRAC_PI_2,
            pitch: 0.0,
            distance: 5.0,
            zoom: 1.0,
            damping: 0.25,
            yaw_vel: 0.0,
            pitch_vel: 0.0,
        }
    }
}

impl OrbitCamera {
    pub fn update_from_input(&mut self, ctx: &egui::Context, ui_hijacked: bool) {
        if ui_hijacked {
            return;
        }
        ctx.input(|i| {
            if i.pointer.button_down(egui::PointerButton::Primary) {
                let d = i.pointer.delta();
                let k = 0.005f32;
                self.yaw_vel = -d.x * k;
                self.pitch_vel = -d.y * k;
            }
            let scroll = i.smooth_scroll_delta.y + i.raw_scroll_delta.y;
            if scroll.abs() > 0.0 {
                let factor = (scroll * 0.0015).exp();
                self.zoom = (self.zoom * factor).clamp(0.5, 4.0);
            }
        });
    }

    /// Advance the damped inertia; call once per frame after input.
    pub fn tick(&mut self) {
        self.yaw += self.yaw_vel;
        let lim = core::f32::consts::FRAC_PI_2 - 0.017;
        self.pitch = (self.pitch + self.pitch_vel).clamp(-lim, lim);
        let keep = 1.0 - self.damping;
        self.yaw_vel *= keep;
        self.pitch_vel *= keep;
    }

    pub fn eye(&self) -> Vec3 {
        Vec3::new(
            self.distance * self.yaw.cos() * self.pitch.cos(),
            self.distance * self.pitch.sin(),
            self.distance * self.yaw.sin() * self.pitch.cos(),
        )
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), Vec3::ZERO, Vec3::Y)
    }

    /// Camera-to-world rotation, consumed by the orientation lock.
    pub fn rotation(&self) -> Quat {
        Quat::from_mat4(&self.view().inverse())
    }
}
