//! User-toggleable view state and its GUI command bridge.

use crate::subdivision::Subdivision;

/// The four user-controlled flags and selections.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewState {
    /// Textured material vs. flat color on the globe.
    pub texture: bool,
    /// Grid outlines shown or hidden.
    pub wireframe: bool,
    /// Orientation lock: globe held fixed relative to the camera.
    pub fixed: bool,
    /// Active geodesic subdivision level.
    pub subdivision: Subdivision,
}

impl Default for ViewState {
    fn default() -> Self {
        Self { texture: true, wireframe: true, fixed: false, subdivision: Subdivision::Three }
    }
}

/// A state transition requested by a GUI control.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Texture checkbox.
    SetTexture(bool),
    /// Wireframe checkbox.
    SetWireframe(bool),
    /// Orientation-lock checkbox.
    SetFixed(bool),
    /// Subdivision selector.
    SetSubdivision(Subdivision),
}

/// The single side effect a command translates to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Swap the globe material (true = textured).
    SwapMaterial(bool),
    /// Show or hide every face outline.
    SetGridVisible(bool),
    /// Capture the orientation reference from the current camera rotation.
    CaptureOrientation,
    /// Stop re-applying the lock; the globe keeps its last rotation.
    ReleaseOrientation,
    /// Load the grid for a new level and refresh the info text.
    ReloadGrid(Subdivision),
    /// The command changed nothing.
    None,
}

impl ViewState {
    /// Apply one command, returning the side effect the caller must run.
    ///
    /// Commands are funneled through here instead of mutating state from
    /// widget callbacks, so each field change maps to exactly one effect.
    pub fn apply(&mut self, command: Command) -> Effect {
        match command {
            Command::SetTexture(flag) => {
                if self.texture == flag {
                    return Effect::None;
                }
                self.texture = flag;
                Effect::SwapMaterial(flag)
            }
            Command::SetWireframe(flag) => {
                if self.wireframe == flag {
                    return Effect::None;
                }
                self.wireframe = flag;
                Effect::SetGridVisible(flag)
            }
            Command::SetFixed(flag) => {
                if self.fixed == flag {
                    return Effect::None;
                }
                self.fixed = flag;
                if flag {
                    Effect::CaptureOrientation
                } else {
                    Effect::ReleaseOrientation
                }
            }
            Command::SetSubdivision(level) => {
                if self.subdivision == level {
                    return Effect::None;
                }
                self.subdivision = level;
                Effect::ReloadGrid(level)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_change_yields_one_effect() {
        let mut state = ViewState::default();
        assert_eq!(state.apply(Command::SetTexture(false)), Effect::SwapMaterial(false));
        assert_eq!(state.apply(Command::SetTexture(false)), Effect::None);
        assert_eq!(state.apply(Command::SetWireframe(false)), Effect::SetGridVisible(false));
        assert_eq!(state.apply(Command::SetFixed(true)), Effect::CaptureOrientation);
        assert_eq!(state.apply(Command::SetFixed(false)), Effect::ReleaseOrientation);
        assert_eq!(
            state.apply(Command::SetSubdivision(Subdivision::Five)),
            Effect::ReloadGrid(Subdivision::Five)
        );
        assert_eq!(state.apply(Command::SetSubdivision(Subdivision::Five)), Effect::None);
        assert_eq!(state.subdivision, Subdivision::Five);
    }
}
