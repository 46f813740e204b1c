//! Grid lifecycle: owns the displayed face outlines and serializes reloads.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;

use crate::grid::{self, GridSource, PolygonBoundary};
use crate::subdivision::Subdivision;

/// One renderable face outline with its visibility flag.
#[derive(Clone, Debug)]
pub struct FaceOutline {
    /// Closed loop: the first point repeated at the end.
    pub points: Vec<[f32; 3]>,
    /// Mirrors the wireframe toggle.
    pub visible: bool,
}

struct LoadResult {
    generation: u64,
    boundaries: Vec<PolygonBoundary>,
}

/// Owns the live set of face outlines and the reload lifecycle.
///
/// Reloads run on background threads. Each request bumps a generation
/// counter and completed loads carry the generation they were issued under;
/// anything but the current generation is discarded on arrival
/// (cancel-and-supersede). `poll` must be called regularly — the viewer
/// calls it once per frame — to integrate finished loads.
pub struct GridManager {
    source: Arc<dyn GridSource + Send + Sync>,
    faces: Vec<FaceOutline>,
    level: Subdivision,
    generation: u64,
    in_flight: bool,
    tx: Sender<LoadResult>,
    rx: Receiver<LoadResult>,
}

impl GridManager {
    /// Create a manager with no faces loaded yet.
    pub fn new(source: Arc<dyn GridSource + Send + Sync>, level: Subdivision) -> Self {
        let (tx, rx) = mpsc::channel();
        Self { source, faces: Vec::new(), level, generation: 0, in_flight: false, tx, rx }
    }

    /// Currently displayed outlines.
    #[must_use]
    pub fn faces(&self) -> &[FaceOutline] {
        &self.faces
    }

    /// Level of the outlines displayed or being loaded.
    #[must_use]
    pub fn level(&self) -> Subdivision {
        self.level
    }

    /// True while a reload is outstanding.
    #[must_use]
    pub fn pending(&self) -> bool {
        self.in_flight
    }

    /// Drop the current grid and request `level` from the source.
    ///
    /// The old outlines leave the scene immediately; the new ones arrive
    /// through `poll`. Calling again before completion supersedes the
    /// earlier request, whose result will be ignored when it lands.
    pub fn reload(&mut self, level: Subdivision) {
        self.faces.clear();
        self.level = level;
        self.generation += 1;
        self.in_flight = true;
        let generation = self.generation;
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        thread::spawn(move || {
            let boundaries = grid::load(source.as_ref(), level);
            // A closed receiver means the manager is gone; nothing to do.
            let _ = tx.send(LoadResult { generation, boundaries });
        });
    }

    /// Integrate any finished reload without blocking.
    ///
    /// New outlines are installed with `visible = wireframe_visible`, so a
    /// toggle flipped while the load was in flight is honored. Returns true
    /// when a new dataset was installed and drawables need rebuilding.
    pub fn poll(&mut self, wireframe_visible: bool) -> bool {
        let mut installed = false;
        while let Ok(result) = self.rx.try_recv() {
            if result.generation != self.generation {
                continue; // superseded reload
            }
            self.faces = result
                .boundaries
                .iter()
                .map(|b| FaceOutline { points: grid::close_loop(b), visible: wireframe_visible })
                .collect();
            self.in_flight = false;
            installed = true;
        }
        installed
    }

    /// Set every outline's visibility (the wireframe toggle).
    pub fn set_visible(&mut self, visible: bool) {
        for face in &mut self.faces {
            face.visible = visible;
        }
    }

    /// True when outlines exist and are visible.
    #[must_use]
    pub fn grid_visible(&self) -> bool {
        self.faces.first().map_or(false, |f| f.visible)
    }
}
