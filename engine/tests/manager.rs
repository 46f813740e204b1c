use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use engine::grid::{GridError, GridSource, PolygonBoundary};
use engine::manager::GridManager;
use engine::subdivision::Subdivision;

fn triangle(seed: f32) -> PolygonBoundary {
    vec![[seed, 0.0, 0.0], [0.0, seed, 0.0], [0.0, 0.0, seed]]
}

/// Immediate in-memory datasets keyed by level.
struct StaticSource(HashMap<u8, Vec<PolygonBoundary>>);

impl GridSource for StaticSource {
    fn fetch(&self, level: Subdivision) -> Result<Vec<PolygonBoundary>, GridError> {
        self.0.get(&level.level()).cloned().ok_or_else(|| {
            GridError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "no dataset"))
        })
    }
}

/// Always fails, as an unreachable dataset would.
struct FailingSource;

impl GridSource for FailingSource {
    fn fetch(&self, _level: Subdivision) -> Result<Vec<PolygonBoundary>, GridError> {
        Err(GridError::Io(std::io::Error::new(std::io::ErrorKind::Other, "unreachable")))
    }
}

/// Blocks each fetch until the per-level gate is released, so tests control
/// the completion order of overlapping reloads.
struct GatedSource {
    datasets: HashMap<u8, Vec<PolygonBoundary>>,
    gates: Mutex<HashMap<u8, Receiver<()>>>,
}

impl GatedSource {
    fn new(datasets: HashMap<u8, Vec<PolygonBoundary>>, levels: &[Subdivision]) -> (Self, HashMap<u8, Sender<()>>) {
        let mut gates = HashMap::new();
        let mut keys = HashMap::new();
        for level in levels {
            let (tx, rx) = mpsc::channel();
            gates.insert(level.level(), rx);
            keys.insert(level.level(), tx);
        }
        (Self { datasets, gates: Mutex::new(gates) }, keys)
    }
}

impl GridSource for GatedSource {
    fn fetch(&self, level: Subdivision) -> Result<Vec<PolygonBoundary>, GridError> {
        let gate = self.gates.lock().unwrap().remove(&level.level());
        if let Some(gate) = gate {
            gate.recv().ok();
        }
        Ok(self.datasets.get(&level.level()).cloned().unwrap_or_default())
    }
}

/// Poll until an install lands or the deadline passes.
fn poll_until_installed(manager: &mut GridManager, wireframe: bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        if manager.poll(wireframe) {
            return true;
        }
        std::thread::sleep(Duration::from_millis(2));
    }
    false
}

#[test]
fn reload_installs_closed_outlines() {
    let source = StaticSource(HashMap::from([(1, vec![triangle(1.0), triangle(2.0)])]));
    let mut manager = GridManager::new(Arc::new(source), Subdivision::One);
    manager.reload(Subdivision::One);
    assert!(manager.pending());
    assert!(poll_until_installed(&mut manager, true));
    assert!(!manager.pending());
    assert_eq!(manager.faces().len(), 2);
    for face in manager.faces() {
        assert_eq!(face.points.len(), 4, "triangle closed to 4 points");
        assert_eq!(face.points.first(), face.points.last());
        assert!(face.visible);
    }
}

#[test]
fn install_honors_wireframe_flag_at_completion() {
    let source = StaticSource(HashMap::from([(2, vec![triangle(1.0)])]));
    let mut manager = GridManager::new(Arc::new(source), Subdivision::Two);
    manager.reload(Subdivision::Two);
    // Wireframe was toggled off while the load was in flight.
    assert!(poll_until_installed(&mut manager, false));
    assert!(manager.faces().iter().all(|f| !f.visible));
    assert!(!manager.grid_visible());
}

#[test]
fn wireframe_toggle_restores_every_outline() {
    let source = StaticSource(HashMap::from([(3, vec![triangle(1.0), triangle(2.0), triangle(3.0)])]));
    let mut manager = GridManager::new(Arc::new(source), Subdivision::Three);
    manager.reload(Subdivision::Three);
    assert!(poll_until_installed(&mut manager, true));

    manager.set_visible(false);
    assert!(manager.faces().iter().all(|f| !f.visible));
    manager.set_visible(true);
    assert!(manager.faces().iter().all(|f| f.visible));
    assert!(manager.grid_visible());
}

#[test]
fn newer_reload_supersedes_unfinished_one() {
    let datasets = HashMap::from([(1, vec![triangle(1.0)]), (2, vec![triangle(2.0), triangle(4.0)])]);
    let (source, gates) = GatedSource::new(datasets, &[Subdivision::One, Subdivision::Two]);
    let mut manager = GridManager::new(Arc::new(source), Subdivision::One);

    manager.reload(Subdivision::One);
    manager.reload(Subdivision::Two); // supersedes before level 1 resolves
    assert!(manager.faces().is_empty(), "old faces removed immediately");

    // Let the stale level-1 load finish first; its result must be dropped.
    gates[&1].send(()).unwrap();
    std::thread::sleep(Duration::from_millis(50));
    assert!(!manager.poll(true), "stale generation discarded");
    assert!(manager.faces().is_empty());
    assert!(manager.pending());

    gates[&2].send(()).unwrap();
    assert!(poll_until_installed(&mut manager, true));
    assert_eq!(manager.faces().len(), 2, "only level-2 faces in the scene");
    assert_eq!(manager.level(), Subdivision::Two);
}

#[test]
fn loader_failure_leaves_empty_scene_without_panic() {
    let mut manager = GridManager::new(Arc::new(FailingSource), Subdivision::Four);
    manager.reload(Subdivision::Four);
    // The failed load still completes the reload, with zero faces.
    assert!(poll_until_installed(&mut manager, true));
    assert!(manager.faces().is_empty());
    assert!(!manager.pending());
    assert!(!manager.grid_visible());
}
