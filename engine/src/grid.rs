//! Grid dataset retrieval, decode, and the face outline builder.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::subdivision::Subdivision;

/// One geodesic face outline in world space, at least 3 points, not closed.
pub type PolygonBoundary = Vec<[f32; 3]>;

/// Errors raised while fetching or decoding a grid dataset.
#[derive(thiserror::Error, Debug)]
pub enum GridError {
    /// Dataset could not be read.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Dataset content is not JSON of the expected shape.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

// Points arrive either as {x,y,z} objects or [x,y,z] tuples.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawPoint {
    Object { x: f32, y: f32, z: f32 },
    Tuple([f32; 3]),
}

impl From<RawPoint> for [f32; 3] {
    fn from(p: RawPoint) -> Self {
        match p {
            RawPoint::Object { x, y, z } => [x, y, z],
            RawPoint::Tuple(t) => t,
        }
    }
}

/// Source of precomputed grid datasets, keyed by subdivision level.
///
/// The trait seam lets tests substitute in-memory sources for the on-disk
/// files the viewer uses.
pub trait GridSource {
    /// Fetch and decode the boundary list for `level`, ordered as stored.
    fn fetch(&self, level: Subdivision) -> Result<Vec<PolygonBoundary>, GridError>;
}

/// Reads `sub{level}coords.json` files from a data directory.
pub struct FileGridSource {
    data_dir: PathBuf,
}

impl FileGridSource {
    /// Create a source rooted at `data_dir`.
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self { data_dir: data_dir.as_ref().to_path_buf() }
    }

    /// Path of the dataset file for `level`.
    #[must_use]
    pub fn dataset_path(&self, level: Subdivision) -> PathBuf {
        self.data_dir.join(level.dataset_file_name())
    }
}

impl GridSource for FileGridSource {
    fn fetch(&self, level: Subdivision) -> Result<Vec<PolygonBoundary>, GridError> {
        let file = File::open(self.dataset_path(level))?;
        let raw: Vec<Vec<RawPoint>> = serde_json::from_reader(BufReader::new(file))?;
        Ok(raw.into_iter().map(|b| b.into_iter().map(Into::into).collect()).collect())
    }
}

/// Fetch the dataset for `level`, degrading to an empty list on failure.
///
/// Failures go to the log only; the globe stays visible without a grid
/// until the next reload. No retry.
pub fn load(source: &dyn GridSource, level: Subdivision) -> Vec<PolygonBoundary> {
    match source.fetch(level) {
        Ok(boundaries) => boundaries,
        Err(e) => {
            log::warn!("[grid] load failed for level {level}: {e}");
            Vec::new()
        }
    }
}

/// Close a face outline by appending a copy of its first point.
///
/// The input is left untouched; the result has `N + 1` points with the last
/// equal to the first. An empty boundary is a precondition violation and
/// yields an empty loop.
#[must_use]
pub fn close_loop(boundary: &[[f32; 3]]) -> Vec<[f32; 3]> {
    debug_assert!(!boundary.is_empty(), "degenerate face boundary");
    let Some(&first) = boundary.first() else {
        return Vec::new();
    };
    let mut closed = Vec::with_capacity(boundary.len() + 1);
    closed.extend_from_slice(boundary);
    closed.push(first);
    closed
}
