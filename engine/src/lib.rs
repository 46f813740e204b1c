//! Divided-globe engine crate.
//! Grid lifecycle and view state; no GPU or window system here.
#![deny(missing_docs)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::dbg_macro, clippy::large_enum_variant)]

pub mod camera;
pub mod grid;
pub mod info;
pub mod manager;
pub mod orientation;
pub mod subdivision;
pub mod view;

/// Returns the engine version string from Cargo metadata.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
