//! Geodesic subdivision levels and their derived constants.

use std::fmt;

/// Total surface area of the Earth in km², used for the per-face estimate.
pub const EARTH_AREA_KM2: f64 = 510_100_000.0;

/// Grid resolution. Level N divides the globe into `12 * 6^N` faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Subdivision {
    /// 72 faces.
    One,
    /// 432 faces.
    Two,
    /// 2,592 faces.
    Three,
    /// 15,552 faces.
    Four,
    /// 93,312 faces.
    Five,
}

/// A numeric level outside 1..=5.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("subdivision level {0} not in 1..=5")]
pub struct InvalidLevel(pub u8);

impl Subdivision {
    /// The five levels in ascending order, as offered by the GUI selector.
    pub const ALL: [Self; 5] = [Self::One, Self::Two, Self::Three, Self::Four, Self::Five];

    /// Numeric level in 1..=5.
    #[must_use]
    pub fn level(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
            Self::Four => 4,
            Self::Five => 5,
        }
    }

    /// Number of grid faces at this level: `12 * 6^level`.
    #[must_use]
    pub fn face_count(self) -> u64 {
        12 * 6u64.pow(u32::from(self.level()))
    }

    /// Radius of the displayed sphere at this level.
    ///
    /// Levels 1 and 2 sit slightly deeper so the coarser outlines clear the
    /// surface; hand-tuned constants carried over unchanged.
    #[must_use]
    pub fn sphere_radius(self) -> f32 {
        match self {
            Self::One => 1.672,
            Self::Two => 1.692,
            _ => 1.6975,
        }
    }

    /// File name of the precomputed coordinate dataset for this level.
    #[must_use]
    pub fn dataset_file_name(self) -> String {
        format!("sub{}coords.json", self.level())
    }

    /// Approximate area of one face in km².
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn face_area_km2(self) -> f64 {
        EARTH_AREA_KM2 / self.face_count() as f64
    }
}

impl TryFrom<u8> for Subdivision {
    type Error = InvalidLevel;

    fn try_from(level: u8) -> Result<Self, InvalidLevel> {
        match level {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            4 => Ok(Self::Four),
            5 => Ok(Self::Five),
            other => Err(InvalidLevel(other)),
        }
    }
}

impl fmt::Display for Subdivision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.level())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_round_trip() {
        for level in Subdivision::ALL {
            assert_eq!(Subdivision::try_from(level.level()), Ok(level));
        }
        assert_eq!(Subdivision::try_from(0), Err(InvalidLevel(0)));
        assert_eq!(Subdivision::try_from(6), Err(InvalidLevel(6)));
    }

    #[test]
    fn dataset_names_are_level_keyed() {
        assert_eq!(Subdivision::One.dataset_file_name(), "sub1coords.json");
        assert_eq!(Subdivision::Five.dataset_file_name(), "sub5coords.json");
    }
}
