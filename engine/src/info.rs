//! Info-panel text: face counts and approximate face areas.

use crate::subdivision::Subdivision;

/// Group an integer into comma-separated thousands: `2592` → `"2,592"`.
#[must_use]
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Format an area in km² with thousands grouping and exactly two decimals.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_area_km2(km2: f64) -> String {
    // Face areas stay far below u64::MAX / 100; round at two decimals.
    let cents = (km2 * 100.0).round().max(0.0) as u64;
    format!("{}.{:02}", group_thousands(cents / 100), cents % 100)
}

/// Two-line info text shown for a subdivision level.
#[must_use]
pub fn grid_info_text(level: Subdivision) -> String {
    format!(
        "Faces: 12*6^{} = {}\nFace area: ~{} km^2",
        level.level(),
        group_thousands(level.face_count()),
        format_area_km2(level.face_area_km2()),
    )
}
