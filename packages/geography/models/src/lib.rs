#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Indian state reference points.
//!
//! Incidents carry only a state name, so every marker is pinned to a fixed
//! reference point (the state's major city center). State names are the
//! feed's spelling, without spaces (`"TamilNadu"`, `"WestBengal"`).

/// Longitude/latitude pair in WGS84 degrees, longitude first.
pub type LonLat = [f64; 2];

/// Reference point for each supported state, in display order.
pub const STATE_COORDS: &[(&str, LonLat)] = &[
    ("Maharashtra", [72.8777, 19.0760]),
    ("Gujarat", [72.5714, 23.0225]),
    ("Delhi", [77.1025, 28.7041]),
    ("Odisha", [85.8245, 20.2961]),
    ("TamilNadu", [80.2707, 13.0827]),
    ("Karnataka", [77.5946, 12.9716]),
    ("Kerala", [76.2711, 9.9312]),
    ("WestBengal", [88.3639, 22.5726]),
    ("Rajasthan", [75.7873, 26.9124]),
    ("Bihar", [85.1376, 25.5941]),
    ("Assam", [91.7362, 26.2006]),
];

/// Returns the reference point for a state name.
///
/// Matching is exact; unknown states return `None` and are left off the
/// map.
#[must_use]
pub fn state_coords(state: &str) -> Option<LonLat> {
    STATE_COORDS
        .iter()
        .find(|(name, _)| *name == state)
        .map(|(_, coords)| *coords)
}

/// Returns all supported state names in display order.
pub fn state_names() -> impl Iterator<Item = &'static str> {
    STATE_COORDS.iter().map(|(name, _)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn looks_up_known_state() {
        assert_eq!(state_coords("Kerala"), Some([76.2711, 9.9312]));
        assert_eq!(state_coords("WestBengal"), Some([88.3639, 22.5726]));
    }

    #[test]
    fn spelling_must_match_exactly() {
        assert_eq!(state_coords("West Bengal"), None);
        assert_eq!(state_coords("kerala"), None);
        assert_eq!(state_coords("Goa"), None);
    }

    #[test]
    fn coordinates_fall_inside_india() {
        for (name, [lon, lat]) in STATE_COORDS {
            assert!((68.0..=98.0).contains(lon), "{name} longitude {lon}");
            assert!((6.0..=37.0).contains(lat), "{name} latitude {lat}");
        }
        assert_eq!(state_names().count(), 11);
    }
}
