//! Spherical Mercator projection onto the fixed map canvas.

use disaster_map_geography_models::LonLat;

/// A Mercator projection centered on a geographic point.
///
/// The center maps to the middle of a `width` x `height` canvas; `scale` is
/// pixels per radian of longitude. Screen `y` grows downwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub scale: f64,
    pub center: LonLat,
    pub width: f64,
    pub height: f64,
}

/// Latitude limit of the Mercator y-axis.
const MAX_LATITUDE: f64 = 85.051_128_78;

impl Projection {
    /// The dashboard's view of India.
    pub const INDIA: Self = Self {
        scale: 700.0,
        center: [80.0, 15.0],
        width: 800.0,
        height: 600.0,
    };

    /// Projects a longitude/latitude pair to canvas coordinates.
    #[must_use]
    pub fn project(&self, [lon, lat]: LonLat) -> [f64; 2] {
        let [center_lon, center_lat] = self.center;
        let x = self.width / 2.0 + self.scale * (lon - center_lon).to_radians();
        let y = self.height / 2.0 - self.scale * (mercator_y(lat) - mercator_y(center_lat));
        [x, y]
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::INDIA
    }
}

fn mercator_y(lat: f64) -> f64 {
    let phi = lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    (std::f64::consts::FRAC_PI_4 + phi / 2.0).tan().ln()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: [f64; 2], b: [f64; 2]) -> bool {
        (a[0] - b[0]).abs() < 1e-6 && (a[1] - b[1]).abs() < 1e-6
    }

    #[test]
    fn center_maps_to_canvas_middle() {
        assert!(close(Projection::INDIA.project([80.0, 15.0]), [400.0, 300.0]));
    }

    #[test]
    fn east_is_right_and_north_is_up() {
        let p = Projection::INDIA;
        let [x, y] = p.project([85.0, 25.0]);
        assert!(x > 400.0);
        assert!(y < 300.0);
    }

    #[test]
    fn one_degree_of_longitude_is_scale_radians() {
        let p = Projection::INDIA;
        let [x1, _] = p.project([80.0, 15.0]);
        let [x2, _] = p.project([81.0, 15.0]);
        assert!((x2 - x1 - 700.0 * 1f64.to_radians()).abs() < 1e-9);
    }

    #[test]
    fn poles_stay_finite() {
        let [_, y] = Projection::INDIA.project([80.0, 90.0]);
        assert!(y.is_finite());
    }
}
