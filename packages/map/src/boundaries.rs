//! State outlines converted from `GeoJSON` to projected SVG paths.

use std::fmt::Write as _;

use geo::{Coord, Geometry, LineString, MapCoords, Polygon};
use geojson::FeatureCollection;

use crate::projection::Projection;

/// Feature properties that may carry the state name, in lookup order.
const NAME_PROPERTIES: &[&str] = &["st_nm", "NAME_1", "name"];

/// One state's outline as SVG path data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateOutline {
    pub name: Option<String>,
    /// SVG `d` attribute in canvas coordinates.
    pub path: String,
}

/// Pre-projected state outlines, built once and reused for every render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoundaryLayer {
    outlines: Vec<StateOutline>,
}

impl BoundaryLayer {
    /// A layer with no outlines (boundary data unavailable).
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            outlines: Vec::new(),
        }
    }

    /// Projects every polygonal feature of `collection`.
    ///
    /// Features without geometry, with non-polygonal geometry, or whose
    /// geometry cannot be converted are skipped.
    #[must_use]
    pub fn from_features(collection: &FeatureCollection, projection: &Projection) -> Self {
        let mut outlines = Vec::with_capacity(collection.features.len());

        for feature in &collection.features {
            let Some(geometry) = feature.geometry.clone() else {
                continue;
            };
            let geometry: Geometry<f64> = match Geometry::try_from(geometry) {
                Ok(geometry) => geometry,
                Err(e) => {
                    log::warn!("Skipping boundary feature with invalid geometry: {e}");
                    continue;
                }
            };

            let projected = geometry.map_coords(|c: Coord<f64>| {
                let [x, y] = projection.project([c.x, c.y]);
                Coord { x, y }
            });

            let mut path = String::new();
            write_geometry(&mut path, &projected);
            if path.is_empty() {
                continue;
            }

            let name = NAME_PROPERTIES
                .iter()
                .find_map(|key| feature.property(key).and_then(|v| v.as_str()))
                .map(str::to_string);

            outlines.push(StateOutline { name, path });
        }

        log::debug!("Projected {} state outline(s)", outlines.len());
        Self { outlines }
    }

    #[must_use]
    pub fn outlines(&self) -> &[StateOutline] {
        &self.outlines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outlines.is_empty()
    }
}

fn write_geometry(out: &mut String, geometry: &Geometry<f64>) {
    match geometry {
        Geometry::Polygon(polygon) => write_polygon(out, polygon),
        Geometry::MultiPolygon(multi) => {
            for polygon in &multi.0 {
                write_polygon(out, polygon);
            }
        }
        Geometry::GeometryCollection(collection) => {
            for geometry in &collection.0 {
                write_geometry(out, geometry);
            }
        }
        _ => {}
    }
}

fn write_polygon(out: &mut String, polygon: &Polygon<f64>) {
    write_ring(out, polygon.exterior());
    for interior in polygon.interiors() {
        write_ring(out, interior);
    }
}

fn write_ring(out: &mut String, ring: &LineString<f64>) {
    for (idx, coord) in ring.coords().enumerate() {
        let command = if idx == 0 { 'M' } else { 'L' };
        let _ = write!(out, "{command}{:.2},{:.2}", coord.x, coord.y);
    }
    if ring.0.len() > 1 {
        out.push('Z');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collection(json: &serde_json::Value) -> FeatureCollection {
        FeatureCollection::try_from(geojson::GeoJson::from_json_value(json.clone()).unwrap())
            .unwrap()
    }

    #[test]
    fn projects_polygon_with_name() {
        let fc = collection(&serde_json::json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": {"st_nm": "Kerala"},
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[80.0, 15.0], [81.0, 15.0], [81.0, 16.0], [80.0, 15.0]]]
                }
            }]
        }));

        let layer = BoundaryLayer::from_features(&fc, &Projection::INDIA);
        assert_eq!(layer.outlines().len(), 1);
        let outline = &layer.outlines()[0];
        assert_eq!(outline.name.as_deref(), Some("Kerala"));
        assert!(outline.path.starts_with("M400.00,300.00L"));
        assert!(outline.path.ends_with('Z'));
    }

    #[test]
    fn multipolygon_yields_one_path_with_several_rings() {
        let fc = collection(&serde_json::json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": {},
                "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": [
                        [[[70.0, 20.0], [71.0, 20.0], [71.0, 21.0], [70.0, 20.0]]],
                        [[[72.0, 20.0], [73.0, 20.0], [73.0, 21.0], [72.0, 20.0]]]
                    ]
                }
            }]
        }));

        let layer = BoundaryLayer::from_features(&fc, &Projection::INDIA);
        let outline = &layer.outlines()[0];
        assert_eq!(outline.path.matches('M').count(), 2);
        assert!(outline.name.is_none());
    }

    #[test]
    fn skips_features_without_polygons() {
        let fc = collection(&serde_json::json!({
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {}, "geometry": null},
                {
                    "type": "Feature",
                    "properties": {},
                    "geometry": {"type": "Point", "coordinates": [80.0, 15.0]}
                }
            ]
        }));

        assert!(BoundaryLayer::from_features(&fc, &Projection::INDIA).is_empty());
    }
}
