//! SVG rendering of the map canvas.

use std::fmt::Write as _;

use disaster_map_geography_models::LonLat;

use crate::boundaries::BoundaryLayer;
use crate::escape;
use crate::projection::Projection;

const STATE_FILL: &str = "#d1d5db";
const STATE_STROKE: &str = "#4b5563";

/// Offset of the annotation panel from its marker.
const ANNOTATION_DX: f64 = 80.0;
const ANNOTATION_DY: f64 = -50.0;
const ANNOTATION_WIDTH: f64 = 360.0;

/// A clickable incident marker: a translucent pulse ring around a solid dot.
#[derive(Debug, Clone, PartialEq)]
pub struct MapMarker {
    pub coords: LonLat,
    pub outer_radius: f64,
    pub inner_radius: f64,
    pub color: String,
    pub glow: String,
    /// Drop-shadow blur in pixels.
    pub glow_radius: f64,
    /// Link target activated by clicking the marker.
    pub href: Option<String>,
    /// Hover tooltip.
    pub title: Option<String>,
}

/// A detail panel anchored to a point, connected by a colored line.
#[derive(Debug, Clone, PartialEq)]
pub struct MapAnnotation {
    pub anchor: LonLat,
    pub color: String,
    pub height: f64,
    /// Pre-rendered XHTML body of the panel.
    pub body_html: String,
}

/// Everything drawn on one map canvas.
#[derive(Debug, Clone)]
pub struct SvgMap<'a> {
    pub projection: Projection,
    pub boundaries: &'a BoundaryLayer,
    pub markers: Vec<MapMarker>,
    pub annotation: Option<MapAnnotation>,
}

impl<'a> SvgMap<'a> {
    #[must_use]
    pub const fn new(projection: Projection, boundaries: &'a BoundaryLayer) -> Self {
        Self {
            projection,
            boundaries,
            markers: Vec::new(),
            annotation: None,
        }
    }

    /// Renders the map as a standalone `<svg>` element.
    #[must_use]
    pub fn render(&self) -> String {
        let Projection { width, height, .. } = self.projection;
        let mut out = String::with_capacity(
            self.boundaries.outlines().iter().map(|o| o.path.len() + 96).sum::<usize>() + 4096,
        );

        let _ = write!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" class="india-map" viewBox="0 0 {width} {height}" width="{width}" height="{height}">"#
        );

        out.push_str(r#"<g class="geographies">"#);
        for outline in self.boundaries.outlines() {
            let _ = write!(
                out,
                r#"<path class="geography" d="{}" fill="{STATE_FILL}" stroke="{STATE_STROKE}" stroke-width="0.8">"#,
                outline.path
            );
            if let Some(name) = &outline.name {
                let _ = write!(out, "<title>{}</title>", escape(name));
            }
            out.push_str("</path>");
        }
        out.push_str("</g>");

        out.push_str(r#"<g class="markers">"#);
        for marker in &self.markers {
            self.write_marker(&mut out, marker);
        }
        out.push_str("</g>");

        if let Some(annotation) = &self.annotation {
            self.write_annotation(&mut out, annotation);
        }

        out.push_str("</svg>");
        out
    }

    fn write_marker(&self, out: &mut String, marker: &MapMarker) {
        let [x, y] = self.projection.project(marker.coords);

        if let Some(href) = &marker.href {
            let _ = write!(out, r#"<a href="{}">"#, escape(href));
        }
        let _ = write!(out, r#"<g class="marker-group" transform="translate({x:.2},{y:.2})">"#);
        if let Some(title) = &marker.title {
            let _ = write!(out, "<title>{}</title>", escape(title));
        }
        let _ = write!(
            out,
            r#"<circle class="marker-pulse" r="{}" fill="{}" fill-opacity="0.3"/>"#,
            marker.outer_radius,
            escape(&marker.color)
        );
        let _ = write!(
            out,
            r##"<circle class="marker-dot" r="{}" fill="{}" stroke="#fff" stroke-width="2" style="filter: drop-shadow(0 0 {}px {}); cursor: pointer"/>"##,
            marker.inner_radius,
            escape(&marker.color),
            marker.glow_radius,
            escape(&marker.glow)
        );
        out.push_str("</g>");
        if marker.href.is_some() {
            out.push_str("</a>");
        }
    }

    fn write_annotation(&self, out: &mut String, annotation: &MapAnnotation) {
        let [x, y] = self.projection.project(annotation.anchor);
        let color = escape(&annotation.color);

        let _ = write!(
            out,
            r#"<g class="annotation" transform="translate({:.2},{:.2})">"#,
            x + ANNOTATION_DX,
            y + ANNOTATION_DY
        );
        let _ = write!(
            out,
            r#"<path class="annotation-connector" d="M0,0L{},{}" fill="none" stroke="{color}" stroke-width="3" stroke-linecap="round"/>"#,
            -ANNOTATION_DX,
            -ANNOTATION_DY
        );
        let _ = write!(
            out,
            r#"<foreignObject x="0" y="-180" width="{ANNOTATION_WIDTH}" height="{}"><div xmlns="http://www.w3.org/1999/xhtml">{}</div></foreignObject>"#,
            annotation.height, annotation.body_html
        );
        out.push_str("</g>");
    }
}
