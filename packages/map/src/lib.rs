#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Mercator projection and SVG rendering of the India incident map.
//!
//! State outlines come from a `GeoJSON` `FeatureCollection` and are
//! projected once into a [`BoundaryLayer`]. Each render draws the outlines,
//! one [`MapMarker`] per placeable incident, and at most one
//! [`MapAnnotation`] detail panel.

pub mod boundaries;
pub mod projection;
pub mod svg;

pub use boundaries::{BoundaryLayer, StateOutline};
pub use projection::Projection;
pub use svg::{MapAnnotation, MapMarker, SvgMap};

/// Escapes text for use in XML/HTML content and attribute values.
#[must_use]
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }
}
