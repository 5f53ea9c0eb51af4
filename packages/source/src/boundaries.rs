//! State boundary `GeoJSON` fetcher.
//!
//! Boundaries are only used to draw state outlines behind the markers. They
//! are not incident data.

use geojson::{FeatureCollection, GeoJson};

use crate::SourceError;

/// Fetches the boundary `FeatureCollection` from a direct `GeoJSON` URL.
///
/// # Errors
///
/// Returns [`SourceError`] if the request fails, the status is not 2xx, or
/// the body is not a `FeatureCollection`.
pub async fn fetch(client: &reqwest::Client, url: &str) -> Result<FeatureCollection, SourceError> {
    let resp = client.get(url).send().await?;
    if !resp.status().is_success() {
        return Err(SourceError::Status {
            status: resp.status().as_u16(),
            url: url.to_string(),
        });
    }
    let body = resp.text().await?;

    let collection = parse(&body)?;
    log::info!(
        "Loaded {} boundary feature(s) from {url}",
        collection.features.len()
    );
    Ok(collection)
}

/// Parses a `GeoJSON` document that must be a `FeatureCollection`.
///
/// # Errors
///
/// Returns [`SourceError::GeoJson`] if the text is not valid `GeoJSON` or
/// is some other kind of object.
pub fn parse(body: &str) -> Result<FeatureCollection, SourceError> {
    let geojson: GeoJson = body.parse().map_err(Box::new)?;
    let collection = FeatureCollection::try_from(geojson).map_err(Box::new)?;
    Ok(collection)
}
