//! Export GeoJSON du contour

use geo::{Area, ChamberlainDuquetteArea};
use geojson::{Feature, Geometry, JsonObject, Value};

use crate::serialize::format_coordinate;
use crate::types::Boundary;

/// Contour en Feature GeoJSON (WGS84), avec aire et nombre de sommets
pub fn to_geojson_feature(boundary: &Boundary) -> Feature {
    let polygon = boundary.to_polygon();

    let mut properties = JsonObject::new();
    properties.insert("points".to_string(), boundary.vertex_count().into());
    properties.insert(
        "area_m2".to_string(),
        polygon.chamberlain_duquette_unsigned_area().round().into(),
    );
    // Aire planaire, en degrés²
    properties.insert("area_deg2".to_string(), polygon.unsigned_area().into());

    if let Some(bounds) = boundary.bounds() {
        let center = bounds.center();
        properties.insert(
            "bbox_center".to_string(),
            format!(
                "{}, {}",
                format_coordinate(center.lat),
                format_coordinate(center.lng)
            )
            .into(),
        );
    }

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::from(&polygon))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

/// Contour en chaîne GeoJSON compacte
pub fn to_geojson_string(boundary: &Boundary) -> String {
    serde_json::to_string(&to_geojson_feature(boundary)).unwrap_or_default()
}
