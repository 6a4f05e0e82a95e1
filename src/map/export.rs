// SPDX-License-Identifier: MIT
// Copyright 2026 The ski-map-client authors

//! GeoJSON export of the drawn features, back in lon/lat.

use crate::map::feature::{Feature, VectorLayer};
use crate::map::projection::to_lon_lat;
use geo::MapCoords;
use geojson::{FeatureCollection, Geometry, JsonObject, JsonValue};

/// Every visible feature of `layers`, bottom layer first.
pub fn to_feature_collection(layers: &[&VectorLayer]) -> FeatureCollection {
    let features = layers
        .iter()
        .flat_map(|layer| layer.features.iter())
        .filter(|feature| feature.style().is_visible())
        .map(to_geojson_feature)
        .collect();
    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

fn to_geojson_feature(feature: &Feature) -> geojson::Feature {
    let lon_lat = feature.geometry.map_coords(to_lon_lat);
    let style = feature.style();

    let mut properties = JsonObject::new();
    properties.insert("kind".into(), feature.kind.name().into());
    if let Some(id) = feature.kind.id() {
        properties.insert("id".into(), id.into());
    }
    properties.insert("selected".into(), feature.selected.into());
    if let Some(stroke) = style.stroke {
        properties.insert("stroke".into(), stroke.color.to_string().into());
        properties.insert("stroke-width".into(), stroke.width.into());
    }
    if let Some(fill) = style.fill {
        properties.insert("fill".into(), fill.color.to_string().into());
    }
    if let Some(circle) = style.circle {
        properties.insert("marker-color".into(), circle.fill.color.to_string().into());
        properties.insert("marker-radius".into(), JsonValue::from(circle.radius));
    }

    geojson::Feature {
        bbox: None,
        geometry: Some(Geometry::new(geojson::Value::from(&lon_lat))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::feature::FeatureKind;
    use crate::map::projection::from_lon_lat;
    use crate::map::style::{lift_style, route_style};
    use crate::models::ActivityType;
    use geo::{coord, Point};

    #[test]
    fn test_export_skips_hidden_and_unprojects() {
        let projected = from_lon_lat(coord! { x: 6.5, y: 45.0 }).unwrap();
        let layer = VectorLayer::new(
            vec![
                Feature::new(Point(projected), lift_style(), FeatureKind::Lift { id: "l1".into() }),
                Feature::new(
                    Point(projected),
                    route_style(ActivityType::Moving).node,
                    FeatureKind::Node { index: 0 },
                ),
            ],
            None,
            0.0,
        );

        let collection = to_feature_collection(&[&layer]);

        assert_eq!(collection.features.len(), 1);
        let feature = &collection.features[0];
        let properties = feature.properties.as_ref().unwrap();
        assert_eq!(properties["kind"], "lift");
        assert_eq!(properties["id"], "l1");
        assert_eq!(properties["stroke"], "#333333");
        match &feature.geometry.as_ref().unwrap().value {
            geojson::Value::Point(position) => {
                assert!((position[0] - 6.5).abs() < 1e-9);
                assert!((position[1] - 45.0).abs() < 1e-9);
            }
            other => panic!("unexpected geometry: {other:?}"),
        }
    }
}
