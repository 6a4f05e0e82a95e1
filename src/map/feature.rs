// SPDX-License-Identifier: MIT
// Copyright 2026 The ski-map-client authors

//! Rendered features and the vector layers holding them.

use crate::map::style::{SelectableStyle, Style};
use geo::{Geometry, Intersects, Polygon, Rect};

/// What a feature stands for. Entity references use the stable ids of the
/// loaded ski area and indices into the loaded track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeatureKind {
    Lift { id: String },
    Station { lift_id: String },
    PisteArea { id: String },
    PisteLine { id: String },
    Activity { index: usize },
    /// Waypoint node, indexed in the global node sequence
    Node { index: usize },
    Connector,
    Outline,
}

impl FeatureKind {
    pub fn name(&self) -> &'static str {
        match self {
            FeatureKind::Lift { .. } => "lift",
            FeatureKind::Station { .. } => "station",
            FeatureKind::PisteArea { .. } => "piste_area",
            FeatureKind::PisteLine { .. } => "piste_line",
            FeatureKind::Activity { .. } => "activity",
            FeatureKind::Node { .. } => "node",
            FeatureKind::Connector => "connector",
            FeatureKind::Outline => "outline",
        }
    }

    /// Entity id for export, if the feature has one.
    pub fn id(&self) -> Option<String> {
        match self {
            FeatureKind::Lift { id }
            | FeatureKind::PisteArea { id }
            | FeatureKind::PisteLine { id } => Some(id.clone()),
            FeatureKind::Station { lift_id } => Some(lift_id.clone()),
            FeatureKind::Activity { index } | FeatureKind::Node { index } => {
                Some(index.to_string())
            }
            FeatureKind::Connector | FeatureKind::Outline => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    /// Geometry in projected coordinates
    pub geometry: Geometry<f64>,
    pub styles: SelectableStyle,
    pub selected: bool,
    pub kind: FeatureKind,
}

impl Feature {
    pub fn new(
        geometry: impl Into<Geometry<f64>>,
        styles: SelectableStyle,
        kind: FeatureKind,
    ) -> Self {
        Self {
            geometry: geometry.into(),
            styles,
            selected: false,
            kind,
        }
    }

    pub fn style(&self) -> Style {
        self.styles.get(self.selected)
    }
}

/// An ordered set of features drawn together. Later features are on top.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VectorLayer {
    pub features: Vec<Feature>,
    /// Features outside the extent are never drawn
    pub extent: Option<Rect<f64>>,
    /// Hidden below this zoom level
    pub min_zoom: f64,
}

impl VectorLayer {
    pub fn new(features: Vec<Feature>, extent: Option<Rect<f64>>, min_zoom: f64) -> Self {
        Self {
            features,
            extent,
            min_zoom,
        }
    }

    pub fn is_visible_at(&self, zoom: f64) -> bool {
        zoom >= self.min_zoom
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Drawn features touching `area`, topmost first.
    pub fn hits<'a>(&'a self, area: &'a Polygon<f64>) -> impl Iterator<Item = &'a Feature> + 'a {
        self.features
            .iter()
            .rev()
            .filter(|feature| feature.style().is_visible())
            .filter(move |feature| feature.geometry.intersects(area))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::style::{lift_style, route_style};
    use crate::models::ActivityType;
    use geo::{coord, line_string, point};

    #[test]
    fn test_hits_topmost_first_and_skips_invisible() {
        let layer = VectorLayer::new(
            vec![
                Feature::new(
                    line_string![(x: 0.0, y: 0.0), (x: 10.0, y: 0.0)],
                    lift_style(),
                    FeatureKind::Lift { id: "a".into() },
                ),
                Feature::new(
                    line_string![(x: 5.0, y: -5.0), (x: 5.0, y: 5.0)],
                    lift_style(),
                    FeatureKind::Lift { id: "b".into() },
                ),
                Feature::new(
                    point!(x: 5.0, y: 0.0),
                    route_style(ActivityType::Moving).node,
                    FeatureKind::Node { index: 0 },
                ),
            ],
            None,
            0.0,
        );
        let area = Rect::new(coord! { x: 4.0, y: -1.0 }, coord! { x: 6.0, y: 1.0 }).to_polygon();

        let kinds: Vec<_> = layer.hits(&area).map(|f| f.kind.clone()).collect();

        assert_eq!(
            kinds,
            vec![
                FeatureKind::Lift { id: "b".into() },
                FeatureKind::Lift { id: "a".into() },
            ]
        );
    }

    #[test]
    fn test_selected_style_switch() {
        let mut feature = Feature::new(
            point!(x: 0.0, y: 0.0),
            lift_style(),
            FeatureKind::Lift { id: "a".into() },
        );
        assert_eq!(feature.style(), lift_style().unselected);
        feature.selected = true;
        assert_eq!(feature.style(), lift_style().selected);
    }
}
