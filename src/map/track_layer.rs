// SPDX-License-Identifier: MIT
// Copyright 2026 The ski-map-client authors

//! Building the render of a converted track.
//!
//! Every waypoint becomes a node in one global sequence that arrow keys step
//! through. Each node links to the node before it when the two belong to the
//! same motion, which is what derived speed and inclination are computed
//! over.

use crate::error::Result;
use crate::map::feature::{Feature, FeatureKind, VectorLayer};
use crate::map::projection::{project_point, project_rect};
use crate::map::style::{connector_style, route_style};
use crate::models::{Track, Waypoint};
use crate::time_utils::seconds_between;
use geo::{Coord, LineString, MultiLineString, Point};
use std::ops::Range;
use std::time::Duration;

/// One waypoint in the global node sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackNode {
    pub activity: usize,
    pub segment: usize,
    pub waypoint: usize,
    /// Projected position
    pub coord: Coord<f64>,
    /// Node this one continues from, if any
    pub previous: Option<usize>,
}

/// Track features plus the lookup tables selection needs.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackLayer {
    pub layer: VectorLayer,
    pub nodes: Vec<TrackNode>,
    /// Node index range of each activity
    pub activity_nodes: Vec<Range<usize>>,
    /// Feature index of each activity's line
    pub activity_features: Vec<usize>,
    /// Feature index of each node
    pub node_features: Vec<usize>,
    pub connector_count: usize,
}

impl TrackLayer {
    pub fn node(&self, index: usize) -> Option<&TrackNode> {
        self.nodes.get(index)
    }

    pub fn waypoint<'a>(&self, track: &'a Track, index: usize) -> Option<&'a Waypoint> {
        let node = self.nodes.get(index)?;
        track
            .item
            .get(node.activity)?
            .route
            .get(node.segment)?
            .get(node.waypoint)
    }

    /// Closest node of `activity` to `target`, by squared distance in
    /// projected space.
    pub fn nearest_node(&self, activity: usize, target: Coord<f64>) -> Option<usize> {
        let range = self.activity_nodes.get(activity)?.clone();
        nearest_node(&self.nodes[range.clone()], target).map(|i| range.start + i)
    }
}

/// Index of the node closest to `target`. Ties keep the first node.
pub fn nearest_node(nodes: &[TrackNode], target: Coord<f64>) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, node) in nodes.iter().enumerate() {
        let dx = node.coord.x - target.x;
        let dy = node.coord.y - target.y;
        let distance = dx * dx + dy * dy;
        if best.is_none_or(|(_, d)| distance < d) {
            best = Some((i, distance));
        }
    }
    best.map(|(i, _)| i)
}

/// Whether two consecutive activities are one continuous motion.
fn is_continuous(last: &Waypoint, first: &Waypoint, max_gap: Duration) -> bool {
    match (last.time, first.time) {
        (Some(from), Some(to)) => {
            let gap = seconds_between(from, to);
            gap > 0.0 && gap < max_gap.as_secs_f64()
        }
        _ => false,
    }
}

pub fn build_track_layer(
    track: &Track,
    connector_max_gap: Duration,
    min_zoom: f64,
) -> Result<TrackLayer> {
    let mut nodes: Vec<TrackNode> = Vec::new();
    let mut activity_nodes = Vec::with_capacity(track.item.len());
    let mut activity_features = Vec::with_capacity(track.item.len());
    let mut line_features = Vec::with_capacity(track.item.len());
    let mut connectors = Vec::new();
    // Last node and waypoint of the previous non-empty activity.
    let mut last: Option<(usize, &Waypoint)> = None;

    for (activity_index, activity) in track.item.iter().enumerate() {
        let start = nodes.len();
        let mut lines = Vec::with_capacity(activity.route.len());
        let mut previous_in_activity: Option<usize> = None;

        for (segment_index, segment) in activity.route.iter().enumerate() {
            let mut coords = Vec::with_capacity(segment.len());
            for (waypoint_index, waypoint) in segment.iter().enumerate() {
                let coord = project_point(waypoint.point)?;
                coords.push(coord);

                let previous = match previous_in_activity {
                    Some(previous) => Some(previous),
                    None => match last {
                        Some((last_node, last_waypoint))
                            if is_continuous(last_waypoint, waypoint, connector_max_gap) =>
                        {
                            connectors.push(Feature::new(
                                LineString::new(vec![nodes[last_node].coord, coord]),
                                connector_style(),
                                FeatureKind::Connector,
                            ));
                            Some(last_node)
                        }
                        _ => None,
                    },
                };

                previous_in_activity = Some(nodes.len());
                nodes.push(TrackNode {
                    activity: activity_index,
                    segment: segment_index,
                    waypoint: waypoint_index,
                    coord,
                    previous,
                });
            }
            lines.push(LineString::new(coords));
        }

        if let (Some(node), Some(waypoint)) = (previous_in_activity, activity.last_waypoint()) {
            last = Some((node, waypoint));
        }

        activity_nodes.push(start..nodes.len());
        activity_features.push(line_features.len());
        line_features.push(Feature::new(
            MultiLineString::new(lines),
            route_style(activity.activity_type()).line,
            FeatureKind::Activity {
                index: activity_index,
            },
        ));
    }

    let connector_count = connectors.len();
    let node_offset = line_features.len() + connector_count;
    let node_features = (node_offset..node_offset + nodes.len()).collect();

    let mut features = line_features;
    features.extend(connectors);
    features.extend(nodes.iter().enumerate().map(|(index, node)| {
        let activity_type = track.item[node.activity].activity_type();
        Feature::new(
            Point(node.coord),
            route_style(activity_type).node,
            FeatureKind::Node { index },
        )
    }));

    tracing::debug!(
        activities = track.item.len(),
        nodes = nodes.len(),
        connectors = connector_count,
        "Track layer built"
    );

    Ok(TrackLayer {
        layer: VectorLayer::new(features, Some(project_rect(track.bounding_rect)?), min_zoom),
        nodes,
        activity_nodes,
        activity_features,
        node_features,
        connector_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::coord;

    fn node(x: f64, y: f64) -> TrackNode {
        TrackNode {
            activity: 0,
            segment: 0,
            waypoint: 0,
            coord: coord! { x: x, y: y },
            previous: None,
        }
    }

    #[test]
    fn test_nearest_node_picks_closest() {
        let nodes = [node(0.0, 0.0), node(10.0, 0.0), node(20.0, 0.0)];
        assert_eq!(nearest_node(&nodes, coord! { x: 12.0, y: 0.0 }), Some(1));
        assert_eq!(nearest_node(&nodes, coord! { x: -3.0, y: 4.0 }), Some(0));
    }

    #[test]
    fn test_nearest_node_empty() {
        assert_eq!(nearest_node(&[], coord! { x: 0.0, y: 0.0 }), None);
    }

    #[test]
    fn test_nearest_node_tie_keeps_first() {
        let nodes = [node(0.0, 0.0), node(10.0, 0.0)];
        assert_eq!(nearest_node(&nodes, coord! { x: 5.0, y: 0.0 }), Some(0));
    }
}
