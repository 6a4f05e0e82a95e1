// SPDX-License-Identifier: MIT
// Copyright 2026 The ski-map-client authors

//! Recorded track model and its conversion against a loaded ski area.
//!
//! A raw track references lifts by id. Converting it resolves every id in the
//! ski area the track was analyzed against, so a track can only exist once
//! that ski area is loaded.

use crate::error::{AppError, Result};
use crate::models::ski_area::{Lift, SkiArea};
use chrono::{DateTime, Utc};
use geo::{Point, Rect};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// One recorded GPS fix. Everything but the position is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub point: Point<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hdop: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vdop: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl Waypoint {
    pub fn new(point: Point<f64>) -> Self {
        Self {
            point,
            time: None,
            elevation: None,
            hdop: None,
            vdop: None,
            speed: None,
            comment: None,
        }
    }
}

pub type Segment = Vec<Waypoint>;
pub type Segments = Vec<Segment>;

/// Wire form of an activity. `type` is an externally tagged variant such as
/// `{"UseLift": {...}}` or `{"Unknown": null}`; it is kept as JSON so that
/// tags this client does not know yet still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawActivity {
    #[serde(rename = "type")]
    pub kind: Value,
    #[serde(default)]
    pub route: Segments,
    #[serde(default)]
    pub begin_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub length: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawUseLift {
    #[serde(rename = "lift")]
    pub lift_id: String,
    #[serde(default)]
    pub begin_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub begin_station: Option<usize>,
    #[serde(default)]
    pub end_station: Option<usize>,
    #[serde(default)]
    pub is_reverse: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTrack {
    pub item: Vec<RawActivity>,
    pub bounding_rect: Rect<f64>,
}

/// Activity classification, used for styling and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivityType {
    Unknown,
    UseLift,
    EnterLift,
    ExitLift,
    Moving,
}

impl ActivityType {
    pub const ALL: [ActivityType; 5] = [
        ActivityType::Unknown,
        ActivityType::UseLift,
        ActivityType::EnterLift,
        ActivityType::ExitLift,
        ActivityType::Moving,
    ];

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == tag)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ActivityType::Unknown => "Unknown",
            ActivityType::UseLift => "UseLift",
            ActivityType::EnterLift => "EnterLift",
            ActivityType::ExitLift => "ExitLift",
            ActivityType::Moving => "Moving",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ActivityType::Unknown => "Unknown",
            ActivityType::UseLift => "Lift",
            ActivityType::EnterLift => "Enter lift",
            ActivityType::ExitLift => "Exit lift",
            ActivityType::Moving => "Moving",
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A lift ride with the lift resolved in the active ski area.
#[derive(Debug, Clone, PartialEq)]
pub struct UseLift {
    pub lift_id: String,
    pub lift: Arc<Lift>,
    pub begin_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub begin_station: Option<usize>,
    pub end_station: Option<usize>,
    pub is_reverse: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ActivityKind {
    Unknown,
    UseLift(UseLift),
    EnterLift { lift_id: String, lift: Arc<Lift> },
    ExitLift { lift_id: String, lift: Arc<Lift> },
    Moving { move_type: Option<String> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Activity {
    pub kind: ActivityKind,
    pub route: Segments,
    pub begin_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub length: f64,
}

impl Activity {
    pub fn activity_type(&self) -> ActivityType {
        match self.kind {
            ActivityKind::Unknown => ActivityType::Unknown,
            ActivityKind::UseLift(_) => ActivityType::UseLift,
            ActivityKind::EnterLift { .. } => ActivityType::EnterLift,
            ActivityKind::ExitLift { .. } => ActivityType::ExitLift,
            ActivityKind::Moving { .. } => ActivityType::Moving,
        }
    }

    /// The lift this activity is about, if any.
    pub fn lift(&self) -> Option<&Arc<Lift>> {
        match &self.kind {
            ActivityKind::UseLift(use_lift) => Some(&use_lift.lift),
            ActivityKind::EnterLift { lift, .. } | ActivityKind::ExitLift { lift, .. } => {
                Some(lift)
            }
            ActivityKind::Unknown | ActivityKind::Moving { .. } => None,
        }
    }

    /// All waypoints in route order, across segments.
    pub fn waypoints(&self) -> impl Iterator<Item = &Waypoint> {
        self.route.iter().flatten()
    }

    pub fn first_waypoint(&self) -> Option<&Waypoint> {
        self.waypoints().next()
    }

    pub fn last_waypoint(&self) -> Option<&Waypoint> {
        self.route.iter().rev().find_map(|segment| segment.last())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub item: Vec<Activity>,
    pub bounding_rect: Rect<f64>,
}

impl Track {
    pub fn waypoint_count(&self) -> usize {
        self.item.iter().map(|a| a.waypoints().count()).sum()
    }
}

/// Converts raw tracks against one ski area.
pub struct TrackConverter<'a> {
    ski_area: &'a SkiArea,
}

impl<'a> TrackConverter<'a> {
    pub fn new(ski_area: &'a SkiArea) -> Self {
        Self { ski_area }
    }

    /// Convert a raw track. Fails with `LiftNotFound` if any activity refers
    /// to a lift the ski area does not have; nothing is returned in that case.
    pub fn convert_track(&self, raw: &RawTrack) -> Result<Track> {
        let item = raw
            .item
            .iter()
            .map(|activity| self.convert_activity(activity))
            .collect::<Result<Vec<_>>>()?;
        Ok(Track {
            item,
            bounding_rect: raw.bounding_rect,
        })
    }

    fn convert_activity(&self, raw: &RawActivity) -> Result<Activity> {
        Ok(Activity {
            kind: self.convert_kind(&raw.kind)?,
            route: raw.route.clone(),
            begin_time: raw.begin_time,
            end_time: raw.end_time,
            length: raw.length,
        })
    }

    fn convert_kind(&self, kind: &Value) -> Result<ActivityKind> {
        let (tag, payload) = match kind {
            Value::String(tag) => (tag.as_str(), &Value::Null),
            Value::Object(map) => match map.iter().next() {
                Some((tag, payload)) => (tag.as_str(), payload),
                None => return Ok(ActivityKind::Unknown),
            },
            _ => return Ok(ActivityKind::Unknown),
        };

        let Some(activity_type) = ActivityType::from_tag(tag) else {
            tracing::warn!(tag, "Unknown activity type, treating as Unknown");
            return Ok(ActivityKind::Unknown);
        };

        Ok(match activity_type {
            ActivityType::Unknown => ActivityKind::Unknown,
            ActivityType::UseLift => {
                let raw: RawUseLift = serde_json::from_value(payload.clone())?;
                let lift = self.resolve_lift(&raw.lift_id)?;
                ActivityKind::UseLift(UseLift {
                    lift,
                    lift_id: raw.lift_id,
                    begin_time: raw.begin_time,
                    end_time: raw.end_time,
                    begin_station: raw.begin_station,
                    end_station: raw.end_station,
                    is_reverse: raw.is_reverse,
                })
            }
            ActivityType::EnterLift | ActivityType::ExitLift => {
                let Some(lift_id) = referenced_lift_id(payload) else {
                    tracing::warn!(tag, "Activity without lift reference");
                    return Ok(ActivityKind::Unknown);
                };
                let lift = self.resolve_lift(lift_id)?;
                let lift_id = lift_id.to_string();
                if activity_type == ActivityType::EnterLift {
                    ActivityKind::EnterLift { lift_id, lift }
                } else {
                    ActivityKind::ExitLift { lift_id, lift }
                }
            }
            ActivityType::Moving => ActivityKind::Moving {
                move_type: payload
                    .as_str()
                    .or_else(|| payload.get("move_type").and_then(Value::as_str))
                    .map(str::to_string),
            },
        })
    }

    fn resolve_lift(&self, lift_id: &str) -> Result<Arc<Lift>> {
        self.ski_area
            .lift(lift_id)
            .cloned()
            .ok_or_else(|| AppError::LiftNotFound(lift_id.to_string()))
    }
}

/// Lift id of an enter/exit payload: either the bare id or `{"lift": id}`.
fn referenced_lift_id(payload: &Value) -> Option<&str> {
    payload
        .as_str()
        .or_else(|| payload.get("lift").and_then(Value::as_str))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_activity_type_tags() {
        assert_eq!(ActivityType::from_tag("UseLift"), Some(ActivityType::UseLift));
        assert_eq!(ActivityType::from_tag("Teleport"), None);
    }

    #[test]
    fn test_referenced_lift_id_shapes() {
        assert_eq!(referenced_lift_id(&json!("l1")), Some("l1"));
        assert_eq!(referenced_lift_id(&json!({"lift": "l2"})), Some("l2"));
        assert_eq!(referenced_lift_id(&json!(null)), None);
    }

    #[test]
    fn test_waypoint_optional_fields() {
        let wp: Waypoint = serde_json::from_value(json!({
            "point": {"x": 6.1, "y": 45.2},
            "time": "2024-02-03T10:05:00Z"
        }))
        .unwrap();
        assert!(wp.time.is_some());
        assert!(wp.elevation.is_none());
        assert!(wp.comment.is_none());
    }

    #[test]
    fn test_last_waypoint_skips_empty_trailing_segment() {
        let activity = Activity {
            kind: ActivityKind::Unknown,
            route: vec![vec![Waypoint::new(Point::new(1.0, 2.0))], vec![]],
            begin_time: None,
            end_time: None,
            length: 0.0,
        };
        assert_eq!(activity.last_waypoint().unwrap().point, Point::new(1.0, 2.0));
    }
}
