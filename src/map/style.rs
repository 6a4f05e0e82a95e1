// SPDX-License-Identifier: MIT
// Copyright 2026 The ski-map-client authors

//! Feature styles.
//!
//! Every selectable feature carries a [`SelectableStyle`]; selecting a
//! feature swaps in the `selected` half, unselecting restores `unselected`.

use crate::models::{ActivityType, Difficulty};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 0xff {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
    pub line_dash: Option<[f64; 2]>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fill {
    pub color: Color,
}

/// Point marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub radius: f64,
    pub fill: Fill,
}

/// How one feature is drawn. A style with no parts is invisible.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Style {
    pub stroke: Option<Stroke>,
    pub fill: Option<Fill>,
    pub circle: Option<Circle>,
}

impl Style {
    pub const INVISIBLE: Style = Style {
        stroke: None,
        fill: None,
        circle: None,
    };

    pub fn is_visible(&self) -> bool {
        self.stroke.is_some() || self.fill.is_some() || self.circle.is_some()
    }

    fn line(color: Color, width: f64, line_dash: Option<[f64; 2]>) -> Self {
        Style {
            stroke: Some(Stroke {
                color,
                width,
                line_dash,
            }),
            ..Style::INVISIBLE
        }
    }

    fn area(color: Color) -> Self {
        Style {
            fill: Some(Fill { color }),
            ..Style::INVISIBLE
        }
    }

    fn dot(color: Color, radius: f64) -> Self {
        Style {
            circle: Some(Circle {
                radius,
                fill: Fill { color },
            }),
            ..Style::INVISIBLE
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectableStyle {
    pub unselected: Style,
    pub selected: Style,
}

impl SelectableStyle {
    /// A style that does not change on selection.
    pub const fn fixed(style: Style) -> Self {
        Self {
            unselected: style,
            selected: style,
        }
    }

    pub fn get(&self, selected: bool) -> Style {
        if selected {
            self.selected
        } else {
            self.unselected
        }
    }
}

/// Area and centerline style of one piste difficulty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PisteStyle {
    pub area: SelectableStyle,
    pub line: SelectableStyle,
}

const DASHED: Option<[f64; 2]> = Some([6.0, 4.0]);

/// Style of a piste difficulty, `None` for a difficulty the map cannot draw.
pub fn piste_style(difficulty: &Difficulty) -> Option<PisteStyle> {
    let (color, line_dash) = match difficulty {
        Difficulty::Novice => (Color::rgb(0x00, 0xaa, 0x00), None),
        Difficulty::Easy => (Color::rgb(0x00, 0x00, 0xff), None),
        Difficulty::Intermediate => (Color::rgb(0xff, 0x00, 0x00), None),
        Difficulty::Advanced => (Color::rgb(0x00, 0x00, 0x00), None),
        Difficulty::Expert => (Color::rgb(0x00, 0x00, 0x00), DASHED),
        Difficulty::Freeride => (Color::rgb(0xff, 0x66, 0x00), DASHED),
        Difficulty::Unknown => (Color::rgb(0x88, 0x88, 0x88), None),
        Difficulty::Other(_) => return None,
    };
    Some(PisteStyle {
        area: SelectableStyle {
            unselected: Style::area(color.with_alpha(0x44)),
            selected: Style::area(color.with_alpha(0x88)),
        },
        line: SelectableStyle {
            unselected: Style::line(color, 2.0, line_dash),
            selected: Style::line(color, 3.0, line_dash),
        },
    })
}

pub fn lift_style() -> SelectableStyle {
    let color = Color::rgb(0x33, 0x33, 0x33);
    SelectableStyle {
        unselected: Style::line(color, 2.0, None),
        selected: Style::line(color, 3.0, None),
    }
}

pub fn station_style() -> SelectableStyle {
    SelectableStyle::fixed(Style::dot(Color::rgb(0, 0, 0), 3.0))
}

fn route_color(activity_type: ActivityType) -> Color {
    match activity_type {
        ActivityType::Unknown => Color::rgb(0xff, 0x00, 0xff),
        ActivityType::UseLift => Color::rgb(0xaa, 0x00, 0x00),
        ActivityType::EnterLift => Color::rgb(0x00, 0x88, 0x88),
        ActivityType::ExitLift => Color::rgb(0x00, 0x88, 0x00),
        ActivityType::Moving => Color::rgb(0x00, 0x44, 0xcc),
    }
}

/// Route line and waypoint node style of one activity type. Nodes are only
/// drawn while selected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteStyle {
    pub line: SelectableStyle,
    pub node: SelectableStyle,
}

pub fn route_style(activity_type: ActivityType) -> RouteStyle {
    let color = route_color(activity_type);
    RouteStyle {
        line: SelectableStyle {
            unselected: Style::line(color, 2.0, None),
            selected: Style::line(color, 3.0, None),
        },
        node: SelectableStyle {
            unselected: Style::INVISIBLE,
            selected: Style::dot(color, 4.0),
        },
    }
}

pub fn connector_style() -> SelectableStyle {
    SelectableStyle::fixed(Style::line(Color::rgb(0x88, 0x88, 0x88), 1.0, Some([2.0, 2.0])))
}

pub fn outline_style() -> SelectableStyle {
    let color = Color::rgb(0x00, 0x99, 0xff);
    SelectableStyle::fixed(Style {
        stroke: Some(Stroke {
            color,
            width: 2.0,
            line_dash: None,
        }),
        fill: Some(Fill {
            color: color.with_alpha(0x22),
        }),
        circle: None,
    })
}
