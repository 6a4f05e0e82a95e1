// SPDX-License-Identifier: MIT
// Copyright 2026 The ski-map-client authors

//! Drawing surface abstraction and the input events it delivers.

use crate::map::feature::VectorLayer;
use crate::map::projection::{Size, Viewport};
use std::cell::Cell;
use std::rc::Rc;

/// The surface a map draws on.
pub trait RenderTarget {
    fn size(&self) -> Size;

    /// Redraw with the given layers, bottom first.
    fn render(&mut self, _viewport: &Viewport, _layers: &[&VectorLayer]) {}

    /// Release everything drawn; the map is being removed.
    fn clear(&mut self);
}

/// Surface without a display, for the CLI and tests. Counters are shared so
/// they stay observable after the target is handed to the engine.
#[derive(Debug, Clone)]
pub struct HeadlessTarget {
    size: Size,
    renders: Rc<Cell<usize>>,
    cleared: Rc<Cell<bool>>,
}

impl HeadlessTarget {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            renders: Rc::default(),
            cleared: Rc::default(),
        }
    }

    pub fn render_count(&self) -> usize {
        self.renders.get()
    }

    pub fn is_cleared(&self) -> bool {
        self.cleared.get()
    }
}

impl RenderTarget for HeadlessTarget {
    fn size(&self) -> Size {
        self.size
    }

    fn render(&mut self, _viewport: &Viewport, _layers: &[&VectorLayer]) {
        self.renders.set(self.renders.get() + 1);
    }

    fn clear(&mut self) {
        self.cleared.set(true);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Escape,
    Other,
}

/// Pointer or keyboard input on the map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Click at a pixel position
    Click { x: f64, y: f64 },
    Key(Key),
}
