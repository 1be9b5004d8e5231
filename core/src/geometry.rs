// SPDX-License-Identifier: MIT OR Apache-2.0

//! Drawable surface geometry
//!
//! The resolver owns the only copy of [`Geometry`]. Rendering and input
//! mapping read it and defer all work while it is absent.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Pixel size and viewport offset of the drawable surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    /// Surface width in pixels (positive)
    pub width: f32,
    /// Surface height in pixels (positive)
    pub height: f32,
    /// Distance from the viewport's left edge
    pub offset_left: f32,
    /// Distance from the viewport's top edge
    pub offset_top: f32,
}

/// Post-layout measurements reported by the host for its surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutSnapshot {
    /// Rendered width
    pub width: f32,
    /// Rendered height
    pub height: f32,
    /// Left edge in viewport coordinates
    pub left: f32,
    /// Top edge in viewport coordinates
    pub top: f32,
}

/// Something that can report its rendered layout
pub trait SurfaceLayout {
    /// Current layout, or `None` while the surface is not attached
    fn layout(&self) -> Option<LayoutSnapshot>;
}

impl SurfaceLayout for LayoutSnapshot {
    fn layout(&self) -> Option<LayoutSnapshot> {
        Some(*self)
    }
}

impl SurfaceLayout for Option<LayoutSnapshot> {
    fn layout(&self) -> Option<LayoutSnapshot> {
        *self
    }
}

impl Geometry {
    /// Build a geometry from a layout snapshot
    ///
    /// Width and height are truncated to whole pixels. Returns `None` for a
    /// surface with no positive area.
    pub fn from_layout(layout: LayoutSnapshot) -> Option<Self> {
        let width = layout.width.trunc();
        let height = layout.height.trunc();
        // also rejects NaN
        if !(width > 0.0 && height > 0.0) {
            return None;
        }
        Some(Self {
            width,
            height,
            offset_left: layout.left,
            offset_top: layout.top,
        })
    }
}

/// Captures and caches the surface geometry
#[derive(Debug, Default, Clone)]
pub struct GeometryResolver {
    geometry: Option<Geometry>,
}

impl GeometryResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the surface layout on attach
    ///
    /// A surface that is not attached yet, or has no area, leaves the
    /// resolver untouched.
    pub fn attach<S: SurfaceLayout + ?Sized>(&mut self, surface: &S) -> Option<Geometry> {
        match surface.layout().and_then(Geometry::from_layout) {
            Some(geometry) => {
                debug!(?geometry, "Surface attached");
                self.geometry = Some(geometry);
            }
            None => debug!("Surface not ready, geometry deferred"),
        }
        self.geometry
    }

    /// Re-read the layout after a resize or visibility change
    ///
    /// Returns true when the cached geometry changed and the board needs a
    /// redraw.
    pub fn resize<S: SurfaceLayout + ?Sized>(&mut self, surface: &S) -> bool {
        let Some(geometry) = surface.layout().and_then(Geometry::from_layout) else {
            return false;
        };
        if self.geometry == Some(geometry) {
            return false;
        }
        debug!(?geometry, "Surface geometry changed");
        self.geometry = Some(geometry);
        true
    }

    /// Forget the geometry when the surface goes away
    pub fn detach(&mut self) {
        self.geometry = None;
    }

    pub fn current(&self) -> Option<Geometry> {
        self.geometry
    }
}
