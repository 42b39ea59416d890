//! Colour buffer holding the visible terrain.

use lix_core::{Color, Point, Topology};

/// Terrain pixel colours addressed with the same torus rules as the lookup map.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TerrainBitmap {
    topology: Topology,
    pixels: Vec<Color>,
}

impl TerrainBitmap {
    /// Creates a fully transparent bitmap.
    #[must_use]
    pub fn new(topology: Topology) -> Self {
        Self {
            topology,
            pixels: vec![Color::TRANSPARENT; topology.area()],
        }
    }

    /// Colour at the point; transparent outside the level.
    #[must_use]
    pub fn pixel(&self, point: Point) -> Color {
        self.topology
            .index(point)
            .and_then(|index| self.pixels.get(index).copied())
            .unwrap_or(Color::TRANSPARENT)
    }

    /// Overwrites the colour at the point. Writes outside the level are dropped.
    pub fn set_pixel(&mut self, point: Point, color: Color) {
        if let Some(index) = self.topology.index(point) {
            if let Some(slot) = self.pixels.get_mut(index) {
                *slot = color;
            }
        }
    }

    /// Row-major pixel storage for the rendering collaborator.
    #[must_use]
    pub fn as_slice(&self) -> &[Color] {
        &self.pixels
    }
}
