#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Destructible pixel terrain for the lix simulation.
//!
//! [`Terrain`] is the single-owner arena agents mutate while they dig and
//! build. It keeps the visible [`TerrainBitmap`] and the [`Lookup`] bitmask
//! index in lockstep so collision tests never have to look at colours.

mod bitmap;
mod lookup;

pub use bitmap::TerrainBitmap;
pub use lookup::Lookup;

use lix_core::{Color, Phybits, Point, Rect, Topology};

/// How a tile occurrence affects the terrain underneath it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TileKind {
    /// Regular destructible terrain.
    Terrain,
    /// Indestructible terrain.
    Steel,
    /// Erases whatever lies underneath, steel included.
    Dark,
}

/// One placement of a terrain tile, produced by the level loader.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileOccurrence {
    /// Upper-left corner of the tile in level coordinates.
    pub position: Point,
    /// Width of the tile in pixels.
    pub width: i32,
    /// Height of the tile in pixels.
    pub height: i32,
    /// Row-major tile pixels; transparent pixels are skipped.
    pub pixels: Vec<Color>,
    /// Effect on the terrain underneath.
    pub kind: TileKind,
    /// Only fill pixels that are not already solid.
    pub no_overwrite: bool,
}

impl TileOccurrence {
    /// Creates a solid rectangle of a single colour.
    #[must_use]
    pub fn filled(rect: Rect, color: Color, kind: TileKind) -> Self {
        let area = usize::try_from(rect.width.max(0)).unwrap_or(0)
            * usize::try_from(rect.height.max(0)).unwrap_or(0);
        Self {
            position: Point::new(rect.x, rect.y),
            width: rect.width,
            height: rect.height,
            pixels: vec![color; area],
            kind,
            no_overwrite: false,
        }
    }

    fn covered(&self) -> impl Iterator<Item = (Point, Color)> + '_ {
        Rect::new(self.position.x, self.position.y, self.width, self.height)
            .points()
            .zip(self.pixels.iter().copied())
            .filter(|(_, color)| color.is_opaque())
    }
}

/// Terrain arena: colour buffer plus lookup map, always mutated together.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Terrain {
    lookup: Lookup,
    bitmap: TerrainBitmap,
}

impl Terrain {
    /// Creates empty terrain for the given topology.
    #[must_use]
    pub fn new(topology: Topology) -> Self {
        Self {
            lookup: Lookup::new(topology),
            bitmap: TerrainBitmap::new(topology),
        }
    }

    /// Level dimensions and wrapping configuration.
    #[must_use]
    pub const fn topology(&self) -> Topology {
        self.lookup.topology()
    }

    /// Read-only access to the lookup map.
    #[must_use]
    pub const fn lookup(&self) -> &Lookup {
        &self.lookup
    }

    /// Read-only access to the colour buffer.
    #[must_use]
    pub const fn bitmap(&self) -> &TerrainBitmap {
        &self.bitmap
    }

    /// Every lookup bit at the point.
    #[must_use]
    pub fn get(&self, point: Point) -> Phybits {
        self.lookup.get(point)
    }

    /// Whether the point holds terrain (steel counts as terrain).
    #[must_use]
    pub fn is_solid(&self, point: Point) -> bool {
        self.lookup.get(point).contains(Phybits::TERRAIN)
    }

    /// Whether the point holds steel.
    #[must_use]
    pub fn is_steel(&self, point: Point) -> bool {
        self.lookup.get(point).contains(Phybits::STEEL)
    }

    /// Removes one terrain pixel unless it is steel.
    ///
    /// Returns `true` when steel was encountered; nothing changes then.
    pub fn remove_pixel(&mut self, point: Point) -> bool {
        if self.is_steel(point) {
            return true;
        }
        if self.is_solid(point) {
            self.lookup.remove(point, Phybits::TERRAIN);
            self.bitmap.set_pixel(point, Color::TRANSPARENT);
        }
        false
    }

    /// Adds one terrain pixel where there is none yet.
    pub fn add_pixel(&mut self, point: Point, color: Color) {
        if self.is_solid(point) {
            return;
        }
        self.lookup.add(point, Phybits::TERRAIN);
        self.bitmap.set_pixel(point, color);
    }

    /// Removes every non-steel pixel of the rectangle.
    ///
    /// Returns `true` when at least one steel pixel was spared.
    pub fn remove_rect(&mut self, rect: Rect) -> bool {
        rect.points()
            .fold(false, |steel, point| self.remove_pixel(point) || steel)
    }

    /// Fills the empty pixels of the rectangle.
    pub fn add_rect(&mut self, rect: Rect, color: Color) {
        for point in rect.points() {
            self.add_pixel(point, color);
        }
    }

    /// Number of solid pixels in the rectangle.
    #[must_use]
    pub fn count_solid(&self, rect: Rect) -> usize {
        self.lookup.count(rect, Phybits::TERRAIN)
    }

    /// Number of steel pixels in the rectangle.
    #[must_use]
    pub fn count_steel(&self, rect: Rect) -> usize {
        self.lookup.count(rect, Phybits::STEEL)
    }

    /// Stamps a tile occurrence during level construction.
    pub fn add_occurrence(&mut self, occurrence: &TileOccurrence) {
        for (point, color) in occurrence.covered() {
            match occurrence.kind {
                TileKind::Dark => {
                    self.lookup.remove(point, Phybits::TERRAIN | Phybits::STEEL);
                    self.bitmap.set_pixel(point, Color::TRANSPARENT);
                }
                TileKind::Terrain | TileKind::Steel => {
                    if occurrence.no_overwrite && self.is_solid(point) {
                        continue;
                    }
                    let mut bits = Phybits::TERRAIN;
                    if occurrence.kind == TileKind::Steel {
                        bits |= Phybits::STEEL;
                    } else {
                        self.lookup.remove(point, Phybits::STEEL);
                    }
                    self.lookup.add(point, bits);
                    self.bitmap.set_pixel(point, color);
                }
            }
        }
    }

    /// Marks a gadget trigger area with opaque lookup bits.
    pub fn add_trigger(&mut self, rect: Rect, bits: Phybits) {
        let bits = bits & !(Phybits::TERRAIN | Phybits::STEEL);
        for point in rect.points() {
            self.lookup.add(point, bits);
        }
    }

    /// Whether the point lies in a trigger area carrying any of `bits`.
    #[must_use]
    pub fn in_trigger_area(&self, point: Point, bits: Phybits) -> bool {
        self.lookup.get(point).intersects(bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topology() -> Topology {
        Topology::new(64, 64, false, false)
    }

    const BROWN: Color = Color::from_rgb(0x80, 0x50, 0x20);

    #[test]
    fn add_then_remove_restores_air() {
        let mut terrain = Terrain::new(topology());
        let point = Point::new(10, 10);

        terrain.add_pixel(point, BROWN);
        assert!(terrain.is_solid(point));
        assert_eq!(terrain.bitmap().pixel(point), BROWN);

        assert!(!terrain.remove_pixel(point));
        assert!(!terrain.is_solid(point));
        assert_eq!(terrain.bitmap().pixel(point), Color::TRANSPARENT);
    }

    #[test]
    fn steel_survives_removal() {
        let mut terrain = Terrain::new(topology());
        let rect = Rect::new(4, 4, 3, 3);
        terrain.add_occurrence(&TileOccurrence::filled(rect, BROWN, TileKind::Steel));
        let before = terrain.clone();

        assert!(terrain.remove_pixel(Point::new(5, 5)));
        assert!(terrain.remove_rect(rect));
        assert_eq!(terrain, before);
        assert_eq!(terrain.count_steel(rect), 9);
    }

    #[test]
    fn add_pixel_keeps_existing_colour() {
        let mut terrain = Terrain::new(topology());
        let point = Point::new(3, 3);
        terrain.add_pixel(point, BROWN);
        terrain.add_pixel(point, Color::from_rgb(0, 0, 0xff));
        assert_eq!(terrain.bitmap().pixel(point), BROWN);
    }

    #[test]
    fn dark_tiles_erase_and_no_overwrite_fills_gaps() {
        let mut terrain = Terrain::new(topology());
        terrain.add_occurrence(&TileOccurrence::filled(
            Rect::new(0, 0, 8, 8),
            BROWN,
            TileKind::Steel,
        ));
        terrain.add_occurrence(&TileOccurrence::filled(
            Rect::new(0, 0, 4, 8),
            BROWN,
            TileKind::Dark,
        ));
        assert_eq!(terrain.count_solid(Rect::new(0, 0, 8, 8)), 32);
        assert_eq!(terrain.count_steel(Rect::new(0, 0, 4, 8)), 0);

        let blue = Color::from_rgb(0, 0, 0xff);
        let mut filler = TileOccurrence::filled(Rect::new(0, 0, 8, 8), blue, TileKind::Terrain);
        filler.no_overwrite = true;
        terrain.add_occurrence(&filler);
        assert_eq!(terrain.bitmap().pixel(Point::new(1, 1)), blue);
        assert_eq!(terrain.bitmap().pixel(Point::new(6, 1)), BROWN);
        assert!(terrain.is_steel(Point::new(6, 1)));
    }

    #[test]
    fn triggers_never_create_solidity() {
        let mut terrain = Terrain::new(topology());
        terrain.add_trigger(
            Rect::new(0, 0, 4, 4),
            Phybits::WATER | Phybits::TERRAIN,
        );
        assert!(terrain.in_trigger_area(Point::new(1, 1), Phybits::WATER));
        assert!(!terrain.in_trigger_area(Point::new(1, 1), Phybits::FIRE));
        assert!(!terrain.is_solid(Point::new(1, 1)));
    }
}
