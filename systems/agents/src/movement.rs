//! Mirrored terrain queries and movement primitives.
//!
//! Every query takes coordinates relative to the foot, with `px` growing in
//! the facing direction and `py` growing downward. A left-facing agent sees
//! the terrain mirrored about the vertical line between columns `ex - 1` and
//! `ex`, so relative column `px` maps to `ex + px` when facing right and to
//! `ex - 1 - px` when facing left.

use lix_core::{Color, Facing, Phybits, Point, Rect};
use lix_terrain::Terrain;

use crate::Agent;

/// Height above the foot at which the body samples trigger areas.
const BODY_SAMPLE_HEIGHT: i32 = 8;
/// Rows [`Agent::solid_wall_height`] scans before giving up.
pub const MAX_WALL_SCAN: i32 = 12;

impl Agent {
    fn column(&self, px: i32) -> i32 {
        match self.facing {
            Facing::Right => self.ex + px,
            Facing::Left => self.ex - 1 - px,
        }
    }

    /// Absolute level point for the relative offset `(px, py)`.
    #[must_use]
    pub fn point(&self, px: i32, py: i32) -> Point {
        Point::new(self.column(px), self.ey + py)
    }

    fn rect(&self, x1: i32, y1: i32, x2: i32, y2: i32) -> Rect {
        Rect::from_corners(self.point(x1, y1), self.point(x2, y2))
    }

    /// Whether either of the two columns `px`, `px + 1` is solid at `py`.
    #[must_use]
    pub fn is_solid(&self, terrain: &Terrain, px: i32, py: i32) -> bool {
        terrain.is_solid(self.point(px, py)) || terrain.is_solid(self.point(px + 1, py))
    }

    /// Whether the single pixel at `(px, py)` is solid.
    #[must_use]
    pub fn is_solid_single(&self, terrain: &Terrain, px: i32, py: i32) -> bool {
        terrain.is_solid(self.point(px, py))
    }

    /// Whether the single pixel at `(px, py)` is steel.
    #[must_use]
    pub fn get_steel(&self, terrain: &Terrain, px: i32, py: i32) -> bool {
        terrain.is_steel(self.point(px, py))
    }

    /// Solid pixels in the inclusive relative rectangle.
    #[must_use]
    pub fn count_solid(&self, terrain: &Terrain, x1: i32, y1: i32, x2: i32, y2: i32) -> usize {
        terrain.count_solid(self.rect(x1, y1, x2, y2))
    }

    /// Steel pixels in the inclusive relative rectangle.
    #[must_use]
    pub fn count_steel(&self, terrain: &Terrain, x1: i32, y1: i32, x2: i32, y2: i32) -> usize {
        terrain.count_steel(self.rect(x1, y1, x2, y2))
    }

    /// Number of consecutive solid rows going up from `(px, py)`, checked
    /// with [`Agent::is_solid`], at most [`MAX_WALL_SCAN`].
    #[must_use]
    pub fn solid_wall_height(&self, terrain: &Terrain, px: i32, py: i32) -> i32 {
        let mut height = 0;
        while height < MAX_WALL_SCAN && self.is_solid(terrain, px, py - height) {
            height += 1;
        }
        height
    }

    /// Whether terrain at `(px, py)` stops upward motion. Activities that
    /// pass through ceilings never hit one.
    #[must_use]
    pub fn ceiling_blocks(&self, terrain: &Terrain, px: i32, py: i32) -> bool {
        !self.activity.pass_top() && self.is_solid(terrain, px, py)
    }

    /// Removes one pixel. Returns `true` on steel, which stays.
    pub fn remove_pixel(&self, terrain: &mut Terrain, px: i32, py: i32) -> bool {
        terrain.remove_pixel(self.point(px, py))
    }

    /// Removes the inclusive relative rectangle. Returns `true` when any
    /// steel was spared.
    pub fn remove_rectangle(
        &self,
        terrain: &mut Terrain,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
    ) -> bool {
        terrain.remove_rect(self.rect(x1, y1, x2, y2))
    }

    /// Adds one pixel where there is air.
    pub fn draw_pixel(&self, terrain: &mut Terrain, px: i32, py: i32, color: Color) {
        terrain.add_pixel(self.point(px, py), color);
    }

    /// Fills the air in the inclusive relative rectangle.
    pub fn draw_rectangle(
        &self,
        terrain: &mut Terrain,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        color: Color,
    ) {
        terrain.add_rect(self.rect(x1, y1, x2, y2), color);
    }

    /// Draws a brick in tribe colours: the top row light, the rest dark.
    pub fn draw_brick(&self, terrain: &mut Terrain, x1: i32, y1: i32, x2: i32, y2: i32) {
        let (light, dark) = self.style.brick_colors();
        let top = y1.min(y2);
        let bottom = y1.max(y2);
        self.draw_rectangle(terrain, x1, top, x2, top, light);
        if bottom > top {
            self.draw_rectangle(terrain, x1, top + 1, x2, bottom, dark);
        }
    }

    /// Moves `distance` pixels in the facing direction, backwards when
    /// negative, two pixels at a time. Odd distances round toward zero to
    /// keep `ex` even. Triggers are sampled after every step.
    pub fn move_ahead(&mut self, terrain: &Terrain, distance: i32) {
        let step = 2 * distance.signum() * self.facing.sign();
        for _ in 0..distance.abs() / 2 {
            self.ex = terrain.topology().wrap_x(self.ex + step);
            self.encounter(terrain);
        }
    }

    /// Moves down by `distance` pixels, up when negative, one row at a time.
    /// Triggers are sampled after every row.
    pub fn move_down(&mut self, terrain: &Terrain, distance: i32) {
        let step = distance.signum();
        for _ in 0..distance.abs() {
            self.ey = terrain.topology().wrap_y(self.ey + step);
            self.encounter(terrain);
        }
    }

    /// Moves up by `distance` pixels.
    pub fn move_up(&mut self, terrain: &Terrain, distance: i32) {
        self.move_down(terrain, -distance);
    }

    /// Reverses the facing. The agent keeps occupying the same columns.
    pub fn turn(&mut self) {
        self.facing = self.facing.turned();
    }

    /// Accumulates the trigger bits under the foot and at the body.
    pub(crate) fn encounter(&mut self, terrain: &Terrain) {
        let triggers = !(Phybits::TERRAIN | Phybits::STEEL);
        self.foot_encounters |= terrain.get(self.point(0, 0)) & triggers;
        self.body_encounters |= terrain.get(self.point(0, -BODY_SAMPLE_HEIGHT)) & triggers;
    }
}
