//! Per-pixel bitmask index over terrain solidity and trigger areas.

use lix_core::{Phybits, Point, Rect, Topology};

/// Bitmask-per-pixel spatial index.
///
/// Coordinates are normalized through the torus axes of the topology before
/// every read or write. Points outside a non-wrapping axis read as empty and
/// ignore writes, so agents near level edges never observe solid ground
/// that does not exist.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lookup {
    topology: Topology,
    bits: Vec<Phybits>,
}

impl Lookup {
    /// Creates an empty lookup map covering the topology.
    #[must_use]
    pub fn new(topology: Topology) -> Self {
        Self {
            topology,
            bits: vec![Phybits::EMPTY; topology.area()],
        }
    }

    /// Level dimensions and wrapping configuration.
    #[must_use]
    pub const fn topology(&self) -> Topology {
        self.topology
    }

    /// Bits stored at the point; empty outside the level.
    #[must_use]
    pub fn get(&self, point: Point) -> Phybits {
        self.topology
            .index(point)
            .and_then(|index| self.bits.get(index).copied())
            .unwrap_or(Phybits::EMPTY)
    }

    /// Sets the given bits at the point.
    pub fn add(&mut self, point: Point, bits: Phybits) {
        if let Some(slot) = self.slot_mut(point) {
            *slot |= bits;
        }
    }

    /// Clears the given bits at the point.
    ///
    /// Steel protection is the caller's responsibility.
    pub fn remove(&mut self, point: Point, bits: Phybits) {
        if let Some(slot) = self.slot_mut(point) {
            *slot = *slot & !bits;
        }
    }

    /// Counts the points of `rect` that carry every bit of `bits`.
    #[must_use]
    pub fn count(&self, rect: Rect, bits: Phybits) -> usize {
        rect.points()
            .filter(|point| self.get(*point).contains(bits))
            .count()
    }

    /// Raw row-major bit storage, used for checksums.
    #[must_use]
    pub fn as_slice(&self) -> &[Phybits] {
        &self.bits
    }

    fn slot_mut(&mut self, point: Point) -> Option<&mut Phybits> {
        let index = self.topology.index(point)?;
        self.bits.get_mut(index)
    }
}
