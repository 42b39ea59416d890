//! Plain-data level description and its validation.

use std::collections::BTreeSet;

use lix_core::{Activity, Facing, Phybits, Point, Rect, Style, Topology};
use lix_terrain::{Terrain, TileOccurrence};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tribe::SkillCount;

/// Everything needed to start a game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Level {
    /// Dimensions and wraparound.
    pub topology: Topology,
    /// Terrain tiles in drawing order.
    pub occurrences: Vec<TileOccurrence>,
    /// Trigger areas of goals and hazards.
    pub gadgets: Vec<GadgetPlacement>,
    /// Entrances that release each tribe's agents.
    pub hatches: Vec<HatchPlacement>,
    /// Participating tribes.
    pub tribes: Vec<TribeSetup>,
    /// Ticks between two agents leaving the same tribe's hatches.
    pub spawn_interval: u32,
}

/// Behaviour of a gadget's trigger area.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GadgetKind {
    /// Agents entering with their foot are saved.
    Goal,
    /// Agents entering with their foot drown.
    Water,
    /// Agents touching it burn.
    Fire,
    /// Agents touching it are killed.
    Trap,
    /// Agents touching it with their body are thrown.
    Flinger,
}

impl GadgetKind {
    /// Lookup bit painted over the trigger area.
    #[must_use]
    pub const fn bits(self) -> Phybits {
        match self {
            Self::Goal => Phybits::GOAL,
            Self::Water => Phybits::WATER,
            Self::Fire => Phybits::FIRE,
            Self::Trap => Phybits::TRAP,
            Self::Flinger => Phybits::FLING,
        }
    }
}

/// One gadget trigger area.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GadgetPlacement {
    /// What the area does.
    pub kind: GadgetKind,
    /// Trigger area in level coordinates.
    pub area: Rect,
}

/// One hatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HatchPlacement {
    /// Tribe whose agents leave through this hatch.
    pub style: Style,
    /// Foot position of newly spawned agents.
    pub position: Point,
    /// Initial facing of newly spawned agents.
    pub facing: Facing,
}

/// Starting conditions of one tribe.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TribeSetup {
    /// Tribe colour.
    pub style: Style,
    /// Agents released through the tribe's hatches.
    pub agents: u32,
    /// Starting skill inventory.
    pub skills: Vec<(Activity, SkillCount)>,
}

/// Reasons a level cannot be played.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LevelError {
    /// Width or height is not positive.
    #[error("level size {width}x{height} is empty")]
    EmptyTopology {
        /// Requested width.
        width: i32,
        /// Requested height.
        height: i32,
    },
    /// Wrapping horizontally needs an even width to keep agents on even
    /// columns.
    #[error("horizontally wrapping level width {width} must be even")]
    OddTorusWidth {
        /// Requested width.
        width: i32,
    },
    /// A tile's pixel buffer does not match its size.
    #[error("tile {index} has {actual} pixels but its size needs {expected}")]
    OccurrenceSize {
        /// Position of the tile in the occurrence list.
        index: usize,
        /// Pixels implied by width and height.
        expected: usize,
        /// Pixels supplied.
        actual: usize,
    },
    /// A hatch lies outside the level.
    #[error("hatch {index} at ({}, {}) lies outside the level", position.x, position.y)]
    HatchOutside {
        /// Position of the hatch in the hatch list.
        index: usize,
        /// Offending position.
        position: Point,
    },
    /// A hatch names a tribe that does not play.
    #[error("hatch {index} belongs to {style:?}, which has no tribe")]
    UnknownTribe {
        /// Position of the hatch in the hatch list.
        index: usize,
        /// Style named by the hatch.
        style: Style,
    },
    /// Two tribes share a style.
    #[error("tribe {0:?} is listed twice")]
    DuplicateTribe(Style),
    /// A tribe has agents to release but no hatch.
    #[error("tribe {0:?} has agents but no hatch")]
    MissingHatch(Style),
    /// A tribe's inventory lists something players cannot assign.
    #[error("tribe {style:?} lists {activity:?}, which is not a skill")]
    NotASkill {
        /// Tribe with the invalid inventory.
        style: Style,
        /// Offending activity.
        activity: Activity,
    },
    /// Hatches release nothing without a positive interval.
    #[error("spawn interval must be positive")]
    ZeroSpawnInterval,
}

impl Level {
    /// Checks every invariant the world relies on.
    pub fn validate(&self) -> Result<(), LevelError> {
        let topology = self.topology;
        if topology.width() <= 0 || topology.height() <= 0 {
            return Err(LevelError::EmptyTopology {
                width: topology.width(),
                height: topology.height(),
            });
        }
        if topology.torus_x() && topology.width() % 2 != 0 {
            return Err(LevelError::OddTorusWidth {
                width: topology.width(),
            });
        }
        if self.spawn_interval == 0 {
            return Err(LevelError::ZeroSpawnInterval);
        }
        for (index, occurrence) in self.occurrences.iter().enumerate() {
            let expected = usize::try_from(occurrence.width.max(0)).unwrap_or(0)
                * usize::try_from(occurrence.height.max(0)).unwrap_or(0);
            if occurrence.pixels.len() != expected {
                return Err(LevelError::OccurrenceSize {
                    index,
                    expected,
                    actual: occurrence.pixels.len(),
                });
            }
        }

        let mut styles = BTreeSet::new();
        for tribe in &self.tribes {
            if !styles.insert(tribe.style) {
                return Err(LevelError::DuplicateTribe(tribe.style));
            }
            let not_a_skill = tribe.skills.iter().find(|(activity, _)| !activity.is_skill());
            if let Some((activity, _)) = not_a_skill {
                return Err(LevelError::NotASkill {
                    style: tribe.style,
                    activity: *activity,
                });
            }
        }
        for (index, hatch) in self.hatches.iter().enumerate() {
            if !topology.contains(topology.wrap(hatch.position)) {
                return Err(LevelError::HatchOutside {
                    index,
                    position: hatch.position,
                });
            }
            if !styles.contains(&hatch.style) {
                return Err(LevelError::UnknownTribe {
                    index,
                    style: hatch.style,
                });
            }
        }
        let has_hatch = |style: Style| self.hatches.iter().any(|hatch| hatch.style == style);
        if let Some(tribe) = self
            .tribes
            .iter()
            .find(|tribe| tribe.agents > 0 && !has_hatch(tribe.style))
        {
            return Err(LevelError::MissingHatch(tribe.style));
        }
        Ok(())
    }

    /// Stamps tiles and trigger areas into fresh terrain.
    #[must_use]
    pub(crate) fn build_terrain(&self) -> Terrain {
        let mut terrain = Terrain::new(self.topology);
        for occurrence in &self.occurrences {
            terrain.add_occurrence(occurrence);
        }
        for gadget in &self.gadgets {
            terrain.add_trigger(gadget.area, gadget.kind.bits());
        }
        terrain
    }
}

#[cfg(test)]
mod tests {
    use lix_core::Color;
    use lix_terrain::TileKind;

    use super::*;

    fn level() -> Level {
        Level {
            topology: Topology::new(100, 80, false, false),
            occurrences: vec![TileOccurrence::filled(
                Rect::new(0, 60, 100, 20),
                Color::from_rgb(0x80, 0x60, 0x40),
                TileKind::Terrain,
            )],
            gadgets: vec![GadgetPlacement {
                kind: GadgetKind::Goal,
                area: Rect::new(80, 50, 10, 10),
            }],
            hatches: vec![HatchPlacement {
                style: Style::Red,
                position: Point::new(10, 20),
                facing: Facing::Right,
            }],
            tribes: vec![TribeSetup {
                style: Style::Red,
                agents: 5,
                skills: vec![(Activity::Digger, SkillCount::Finite(3))],
            }],
            spawn_interval: 20,
        }
    }

    #[test]
    fn well_formed_level_validates() {
        assert_eq!(level().validate(), Ok(()));
        let terrain = level().build_terrain();
        assert!(terrain.is_solid(Point::new(5, 65)));
        assert!(terrain.in_trigger_area(Point::new(85, 55), Phybits::GOAL));
    }

    #[test]
    fn malformed_levels_are_rejected() {
        let mut broken = level();
        broken.topology = Topology::new(0, 80, false, false);
        assert!(matches!(broken.validate(), Err(LevelError::EmptyTopology { .. })));

        let mut broken = level();
        broken.topology = Topology::new(101, 80, true, false);
        assert_eq!(broken.validate(), Err(LevelError::OddTorusWidth { width: 101 }));

        let mut broken = level();
        let _ = broken.occurrences[0].pixels.pop();
        assert!(matches!(broken.validate(), Err(LevelError::OccurrenceSize { index: 0, .. })));

        let mut broken = level();
        broken.hatches[0].position = Point::new(10, 200);
        assert!(matches!(broken.validate(), Err(LevelError::HatchOutside { index: 0, .. })));

        let mut broken = level();
        broken.hatches[0].style = Style::Blue;
        assert!(matches!(broken.validate(), Err(LevelError::UnknownTribe { .. })));

        let mut broken = level();
        broken.tribes[0].skills.push((Activity::Splatter, SkillCount::Infinite));
        assert_eq!(
            broken.validate(),
            Err(LevelError::NotASkill {
                style: Style::Red,
                activity: Activity::Splatter,
            })
        );

        let mut broken = level();
        broken.tribes.push(broken.tribes[0].clone());
        assert_eq!(broken.validate(), Err(LevelError::DuplicateTribe(Style::Red)));
    }

    #[test]
    fn wrapping_hatch_positions_are_inside() {
        let mut wrapped = level();
        wrapped.topology = Topology::new(100, 80, true, false);
        wrapped.hatches[0].position = Point::new(130, 20);
        assert_eq!(wrapped.validate(), Ok(()));
    }

    #[test]
    fn errors_render_readably() {
        let error = LevelError::MissingHatch(Style::Green);
        assert_eq!(error.to_string(), "tribe Green has agents but no hatch");
    }
}
