//! TOML scenario files for headless runs.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use lix_core::{Activity, AgentId, Color, Rect, Style, Topology};
use lix_terrain::{TileKind, TileOccurrence};
use lix_world::{GadgetPlacement, HatchPlacement, Level, SkillCount, TribeSetup};
use serde::Deserialize;

const DEFAULT_COLOR: [u8; 3] = [0x90, 0x70, 0x50];
const DEFAULT_SPAWN_INTERVAL: u32 = 32;
const DEFAULT_TICKS: u32 = 1_000;

/// A level plus the input to feed it.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Scenario {
    pub(crate) topology: Topology,
    #[serde(default = "default_spawn_interval")]
    pub(crate) spawn_interval: u32,
    #[serde(default = "default_ticks")]
    pub(crate) ticks: u32,
    pub(crate) local_style: Option<Style>,
    #[serde(default)]
    pub(crate) terrain: Vec<TerrainPiece>,
    #[serde(default)]
    pub(crate) gadgets: Vec<GadgetPlacement>,
    #[serde(default)]
    pub(crate) hatches: Vec<HatchPlacement>,
    #[serde(default)]
    pub(crate) tribes: Vec<TribeEntry>,
    #[serde(default)]
    pub(crate) assignments: Vec<ScheduledAssignment>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct TerrainPiece {
    pub(crate) rect: Rect,
    #[serde(default)]
    pub(crate) kind: PieceKind,
    pub(crate) color: Option<[u8; 3]>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum PieceKind {
    #[default]
    Terrain,
    Steel,
    Dark,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct TribeEntry {
    pub(crate) style: Style,
    pub(crate) agents: u32,
    #[serde(default)]
    pub(crate) skills: BTreeMap<Activity, SkillCount>,
}

/// A skill handed out once `tick` has been simulated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ScheduledAssignment {
    pub(crate) tick: u32,
    pub(crate) agent: u32,
    pub(crate) skill: Activity,
    #[serde(default)]
    pub(crate) personal: bool,
}

impl ScheduledAssignment {
    pub(crate) const fn agent(&self) -> AgentId {
        AgentId::new(self.agent)
    }
}

fn default_spawn_interval() -> u32 {
    DEFAULT_SPAWN_INTERVAL
}

fn default_ticks() -> u32 {
    DEFAULT_TICKS
}

impl Scenario {
    pub(crate) fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).context("scenario is not valid TOML")
    }

    /// Converts the file's plain data into a playable level description.
    pub(crate) fn level(&self) -> Level {
        let occurrences = self
            .terrain
            .iter()
            .map(|piece| {
                let [red, green, blue] = piece.color.unwrap_or(DEFAULT_COLOR);
                let kind = match piece.kind {
                    PieceKind::Terrain => TileKind::Terrain,
                    PieceKind::Steel => TileKind::Steel,
                    PieceKind::Dark => TileKind::Dark,
                };
                TileOccurrence::filled(piece.rect, Color::from_rgb(red, green, blue), kind)
            })
            .collect();
        let tribes = self
            .tribes
            .iter()
            .map(|tribe| TribeSetup {
                style: tribe.style,
                agents: tribe.agents,
                skills: tribe.skills.iter().map(|(skill, count)| (*skill, *count)).collect(),
            })
            .collect();
        Level {
            topology: self.topology,
            occurrences,
            gadgets: self.gadgets.clone(),
            hatches: self.hatches.clone(),
            tribes,
            spawn_interval: self.spawn_interval,
        }
    }

    /// Assignments to issue right after `tick` was simulated.
    pub(crate) fn assignments_after(
        &self,
        tick: u32,
    ) -> impl Iterator<Item = &ScheduledAssignment> {
        self.assignments
            .iter()
            .filter(move |assignment| assignment.tick == tick)
    }
}

#[cfg(test)]
mod tests {
    use lix_core::{Facing, Point};
    use lix_world::GadgetKind;

    use super::*;

    const SAMPLE: &str = r#"
        ticks = 300
        local_style = "Red"

        [topology]
        width = 160
        height = 100
        torus_x = true
        torus_y = false

        [[terrain]]
        rect = { x = 0, y = 80, width = 160, height = 20 }

        [[terrain]]
        rect = { x = 60, y = 90, width = 40, height = 10 }
        kind = "steel"
        color = [200, 200, 200]

        [[gadgets]]
        kind = "goal"
        area = { x = 140, y = 70, width = 10, height = 10 }

        [[hatches]]
        style = "Red"
        position = { x = 20, y = 30 }
        facing = "Right"

        [[tribes]]
        style = "Red"
        agents = 4
        skills = { Digger = { finite = 2 }, Builder = "infinite" }

        [[assignments]]
        tick = 60
        agent = 0
        skill = "Digger"
    "#;

    #[test]
    fn sample_scenario_builds_a_valid_level() {
        let scenario = Scenario::parse(SAMPLE).expect("sample parses");
        assert_eq!(scenario.ticks, 300);
        assert_eq!(scenario.spawn_interval, DEFAULT_SPAWN_INTERVAL);
        assert_eq!(scenario.local_style, Some(Style::Red));

        let level = scenario.level();
        assert_eq!(level.validate(), Ok(()));
        assert!(level.topology.torus_x());
        assert_eq!(level.occurrences[1].kind, TileKind::Steel);
        assert_eq!(level.gadgets[0].kind, GadgetKind::Goal);
        assert_eq!(level.hatches[0].position, Point::new(20, 30));
        assert_eq!(level.hatches[0].facing, Facing::Right);
        assert_eq!(
            level.tribes[0].skills,
            vec![
                (Activity::Builder, SkillCount::Infinite),
                (Activity::Digger, SkillCount::Finite(2)),
            ]
        );

        let due: Vec<_> = scenario.assignments_after(60).collect();
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].agent(), AgentId::new(0));
        assert!(scenario.assignments_after(61).next().is_none());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let broken = SAMPLE.replace("ticks = 300", "tiks = 300");
        let error = Scenario::parse(&broken).expect_err("typo must fail");
        assert!(format!("{error:#}").contains("tiks"));
    }
}
