//! Minimal single-tribe harness for activity tests.

use std::collections::BTreeMap;

use lix_core::{
    Activity, AgentId, Color, Facing, Phyu, Point, Rect, SkillBank, Sound, Style, Topology,
};
use lix_system_effects::Effects;
use lix_terrain::{Terrain, TileKind, TileOccurrence};

use crate::{Agent, FlingRequest, Neighbor, StandardFrames, UpdateArgs};

const EARTH: Color = Color::from_rgb(0x80, 0x50, 0x20);

#[derive(Default)]
struct Returns(BTreeMap<Activity, u32>);

impl SkillBank for Returns {
    fn return_skills(&mut self, activity: Activity, count: u32) {
        *self.0.entry(activity).or_insert(0) += count;
    }
}

pub(crate) struct Scene {
    phyu: Phyu,
    terrain: Terrain,
    effects: Effects,
    returns: Returns,
    agents: Vec<Agent>,
}

impl Scene {
    pub(crate) fn new() -> Self {
        Self::with_topology(Topology::new(200, 160, false, false))
    }

    pub(crate) fn tall() -> Self {
        Self::with_topology(Topology::new(200, 260, false, false))
    }

    fn with_topology(topology: Topology) -> Self {
        Self {
            phyu: Phyu::ZERO,
            terrain: Terrain::new(topology),
            effects: Effects::new(Some(Style::Red)),
            returns: Returns::default(),
            agents: Vec::new(),
        }
    }

    pub(crate) fn fill(&mut self, rect: Rect) {
        self.terrain.add_rect(rect, EARTH);
    }

    pub(crate) fn clear(&mut self, rect: Rect) {
        let _ = self.terrain.remove_rect(rect);
    }

    pub(crate) fn steel(&mut self, rect: Rect) {
        self.terrain
            .add_occurrence(&TileOccurrence::filled(rect, EARTH, TileKind::Steel));
    }

    pub(crate) fn trigger(&mut self, rect: Rect, bits: lix_core::Phybits) {
        self.terrain.add_trigger(rect, bits);
    }

    pub(crate) fn spawn(&mut self, position: Point, facing: Facing) -> AgentId {
        let id = AgentId::new(u32::try_from(self.agents.len()).expect("few agents"));
        self.agents.push(Agent::new(id, Style::Red, position, facing));
        id
    }

    pub(crate) fn spawn_walker(&mut self, position: Point, facing: Facing) -> AgentId {
        let id = self.spawn(position, facing);
        self.agent_mut(id).become_default(Activity::Walker);
        id
    }

    pub(crate) fn agent(&self, id: AgentId) -> &Agent {
        self.agents
            .iter()
            .find(|agent| agent.id() == id)
            .expect("agent exists")
    }

    pub(crate) fn agent_mut(&mut self, id: AgentId) -> &mut Agent {
        self.agents
            .iter_mut()
            .find(|agent| agent.id() == id)
            .expect("agent exists")
    }

    pub(crate) fn terrain(&self) -> &Terrain {
        &self.terrain
    }

    pub(crate) fn heard(&self, sound: Sound) -> bool {
        self.effects.ledger().iter().any(|record| record.sound == sound)
    }

    pub(crate) fn debris_count(&self) -> usize {
        self.effects.debris().len()
    }

    pub(crate) fn returned(&self, activity: Activity) -> u32 {
        self.returns.0.get(&activity).copied().unwrap_or(0)
    }

    pub(crate) fn assign(&mut self, id: AgentId, activity: Activity) {
        let neighbors = self.snapshot();
        let mut flings = Vec::new();
        let mut args = UpdateArgs {
            phyu: self.phyu,
            terrain: &mut self.terrain,
            effects: &mut self.effects,
            skills: &mut self.returns,
            frames: &StandardFrames,
            neighbors: &neighbors,
            flings: &mut flings,
        };
        let agent = self
            .agents
            .iter_mut()
            .find(|agent| agent.id() == id)
            .expect("agent exists");
        agent.assign(activity, &mut args);
    }

    pub(crate) fn update(&mut self) {
        self.phyu = self.phyu.next();
        let neighbors = self.snapshot();
        let mut flings: Vec<FlingRequest> = Vec::new();
        {
            let mut args = UpdateArgs {
                phyu: self.phyu,
                terrain: &mut self.terrain,
                effects: &mut self.effects,
                skills: &mut self.returns,
                frames: &StandardFrames,
                neighbors: &neighbors,
                flings: &mut flings,
            };
            for agent in &mut self.agents {
                agent.update(&mut args);
            }
        }
        let mut unused = Vec::new();
        let mut args = UpdateArgs {
            phyu: self.phyu,
            terrain: &mut self.terrain,
            effects: &mut self.effects,
            skills: &mut self.returns,
            frames: &StandardFrames,
            neighbors: &neighbors,
            flings: &mut unused,
        };
        for fling in flings {
            if let Some(agent) = self.agents.iter_mut().find(|agent| agent.id() == fling.target) {
                agent.apply_fling(fling.speed, &mut args);
            }
        }
    }

    /// Updates until `done` holds for the agent, panicking after `limit`.
    pub(crate) fn run_until(&mut self, id: AgentId, limit: usize, done: impl Fn(&Agent) -> bool) {
        for _ in 0..limit {
            self.update();
            if done(self.agent(id)) {
                return;
            }
        }
        panic!("agent {id:?} did not reach the expected state: {:?}", self.agent(id));
    }

    fn snapshot(&self) -> Vec<Neighbor> {
        self.agents.iter().map(Neighbor::of).collect()
    }
}
