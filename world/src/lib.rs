#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative game driver for the lix simulation.
//!
//! A [`World`] owns the terrain, every tribe with its agents, the replay of
//! player input and the effect manager. It only changes through [`apply`],
//! which turns [`Command`]s into [`Event`]s. Everything a frontend may read
//! lives in [`query`].

mod level;
mod replay;
mod tribe;

pub use level::{GadgetKind, GadgetPlacement, HatchPlacement, Level, LevelError, TribeSetup};
pub use replay::{Replay, ReplayEntry};
pub use tribe::{SkillCount, SkillInventory};

use std::collections::BTreeMap;

use lix_core::{
    Activity, AgentId, AssignmentError, Command, Event, Facing, Phyu, Point, RemovalCause,
    SoundSink, Style,
};
use lix_system_agents::{Agent, FlingRequest, Neighbor, StandardFrames, UpdateArgs};
use lix_system_effects::Effects;
use lix_terrain::Terrain;
use tracing::{debug, trace};

use crate::tribe::Tribe;

/// Tick on which hatches release their first agent.
const HATCH_OPENING: u32 = 20;
const AUTOSAVE_INTERVAL: u32 = 10;
/// Autosaves kept besides the one of tick zero.
const AUTOSAVE_LIMIT: usize = 32;

/// Everything that rewinds together.
#[derive(Clone, Debug, PartialEq, Eq)]
struct SimState {
    phyu: Phyu,
    terrain: Terrain,
    tribes: BTreeMap<Style, Tribe>,
    next_agent: u32,
}

/// Represents the authoritative game state.
#[derive(Debug)]
pub struct World {
    state: SimState,
    hatches: Vec<HatchPlacement>,
    spawn_interval: u32,
    replay: Replay,
    autosaves: BTreeMap<Phyu, SimState>,
    quicksave: Option<SimState>,
    /// Tick during which the latest input was recorded, cleared by rewinds.
    recording_at: Option<Phyu>,
    effects: Effects,
}

impl World {
    /// Builds the starting state of `level`. Sounds of `local_style` play
    /// loud.
    pub fn new(level: &Level, local_style: Option<Style>) -> Result<Self, LevelError> {
        level.validate()?;
        let tribes = level
            .tribes
            .iter()
            .map(|setup| {
                let skills = SkillInventory::new(setup.skills.iter().copied());
                (setup.style, Tribe::new(setup.style, setup.agents, skills))
            })
            .collect();
        let state = SimState {
            phyu: Phyu::ZERO,
            terrain: level.build_terrain(),
            tribes,
            next_agent: 0,
        };
        let mut autosaves = BTreeMap::new();
        let _ = autosaves.insert(Phyu::ZERO, state.clone());
        debug!(
            width = level.topology.width(),
            height = level.topology.height(),
            tribes = level.tribes.len(),
            hatches = level.hatches.len(),
            "world created"
        );
        Ok(Self {
            state,
            hatches: level.hatches.clone(),
            spawn_interval: level.spawn_interval,
            replay: Replay::default(),
            autosaves,
            quicksave: None,
            recording_at: None,
            effects: Effects::new(local_style),
        })
    }

    fn advance(&mut self, out_events: &mut Vec<Event>) {
        let phyu = self.state.phyu.next();
        self.state.phyu = phyu;
        trace!(phyu = phyu.get(), "advancing");

        let mut flings = Vec::new();
        let entries = self.replay.entries_at(phyu).to_vec();
        for entry in entries {
            match entry {
                ReplayEntry::Assign {
                    style,
                    agent,
                    activity,
                    personal,
                } => self.perform_assignment(
                    style,
                    agent,
                    activity,
                    personal,
                    &mut flings,
                    out_events,
                ),
                ReplayEntry::Spawn {
                    style,
                    position,
                    facing,
                } => self.spawn(style, position, facing, out_events),
            }
        }
        self.release_from_hatches(out_events);
        self.update_agents(&mut flings);
        self.apply_flings(&flings);
        self.remove_finished(out_events);

        if phyu.get() % AUTOSAVE_INTERVAL == 0 {
            self.autosave();
        }
        out_events.push(Event::TickAdvanced { phyu });
    }

    fn perform_assignment(
        &mut self,
        style: Style,
        agent: AgentId,
        activity: Activity,
        personal: bool,
        flings: &mut Vec<FlingRequest>,
        out_events: &mut Vec<Event>,
    ) {
        match self.try_assign(style, agent, activity, personal, flings) {
            Ok(phyu) => {
                debug!(phyu = phyu.get(), agent = agent.get(), ?activity, "skill assigned");
                out_events.push(Event::SkillAssigned {
                    phyu,
                    agent,
                    activity,
                });
            }
            Err(reason) => {
                debug!(agent = agent.get(), ?activity, ?reason, "replayed assignment rejected");
                out_events.push(Event::AssignmentRejected {
                    agent,
                    activity,
                    reason,
                });
            }
        }
    }

    fn try_assign(
        &mut self,
        style: Style,
        agent: AgentId,
        activity: Activity,
        personal: bool,
        flings: &mut Vec<FlingRequest>,
    ) -> Result<Phyu, AssignmentError> {
        check_assignment(&self.state, style, agent, activity, personal)?;

        let SimState {
            phyu,
            terrain,
            tribes,
            ..
        } = &mut self.state;
        let phyu = *phyu;
        let neighbors = snapshot(tribes);
        let Tribe { skills, agents, .. } =
            tribes.get_mut(&style).ok_or(AssignmentError::ForeignAgent)?;
        let target = agents
            .iter_mut()
            .find(|candidate| candidate.id() == agent)
            .ok_or(AssignmentError::MissingAgent)?;
        skills.consume(activity)?;

        let mut args = UpdateArgs {
            phyu,
            terrain: &mut *terrain,
            effects: &mut self.effects,
            skills: &mut *skills,
            frames: &StandardFrames,
            neighbors: &neighbors,
            flings: &mut *flings,
        };
        target.assign(activity, &mut args);
        self.effects
            .add_arrow(phyu, style, agent, target.position(), activity);
        Ok(phyu)
    }

    fn spawn(
        &mut self,
        style: Style,
        position: Point,
        facing: Facing,
        out_events: &mut Vec<Event>,
    ) {
        let SimState {
            terrain,
            tribes,
            next_agent,
            ..
        } = &mut self.state;
        let Some(tribe) = tribes.get_mut(&style) else {
            debug!(?style, "spawn without tribe ignored");
            return;
        };
        let id = AgentId::new(*next_agent);
        *next_agent += 1;
        let agent = Agent::new(id, style, terrain.topology().wrap(position), facing);
        let position = agent.position();
        tribe.agents.push(agent);
        tribe.spawned += 1;

        debug!(agent = id.get(), ?style, x = position.x, y = position.y, "agent spawned");
        out_events.push(Event::AgentSpawned {
            agent: id,
            style,
            position,
        });
    }

    fn release_from_hatches(&mut self, out_events: &mut Vec<Event>) {
        let phyu = self.state.phyu.get();
        if phyu < HATCH_OPENING || (phyu - HATCH_OPENING) % self.spawn_interval != 0 {
            return;
        }
        let mut releases = Vec::new();
        for tribe in self.state.tribes.values_mut() {
            if tribe.pending == 0 {
                continue;
            }
            let hatches: Vec<&HatchPlacement> = self
                .hatches
                .iter()
                .filter(|hatch| hatch.style == tribe.style)
                .collect();
            if hatches.is_empty() {
                continue;
            }
            let hatch = hatches[tribe.next_hatch % hatches.len()];
            tribe.next_hatch += 1;
            tribe.pending -= 1;
            releases.push(*hatch);
        }
        for hatch in releases {
            self.spawn(hatch.style, hatch.position, hatch.facing, out_events);
        }
    }

    fn update_agents(&mut self, flings: &mut Vec<FlingRequest>) {
        let SimState {
            phyu,
            terrain,
            tribes,
            ..
        } = &mut self.state;
        let neighbors = snapshot(tribes);
        for tribe in tribes.values_mut() {
            let Tribe { skills, agents, .. } = tribe;
            for agent in agents.iter_mut() {
                let mut args = UpdateArgs {
                    phyu: *phyu,
                    terrain: &mut *terrain,
                    effects: &mut self.effects,
                    skills: &mut *skills,
                    frames: &StandardFrames,
                    neighbors: &neighbors,
                    flings: &mut *flings,
                };
                agent.update(&mut args);
            }
        }
    }

    /// Throws every target once with the sum of all velocities aimed at it.
    fn apply_flings(&mut self, flings: &[FlingRequest]) {
        if flings.is_empty() {
            return;
        }
        let mut summed: BTreeMap<AgentId, Point> = BTreeMap::new();
        for fling in flings {
            let speed = summed.entry(fling.target).or_insert(Point::new(0, 0));
            speed.x += fling.speed.x;
            speed.y += fling.speed.y;
        }

        let SimState {
            phyu,
            terrain,
            tribes,
            ..
        } = &mut self.state;
        let neighbors = snapshot(tribes);
        let mut unused = Vec::new();
        for tribe in tribes.values_mut() {
            let Tribe { skills, agents, .. } = tribe;
            for agent in agents.iter_mut() {
                let Some(speed) = summed.get(&agent.id()) else {
                    continue;
                };
                let mut args = UpdateArgs {
                    phyu: *phyu,
                    terrain: &mut *terrain,
                    effects: &mut self.effects,
                    skills: &mut *skills,
                    frames: &StandardFrames,
                    neighbors: &neighbors,
                    flings: &mut unused,
                };
                agent.apply_fling(*speed, &mut args);
            }
        }
    }

    fn remove_finished(&mut self, out_events: &mut Vec<Event>) {
        for tribe in self.state.tribes.values_mut() {
            let style = tribe.style;
            let (mut saved, mut died) = (0, 0);
            tribe.agents.retain(|agent| {
                if agent.activity() != Activity::Nothing {
                    return true;
                }
                let cause = if agent.has_exited() {
                    saved += 1;
                    RemovalCause::Saved
                } else {
                    died += 1;
                    RemovalCause::Died
                };
                debug!(agent = agent.id().get(), ?style, ?cause, "agent removed");
                out_events.push(Event::AgentRemoved {
                    agent: agent.id(),
                    style,
                    cause,
                });
                false
            });
            tribe.saved += saved;
            tribe.died += died;
        }
    }

    fn autosave(&mut self) {
        let _ = self.autosaves.insert(self.state.phyu, self.state.clone());
        while self.autosaves.len() > AUTOSAVE_LIMIT + 1 {
            let Some(oldest) = self
                .autosaves
                .keys()
                .copied()
                .find(|phyu| *phyu != Phyu::ZERO)
            else {
                break;
            };
            let _ = self.autosaves.remove(&oldest);
        }
    }

    /// Adds input for the next tick, discarding any future it replaces.
    ///
    /// Input recorded earlier during the same tick survives; input for the
    /// next tick left over from before a rewind does not.
    fn record(&mut self, entry: ReplayEntry) {
        let now = self.state.phyu;
        let due = now.next();
        if self.recording_at == Some(now) {
            self.replay.cut_after(due);
        } else {
            self.replay.cut_after(now);
        }
        self.recording_at = Some(now);
        self.replay.add(due, entry);
        self.effects.truncate_after(now);
        let _ = self.autosaves.split_off(&due);
        debug!(phyu = due.get(), ?entry, "input recorded");
    }

    fn step_back(&mut self, ticks: u32, out_events: &mut Vec<Event>) {
        let from = self.state.phyu;
        let to = from.saturating_sub(ticks);
        if to == from {
            return;
        }
        let Some(save) = self
            .autosaves
            .range(..=to)
            .next_back()
            .map(|(_, save)| save.clone())
        else {
            return;
        };
        self.state = save;
        self.recording_at = None;
        let mut discarded = Vec::new();
        while self.state.phyu < to {
            self.advance(&mut discarded);
        }
        debug!(from = from.get(), to = to.get(), "stepped back");
        out_events.push(Event::SteppedBack { from, to });
    }
}

fn snapshot(tribes: &BTreeMap<Style, Tribe>) -> Vec<Neighbor> {
    tribes
        .values()
        .flat_map(|tribe| tribe.agents.iter().map(Neighbor::of))
        .collect()
}

fn check_assignment(
    state: &SimState,
    style: Style,
    agent: AgentId,
    activity: Activity,
    personal: bool,
) -> Result<(), AssignmentError> {
    if !activity.is_skill() {
        return Err(AssignmentError::NotASkill);
    }
    let target = state
        .tribes
        .values()
        .find_map(|tribe| tribe.agents.iter().find(|candidate| candidate.id() == agent))
        .ok_or(AssignmentError::MissingAgent)?;
    if target.style() != style {
        return Err(AssignmentError::ForeignAgent);
    }
    let tribe = state
        .tribes
        .get(&style)
        .ok_or(AssignmentError::ForeignAgent)?;
    if !tribe.skills.can_use(activity) {
        return Err(AssignmentError::OutOfSkills);
    }
    if target.priority(activity, personal) <= 1 {
        return Err(AssignmentError::Unclickable);
    }
    Ok(())
}

/// Applies the provided command to the world, mutating its state
/// deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Advance => world.advance(out_events),
        Command::Assign {
            style,
            agent,
            activity,
            personal,
        } => match check_assignment(&world.state, style, agent, activity, personal) {
            Ok(()) => world.record(ReplayEntry::Assign {
                style,
                agent,
                activity,
                personal,
            }),
            Err(reason) => {
                debug!(agent = agent.get(), ?activity, ?reason, "assignment rejected");
                out_events.push(Event::AssignmentRejected {
                    agent,
                    activity,
                    reason,
                });
            }
        },
        Command::Spawn {
            style,
            position,
            facing,
        } => {
            if world.state.tribes.contains_key(&style) {
                world.record(ReplayEntry::Spawn {
                    style,
                    position,
                    facing,
                });
            } else {
                debug!(?style, "spawn without tribe ignored");
            }
        }
        Command::Quicksave => {
            world.quicksave = Some(world.state.clone());
            world.effects.quicksave();
            let phyu = world.state.phyu;
            debug!(phyu = phyu.get(), "quicksaved");
            out_events.push(Event::Quicksaved { phyu });
        }
        Command::Quickload => {
            let Some(saved) = world.quicksave.as_ref() else {
                debug!("quickload without quicksave ignored");
                return;
            };
            world.state = saved.clone();
            world.recording_at = None;
            world.effects.quickload();
            let phyu = world.state.phyu;
            debug!(phyu = phyu.get(), "quickloaded");
            out_events.push(Event::Quickloaded { phyu });
        }
        Command::FramestepBack { ticks } => world.step_back(ticks, out_events),
    }
}

/// Presentation pass run once per rendered frame: plays the sounds requested
/// since the last pass and animates debris by one step.
pub fn present(world: &mut World, sink: &mut dyn SoundSink) {
    world.effects.drain_sounds(sink);
    world.effects.tick();
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use lix_core::{Activity, AgentId, Phyu, Style};
    use lix_system_agents::{Agent, AgentView};
    use lix_system_effects::Effects;
    use lix_terrain::Terrain;
    use sha2::{Digest, Sha256};

    use super::{Replay, SkillCount, World};
    use crate::tribe::Tribe;

    /// Tick most recently simulated.
    #[must_use]
    pub fn phyu(world: &World) -> Phyu {
        world.state.phyu
    }

    /// Captures the render projection of every agent in roster order.
    #[must_use]
    pub fn roster(world: &World) -> RosterView {
        let views = world
            .state
            .tribes
            .values()
            .flat_map(|tribe| tribe.agents.iter().map(Agent::view))
            .collect();
        RosterView { views }
    }

    /// Looks up an agent on the field.
    #[must_use]
    pub fn agent(world: &World, id: AgentId) -> Option<&Agent> {
        world
            .state
            .tribes
            .values()
            .find_map(|tribe| tribe.agents.iter().find(|agent| agent.id() == id))
    }

    /// Summarises one tribe.
    #[must_use]
    pub fn tribe(world: &World, style: Style) -> Option<TribeView> {
        world.state.tribes.get(&style).map(TribeView::of)
    }

    /// Summarises every tribe in style order.
    #[must_use]
    pub fn tribes(world: &World) -> Vec<TribeView> {
        world.state.tribes.values().map(TribeView::of).collect()
    }

    /// Read-only access to the terrain arena.
    #[must_use]
    pub fn terrain(world: &World) -> &Terrain {
        &world.state.terrain
    }

    /// Read-only access to the effect manager.
    #[must_use]
    pub fn effects(world: &World) -> &Effects {
        &world.effects
    }

    /// Recorded player input.
    #[must_use]
    pub fn replay(world: &World) -> &Replay {
        &world.replay
    }

    /// Whether the quicksave slot holds a state.
    #[must_use]
    pub fn has_quicksave(world: &World) -> bool {
        world.quicksave.is_some()
    }

    /// Whether every agent has left and the hatches are empty.
    #[must_use]
    pub fn nothing_left(world: &World) -> bool {
        world
            .state
            .tribes
            .values()
            .all(|tribe| tribe.agents.is_empty() && tribe.pending == 0)
    }

    /// SHA-256 over tick, tribes, agents and the lookup map.
    ///
    /// Networked peers compare this to detect desynchronisation.
    #[must_use]
    pub fn checksum(world: &World) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(world.state.phyu.get().to_le_bytes());
        for tribe in world.state.tribes.values() {
            hasher.update([tribe.style as u8]);
            for counter in [tribe.pending, tribe.spawned, tribe.saved, tribe.died] {
                hasher.update(counter.to_le_bytes());
            }
            for agent in &tribe.agents {
                let position = agent.position();
                let (special_x, special_y) = agent.special();
                hasher.update(agent.id().get().to_le_bytes());
                hasher.update(position.x.to_le_bytes());
                hasher.update(position.y.to_le_bytes());
                hasher.update(agent.facing().sign().to_le_bytes());
                hasher.update([agent.activity() as u8]);
                hasher.update(agent.frame().to_le_bytes());
                hasher.update(special_x.to_le_bytes());
                hasher.update(special_y.to_le_bytes());
                hasher.update(agent.queue().to_le_bytes());
                hasher.update(agent.ploder_timer().to_le_bytes());
                hasher.update([
                    u8::from(agent.is_runner()),
                    u8::from(agent.is_climber()),
                    u8::from(agent.is_floater()),
                ]);
            }
        }
        let lookup: Vec<u8> = world
            .state
            .terrain
            .lookup()
            .as_slice()
            .iter()
            .flat_map(|bits| bits.bits().to_le_bytes())
            .collect();
        hasher.update(&lookup);
        hasher.finalize().into()
    }

    /// Read-only view of the agents on the field.
    #[derive(Clone, Debug)]
    pub struct RosterView {
        views: Vec<AgentView>,
    }

    impl RosterView {
        /// Iterates over the agents in roster order.
        pub fn iter(&self) -> impl Iterator<Item = &AgentView> {
            self.views.iter()
        }

        /// Number of agents on the field.
        #[must_use]
        pub fn len(&self) -> usize {
            self.views.len()
        }

        /// Whether the field is empty.
        #[must_use]
        pub fn is_empty(&self) -> bool {
            self.views.is_empty()
        }

        /// Consumes the view, yielding the underlying projections.
        #[must_use]
        pub fn into_vec(self) -> Vec<AgentView> {
            self.views
        }
    }

    /// Score and inventory of one tribe.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct TribeView {
        /// Tribe colour.
        pub style: Style,
        /// Agents currently on the field.
        pub on_field: usize,
        /// Agents the hatches have yet to release.
        pub pending: u32,
        /// Agents spawned so far.
        pub spawned: u32,
        /// Agents that reached an exit.
        pub saved: u32,
        /// Agents that died or left the level.
        pub died: u32,
        /// Remaining skill uses in activity order.
        pub skills: Vec<(Activity, SkillCount)>,
    }

    impl TribeView {
        fn of(tribe: &Tribe) -> Self {
            Self {
                style: tribe.style,
                on_field: tribe.agents.len(),
                pending: tribe.pending,
                spawned: tribe.spawned,
                saved: tribe.saved,
                died: tribe.died,
                skills: tribe.skills.iter().collect(),
            }
        }
    }
}
