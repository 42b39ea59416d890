//! Context handed to every agent update.

use lix_core::{Activity, AgentId, FrameSource, Phyu, Point, SkillBank, Style};
use lix_system_effects::Effects;
use lix_terrain::Terrain;

use crate::Agent;

/// Mutable collaborators an agent may touch during one update.
///
/// The world builds one of these per agent so that `skills` always refers to
/// the agent's own tribe.
pub struct UpdateArgs<'a> {
    /// Tick currently being simulated.
    pub phyu: Phyu,
    /// Shared terrain arena.
    pub terrain: &'a mut Terrain,
    /// Effect manager keyed on `(phyu, style, agent, sound)`.
    pub effects: &'a mut Effects,
    /// Inventory of the agent's tribe.
    pub skills: &'a mut dyn SkillBank,
    /// Animation frame table.
    pub frames: &'a dyn FrameSource,
    /// Every agent as it was at the start of the tick.
    pub neighbors: &'a [Neighbor],
    /// Collects velocity changes for other agents, applied after the tick.
    pub flings: &'a mut Vec<FlingRequest>,
}

/// Snapshot of another agent, taken before anybody moves in a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Neighbor {
    /// Agent identifier.
    pub id: AgentId,
    /// Owning tribe.
    pub style: Style,
    /// Foot position.
    pub position: Point,
    /// Activity at the start of the tick.
    pub activity: Activity,
}

impl Neighbor {
    /// Captures the parts of `agent` other agents may react to.
    #[must_use]
    pub const fn of(agent: &Agent) -> Self {
        Self {
            id: agent.id,
            style: agent.style,
            position: Point::new(agent.ex, agent.ey),
            activity: agent.activity,
        }
    }
}

/// Request to throw another agent, produced by batters and explosions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlingRequest {
    /// Agent to throw.
    pub target: AgentId,
    /// Agent causing the throw.
    pub source: AgentId,
    /// Initial velocity in level coordinates; negative `y` is upward.
    pub speed: Point,
}
