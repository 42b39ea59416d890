//! Short-lived visuals that always animate to completion.

use lix_core::{Activity, Facing, Point, Style};

const ARROW_LIFETIME: u32 = 40;
const ARROW_SPEED: i32 = -1;
const TOOL_LIFETIME: u32 = 50;
const EXPLOSION_LIFETIME: u32 = 12;
const PARTICLE_LIFETIME: u32 = 40;
const GRAVITY: i32 = 1;
const MAX_FALL_SPEED: i32 = 12;

/// What a debris item depicts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DebrisKind {
    /// Replay marker floating above an agent that received a skill.
    Arrow {
        /// Tribe that assigned the skill.
        style: Style,
        /// Skill that was assigned.
        activity: Activity,
    },
    /// Miner tool dropped after hitting steel.
    Pickaxe,
    /// Basher or digger tool bouncing off steel.
    DigHammer,
    /// Expanding blast ring.
    Explosion,
    /// Terrain chunk thrown by an explosion.
    Particle,
}

/// One animating visual with its own lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Debris {
    /// What is shown.
    pub kind: DebrisKind,
    /// Current position in level coordinates.
    pub position: Point,
    /// Displacement applied on each animation tick.
    pub speed: Point,
    /// Animation ticks left before the item disappears.
    pub time_to_live: u32,
}

impl Debris {
    pub(crate) const fn arrow(position: Point, style: Style, activity: Activity) -> Self {
        Self {
            kind: DebrisKind::Arrow { style, activity },
            position,
            speed: Point::new(0, ARROW_SPEED),
            time_to_live: ARROW_LIFETIME,
        }
    }

    pub(crate) const fn tool(kind: DebrisKind, position: Point, facing: Facing) -> Self {
        Self {
            kind,
            position,
            speed: Point::new(-facing.sign(), -6),
            time_to_live: TOOL_LIFETIME,
        }
    }

    pub(crate) const fn explosion(position: Point) -> Self {
        Self {
            kind: DebrisKind::Explosion,
            position,
            speed: Point::new(0, 0),
            time_to_live: EXPLOSION_LIFETIME,
        }
    }

    pub(crate) const fn particle(position: Point, speed: Point) -> Self {
        Self {
            kind: DebrisKind::Particle,
            position,
            speed,
            time_to_live: PARTICLE_LIFETIME,
        }
    }

    /// Advances the animation by one step. Returns `false` once expired.
    pub(crate) fn animate(&mut self) -> bool {
        if self.time_to_live == 0 {
            return false;
        }
        self.time_to_live -= 1;
        self.position.x += self.speed.x;
        self.position.y += self.speed.y;
        if matches!(
            self.kind,
            DebrisKind::Pickaxe | DebrisKind::DigHammer | DebrisKind::Particle
        ) {
            self.speed.y = (self.speed.y + GRAVITY).min(MAX_FALL_SPEED);
        }
        self.time_to_live > 0
    }
}
