#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the lix simulation.
//!
//! This crate defines the vocabulary that connects the terrain arena, the
//! effect ledger, the agent state machine and the authoritative world driver.
//! Adapters submit [`Command`] values, the world executes them through its
//! `apply` entry point and broadcasts [`Event`] values describing what
//! happened. Everything in here is plain data plus the narrow traits through
//! which the core talks to its external collaborators (sound output, tribe
//! skill inventory and sprite frame tables).

pub mod activity;

use std::ops::{BitAnd, BitOr, BitOrAssign, Not};

use serde::{Deserialize, Serialize};

pub use activity::Activity;

/// Discrete simulation step. Physics updates happen once per `Phyu`.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Phyu(u32);

impl Phyu {
    /// The tick before any update has happened.
    pub const ZERO: Self = Self(0);

    /// Creates a tick from its numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric value of the tick.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Returns the tick that follows this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Moves the tick backwards, stopping at zero.
    #[must_use]
    pub const fn saturating_sub(self, ticks: u32) -> Self {
        Self(self.0.saturating_sub(ticks))
    }
}

/// Unique identifier assigned to an agent when it enters the level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgentId(u32);

impl AgentId {
    /// Creates a new agent identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Tribe colour. Every tribe plays under exactly one style.
///
/// The declaration order is the total order used when effects from several
/// tribes share a tick, so it must never be reshuffled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Style {
    /// Level-owned objects that belong to no player.
    Neutral,
    /// Red tribe.
    Red,
    /// Orange tribe.
    Orange,
    /// Yellow tribe.
    Yellow,
    /// Green tribe.
    Green,
    /// Blue tribe.
    Blue,
    /// Purple tribe.
    Purple,
    /// Grey tribe.
    Grey,
    /// Black tribe.
    Black,
}

impl Style {
    /// Colours used for builder and platformer bricks: light top edge, body.
    #[must_use]
    pub const fn brick_colors(self) -> (Color, Color) {
        match self {
            Self::Neutral => (
                Color::from_rgb(0xe0, 0xe0, 0xe0),
                Color::from_rgb(0xa0, 0xa0, 0xa0),
            ),
            Self::Red => (
                Color::from_rgb(0xff, 0x90, 0x80),
                Color::from_rgb(0xc8, 0x30, 0x20),
            ),
            Self::Orange => (
                Color::from_rgb(0xff, 0xc0, 0x70),
                Color::from_rgb(0xd0, 0x70, 0x10),
            ),
            Self::Yellow => (
                Color::from_rgb(0xff, 0xf0, 0x90),
                Color::from_rgb(0xc8, 0xb0, 0x10),
            ),
            Self::Green => (
                Color::from_rgb(0x90, 0xf0, 0x90),
                Color::from_rgb(0x20, 0x98, 0x20),
            ),
            Self::Blue => (
                Color::from_rgb(0x90, 0xb0, 0xff),
                Color::from_rgb(0x20, 0x48, 0xd0),
            ),
            Self::Purple => (
                Color::from_rgb(0xe0, 0x98, 0xff),
                Color::from_rgb(0x80, 0x20, 0xb0),
            ),
            Self::Grey => (
                Color::from_rgb(0xd0, 0xd0, 0xd0),
                Color::from_rgb(0x70, 0x70, 0x70),
            ),
            Self::Black => (
                Color::from_rgb(0x60, 0x60, 0x60),
                Color::from_rgb(0x20, 0x20, 0x20),
            ),
        }
    }
}

/// Horizontal facing of an agent. Never zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Facing {
    /// Walking toward decreasing x.
    Left,
    /// Walking toward increasing x.
    Right,
}

impl Facing {
    /// Returns `-1` for left and `+1` for right.
    #[must_use]
    pub const fn sign(self) -> i32 {
        match self {
            Self::Left => -1,
            Self::Right => 1,
        }
    }

    /// Returns the opposite facing.
    #[must_use]
    pub const fn turned(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Integer pixel coordinate. `y` grows downward.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Point {
    /// Horizontal pixel coordinate.
    pub x: i32,
    /// Vertical pixel coordinate.
    pub y: i32,
}

impl Point {
    /// Creates a new point.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned pixel rectangle anchored at its upper-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge, inclusive.
    pub x: i32,
    /// Top edge, inclusive.
    pub y: i32,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl Rect {
    /// Creates a rectangle from its upper-left corner and size.
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Builds the rectangle spanning two inclusive corners in any order.
    #[must_use]
    pub fn from_corners(a: Point, b: Point) -> Self {
        let x = a.x.min(b.x);
        let y = a.y.min(b.y);
        Self {
            x,
            y,
            width: a.x.max(b.x) - x + 1,
            height: a.y.max(b.y) - y + 1,
        }
    }

    /// Iterates every point of the rectangle in row-major order.
    pub fn points(self) -> impl Iterator<Item = Point> {
        let Rect {
            x,
            y,
            width,
            height,
        } = self;
        (y..y + height.max(0))
            .flat_map(move |row| (x..x + width.max(0)).map(move |column| Point::new(column, row)))
    }

    /// Reports whether the point lies inside the rectangle.
    #[must_use]
    pub const fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.y + self.height
    }
}

/// Level dimensions and per-axis wraparound.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Topology {
    width: i32,
    height: i32,
    torus_x: bool,
    torus_y: bool,
}

impl Topology {
    /// Creates a topology. Dimensions are validated by the level loader.
    #[must_use]
    pub const fn new(width: i32, height: i32, torus_x: bool, torus_y: bool) -> Self {
        Self {
            width,
            height,
            torus_x,
            torus_y,
        }
    }

    /// Width of the level in pixels.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Height of the level in pixels.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Whether the horizontal axis wraps around.
    #[must_use]
    pub const fn torus_x(&self) -> bool {
        self.torus_x
    }

    /// Whether the vertical axis wraps around.
    #[must_use]
    pub const fn torus_y(&self) -> bool {
        self.torus_y
    }

    /// Wraps `x` into the level when the horizontal axis is a torus.
    #[must_use]
    pub const fn wrap_x(&self, x: i32) -> i32 {
        if self.torus_x && self.width > 0 {
            x.rem_euclid(self.width)
        } else {
            x
        }
    }

    /// Wraps `y` into the level when the vertical axis is a torus.
    #[must_use]
    pub const fn wrap_y(&self, y: i32) -> i32 {
        if self.torus_y && self.height > 0 {
            y.rem_euclid(self.height)
        } else {
            y
        }
    }

    /// Signed horizontal distance from `from` to `to`, taking the short way
    /// around a wrapping axis.
    #[must_use]
    pub const fn delta_x(&self, from: i32, to: i32) -> i32 {
        shortest_delta(to - from, self.width, self.torus_x)
    }

    /// Signed vertical distance from `from` to `to`, taking the short way
    /// around a wrapping axis.
    #[must_use]
    pub const fn delta_y(&self, from: i32, to: i32) -> i32 {
        shortest_delta(to - from, self.height, self.torus_y)
    }

    /// Normalizes a point along every wrapping axis.
    #[must_use]
    pub const fn wrap(&self, point: Point) -> Point {
        Point::new(self.wrap_x(point.x), self.wrap_y(point.y))
    }

    /// Reports whether the already-wrapped point lies inside the level.
    #[must_use]
    pub const fn contains(&self, point: Point) -> bool {
        point.x >= 0 && point.x < self.width && point.y >= 0 && point.y < self.height
    }

    /// Wraps a point and returns its row-major index, or `None` outside.
    #[must_use]
    pub fn index(&self, point: Point) -> Option<usize> {
        let wrapped = self.wrap(point);
        if !self.contains(wrapped) {
            return None;
        }
        let row = usize::try_from(wrapped.y).ok()?;
        let column = usize::try_from(wrapped.x).ok()?;
        let width = usize::try_from(self.width).ok()?;
        Some(row * width + column)
    }

    /// Number of pixels covered by the level.
    #[must_use]
    pub fn area(&self) -> usize {
        let width = usize::try_from(self.width).unwrap_or(0);
        let height = usize::try_from(self.height).unwrap_or(0);
        width * height
    }
}

const fn shortest_delta(delta: i32, length: i32, torus: bool) -> i32 {
    if !torus || length <= 0 {
        return delta;
    }
    let wrapped = delta.rem_euclid(length);
    if wrapped > length / 2 {
        wrapped - length
    } else {
        wrapped
    }
}

/// Bitmask stored per pixel in the terrain lookup map.
///
/// The core interprets only [`Phybits::TERRAIN`] and [`Phybits::STEEL`]
/// directly; the remaining bits mark trigger areas painted by gadgets.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Phybits(u16);

impl Phybits {
    /// No bit set.
    pub const EMPTY: Self = Self(0);
    /// Solid terrain.
    pub const TERRAIN: Self = Self(0x0001);
    /// Indestructible terrain. Always accompanied by [`Phybits::TERRAIN`].
    pub const STEEL: Self = Self(0x0002);
    /// Exit trigger area.
    pub const GOAL: Self = Self(0x0004);
    /// Fire hazard trigger area.
    pub const FIRE: Self = Self(0x0008);
    /// Water hazard trigger area.
    pub const WATER: Self = Self(0x0010);
    /// Trap trigger area.
    pub const TRAP: Self = Self(0x0020);
    /// Flinger trigger area.
    pub const FLING: Self = Self(0x0040);

    /// Creates a mask from raw bits.
    #[must_use]
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    /// Raw bit representation.
    #[must_use]
    pub const fn bits(&self) -> u16 {
        self.0
    }

    /// Reports whether every bit of `other` is set in `self`.
    #[must_use]
    pub const fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Reports whether any bit of `other` is set in `self`.
    #[must_use]
    pub const fn intersects(&self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Reports whether no bit is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Phybits {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Phybits {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Phybits {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl Not for Phybits {
    type Output = Self;

    fn not(self) -> Self {
        Self(!self.0)
    }
}

/// Packed ARGB terrain colour. Zero alpha means no pixel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color(u32);

impl Color {
    /// Fully transparent colour used for air.
    pub const TRANSPARENT: Self = Self(0);

    /// Creates an opaque colour from byte RGB components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self(0xff00_0000 | ((red as u32) << 16) | ((green as u32) << 8) | blue as u32)
    }

    /// Creates a colour from its packed ARGB value.
    #[must_use]
    pub const fn from_argb(value: u32) -> Self {
        Self(value)
    }

    /// Packed ARGB representation.
    #[must_use]
    pub const fn argb(&self) -> u32 {
        self.0
    }

    /// Reports whether the colour draws anything.
    #[must_use]
    pub const fn is_opaque(&self) -> bool {
        self.0 >> 24 != 0
    }
}

/// One-shot sounds the simulation may request.
///
/// The declaration order is part of the effect ordering; append only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Sound {
    /// No sound; used by purely visual effects.
    Nothing,
    /// A skill was assigned.
    Assign,
    /// A jumper takes off.
    Jump,
    /// A faller hit the ground from too high.
    Splat,
    /// A tumbler landed hard and is stunned.
    Ouch,
    /// An agent walked into fire or a trap.
    Fire,
    /// An agent walked into water.
    Water,
    /// An agent reached the exit.
    Goal,
    /// A digging tool hit steel.
    Steel,
    /// A builder or platformer is running out of bricks.
    Brick,
    /// An exploder went off.
    Pop,
    /// A batter hit something.
    Batter,
    /// An agent left the level through a non-wrapping edge.
    Obliterate,
}

/// Playback volume of a sound relative to the local player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Loudness {
    /// The sound concerns the local player's tribe.
    Loud,
    /// The sound concerns another tribe.
    Quiet,
}

/// Fire-and-forget audio output.
pub trait SoundSink {
    /// Plays a sound once at the requested loudness.
    fn play(&mut self, sound: Sound, loudness: Loudness);
}

/// Per-tribe skill inventory that receives unused queued skill uses back.
pub trait SkillBank {
    /// Credits `count` uses of `activity` back to the inventory.
    fn return_skills(&mut self, activity: Activity, count: u32);
}

/// Sprite frame table used to detect the end of looping animations.
pub trait FrameSource {
    /// Reports whether `frame` exists in the animation row of `activity`.
    fn frame_exists(&self, frame: i32, activity: Activity) -> bool;
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Advances the simulation by exactly one tick.
    Advance,
    /// Requests assigning a skill to an agent at the start of the next tick.
    Assign {
        /// Tribe issuing the request; must own the agent.
        style: Style,
        /// Agent targeted by the assignment.
        agent: AgentId,
        /// Skill to assign.
        activity: Activity,
        /// Whether personal priority settings (batter priority) apply.
        personal: bool,
    },
    /// Places a new faller into the level at the start of the next tick,
    /// outside of any hatch schedule. Recorded in the replay like assignments.
    Spawn {
        /// Tribe owning the new agent.
        style: Style,
        /// Foot position of the new agent.
        position: Point,
        /// Initial facing.
        facing: Facing,
    },
    /// Copies the current state into the quicksave slot.
    Quicksave,
    /// Restores the quicksave slot, if any.
    Quickload,
    /// Rewinds the simulation by the given number of ticks.
    FramestepBack {
        /// How many ticks to go back.
        ticks: u32,
    },
}

/// Reasons an assignment can be refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssignmentError {
    /// No agent with that identifier is on the roster.
    MissingAgent,
    /// The agent belongs to a different tribe.
    ForeignAgent,
    /// The requested activity is not a player skill.
    NotASkill,
    /// The tribe has no uses of the skill left.
    OutOfSkills,
    /// The agent cannot take this skill right now.
    Unclickable,
}

/// Why an agent left the roster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RemovalCause {
    /// The agent reached an exit.
    Saved,
    /// The agent died or left the level.
    Died,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// The simulation advanced to a new tick.
    TickAdvanced {
        /// Tick that was just simulated.
        phyu: Phyu,
    },
    /// A new agent entered the level.
    AgentSpawned {
        /// Identifier of the new agent.
        agent: AgentId,
        /// Tribe owning the agent.
        style: Style,
        /// Foot position at spawn.
        position: Point,
    },
    /// A skill assignment took effect.
    SkillAssigned {
        /// Tick at which the assignment happened.
        phyu: Phyu,
        /// Agent receiving the skill.
        agent: AgentId,
        /// Skill that was assigned.
        activity: Activity,
    },
    /// A skill assignment was refused.
    AssignmentRejected {
        /// Agent targeted by the assignment.
        agent: AgentId,
        /// Skill that was requested.
        activity: Activity,
        /// Why the assignment was refused.
        reason: AssignmentError,
    },
    /// An agent left the roster.
    AgentRemoved {
        /// Identifier of the removed agent.
        agent: AgentId,
        /// Tribe that owned the agent.
        style: Style,
        /// Why the agent left.
        cause: RemovalCause,
    },
    /// The quicksave slot was written.
    Quicksaved {
        /// Tick captured by the quicksave.
        phyu: Phyu,
    },
    /// The quicksave slot was restored.
    Quickloaded {
        /// Tick restored from the quicksave.
        phyu: Phyu,
    },
    /// The simulation rewound to an earlier tick.
    SteppedBack {
        /// Tick before rewinding.
        from: Phyu,
        /// Tick after rewinding.
        to: Phyu,
    },
}
