//! Agent record and its read-only projection.

use lix_core::{Activity, AgentId, Facing, Phybits, Point, Style};

/// Top-left corner of an unmirrored sprite relative to the foot position.
pub(crate) const SPRITE_ANCHOR: Point = Point::new(-16, -26);

/// Width of every agent sprite frame.
pub const SPRITE_WIDTH: i32 = 32;

/// One walking, digging, building creature.
///
/// The foot position `(ex, ey)` always has an even `ex`. The pixel below the
/// foot, `ey + 1`, is the ground the agent stands on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Agent {
    pub(crate) id: AgentId,
    pub(crate) style: Style,
    pub(crate) ex: i32,
    pub(crate) ey: i32,
    pub(crate) facing: Facing,
    pub(crate) activity: Activity,
    pub(crate) frame: i32,
    pub(crate) special_x: i32,
    pub(crate) special_y: i32,
    pub(crate) queue: u32,
    pub(crate) runner: bool,
    pub(crate) climber: bool,
    pub(crate) floater: bool,
    pub(crate) ploder_timer: u32,
    pub(crate) exited: bool,
    pub(crate) foot_encounters: Phybits,
    pub(crate) body_encounters: Phybits,
    pub(crate) sprite_offset: Point,
}

impl Agent {
    /// Creates a faller at `position`. Odd x coordinates snap to the even
    /// column on their left.
    #[must_use]
    pub fn new(id: AgentId, style: Style, position: Point, facing: Facing) -> Self {
        Self {
            id,
            style,
            ex: position.x - position.x.rem_euclid(2),
            ey: position.y,
            facing,
            activity: Activity::Faller,
            frame: 0,
            special_x: 0,
            special_y: 0,
            queue: 0,
            runner: false,
            climber: false,
            floater: false,
            ploder_timer: 0,
            exited: false,
            foot_encounters: Phybits::EMPTY,
            body_encounters: Phybits::EMPTY,
            sprite_offset: SPRITE_ANCHOR,
        }
    }

    /// Unique identifier.
    #[must_use]
    pub const fn id(&self) -> AgentId {
        self.id
    }

    /// Owning tribe.
    #[must_use]
    pub const fn style(&self) -> Style {
        self.style
    }

    /// Foot position.
    #[must_use]
    pub const fn position(&self) -> Point {
        Point::new(self.ex, self.ey)
    }

    /// Current facing.
    #[must_use]
    pub const fn facing(&self) -> Facing {
        self.facing
    }

    /// Current activity.
    #[must_use]
    pub const fn activity(&self) -> Activity {
        self.activity
    }

    /// Animation frame within the current activity. May be `-1` right after
    /// an assignment.
    #[must_use]
    pub const fn frame(&self) -> i32 {
        self.frame
    }

    /// Activity-specific scratch values, e.g. bricks left or fall speed.
    #[must_use]
    pub const fn special(&self) -> (i32, i32) {
        (self.special_x, self.special_y)
    }

    /// Extra uses of a queueable skill that follow the current one.
    #[must_use]
    pub const fn queue(&self) -> u32 {
        self.queue
    }

    /// Whether the agent permanently runs instead of walking.
    #[must_use]
    pub const fn is_runner(&self) -> bool {
        self.runner
    }

    /// Whether the agent climbs walls instead of turning.
    #[must_use]
    pub const fn is_climber(&self) -> bool {
        self.climber
    }

    /// Whether the agent opens an umbrella after a long fall.
    #[must_use]
    pub const fn is_floater(&self) -> bool {
        self.floater
    }

    /// Ticks since the fuse was lit, zero when unlit.
    #[must_use]
    pub const fn ploder_timer(&self) -> u32 {
        self.ploder_timer
    }

    /// Whether the agent left through an exit rather than dying.
    #[must_use]
    pub const fn has_exited(&self) -> bool {
        self.exited
    }

    /// Trigger bits met by the foot during the last update.
    #[must_use]
    pub const fn foot_encounters(&self) -> Phybits {
        self.foot_encounters
    }

    /// Trigger bits met by the body during the last update.
    #[must_use]
    pub const fn body_encounters(&self) -> Phybits {
        self.body_encounters
    }

    /// Read-only projection for renderers and replay tools.
    #[must_use]
    pub const fn view(&self) -> AgentView {
        let mirrored = matches!(self.facing, Facing::Left);
        let sprite_x = if mirrored {
            self.ex - self.sprite_offset.x - SPRITE_WIDTH
        } else {
            self.ex + self.sprite_offset.x
        };
        AgentView {
            id: self.id,
            style: self.style,
            position: Point::new(self.ex, self.ey),
            sprite_origin: Point::new(sprite_x, self.ey + self.sprite_offset.y),
            mirrored,
            activity: self.activity,
            frame: self.frame,
            ploder_timer: self.ploder_timer,
        }
    }
}

/// Snapshot of what a renderer needs to draw one agent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AgentView {
    /// Agent identifier.
    pub id: AgentId,
    /// Owning tribe.
    pub style: Style,
    /// Foot position.
    pub position: Point,
    /// Top-left corner of the sprite in level coordinates.
    pub sprite_origin: Point,
    /// Whether the sprite is drawn mirrored (facing left).
    pub mirrored: bool,
    /// Activity whose animation row is shown.
    pub activity: Activity,
    /// Frame within the animation row.
    pub frame: i32,
    /// Fuse progress, zero when unlit.
    pub ploder_timer: u32,
}
