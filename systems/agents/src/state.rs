//! Transitions, assignment priority and the per-tick update pipeline.

use lix_core::{Activity, FrameSource, Phybits, Point, Sound, Topology};
use tracing::trace;

use crate::activities::{exploder, functions};
use crate::agent::SPRITE_ANCHOR;
use crate::{Agent, Neighbor, UpdateArgs};

/// Priority of freeing a blocker.
const PRIORITY_UNBLOCK: i32 = 5000;
/// Priority of redirecting an agent that is busy with a skill.
const PRIORITY_REASSIGN: i32 = 4000;
/// Priority of giving a walking or recovering agent a new skill.
const PRIORITY_WALKING: i32 = 3000;
/// Priority of adding a permanent ability to an airborne agent.
const PRIORITY_AIRBORNE: i32 = 2000;
/// Priority of queueing another use of a queueable skill.
const PRIORITY_REQUEUE: i32 = 1000;
/// The agent is clickable but the assignment changes nothing useful.
const PRIORITY_NOOP: i32 = 1;

const STUNNER_RECOVERY_FRAME: i32 = 16;
const ASCENDER_LEDGE_FRAME: i32 = 5;

/// Horizontal reach of a blocker's arms on either side.
const BLOCKER_REACH: i32 = 6;
/// Vertical extent of the blocking area, relative to the blocker's foot.
const BLOCKER_TOP: i32 = -16;
const BLOCKER_BOTTOM: i32 = 4;

/// Distance past a non-wrapping edge after which an agent is gone.
const OUT_OF_LEVEL_MARGIN: i32 = 20;

const FLINGER_SPEED: Point = Point::new(8, -12);

impl Agent {
    /// Ranks how sensible it is to assign `candidate` right now.
    ///
    /// `0` means the agent cannot be clicked, `1` means the assignment is
    /// allowed but useless. Among several agents under the cursor the one
    /// with the highest value receives the skill.
    #[must_use]
    pub fn priority(&self, candidate: Activity, personal: bool) -> i32 {
        if self.activity == Activity::Nothing || self.activity.leaving() {
            return 0;
        }
        let owned = match candidate {
            Activity::Runner => self.runner,
            Activity::Climber => self.climber,
            Activity::Floater => self.floater,
            Activity::Exploder => self.ploder_timer > 0,
            _ => false,
        };
        if owned {
            return PRIORITY_NOOP;
        }

        let base = match self.activity {
            Activity::Blocker => {
                if matches!(candidate, Activity::Walker | Activity::Exploder) {
                    PRIORITY_UNBLOCK
                } else {
                    return PRIORITY_NOOP;
                }
            }
            Activity::Stunner if self.frame >= STUNNER_RECOVERY_FRAME => PRIORITY_WALKING,
            Activity::Ascender if self.frame >= ASCENDER_LEDGE_FRAME => PRIORITY_WALKING,
            Activity::Stunner
            | Activity::Ascender
            | Activity::Faller
            | Activity::Tumbler
            | Activity::Climber
            | Activity::Floater
            | Activity::Jumper => {
                if candidate.is_permanent_skill() {
                    PRIORITY_AIRBORNE
                } else {
                    return PRIORITY_NOOP;
                }
            }
            Activity::Walker | Activity::Lander | Activity::Runner => {
                if candidate == self.activity {
                    return PRIORITY_NOOP;
                }
                PRIORITY_WALKING
            }
            Activity::Builder | Activity::Platformer => {
                if candidate == self.activity {
                    if self.queue > 0 {
                        PRIORITY_REQUEUE
                    } else {
                        PRIORITY_REASSIGN
                    }
                } else if candidate == Activity::Walker {
                    return PRIORITY_NOOP;
                } else {
                    PRIORITY_REASSIGN
                }
            }
            _ => {
                if candidate == self.activity {
                    return PRIORITY_NOOP;
                }
                PRIORITY_REASSIGN
            }
        };

        let fuse = i32::try_from(self.ploder_timer).unwrap_or(i32::MAX);
        let mut priority = if personal && candidate == Activity::Batter {
            base - fuse
        } else {
            base.saturating_add(fuse)
        };
        priority += 400 * i32::from(self.runner);
        priority += 200 * i32::from(self.climber);
        priority += 100 * i32::from(self.floater);
        priority
    }

    /// Gives the agent a skill.
    ///
    /// Runs the activity's assign handler, or becomes the activity when it
    /// has none. If the activity changed, the frame is set back by one so the
    /// first update shows frame zero.
    pub fn assign(&mut self, activity: Activity, args: &mut UpdateArgs<'_>) {
        let old = self.activity;
        match functions(activity).assign {
            Some(assign) => assign(self, args),
            None => self.transition_to(activity, args),
        }
        if self.activity != old {
            self.frame -= 1;
        }
    }

    /// Switches to `activity`.
    ///
    /// Queued uses of the old activity go back to the tribe when the
    /// activity changes, the sprite anchor resets, and the new activity's
    /// become handler runs (or the default reset when it has none).
    pub fn transition_to(&mut self, activity: Activity, args: &mut UpdateArgs<'_>) {
        let old = self.activity;
        if old != activity && old.is_queueable() && self.queue > 0 {
            args.skills.return_skills(old, self.queue);
            self.queue = 0;
        }
        self.sprite_offset = SPRITE_ANCHOR;
        args.effects.add_sound(
            args.phyu,
            self.style,
            Some(self.id),
            activity.sound_become(),
        );
        match functions(activity).on_become {
            Some(on_become) => on_become(self, args),
            None => self.become_default(activity),
        }
        trace!(
            agent = self.id.get(),
            from = ?old,
            to = ?self.activity,
            "activity change"
        );
    }

    /// Resets frame and scratch values and sets the activity.
    pub fn become_default(&mut self, activity: Activity) {
        self.frame = 0;
        self.special_x = 0;
        self.special_y = 0;
        self.activity = activity;
    }

    /// Simulates one tick for this agent.
    pub fn update(&mut self, args: &mut UpdateArgs<'_>) {
        self.foot_encounters = Phybits::EMPTY;
        self.body_encounters = Phybits::EMPTY;
        self.encounter(args.terrain);

        if self.burn_fuse(args) {
            return;
        }
        (functions(self.activity).update)(self, args);

        if self.activity.blockable() && self.blocked(args) {
            self.turn();
        }
        self.use_encounters(args);
        self.leave_through_edges(args);
    }

    /// Throws the agent as a tumbler with the given velocity.
    pub fn apply_fling(&mut self, speed: Point, args: &mut UpdateArgs<'_>) {
        if self.activity == Activity::Nothing || self.activity.leaving() {
            return;
        }
        if speed.x != 0 && speed.x.signum() != self.facing.sign() {
            self.turn();
        }
        self.transition_to(Activity::Tumbler, args);
        self.special_x = speed.x.abs();
        self.special_y = speed.y;
    }

    /// Whether the frame after the current one is missing.
    #[must_use]
    pub fn is_last_frame(&self, frames: &dyn FrameSource) -> bool {
        !frames.frame_exists(self.frame + 1, self.activity)
    }

    /// Steps the animation, wrapping back to frame zero.
    pub fn advance_frame(&mut self, frames: &dyn FrameSource) {
        self.frame = if frames.frame_exists(self.frame + 1, self.activity) {
            self.frame + 1
        } else {
            0
        };
    }

    /// Becomes a faller when there is no ground under the foot.
    pub(crate) fn fall_if_unsupported(&mut self, args: &mut UpdateArgs<'_>) -> bool {
        if self.is_solid(args.terrain, 0, 1) {
            return false;
        }
        self.transition_to(Activity::Faller, args);
        true
    }

    fn burn_fuse(&mut self, args: &mut UpdateArgs<'_>) -> bool {
        if self.ploder_timer == 0 || self.activity.leaving() {
            return false;
        }
        self.ploder_timer += 1;
        if self.ploder_timer <= exploder::FUSE_LENGTH {
            return false;
        }
        exploder::explode(self, args);
        true
    }

    fn blocked(&self, args: &UpdateArgs<'_>) -> bool {
        let topology = args.terrain.topology();
        args.neighbors
            .iter()
            .filter(|other| other.id != self.id && other.activity == Activity::Blocker)
            .any(|blocker| self.blocked_by(blocker, topology))
    }

    fn blocked_by(&self, blocker: &Neighbor, topology: Topology) -> bool {
        let dx = topology.delta_x(self.ex, blocker.position.x);
        let dy = topology.delta_y(blocker.position.y, self.ey);
        dx.abs() <= BLOCKER_REACH
            && dx * self.facing.sign() > 0
            && (BLOCKER_TOP..=BLOCKER_BOTTOM).contains(&dy)
    }

    fn use_encounters(&mut self, args: &mut UpdateArgs<'_>) {
        if self.activity == Activity::Nothing || self.activity.leaving() {
            return;
        }
        let foot = self.foot_encounters;
        let body = self.body_encounters;
        if foot.intersects(Phybits::GOAL) {
            self.transition_to(Activity::Exiter, args);
        } else if foot.intersects(Phybits::WATER) {
            self.transition_to(Activity::Drowner, args);
        } else if (foot | body).intersects(Phybits::FIRE | Phybits::TRAP) {
            self.transition_to(Activity::Burner, args);
        } else if body.intersects(Phybits::FLING) && self.activity != Activity::Tumbler {
            let speed = Point::new(FLINGER_SPEED.x * self.facing.sign(), FLINGER_SPEED.y);
            self.apply_fling(speed, args);
        }
    }

    fn leave_through_edges(&mut self, args: &mut UpdateArgs<'_>) {
        if self.activity == Activity::Nothing {
            return;
        }
        let topology = args.terrain.topology();
        let below = !topology.torus_y() && self.ey >= topology.height() + OUT_OF_LEVEL_MARGIN;
        let beside = !topology.torus_x()
            && (self.ex < -OUT_OF_LEVEL_MARGIN || self.ex > topology.width() + OUT_OF_LEVEL_MARGIN);
        if below || beside {
            args.effects
                .add_sound(args.phyu, self.style, Some(self.id), Sound::Obliterate);
            self.become_default(Activity::Nothing);
        }
    }
}
