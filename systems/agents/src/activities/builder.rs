//! Builders lay a rising staircase, platformers a flat bridge.
//!
//! Both count bricks left in `special_x` and ticks since the last brick in
//! `special_y`. Extra assignments go to the queue and refill the bricks when
//! they run out.

use lix_core::{Activity, Sound};

use crate::{Agent, UpdateArgs};

pub(crate) const BRICKS_PER_SKILL: i32 = 12;
const BRICK_WARNING: i32 = 3;
const BUILD_CYCLE: i32 = 4;
const STAIR_LENGTH: i32 = 12;
const PLATFORM_LENGTH: i32 = 8;
const HEAD_HEIGHT: i32 = 16;

pub(crate) fn assign_builder(lix: &mut Agent, args: &mut UpdateArgs<'_>) {
    assign_queueable(lix, args, Activity::Builder);
}

pub(crate) fn assign_platformer(lix: &mut Agent, args: &mut UpdateArgs<'_>) {
    assign_queueable(lix, args, Activity::Platformer);
}

fn assign_queueable(lix: &mut Agent, args: &mut UpdateArgs<'_>, skill: Activity) {
    if lix.activity == skill {
        lix.queue += 1;
    } else {
        lix.transition_to(skill, args);
    }
}

pub(crate) fn become_builder(lix: &mut Agent, _args: &mut UpdateArgs<'_>) {
    lix.become_default(Activity::Builder);
    lix.special_x = BRICKS_PER_SKILL;
}

pub(crate) fn become_platformer(lix: &mut Agent, _args: &mut UpdateArgs<'_>) {
    lix.become_default(Activity::Platformer);
    lix.special_x = BRICKS_PER_SKILL;
}

/// Counts the build cycle; returns `true` on ticks that lay a brick.
fn brick_due(lix: &mut Agent, args: &mut UpdateArgs<'_>) -> bool {
    if lix.fall_if_unsupported(args) {
        return false;
    }
    lix.advance_frame(args.frames);
    lix.special_y += 1;
    if lix.special_y < BUILD_CYCLE {
        return false;
    }
    lix.special_y = 0;
    true
}

fn use_brick(lix: &mut Agent, args: &mut UpdateArgs<'_>, done: Activity) {
    lix.special_x -= 1;
    if lix.special_x == BRICK_WARNING {
        args.effects
            .add_sound(args.phyu, lix.style, Some(lix.id), Sound::Brick);
    }
    if lix.special_x > 0 {
        return;
    }
    if lix.queue > 0 {
        lix.queue -= 1;
        lix.special_x = BRICKS_PER_SKILL;
    } else {
        lix.transition_to(done, args);
    }
}

pub(crate) fn update_builder(lix: &mut Agent, args: &mut UpdateArgs<'_>) {
    if !brick_due(lix, args) {
        return;
    }
    lix.draw_brick(args.terrain, 0, -1, STAIR_LENGTH - 1, 0);
    lix.move_up(args.terrain, 2);
    for _ in 0..2 {
        if lix.is_solid(args.terrain, 2, 0) || lix.ceiling_blocks(args.terrain, 2, -HEAD_HEIGHT) {
            lix.turn();
            lix.transition_to(Activity::Walker, args);
            return;
        }
        lix.move_ahead(args.terrain, 2);
    }
    use_brick(lix, args, Activity::Shrugger);
}

pub(crate) fn update_platformer(lix: &mut Agent, args: &mut UpdateArgs<'_>) {
    if !brick_due(lix, args) {
        return;
    }
    lix.draw_brick(args.terrain, 0, 1, PLATFORM_LENGTH - 1, 1);
    for _ in 0..2 {
        if lix.is_solid(args.terrain, 2, 0) {
            lix.transition_to(Activity::Shrugger2, args);
            return;
        }
        lix.move_ahead(args.terrain, 2);
    }
    use_brick(lix, args, Activity::Shrugger2);
}
