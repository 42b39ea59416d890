//! Bashers dig horizontally, miners diagonally, diggers straight down.
//! All three stop at steel.

use lix_core::Activity;

use crate::{Agent, UpdateArgs};

const BASH_HEIGHT: i32 = 14;
const BASH_REACH: i32 = 11;
/// How far ahead a basher looks for more terrain before giving up.
const BASH_LOOKAHEAD: i32 = 16;

const MINE_HEIGHT: i32 = 12;
const MINE_REACH: i32 = 9;

const DIG_LEFT: i32 = -4;
const DIG_RIGHT: i32 = 3;

pub(crate) fn update_basher(lix: &mut Agent, args: &mut UpdateArgs<'_>) {
    if lix.fall_if_unsupported(args) {
        return;
    }
    lix.advance_frame(args.frames);
    if lix.count_steel(args.terrain, 2, -BASH_HEIGHT, BASH_REACH, 0) > 0 {
        args.effects.add_dig_hammer(
            args.phyu,
            lix.style,
            lix.id,
            lix.point(2, -BASH_HEIGHT / 2),
            lix.facing,
        );
        lix.turn();
        lix.transition_to(Activity::Walker, args);
        return;
    }
    let _ = lix.remove_rectangle(args.terrain, 0, -BASH_HEIGHT, BASH_REACH, 0);
    lix.move_ahead(args.terrain, 2);
    if lix.count_solid(args.terrain, 2, -BASH_HEIGHT, BASH_LOOKAHEAD, 0) == 0 {
        lix.transition_to(Activity::Walker, args);
    }
}

pub(crate) fn update_miner(lix: &mut Agent, args: &mut UpdateArgs<'_>) {
    if !lix.is_solid(args.terrain, 0, 1) && !lix.is_solid(args.terrain, 0, 2) {
        lix.transition_to(Activity::Faller, args);
        return;
    }
    lix.advance_frame(args.frames);
    if lix.count_steel(args.terrain, 0, -MINE_HEIGHT, MINE_REACH, 2) > 0 {
        args.effects
            .add_pickaxe(args.phyu, lix.style, lix.id, lix.point(2, -4), lix.facing);
        lix.transition_to(Activity::Walker, args);
        return;
    }
    let _ = lix.remove_rectangle(args.terrain, 0, -MINE_HEIGHT, MINE_REACH, 1);
    lix.move_ahead(args.terrain, 2);
    lix.move_down(args.terrain, 1);
}

pub(crate) fn update_digger(lix: &mut Agent, args: &mut UpdateArgs<'_>) {
    if lix.fall_if_unsupported(args) {
        return;
    }
    lix.advance_frame(args.frames);
    if lix.count_steel(args.terrain, DIG_LEFT, 1, DIG_RIGHT, 1) > 0 {
        args.effects
            .add_dig_hammer(args.phyu, lix.style, lix.id, lix.point(0, 1), lix.facing);
        lix.transition_to(Activity::Walker, args);
        return;
    }
    let _ = lix.remove_rectangle(args.terrain, DIG_LEFT, 1, DIG_RIGHT, 1);
    lix.move_down(args.terrain, 1);
}
