use lix_core::Activity;

use crate::{Agent, UpdateArgs};

/// Height above the foot where a climber's head touches the ceiling.
const HEAD_HEIGHT: i32 = 16;
/// Climbers hug the wall: the sprite shifts toward it.
const WALL_HUG: i32 = 2;

pub(crate) fn assign_climber(lix: &mut Agent, _args: &mut UpdateArgs<'_>) {
    lix.climber = true;
}

pub(crate) fn become_climber(lix: &mut Agent, _args: &mut UpdateArgs<'_>) {
    lix.become_default(Activity::Climber);
    lix.sprite_offset.x += WALL_HUG;
}

pub(crate) fn update_climber(lix: &mut Agent, args: &mut UpdateArgs<'_>) {
    lix.advance_frame(args.frames);
    if lix.ceiling_blocks(args.terrain, 0, -HEAD_HEIGHT) {
        lix.turn();
        lix.transition_to(Activity::Faller, args);
        return;
    }
    if !lix.is_solid(args.terrain, 2, 0) {
        lix.transition_to(Activity::Ascender, args);
        return;
    }
    lix.move_up(args.terrain, 1);
}

/// Pulls up over the ledge, then walks on.
pub(crate) fn update_ascender(lix: &mut Agent, args: &mut UpdateArgs<'_>) {
    if !lix.is_last_frame(args.frames) {
        lix.advance_frame(args.frames);
        return;
    }
    lix.move_ahead(args.terrain, 2);
    let rise = lix.solid_wall_height(args.terrain, 0, 0);
    lix.move_up(args.terrain, rise);
    lix.transition_to(Activity::Walker, args);
}
