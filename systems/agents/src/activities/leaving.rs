use lix_core::Activity;

use crate::{Agent, UpdateArgs};

pub(crate) fn update_nothing(_lix: &mut Agent, _args: &mut UpdateArgs<'_>) {}

/// Death animations run once, then the agent is gone.
pub(crate) fn update_leaving(lix: &mut Agent, args: &mut UpdateArgs<'_>) {
    if lix.is_last_frame(args.frames) {
        lix.transition_to(Activity::Nothing, args);
    } else {
        lix.advance_frame(args.frames);
    }
}

pub(crate) fn update_exiter(lix: &mut Agent, args: &mut UpdateArgs<'_>) {
    if lix.is_last_frame(args.frames) {
        lix.exited = true;
        lix.transition_to(Activity::Nothing, args);
    } else {
        lix.advance_frame(args.frames);
    }
}
