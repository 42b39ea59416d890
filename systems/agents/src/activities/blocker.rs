use crate::{Agent, UpdateArgs};

/// Blockers stand still; other agents turn at their arms.
pub(crate) fn update_blocker(lix: &mut Agent, args: &mut UpdateArgs<'_>) {
    if lix.fall_if_unsupported(args) {
        return;
    }
    lix.advance_frame(args.frames);
}
