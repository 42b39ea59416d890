//! Per-activity behaviour, dispatched through a fixed table.

mod ballistics;
mod batter;
mod blocker;
mod builder;
mod climber;
mod digging;
pub(crate) mod exploder;
mod faller;
mod leaving;
mod recovery;
mod walker;

use lix_core::Activity;

use crate::{Agent, UpdateArgs};

/// Behaviour hook operating on one agent.
pub type Handler = fn(&mut Agent, &mut UpdateArgs<'_>);

/// Hooks that make up one activity.
#[derive(Clone, Copy, Debug)]
pub struct ActivityFunctions {
    /// Runs instead of a plain transition when the skill is assigned.
    pub assign: Option<Handler>,
    /// Runs instead of the default reset when the agent becomes this.
    pub on_become: Option<Handler>,
    /// Runs once per tick while the agent performs this activity.
    pub update: Handler,
}

impl ActivityFunctions {
    fn update_only(update: Handler) -> Self {
        Self {
            assign: None,
            on_become: None,
            update,
        }
    }
}

/// Looks up the hooks of `activity`.
#[must_use]
pub fn functions(activity: Activity) -> ActivityFunctions {
    match activity {
        Activity::Nothing => ActivityFunctions::update_only(leaving::update_nothing),
        Activity::Faller => ActivityFunctions::update_only(faller::update_faller),
        Activity::Tumbler => ActivityFunctions::update_only(ballistics::update_tumbler),
        Activity::Stunner | Activity::Lander | Activity::Shrugger | Activity::Shrugger2 => {
            ActivityFunctions::update_only(recovery::update_recovery)
        }
        Activity::Splatter | Activity::Burner | Activity::Drowner => {
            ActivityFunctions::update_only(leaving::update_leaving)
        }
        Activity::Exiter => ActivityFunctions::update_only(leaving::update_exiter),
        Activity::Walker => ActivityFunctions {
            assign: Some(walker::assign_walker),
            on_become: Some(walker::become_walker),
            update: walker::update_walker,
        },
        Activity::Runner => ActivityFunctions {
            assign: Some(walker::assign_runner),
            on_become: None,
            update: walker::update_runner,
        },
        Activity::Climber => ActivityFunctions {
            assign: Some(climber::assign_climber),
            on_become: Some(climber::become_climber),
            update: climber::update_climber,
        },
        Activity::Ascender => ActivityFunctions::update_only(climber::update_ascender),
        Activity::Floater => ActivityFunctions {
            assign: Some(faller::assign_floater),
            on_become: None,
            update: faller::update_floater,
        },
        Activity::Exploder => ActivityFunctions {
            assign: Some(exploder::assign_exploder),
            on_become: None,
            update: exploder::update_exploder,
        },
        Activity::Blocker => ActivityFunctions::update_only(blocker::update_blocker),
        Activity::Builder => ActivityFunctions {
            assign: Some(builder::assign_builder),
            on_become: Some(builder::become_builder),
            update: builder::update_builder,
        },
        Activity::Platformer => ActivityFunctions {
            assign: Some(builder::assign_platformer),
            on_become: Some(builder::become_platformer),
            update: builder::update_platformer,
        },
        Activity::Basher => ActivityFunctions::update_only(digging::update_basher),
        Activity::Miner => ActivityFunctions::update_only(digging::update_miner),
        Activity::Digger => ActivityFunctions::update_only(digging::update_digger),
        Activity::Jumper => ActivityFunctions {
            on_become: Some(ballistics::become_jumper),
            ..ActivityFunctions::update_only(ballistics::update_jumper)
        },
        Activity::Batter => ActivityFunctions::update_only(batter::update_batter),
    }
}
