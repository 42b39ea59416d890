//! Activity codes and the static metadata the state machine reads.

use serde::{Deserialize, Serialize};

use crate::Sound;

/// Current behaviour of an agent. The set is closed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Activity {
    /// Inactive; the agent is about to leave the roster.
    Nothing,
    /// Falling straight down.
    Faller,
    /// Flung through the air.
    Tumbler,
    /// Recovering from a hard landing.
    Stunner,
    /// Absorbing a regular landing.
    Lander,
    /// Dying from a fall.
    Splatter,
    /// Dying in fire.
    Burner,
    /// Dying in water.
    Drowner,
    /// Leaving through an exit.
    Exiter,
    /// Walking.
    Walker,
    /// Walking at double speed.
    Runner,
    /// Climbing a vertical wall.
    Climber,
    /// Pulling itself over the top of a wall.
    Ascender,
    /// Gliding down under an umbrella.
    Floater,
    /// Exploding at the end of a fuse.
    Exploder,
    /// Standing still and turning other agents around.
    Blocker,
    /// Building a diagonal staircase.
    Builder,
    /// Shrugging after running out of bricks.
    Shrugger,
    /// Building a horizontal bridge.
    Platformer,
    /// Shrugging after a platform ended.
    Shrugger2,
    /// Digging horizontally.
    Basher,
    /// Digging diagonally downward.
    Miner,
    /// Digging vertically downward.
    Digger,
    /// Jumping forward.
    Jumper,
    /// Swinging a bat at nearby agents.
    Batter,
}

impl Activity {
    /// Every activity in declaration order.
    pub const ALL: [Activity; 25] = [
        Self::Nothing,
        Self::Faller,
        Self::Tumbler,
        Self::Stunner,
        Self::Lander,
        Self::Splatter,
        Self::Burner,
        Self::Drowner,
        Self::Exiter,
        Self::Walker,
        Self::Runner,
        Self::Climber,
        Self::Ascender,
        Self::Floater,
        Self::Exploder,
        Self::Blocker,
        Self::Builder,
        Self::Shrugger,
        Self::Platformer,
        Self::Shrugger2,
        Self::Basher,
        Self::Miner,
        Self::Digger,
        Self::Jumper,
        Self::Batter,
    ];

    /// Skills a player may assign. Exploder here means "light the fuse".
    pub const SKILLS: [Activity; 13] = [
        Self::Walker,
        Self::Runner,
        Self::Climber,
        Self::Floater,
        Self::Exploder,
        Self::Blocker,
        Self::Builder,
        Self::Platformer,
        Self::Basher,
        Self::Miner,
        Self::Digger,
        Self::Jumper,
        Self::Batter,
    ];

    /// The head may move into terrain without being stopped by ceilings.
    #[must_use]
    pub const fn pass_top(self) -> bool {
        matches!(self, Self::Ascender | Self::Exiter | Self::Nothing)
    }

    /// The agent is on its way out and no longer takes skills.
    #[must_use]
    pub const fn leaving(self) -> bool {
        matches!(
            self,
            Self::Splatter | Self::Burner | Self::Drowner | Self::Exiter | Self::Exploder
        )
    }

    /// Blockers turn the agent around while it performs this activity.
    #[must_use]
    pub const fn blockable(self) -> bool {
        matches!(
            self,
            Self::Walker
                | Self::Runner
                | Self::Lander
                | Self::Shrugger
                | Self::Shrugger2
                | Self::Builder
                | Self::Platformer
                | Self::Basher
                | Self::Miner
                | Self::Batter
        )
    }

    /// Sound played when a player assigns this skill.
    #[must_use]
    pub const fn sound_assign(self) -> Sound {
        if self.is_skill() {
            Sound::Assign
        } else {
            Sound::Nothing
        }
    }

    /// Sound played when an agent transitions into this activity.
    #[must_use]
    pub const fn sound_become(self) -> Sound {
        match self {
            Self::Splatter => Sound::Splat,
            Self::Stunner => Sound::Ouch,
            Self::Burner => Sound::Fire,
            Self::Drowner => Sound::Water,
            Self::Exiter => Sound::Goal,
            Self::Jumper => Sound::Jump,
            _ => Sound::Nothing,
        }
    }

    /// Skills that may be assigned whatever the agent currently does.
    #[must_use]
    pub const fn is_permanent_skill(self) -> bool {
        matches!(
            self,
            Self::Runner | Self::Climber | Self::Floater | Self::Exploder
        )
    }

    /// Skills whose extra assignments queue up instead of restarting.
    #[must_use]
    pub const fn is_queueable(self) -> bool {
        matches!(self, Self::Builder | Self::Platformer)
    }

    /// Whether a player may assign this activity at all.
    #[must_use]
    pub const fn is_skill(self) -> bool {
        matches!(
            self,
            Self::Walker
                | Self::Runner
                | Self::Climber
                | Self::Floater
                | Self::Exploder
                | Self::Blocker
                | Self::Builder
                | Self::Platformer
                | Self::Basher
                | Self::Miner
                | Self::Digger
                | Self::Jumper
                | Self::Batter
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skills_are_flagged_as_skills() {
        for activity in Activity::SKILLS {
            assert!(activity.is_skill(), "{activity:?}");
            assert_eq!(activity.sound_assign(), Sound::Assign);
        }
        let skill_count = Activity::ALL.iter().filter(|ac| ac.is_skill()).count();
        assert_eq!(skill_count, Activity::SKILLS.len());
    }

    #[test]
    fn leaving_activities_are_never_blockable() {
        for activity in Activity::ALL {
            assert!(!(activity.leaving() && activity.blockable()), "{activity:?}");
        }
    }

    #[test]
    fn all_is_in_declaration_order() {
        let mut sorted = Activity::ALL;
        sorted.sort();
        assert_eq!(sorted, Activity::ALL);
    }

    #[test]
    fn only_builders_and_platformers_queue() {
        let queueable: Vec<_> = Activity::ALL
            .into_iter()
            .filter(|activity| activity.is_queueable())
            .collect();
        assert_eq!(queueable, vec![Activity::Builder, Activity::Platformer]);
    }
}
