//! Tribes: skill inventories, agents on the field and score counters.

use std::collections::BTreeMap;

use lix_core::{Activity, AssignmentError, SkillBank, Style};
use lix_system_agents::Agent;
use serde::{Deserialize, Serialize};

/// Remaining uses of one skill.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillCount {
    /// A limited number of uses.
    Finite(u32),
    /// Never runs out.
    Infinite,
}

impl SkillCount {
    /// Whether at least one use is left.
    #[must_use]
    pub const fn is_available(self) -> bool {
        match self {
            Self::Finite(uses) => uses > 0,
            Self::Infinite => true,
        }
    }
}

/// Per-tribe skill counts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SkillInventory {
    counts: BTreeMap<Activity, SkillCount>,
}

impl SkillInventory {
    /// Builds an inventory from `(skill, count)` pairs. Later pairs override
    /// earlier ones.
    #[must_use]
    pub fn new(counts: impl IntoIterator<Item = (Activity, SkillCount)>) -> Self {
        Self {
            counts: counts.into_iter().collect(),
        }
    }

    /// Remaining uses of `activity`, zero when the skill is not stocked.
    #[must_use]
    pub fn count(&self, activity: Activity) -> SkillCount {
        self.counts
            .get(&activity)
            .copied()
            .unwrap_or(SkillCount::Finite(0))
    }

    /// Whether `activity` can be handed out once more.
    #[must_use]
    pub fn can_use(&self, activity: Activity) -> bool {
        self.count(activity).is_available()
    }

    /// Takes one use of `activity`.
    ///
    /// # Errors
    ///
    /// Returns [`AssignmentError::OutOfSkills`] when no use is left.
    pub fn consume(&mut self, activity: Activity) -> Result<(), AssignmentError> {
        match self.counts.get_mut(&activity) {
            Some(SkillCount::Infinite) => Ok(()),
            Some(SkillCount::Finite(uses)) if *uses > 0 => {
                *uses -= 1;
                Ok(())
            }
            _ => Err(AssignmentError::OutOfSkills),
        }
    }

    /// Stocked skills in activity order.
    pub fn iter(&self) -> impl Iterator<Item = (Activity, SkillCount)> + '_ {
        self.counts.iter().map(|(activity, count)| (*activity, *count))
    }
}

impl SkillBank for SkillInventory {
    fn return_skills(&mut self, activity: Activity, count: u32) {
        let entry = self
            .counts
            .entry(activity)
            .or_insert(SkillCount::Finite(0));
        if let SkillCount::Finite(uses) = entry {
            *uses = uses.saturating_add(count);
        }
    }
}

/// One player's or team's share of the simulation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Tribe {
    pub(crate) style: Style,
    pub(crate) skills: SkillInventory,
    pub(crate) agents: Vec<Agent>,
    /// Agents the hatches have yet to release.
    pub(crate) pending: u32,
    pub(crate) next_hatch: usize,
    pub(crate) spawned: u32,
    pub(crate) saved: u32,
    pub(crate) died: u32,
}

impl Tribe {
    pub(crate) fn new(style: Style, pending: u32, skills: SkillInventory) -> Self {
        Self {
            style,
            skills,
            agents: Vec::new(),
            pending,
            next_hatch: 0,
            spawned: 0,
            saved: 0,
            died: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finite_counts_run_out() {
        let mut skills = SkillInventory::new([(Activity::Digger, SkillCount::Finite(2))]);
        assert_eq!(skills.consume(Activity::Digger), Ok(()));
        assert_eq!(skills.consume(Activity::Digger), Ok(()));
        assert_eq!(
            skills.consume(Activity::Digger),
            Err(AssignmentError::OutOfSkills)
        );
        assert!(!skills.can_use(Activity::Digger));
        assert_eq!(
            skills.consume(Activity::Basher),
            Err(AssignmentError::OutOfSkills)
        );
        assert_eq!(skills.count(Activity::Basher), SkillCount::Finite(0));
    }

    #[test]
    fn infinite_counts_never_change() {
        let mut skills = SkillInventory::new([(Activity::Builder, SkillCount::Infinite)]);
        for _ in 0..100 {
            assert_eq!(skills.consume(Activity::Builder), Ok(()));
        }
        skills.return_skills(Activity::Builder, 4);
        assert_eq!(skills.count(Activity::Builder), SkillCount::Infinite);
    }

    #[test]
    fn returned_skills_are_credited() {
        let mut skills = SkillInventory::new([(Activity::Platformer, SkillCount::Finite(1))]);
        assert_eq!(skills.consume(Activity::Platformer), Ok(()));
        skills.return_skills(Activity::Platformer, 3);
        skills.return_skills(Activity::Builder, 2);
        assert_eq!(
            skills.iter().collect::<Vec<_>>(),
            vec![
                (Activity::Builder, SkillCount::Finite(2)),
                (Activity::Platformer, SkillCount::Finite(3)),
            ]
        );
    }
}
