//! Player input keyed by the tick it takes effect on.

use std::collections::BTreeMap;

use lix_core::{Activity, AgentId, Facing, Phyu, Point, Style};
use serde::{Deserialize, Serialize};

/// One recorded player input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReplayEntry {
    /// A skill assignment.
    Assign {
        /// Tribe that issued the assignment.
        style: Style,
        /// Agent receiving the skill.
        agent: AgentId,
        /// Skill to assign.
        activity: Activity,
        /// Whether personal priority settings apply.
        personal: bool,
    },
    /// An agent placed outside the hatch schedule.
    Spawn {
        /// Tribe owning the agent.
        style: Style,
        /// Foot position.
        position: Point,
        /// Initial facing.
        facing: Facing,
    },
}

/// Ordered input history.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replay {
    entries: BTreeMap<Phyu, Vec<ReplayEntry>>,
}

impl Replay {
    /// Appends `entry` to the input applied at the start of `phyu`.
    pub(crate) fn add(&mut self, phyu: Phyu, entry: ReplayEntry) {
        self.entries.entry(phyu).or_default().push(entry);
    }

    /// Discards every input applied after `phyu`.
    pub(crate) fn cut_after(&mut self, phyu: Phyu) {
        let _ = self.entries.split_off(&phyu.next());
    }

    /// Input applied at the start of `phyu`, in recording order.
    #[must_use]
    pub fn entries_at(&self, phyu: Phyu) -> &[ReplayEntry] {
        self.entries.get(&phyu).map_or(&[], Vec::as_slice)
    }

    /// Number of recorded inputs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Whether no input was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Tick of the last recorded input.
    #[must_use]
    pub fn latest(&self) -> Option<Phyu> {
        self.entries.keys().next_back().copied()
    }

    /// Every input with its tick, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = (Phyu, &ReplayEntry)> {
        self.entries
            .iter()
            .flat_map(|(phyu, entries)| entries.iter().map(move |entry| (*phyu, entry)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assign(agent: u32) -> ReplayEntry {
        ReplayEntry::Assign {
            style: Style::Red,
            agent: AgentId::new(agent),
            activity: Activity::Digger,
            personal: false,
        }
    }

    #[test]
    fn entries_keep_recording_order_per_tick() {
        let mut replay = Replay::default();
        replay.add(Phyu::new(5), assign(1));
        replay.add(Phyu::new(3), assign(2));
        replay.add(Phyu::new(5), assign(3));

        assert_eq!(replay.entries_at(Phyu::new(5)), &[assign(1), assign(3)]);
        assert!(replay.entries_at(Phyu::new(4)).is_empty());
        assert_eq!(replay.len(), 3);
        assert_eq!(replay.latest(), Some(Phyu::new(5)));
        let ticks: Vec<u32> = replay.iter().map(|(phyu, _)| phyu.get()).collect();
        assert_eq!(ticks, vec![3, 5, 5]);
    }

    #[test]
    fn cutting_keeps_the_present() {
        let mut replay = Replay::default();
        for tick in 1..=6 {
            replay.add(Phyu::new(tick), assign(tick));
        }
        replay.cut_after(Phyu::new(4));
        assert_eq!(replay.latest(), Some(Phyu::new(4)));
        assert_eq!(replay.len(), 4);

        replay.cut_after(Phyu::ZERO);
        assert!(replay.is_empty());
    }
}
