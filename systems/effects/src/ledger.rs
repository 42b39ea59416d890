//! Ordered history of one-shot effects that already fired.

use std::collections::BTreeSet;

use lix_core::{AgentId, Loudness, Phyu, Sound, Style};

/// One fired effect. The derived order (tick, style, agent, sound,
/// loudness) is the cut order used by [`EffectLedger::truncate_after`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EffectRecord {
    /// Tick during which the effect happened.
    pub phyu: Phyu,
    /// Tribe that caused the effect.
    pub style: Style,
    /// Agent that caused the effect, if any.
    pub agent: Option<AgentId>,
    /// Sound tied to the effect.
    pub sound: Sound,
    /// Playback volume relative to the local player.
    pub loudness: Loudness,
}

impl EffectRecord {
    /// Smallest record that can exist for the given tick.
    const fn first_of(phyu: Phyu) -> Self {
        Self {
            phyu,
            style: Style::Neutral,
            agent: None,
            sound: Sound::Nothing,
            loudness: Loudness::Loud,
        }
    }
}

/// Deduplicating history of fired effects plus a quicksave snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EffectLedger {
    played: BTreeSet<EffectRecord>,
    at_quicksave: BTreeSet<EffectRecord>,
}

impl EffectLedger {
    /// Creates an empty ledger with an empty quicksave slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts the record unless an identical one is present.
    ///
    /// Returns `true` when the record is new and its side effect should fire.
    pub fn record_if_new(&mut self, record: EffectRecord) -> bool {
        self.played.insert(record)
    }

    /// Whether an identical record is present.
    #[must_use]
    pub fn contains(&self, record: &EffectRecord) -> bool {
        self.played.contains(record)
    }

    /// Forgets every record with a tick strictly greater than `phyu`.
    pub fn truncate_after(&mut self, phyu: Phyu) {
        if phyu.next() == phyu {
            return;
        }
        let _ = self.played.split_off(&EffectRecord::first_of(phyu.next()));
    }

    /// Copies the history into the quicksave slot.
    pub fn quicksave(&mut self) {
        if self.at_quicksave != self.played {
            self.at_quicksave = self.played.clone();
        }
    }

    /// Replaces the history with the quicksave slot.
    pub fn quickload(&mut self) {
        if self.played != self.at_quicksave {
            self.played = self.at_quicksave.clone();
        }
    }

    /// Number of records in the history.
    #[must_use]
    pub fn len(&self) -> usize {
        self.played.len()
    }

    /// Whether the history is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.played.is_empty()
    }

    /// Records in total order.
    pub fn iter(&self) -> impl Iterator<Item = &EffectRecord> {
        self.played.iter()
    }
}
