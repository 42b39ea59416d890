use lix_core::{AgentId, Loudness, Phyu, Sound, Style};
use lix_system_effects::{EffectLedger, EffectRecord};
use proptest::prelude::*;

const SOUNDS: [Sound; 5] = [
    Sound::Assign,
    Sound::Steel,
    Sound::Pop,
    Sound::Brick,
    Sound::Goal,
];
const STYLES: [Style; 3] = [Style::Red, Style::Green, Style::Blue];

fn arb_record() -> impl Strategy<Value = EffectRecord> {
    (
        0u32..40,
        0usize..STYLES.len(),
        proptest::option::of(0u32..6),
        0usize..SOUNDS.len(),
        any::<bool>(),
    )
        .prop_map(|(phyu, style, agent, sound, loud)| EffectRecord {
            phyu: Phyu::new(phyu),
            style: STYLES[style],
            agent: agent.map(AgentId::new),
            sound: SOUNDS[sound],
            loudness: if loud { Loudness::Loud } else { Loudness::Quiet },
        })
}

proptest! {
    #[test]
    fn each_record_fires_exactly_once(records in proptest::collection::vec(arb_record(), 0..64)) {
        let mut ledger = EffectLedger::new();
        let mut fired = Vec::new();
        for record in &records {
            if ledger.record_if_new(*record) {
                fired.push(*record);
            }
        }
        for record in &records {
            prop_assert!(!ledger.record_if_new(*record));
            prop_assert_eq!(fired.iter().filter(|seen| *seen == record).count(), 1);
        }
        prop_assert_eq!(ledger.len(), fired.len());
    }

    #[test]
    fn truncation_cuts_strictly_after_tick(
        records in proptest::collection::vec(arb_record(), 0..64),
        cut in 0u32..40,
    ) {
        let mut ledger = EffectLedger::new();
        for record in &records {
            let _ = ledger.record_if_new(*record);
        }
        ledger.truncate_after(Phyu::new(cut));

        prop_assert!(ledger.iter().all(|record| record.phyu <= Phyu::new(cut)));
        for record in &records {
            let replayed = ledger.record_if_new(*record);
            if record.phyu <= Phyu::new(cut) {
                prop_assert!(!replayed, "history at or before the cut fired again");
            }
        }
    }

    #[test]
    fn quicksave_then_quickload_is_identity(
        records in proptest::collection::vec(arb_record(), 0..32),
    ) {
        let mut ledger = EffectLedger::new();
        for record in &records {
            let _ = ledger.record_if_new(*record);
        }
        let before = ledger.clone();
        ledger.quicksave();
        ledger.quickload();
        let saved_before: Vec<_> = before.iter().copied().collect();
        let saved_after: Vec<_> = ledger.iter().copied().collect();
        prop_assert_eq!(saved_before, saved_after);
    }
}

#[test]
fn rewound_tick_fires_again_only_when_it_diverges() {
    let mut ledger = EffectLedger::new();
    let original = EffectRecord {
        phyu: Phyu::new(12),
        style: Style::Red,
        agent: Some(AgentId::new(3)),
        sound: Sound::Steel,
        loudness: Loudness::Loud,
    };
    assert!(ledger.record_if_new(original));

    ledger.truncate_after(Phyu::new(12));
    assert!(!ledger.record_if_new(original));

    ledger.truncate_after(Phyu::new(11));
    let diverged = EffectRecord {
        sound: Sound::Pop,
        ..original
    };
    assert!(ledger.record_if_new(diverged));
    assert!(ledger.record_if_new(original));
}
