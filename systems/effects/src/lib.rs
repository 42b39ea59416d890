#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Effect bookkeeping that survives rewinding.
//!
//! The simulation may revisit the same ticks many times (framestepping back,
//! quickloading, network resynchronisation). [`Effects`] separates two
//! concerns so that sounds and visuals stay correct while it does:
//!
//! * the [`EffectLedger`] remembers which one-shot effects already fired and
//!   is rewound together with the simulation;
//! * the debris list holds visuals that are currently animating and is never
//!   rewound, so a particle in flight always finishes its flight exactly once.

mod debris;
mod ledger;

pub use debris::{Debris, DebrisKind};
pub use ledger::{EffectLedger, EffectRecord};

use lix_core::{Activity, AgentId, Facing, Loudness, Phyu, Point, Sound, SoundSink, Style};

const PARTICLES_PER_EXPLOSION: usize = 12;
const RNG_MULTIPLIER: u64 = 6_364_136_223_846_793_005;
const RNG_INCREMENT: u64 = 1_442_695_040_888_963_407;

/// Effect manager owned by the game driver.
#[derive(Debug)]
pub struct Effects {
    ledger: EffectLedger,
    local_style: Option<Style>,
    pending_sounds: Vec<(Sound, Loudness)>,
    debris: Vec<Debris>,
}

impl Effects {
    /// Creates an empty manager. Sounds of `local_style` play loud.
    #[must_use]
    pub fn new(local_style: Option<Style>) -> Self {
        Self {
            ledger: EffectLedger::new(),
            local_style,
            pending_sounds: Vec::new(),
            debris: Vec::new(),
        }
    }

    /// Read-only access to the fired-effect history.
    #[must_use]
    pub const fn ledger(&self) -> &EffectLedger {
        &self.ledger
    }

    /// Requests a sound caused by an agent or a tribe.
    pub fn add_sound(&mut self, phyu: Phyu, style: Style, agent: Option<AgentId>, sound: Sound) {
        if sound == Sound::Nothing {
            return;
        }
        let _ = self.record(phyu, style, agent, sound);
    }

    /// Marks a skill assignment with a floating arrow and the assign sound.
    pub fn add_arrow(
        &mut self,
        phyu: Phyu,
        style: Style,
        agent: AgentId,
        position: Point,
        activity: Activity,
    ) {
        if self.record(phyu, style, Some(agent), activity.sound_assign()) {
            self.debris.push(Debris::arrow(position, style, activity));
        }
    }

    /// A miner dropped its pickaxe on steel.
    pub fn add_pickaxe(
        &mut self,
        phyu: Phyu,
        style: Style,
        agent: AgentId,
        position: Point,
        facing: Facing,
    ) {
        if self.record(phyu, style, Some(agent), Sound::Steel) {
            self.debris
                .push(Debris::tool(DebrisKind::Pickaxe, position, facing));
        }
    }

    /// A basher or digger hit steel.
    pub fn add_dig_hammer(
        &mut self,
        phyu: Phyu,
        style: Style,
        agent: AgentId,
        position: Point,
        facing: Facing,
    ) {
        if self.record(phyu, style, Some(agent), Sound::Steel) {
            self.debris
                .push(Debris::tool(DebrisKind::DigHammer, position, facing));
        }
    }

    /// An exploder went off.
    pub fn add_explosion(&mut self, phyu: Phyu, style: Style, agent: AgentId, position: Point) {
        if !self.record(phyu, style, Some(agent), Sound::Pop) {
            return;
        }
        self.debris.push(Debris::explosion(position));
        let mut state = u64::from(phyu.get()) << 32 | u64::from(agent.get());
        for _ in 0..PARTICLES_PER_EXPLOSION {
            state = next_random(state);
            let speed_x = (state >> 33) as i32 % 9 - 4;
            state = next_random(state);
            let speed_y = -((state >> 33) as i32 % 8) - 2;
            self.debris
                .push(Debris::particle(position, Point::new(speed_x, speed_y)));
        }
    }

    /// Forgets fired effects after `phyu` so they may fire again.
    pub fn truncate_after(&mut self, phyu: Phyu) {
        self.ledger.truncate_after(phyu);
    }

    /// Snapshots the ledger for a later [`Effects::quickload`].
    pub fn quicksave(&mut self) {
        self.ledger.quicksave();
    }

    /// Restores the ledger from the last [`Effects::quicksave`].
    pub fn quickload(&mut self) {
        self.ledger.quickload();
    }

    /// Animates every debris item once and drops the expired ones.
    pub fn tick(&mut self) {
        self.debris.retain_mut(Debris::animate);
    }

    /// Whether no visual is animating. The ledger is history and not
    /// considered here.
    #[must_use]
    pub fn nothing_going_on(&self) -> bool {
        self.debris.is_empty()
    }

    /// Debris currently animating, oldest first.
    #[must_use]
    pub fn debris(&self) -> &[Debris] {
        &self.debris
    }

    /// Plays every sound requested since the previous call.
    pub fn drain_sounds(&mut self, sink: &mut dyn SoundSink) {
        for (sound, loudness) in self.pending_sounds.drain(..) {
            sink.play(sound, loudness);
        }
    }

    fn record(&mut self, phyu: Phyu, style: Style, agent: Option<AgentId>, sound: Sound) -> bool {
        let loudness = if self.local_style == Some(style) {
            Loudness::Loud
        } else {
            Loudness::Quiet
        };
        let fresh = self.ledger.record_if_new(EffectRecord {
            phyu,
            style,
            agent,
            sound,
            loudness,
        });
        if fresh && sound != Sound::Nothing {
            self.pending_sounds.push((sound, loudness));
        }
        fresh
    }
}

fn next_random(state: u64) -> u64 {
    state
        .wrapping_mul(RNG_MULTIPLIER)
        .wrapping_add(RNG_INCREMENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder(Vec<(Sound, Loudness)>);

    impl SoundSink for Recorder {
        fn play(&mut self, sound: Sound, loudness: Loudness) {
            self.0.push((sound, loudness));
        }
    }

    #[test]
    fn local_tribe_sounds_are_loud() {
        let mut effects = Effects::new(Some(Style::Blue));
        effects.add_sound(Phyu::new(1), Style::Blue, None, Sound::Goal);
        effects.add_sound(Phyu::new(1), Style::Red, None, Sound::Goal);
        let mut sink = Recorder::default();
        effects.drain_sounds(&mut sink);
        assert_eq!(
            sink.0,
            vec![(Sound::Goal, Loudness::Loud), (Sound::Goal, Loudness::Quiet)]
        );
    }

    #[test]
    fn explosion_spawns_debris_once() {
        let mut effects = Effects::new(None);
        let agent = AgentId::new(4);
        effects.add_explosion(Phyu::new(9), Style::Red, agent, Point::new(30, 30));
        let spawned = effects.debris().len();
        assert_eq!(spawned, PARTICLES_PER_EXPLOSION + 1);

        effects.add_explosion(Phyu::new(9), Style::Red, agent, Point::new(30, 30));
        assert_eq!(effects.debris().len(), spawned);
    }

    #[test]
    fn silent_sounds_are_not_recorded() {
        let mut effects = Effects::new(None);
        effects.add_sound(Phyu::new(1), Style::Red, None, Sound::Nothing);
        assert!(effects.ledger().is_empty());
    }

    #[test]
    fn debris_runs_to_completion_regardless_of_ledger() {
        let mut effects = Effects::new(None);
        effects.add_pickaxe(
            Phyu::new(3),
            Style::Green,
            AgentId::new(1),
            Point::new(0, 0),
            Facing::Left,
        );
        effects.quicksave();
        effects.truncate_after(Phyu::ZERO);
        effects.quickload();
        assert!(!effects.nothing_going_on());
        for _ in 0..100 {
            effects.tick();
        }
        assert!(effects.nothing_going_on());
    }
}
