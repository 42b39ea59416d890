#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays a lix scenario headless.

mod scenario;

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use lix_core::{Command, Event, Loudness, RemovalCause, Sound, SoundSink};
use lix_world::{self as world, query, World};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::scenario::Scenario;

#[derive(Debug, Parser)]
#[command(name = "lix", about = "Runs a lix scenario without graphics")]
struct Cli {
    /// Path to the TOML scenario file.
    #[arg(long)]
    scenario: PathBuf,

    /// Number of ticks to simulate; overrides the scenario.
    #[arg(long)]
    ticks: Option<u32>,

    /// Rewind this many ticks after the run and report the earlier state too.
    #[arg(long)]
    framestep_back: Option<u32>,

    /// Log simulation details.
    #[arg(long, short)]
    verbose: bool,
}

/// Counts played sounds instead of playing them.
#[derive(Debug, Default)]
struct SoundCounter {
    loud: usize,
    quiet: usize,
}

impl SoundSink for SoundCounter {
    fn play(&mut self, sound: Sound, loudness: Loudness) {
        debug!(?sound, ?loudness, "sound");
        match loudness {
            Loudness::Loud => self.loud += 1,
            Loudness::Quiet => self.quiet += 1,
        }
    }
}

/// Entry point for the lix command-line interface.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let text = fs::read_to_string(&cli.scenario)
        .with_context(|| format!("failed to read scenario {}", cli.scenario.display()))?;
    let scenario = Scenario::parse(&text)
        .with_context(|| format!("failed to parse scenario {}", cli.scenario.display()))?;
    let level = scenario.level();
    let mut world = World::new(&level, scenario.local_style).context("scenario level is invalid")?;

    let ticks = cli.ticks.unwrap_or(scenario.ticks);
    info!(ticks, scenario = %cli.scenario.display(), "running");
    let mut sounds = SoundCounter::default();
    run(&mut world, &scenario, ticks, &mut sounds);

    report(&world);
    println!("sounds: {} loud, {} quiet", sounds.loud, sounds.quiet);

    if let Some(back) = cli.framestep_back {
        let mut events = Vec::new();
        world::apply(&mut world, Command::FramestepBack { ticks: back }, &mut events);
        log_events(&events);
        println!("after stepping back {back} ticks:");
        report(&world);
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(world: &mut World, scenario: &Scenario, ticks: u32, sounds: &mut SoundCounter) {
    for _ in 0..ticks {
        let mut events = Vec::new();
        world::apply(world, Command::Advance, &mut events);

        let phyu = query::phyu(world).get();
        for assignment in scenario.assignments_after(phyu) {
            let agent = query::agent(world, assignment.agent());
            let Some(style) = agent.map(|agent| agent.style()) else {
                warn!(tick = phyu, agent = assignment.agent, "scheduled agent is not on the field");
                continue;
            };
            world::apply(
                world,
                Command::Assign {
                    style,
                    agent: assignment.agent(),
                    activity: assignment.skill,
                    personal: assignment.personal,
                },
                &mut events,
            );
        }
        log_events(&events);
        world::present(world, sounds);

        if query::nothing_left(world) {
            info!(tick = phyu, "every agent has left");
            break;
        }
    }
}

fn log_events(events: &[Event]) {
    for event in events {
        match event {
            Event::AssignmentRejected {
                agent,
                activity,
                reason,
            } => warn!(agent = agent.get(), ?activity, ?reason, "assignment rejected"),
            Event::AgentRemoved {
                agent,
                cause: RemovalCause::Saved,
                ..
            } => info!(agent = agent.get(), "agent saved"),
            Event::AgentRemoved { agent, .. } => info!(agent = agent.get(), "agent died"),
            Event::SteppedBack { from, to } => {
                info!(from = from.get(), to = to.get(), "stepped back");
            }
            _ => {}
        }
    }
}

fn report(world: &World) {
    println!("tick {}", query::phyu(world).get());
    for tribe in query::tribes(world) {
        println!(
            "{:?}: saved {}, died {}, on field {}, in hatch {}",
            tribe.style, tribe.saved, tribe.died, tribe.on_field, tribe.pending
        );
    }
    let checksum: String = query::checksum(world)
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect();
    println!("checksum {checksum}");
}
