#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Agent state machine for the lix simulation.
//!
//! An [`Agent`] performs exactly one [`lix_core::Activity`] at a time. Each
//! activity contributes up to three hooks, looked up through [`functions`]:
//! an assign hook run when a player hands out the skill, a become hook run
//! on every transition into the activity, and an update hook run once per
//! tick. The world drives agents through [`Agent::assign`] and
//! [`Agent::update`], handing them an [`UpdateArgs`] with the shared terrain
//! and effect manager.
//!
//! All terrain access goes through the mirrored primitives in this crate, so
//! activity code is written once for a right-facing agent.

mod activities;
mod agent;
mod args;
mod frames;
mod movement;
mod state;

pub use activities::{functions, ActivityFunctions, Handler};
pub use agent::{Agent, AgentView, SPRITE_WIDTH};
pub use args::{FlingRequest, Neighbor, UpdateArgs};
pub use frames::StandardFrames;
pub use movement::MAX_WALL_SCAN;

#[cfg(test)]
mod testing;
