//! Gameplay plugin: wires every per-step system into the Bevy schedules.
//!
//! ## Step order
//!
//! `Update` (before the Rapier step), chained because several of these write
//! the same `Velocity`:
//!
//! 1. pointer grab → drag → release
//! 2. `sling_release_system` (release → launch)
//! 3. `platform_motion_system`
//!
//! The sling itself is a Rapier spring joint and needs no system.
//!
//! `PostUpdate`, after Rapier writes back transforms and emits collision events:
//!
//! 1. `sensor_event_system`
//! 2. `seed_sensor_overlaps_system` (first step of a level only)
//! 3. `forget_removed_bodies_system`
//! 4. `launch_settle_system`
//! 5. `outcome_system`
//!
//! Everything runs only in [`GameState::Playing`] and only once a level has
//! been built.  Entering `Playing` always tears the previous level down and
//! builds a fresh one.

use crate::hud::{hud_display_system, setup_hud};
use crate::launch::{
    draw_sling_system, launch_settle_system, sling_release_system, Launcher, SlingReleased,
};
use crate::menu::{resume_physics, GameState};
use crate::motion::platform_motion_system;
use crate::outcome::{outcome_system, LevelOutcome};
use crate::pointer::{
    pointer_drag_system, pointer_grab_system, pointer_release_system, DragState,
};
use crate::tracker::{
    forget_removed_bodies_system, seed_sensor_overlaps_system, sensor_event_system,
    tracker_needs_seed,
};
use crate::world::{despawn_level, spawn_level};
use bevy::prelude::*;
use bevy_rapier2d::prelude::PhysicsSet;

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<SlingReleased>()
            .add_message::<LevelOutcome>()
            .init_resource::<DragState>()
            .add_systems(
                OnEnter(GameState::Playing),
                (resume_physics, despawn_level, spawn_level, setup_hud).chain(),
            )
            .add_systems(
                Update,
                (
                    pointer_grab_system,
                    pointer_drag_system,
                    pointer_release_system,
                    sling_release_system,
                    platform_motion_system,
                    draw_sling_system,
                    hud_display_system,
                )
                    .chain()
                    .run_if(in_state(GameState::Playing).and(resource_exists::<Launcher>)),
            )
            .add_systems(
                PostUpdate,
                (
                    sensor_event_system,
                    seed_sensor_overlaps_system.run_if(tracker_needs_seed),
                    forget_removed_bodies_system,
                    launch_settle_system,
                    outcome_system,
                )
                    .chain()
                    .after(PhysicsSet::Writeback)
                    .run_if(in_state(GameState::Playing).and(resource_exists::<Launcher>)),
            );
    }
}
