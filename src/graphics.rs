use bevy::prelude::*;

/// Setup camera for 2D rendering
pub fn setup_camera(mut commands: Commands) {
    // Default Camera2d maps one world unit to one logical pixel, which matches
    // the 1200×680 layout the levels are authored in.
    commands.spawn(Camera2d);
    info!("[SETUP] Camera spawned");
}
