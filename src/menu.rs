//! Game state machine, main menu, and the win / lose overlays.
//!
//! ## States
//!
//! | State      | Description                                         |
//! |------------|-----------------------------------------------------|
//! | `MainMenu` | Initial state; level picker shown                   |
//! | `Playing`  | Level running; all gameplay systems active          |
//! | `Won`      | Every target cleared; world frozen, overlay shown   |
//! | `Lost`     | Out of tries; world frozen, overlay shown           |
//!
//! ## Systems (registered by `MenuPlugin`)
//!
//! | System                   | Schedule                    | Purpose                          |
//! |--------------------------|-----------------------------|----------------------------------|
//! | `setup_main_menu`        | `OnEnter(MainMenu)`         | Spawn level picker UI            |
//! | `despawn_level`          | `OnEnter(MainMenu)`         | Tear down any running level      |
//! | `cleanup_main_menu`      | `OnExit(MainMenu)`          | Despawn menu UI                  |
//! | `menu_button_system`     | `Update / in MainMenu`      | Easy / Hard / Quit clicks        |
//! | `setup_won_overlay`      | `OnEnter(Won)`              | Spawn success overlay            |
//! | `setup_lost_overlay`     | `OnEnter(Lost)`             | Spawn failure overlay            |
//! | `cleanup_outcome_overlay`| `OnExit(Won)`/`OnExit(Lost)`| Despawn overlay                  |
//! | `overlay_button_system`  | `Update / in Won or Lost`   | Play again / New level / Menu    |
//! | `leave_level_system`     | `Update / in Playing`       | Escape returns to the menu       |

use crate::level::{CurrentLevel, LevelId};
use crate::world::despawn_level;
use bevy::ecs::hierarchy::ChildSpawnerCommands;
use bevy::prelude::*;
use bevy_rapier2d::prelude::RapierConfiguration;

mod common;
mod main_menu;
mod overlay;

use common::*;

pub use main_menu::{cleanup_main_menu, menu_button_system, setup_main_menu};
pub use overlay::{
    cleanup_outcome_overlay, overlay_button_system, setup_lost_overlay, setup_won_overlay,
};

// ── Game state ────────────────────────────────────────────────────────────────

/// Top-level application state machine.
///
/// Every gameplay system in [`crate::simulation::SimulationPlugin`] runs
/// under `.run_if(in_state(GameState::Playing))`, so the world is inert
/// while the menu or an overlay is displayed.
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    /// Level picker; shown on startup.
    #[default]
    MainMenu,
    /// Active level.
    Playing,
    /// All targets cleared.
    Won,
    /// Tries exhausted with targets remaining.
    Lost,
}

// ── Component markers ─────────────────────────────────────────────────────────

/// Root node of the main-menu UI; entire tree is despawned on `OnExit(MainMenu)`.
#[derive(Component)]
pub struct MainMenuRoot;

/// Tags the "Easy" level button.
#[derive(Component)]
pub struct MenuEasyButton;

/// Tags the "Hard" level button.
#[derive(Component)]
pub struct MenuHardButton;

/// Tags the "Quit" button.
#[derive(Component)]
pub struct MenuQuitButton;

/// Root node of the win / lose overlay.
#[derive(Component)]
pub struct OutcomeOverlayRoot;

/// Tags the "Play Again" button on an outcome overlay.
#[derive(Component)]
pub struct OverlayPlayAgainButton;

/// Tags the "New Level" button on an outcome overlay.
#[derive(Component)]
pub struct OverlayNewLevelButton;

/// Tags the "Menu" button on an outcome overlay.
#[derive(Component)]
pub struct OverlayMenuButton;

// ── Plugin ────────────────────────────────────────────────────────────────────

/// Registers `GameState`, menu and overlay UI, and their button handlers.
///
/// This plugin must be added to the app **before** any plugin that calls
/// `.run_if(in_state(GameState::Playing))`, so the state is always registered
/// first.
pub struct MenuPlugin;

impl Plugin for MenuPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .init_resource::<CurrentLevel>()
            .add_systems(
                OnEnter(GameState::MainMenu),
                (despawn_level, setup_main_menu),
            )
            .add_systems(OnExit(GameState::MainMenu), cleanup_main_menu)
            .add_systems(OnEnter(GameState::Won), setup_won_overlay)
            .add_systems(OnEnter(GameState::Lost), setup_lost_overlay)
            .add_systems(OnExit(GameState::Won), cleanup_outcome_overlay)
            .add_systems(OnExit(GameState::Lost), cleanup_outcome_overlay)
            .add_systems(
                Update,
                (
                    menu_button_system.run_if(in_state(GameState::MainMenu)),
                    overlay_button_system
                        .run_if(in_state(GameState::Won).or(in_state(GameState::Lost))),
                    leave_level_system.run_if(in_state(GameState::Playing)),
                ),
            );
    }
}

// ── Physics freeze ────────────────────────────────────────────────────────────

/// Re-enable the Rapier physics pipeline when a level (re)starts.
pub fn resume_physics(mut config: Query<&mut RapierConfiguration>) {
    for mut cfg in config.iter_mut() {
        cfg.physics_pipeline_active = true;
    }
}

/// Escape while in `Playing` → back to the level picker.
pub fn leave_level_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if keys.just_pressed(KeyCode::Escape) {
        next_state.set(GameState::MainMenu);
    }
}

/// Start `level` from any state.
pub fn start_level(
    level: LevelId,
    current: &mut CurrentLevel,
    next_state: &mut NextState<GameState>,
) {
    current.0 = level;
    next_state.set(GameState::Playing);
}
