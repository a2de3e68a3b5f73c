//! Headless tests for the [`GameState`] state machine and the menu handlers.
//!
//! These tests use [`MinimalPlugins`] with no window, rendering or physics,
//! so they run fast and deterministically in CI.
//!
//! Covered scenarios:
//! 1. Default initial state is `MainMenu`.
//! 2. A `NextState` request transitions from `MainMenu` → `Playing`.
//! 3. `insert_state` can force-start directly in `Playing`.
//! 4. Escape while playing returns to `MainMenu`.
//! 5. Enter on an outcome overlay replays the same level.
//! 6. "New level" on an outcome overlay switches to the other level.
//! 7. "Menu" on an outcome overlay returns to `MainMenu`.

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use cowboys_vs_aliens::level::{CurrentLevel, LevelId};
use cowboys_vs_aliens::menu::{
    leave_level_system, overlay_button_system, GameState, OverlayMenuButton,
    OverlayNewLevelButton,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Build a minimal headless app with just the state registered via `init_state`.
///
/// `MinimalPlugins` provides the required scheduling infrastructure.
/// `StatesPlugin` adds the `StateTransition` schedule needed by `init_state`.
fn app_with_default_state() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin));
    app.init_state::<GameState>();
    app
}

/// Headless app forced into `state`, with the input and level resources the
/// menu handlers read.
fn app_in_state(state: GameState, level: LevelId) -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin));
    app.insert_state(state);
    app.insert_resource(CurrentLevel(level));
    app.init_resource::<ButtonInput<KeyCode>>();
    app
}

fn current_state(app: &App) -> GameState {
    *app.world().resource::<State<GameState>>().get()
}

/// Spawn a pressed button with one text child, as the overlay builds them.
fn spawn_pressed_button(app: &mut App, marker: impl Bundle) {
    app.world_mut()
        .spawn((Button, Interaction::Pressed, marker))
        .with_children(|btn| {
            btn.spawn(TextColor(Color::WHITE));
        });
}

// ── Tests ─────────────────────────────────────────────────────────────────────

/// The default variant of `GameState` is `MainMenu`.
#[test]
fn default_state_is_main_menu() {
    let mut app = app_with_default_state();
    app.update(); // run one frame so StateTransition fires
    assert_eq!(
        current_state(&app),
        GameState::MainMenu,
        "initial state must be MainMenu"
    );
}

/// Requesting `Playing` via `NextState` transitions the state on the next
/// `StateTransition` pass (which Bevy runs before each `Update`).
#[test]
fn transition_main_menu_to_playing() {
    let mut app = app_with_default_state();
    app.update(); // settle into MainMenu

    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(GameState::Playing);
    app.update();

    assert_eq!(
        current_state(&app),
        GameState::Playing,
        "state must be Playing after explicit transition"
    );
}

/// `insert_state` can force the initial state to `Playing` directly.
#[test]
fn insert_state_starts_in_playing() {
    let mut app = app_in_state(GameState::Playing, LevelId::Easy);
    app.update();
    assert_eq!(current_state(&app), GameState::Playing);
}

#[test]
fn escape_leaves_the_level() {
    let mut app = app_in_state(GameState::Playing, LevelId::Hard);
    app.add_systems(
        Update,
        leave_level_system.run_if(in_state(GameState::Playing)),
    );
    app.update();

    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .press(KeyCode::Escape);
    app.update(); // handler requests MainMenu
    app.update(); // StateTransition applies it

    assert_eq!(current_state(&app), GameState::MainMenu);
}

#[test]
fn enter_on_won_overlay_replays_same_level() {
    let mut app = app_in_state(GameState::Won, LevelId::Hard);
    app.add_systems(Update, overlay_button_system);
    app.update();

    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .press(KeyCode::Enter);
    app.update();
    app.update();

    assert_eq!(current_state(&app), GameState::Playing);
    assert_eq!(app.world().resource::<CurrentLevel>().0, LevelId::Hard);
}

#[test]
fn new_level_button_switches_level() {
    let mut app = app_in_state(GameState::Lost, LevelId::Easy);
    app.add_systems(Update, overlay_button_system);
    spawn_pressed_button(&mut app, OverlayNewLevelButton);
    app.update();
    app.update();

    assert_eq!(current_state(&app), GameState::Playing);
    assert_eq!(
        app.world().resource::<CurrentLevel>().0,
        LevelId::Hard,
        "new level from easy must be hard"
    );
}

#[test]
fn menu_button_returns_to_main_menu() {
    let mut app = app_in_state(GameState::Won, LevelId::Easy);
    app.add_systems(Update, overlay_button_system);
    spawn_pressed_button(&mut app, OverlayMenuButton);
    app.update();
    app.update();

    assert_eq!(current_state(&app), GameState::MainMenu);
    assert_eq!(app.world().resource::<CurrentLevel>().0, LevelId::Easy);
}
