use bevy::prelude::*;
use bevy::window::WindowResolution;
use bevy_rapier2d::prelude::*;
use cowboys_vs_aliens::config::{self, GameConfig};
use cowboys_vs_aliens::constants::{LAYOUT_HEIGHT, LAYOUT_WIDTH, PIXELS_PER_METER};
use cowboys_vs_aliens::graphics;
use cowboys_vs_aliens::level::{CurrentLevel, LevelId};
use cowboys_vs_aliens::menu::{GameState, MenuPlugin};
use cowboys_vs_aliens::simulation::SimulationPlugin;
use std::env;

fn start_level_directly(level: Res<CurrentLevel>, mut next_state: ResMut<NextState<GameState>>) {
    info!("Starting level '{}' directly", level.0.name());
    next_state.set(GameState::Playing);
}

fn main() {
    // SLINGSHOT_LEVEL=easy|hard skips the menu and starts that level directly.
    let direct_level = env::var("SLINGSHOT_LEVEL")
        .ok()
        .and_then(|name| LevelId::parse(&name));

    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Cowboys vs Aliens".into(),
            resolution: WindowResolution::new(LAYOUT_WIDTH as u32, LAYOUT_HEIGHT as u32),
            resizable: false,
            ..Default::default()
        }),
        ..Default::default()
    }))
    .insert_resource(ClearColor(Color::srgb(0.02, 0.02, 0.06)))
    // Compiled defaults; load_game_config overwrites them from assets/game.toml
    // (if present) in the Startup schedule.
    .insert_resource(GameConfig::default())
    .add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(
        PIXELS_PER_METER,
    ))
    // MenuPlugin registers GameState; it must come before SimulationPlugin.
    .add_plugins(MenuPlugin)
    .add_plugins(SimulationPlugin)
    .add_systems(
        Startup,
        (
            config::load_game_config,
            config::apply_gravity.after(config::load_game_config),
            graphics::setup_camera,
        ),
    );

    if let Some(level) = direct_level {
        // The initial OnEnter runs before Startup, so request the transition
        // once the config is loaded instead of inserting `Playing` outright.
        app.insert_resource(CurrentLevel(level)).add_systems(
            Startup,
            start_level_directly.after(config::load_game_config),
        );
    }

    app.run();
}
