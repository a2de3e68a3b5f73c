//! Runtime game configuration loaded from `assets/game.toml`.
//!
//! [`GameConfig`] is a Bevy [`Resource`] that mirrors the tunable constants in
//! [`crate::constants`].  At startup, [`load_game_config`] reads
//! `assets/game.toml` and overwrites the defaults with any values present in
//! the file.  Missing keys fall back to the compile-time defaults, so a minimal
//! TOML can override just the values you care about.
//!
//! ## Tuning workflow
//!
//! 1. Edit `assets/game.toml`.
//! 2. Restart the game; no recompilation required.
//!
//! Keep `src/constants.rs` in sync: it remains the **authoritative default**
//! source used by `GameConfig::default()`.

use crate::constants::*;
use crate::error::{
    validate_non_negative, validate_positive, validate_respawn_tolerance, GameError, GameResult,
};
use bevy::prelude::*;
use bevy_rapier2d::prelude::RapierConfiguration;
use serde::Deserialize;

/// Default location of the optional config file.
pub const CONFIG_PATH: &str = "assets/game.toml";

/// Runtime-tunable physics and gameplay configuration.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── World ─────────────────────────────────────────────────────────────────
    pub gravity: f32,

    // ── Sling ─────────────────────────────────────────────────────────────────
    pub sling_stiffness: f32,
    pub sling_damping: f32,
    pub respawn_tolerance: f32,
    pub projectile_restitution: f32,
    pub max_tries: u32,

    // ── Pointer ───────────────────────────────────────────────────────────────
    pub drag_gain: f32,
    pub grab_slack: f32,

    // ── Moving platform ───────────────────────────────────────────────────────
    pub platform_min_x: f32,
    pub platform_max_x: f32,
    pub platform_speed: f32,

    // ── Targets ───────────────────────────────────────────────────────────────
    pub target_radius: f32,
    pub target_friction: f32,
    pub freeze_target_rotation: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            sling_stiffness: SLING_STIFFNESS,
            sling_damping: SLING_DAMPING,
            respawn_tolerance: RESPAWN_TOLERANCE,
            projectile_restitution: PROJECTILE_RESTITUTION,
            max_tries: MAX_TRIES,
            drag_gain: DRAG_GAIN,
            grab_slack: GRAB_SLACK,
            platform_min_x: PLATFORM_MIN_X,
            platform_max_x: PLATFORM_MAX_X,
            platform_speed: PLATFORM_SPEED,
            target_radius: TARGET_RADIUS,
            target_friction: TARGET_FRICTION,
            freeze_target_rotation: FREEZE_TARGET_ROTATION,
        }
    }
}

impl GameConfig {
    /// Reject values that would make a level unplayable.
    ///
    /// Motion bounds are checked per level in [`crate::level::LevelSpec::validate`].
    pub fn validate(&self) -> GameResult<()> {
        validate_positive("GRAVITY", self.gravity)?;
        validate_positive("SLING_STIFFNESS", self.sling_stiffness)?;
        validate_respawn_tolerance(self.respawn_tolerance)?;
        validate_positive("DRAG_GAIN", self.drag_gain)?;
        validate_positive("PLATFORM_SPEED", self.platform_speed)?;
        validate_positive("TARGET_RADIUS", self.target_radius)?;
        validate_positive("MAX_TRIES", self.max_tries as f32)?;
        validate_non_negative("SLING_DAMPING", self.sling_damping)?;
        validate_non_negative("PROJECTILE_RESTITUTION", self.projectile_restitution)?;
        validate_non_negative("GRAB_SLACK", self.grab_slack)?;
        validate_non_negative("TARGET_FRICTION", self.target_friction)?;
        Ok(())
    }

    /// Parse a TOML document and validate it.
    pub fn from_toml_str(contents: &str) -> GameResult<Self> {
        let loaded = toml::from_str::<GameConfig>(contents).map_err(|e| GameError::ConfigParse {
            reason: e.to_string(),
        })?;
        loaded.validate()?;
        Ok(loaded)
    }
}

/// Startup system: attempt to load `assets/game.toml` and overwrite the
/// `GameConfig` resource with any values present in the file.
///
/// Missing keys retain their compiled defaults.  Parse and validation errors
/// are logged but do not abort the game.  A missing file is not an error.
pub fn load_game_config(mut config: ResMut<GameConfig>) {
    match std::fs::read_to_string(CONFIG_PATH) {
        Ok(contents) => match GameConfig::from_toml_str(&contents) {
            Ok(loaded) => {
                *config = loaded;
                info!("Loaded game config from {CONFIG_PATH}");
            }
            Err(e) => {
                warn!("Failed to load {CONFIG_PATH}: {e}; using defaults");
            }
        },
        Err(_) => {
            info!("No {CONFIG_PATH} found; using compiled defaults");
        }
    }
}

/// Configure Rapier gravity from the loaded config.
pub fn apply_gravity(config: Res<GameConfig>, mut rapier: Query<&mut RapierConfiguration>) {
    for mut cfg in rapier.iter_mut() {
        cfg.gravity = Vec2::new(0.0, -config.gravity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let cfg = GameConfig::from_toml_str("max_tries = 3\nplatform_speed = 4.0\n")
            .expect("partial config should parse");
        assert_eq!(cfg.max_tries, 3);
        assert_eq!(cfg.platform_speed, 4.0);
        assert_eq!(cfg.respawn_tolerance, RESPAWN_TOLERANCE);
        assert_eq!(cfg.gravity, GRAVITY);
    }

    #[test]
    fn shipped_file_matches_compiled_defaults() {
        let shipped = GameConfig::from_toml_str(include_str!("../assets/game.toml"))
            .expect("assets/game.toml should parse");
        assert_eq!(shipped, GameConfig::default());
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(GameConfig::from_toml_str("max_tries = 0").is_err());
        assert!(GameConfig::from_toml_str("respawn_tolerance = -1.0").is_err());
        assert!(GameConfig::from_toml_str("gravity = \"down\"").is_err());
    }

    #[test]
    fn nan_and_negative_tunables_are_rejected() {
        let nan_tolerance = GameConfig::from_toml_str("respawn_tolerance = nan");
        assert!(matches!(
            nan_tolerance,
            Err(GameError::UnsafeConstant {
                name: "RESPAWN_TOLERANCE",
                ..
            })
        ));
        for doc in [
            "target_friction = -0.5",
            "projectile_restitution = nan",
            "sling_damping = -1.0",
            "grab_slack = inf",
        ] {
            assert!(
                matches!(GameConfig::from_toml_str(doc), Err(GameError::UnsafeConstant { .. })),
                "{doc} should be rejected"
            );
        }
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        assert!(matches!(
            GameConfig::from_toml_str("gravity = \"down\""),
            Err(GameError::ConfigParse { .. })
        ));
    }
}
