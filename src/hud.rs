//! In-level heads-up display: level name, targets still on their platforms,
//! resting stars, and tries left.

use crate::launch::{Attempts, Launcher};
use crate::level::{CurrentLevel, LevelId};
use crate::tracker::SensorTracker;
use crate::world::LevelEntity;
use bevy::prelude::*;

/// Root node of the HUD; despawned with the rest of the level.
#[derive(Component)]
pub struct HudDisplay;

/// Spawn the HUD text node in the top-left corner.
pub fn setup_hud(mut commands: Commands) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(10.0),
                top: Val::Px(10.0),
                ..default()
            },
            HudDisplay,
            LevelEntity,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::srgb(0.95, 0.88, 0.45)),
            ));
        });
}

/// Format the HUD line.
pub fn hud_line(level: LevelId, targets: usize, resting: usize, attempts: Attempts) -> String {
    let tries = match attempts.counts() {
        Some((remaining, max)) => format!("{remaining}/{max}"),
        None => "∞".to_string(),
    };
    format!(
        "Level: {}   Aliens on saucers: {}   Stars resting: {}   Tries: {}",
        level.name(),
        targets,
        resting,
        tries
    )
}

pub fn hud_display_system(
    current: Res<CurrentLevel>,
    tracker: Option<Res<SensorTracker>>,
    launcher: Option<Res<Launcher>>,
    parent_query: Query<&Children, With<HudDisplay>>,
    mut text_query: Query<&mut Text>,
) {
    let (Some(tracker), Some(launcher)) = (tracker, launcher) else {
        return;
    };
    if !tracker.is_changed() && !launcher.is_changed() && !current.is_changed() {
        return;
    }
    let line = hud_line(
        current.0,
        tracker.tracked_targets(),
        tracker.tracked_projectiles(),
        launcher.attempts(),
    );
    for children in parent_query.iter() {
        for child in children.iter() {
            if let Ok(mut text) = text_query.get_mut(child) {
                *text = Text::new(line.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limited_tries_show_remaining_over_max() {
        let line = hud_line(LevelId::Hard, 36, 2, Attempts::limited(10));
        assert!(line.contains("hard"));
        assert!(line.contains("Aliens on saucers: 36"));
        assert!(line.contains("Stars resting: 2"));
        assert!(line.ends_with("Tries: 10/10"));
    }

    #[test]
    fn unlimited_tries_show_infinity() {
        let line = hud_line(LevelId::Easy, 16, 0, Attempts::Unlimited);
        assert!(line.ends_with("Tries: ∞"));
    }
}
