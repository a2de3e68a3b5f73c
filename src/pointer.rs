//! Pointer drag: grab a body with the mouse, pull it, let go.
//!
//! ## Pipeline (runs in order every `Update` frame)
//!
//! 1. [`pointer_grab_system`] picks the nearest [`Grabbable`] under the cursor
//!    on left-button press.
//! 2. [`pointer_drag_system`] steers the held body toward the cursor.
//! 3. [`pointer_release_system`] writes a [`SlingReleased`] notification when
//!    the button comes up.  The launcher decides whether it counts.

use crate::config::GameConfig;
use crate::launch::SlingReleased;
use bevy::prelude::*;
use bevy_rapier2d::prelude::Velocity;

/// A body the pointer may pick up, with its pick radius.
#[derive(Component, Debug, Clone, Copy)]
pub struct Grabbable {
    pub radius: f32,
}

/// Body currently held by the pointer.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct DragState {
    pub held: Option<Entity>,
}

/// Cursor position in world space, if the cursor is over the window.
fn cursor_world(
    windows: &Query<&Window>,
    cameras: &Query<(&Camera, &GlobalTransform)>,
) -> Option<Vec2> {
    let window = windows.single().ok()?;
    let cursor = window.cursor_position()?;
    let (camera, camera_transform) = cameras.single().ok()?;
    camera.viewport_to_world_2d(camera_transform, cursor).ok()
}

/// Nearest candidate whose centre lies within `radius + slack` of `point`.
pub fn pick_body(
    point: Vec2,
    slack: f32,
    candidates: impl IntoIterator<Item = (Entity, Vec2, f32)>,
) -> Option<Entity> {
    candidates
        .into_iter()
        .map(|(e, pos, radius)| (e, pos.distance(point), radius))
        .filter(|&(_, dist, radius)| dist <= radius + slack)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(e, _, _)| e)
}

pub fn pointer_grab_system(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    cameras: Query<(&Camera, &GlobalTransform)>,
    grabbable: Query<(Entity, &Transform, &Grabbable)>,
    config: Res<GameConfig>,
    mut drag: ResMut<DragState>,
) {
    if !buttons.just_pressed(MouseButton::Left) {
        return;
    }
    let Some(cursor) = cursor_world(&windows, &cameras) else {
        return;
    };
    drag.held = pick_body(
        cursor,
        config.grab_slack,
        grabbable
            .iter()
            .map(|(e, t, g)| (e, t.translation.truncate(), g.radius)),
    );
}

pub fn pointer_drag_system(
    windows: Query<&Window>,
    cameras: Query<(&Camera, &GlobalTransform)>,
    config: Res<GameConfig>,
    mut drag: ResMut<DragState>,
    mut bodies: Query<(&Transform, &mut Velocity)>,
) {
    let Some(held) = drag.held else {
        return;
    };
    let Ok((transform, mut velocity)) = bodies.get_mut(held) else {
        // Despawned while held.
        drag.held = None;
        return;
    };
    let Some(cursor) = cursor_world(&windows, &cameras) else {
        return;
    };
    velocity.linvel = (cursor - transform.translation.truncate()) * config.drag_gain;
}

pub fn pointer_release_system(
    buttons: Res<ButtonInput<MouseButton>>,
    mut drag: ResMut<DragState>,
    mut releases: MessageWriter<SlingReleased>,
) {
    if !buttons.just_released(MouseButton::Left) {
        return;
    }
    if let Some(body) = drag.held.take() {
        releases.write(SlingReleased { body });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::message::Messages;

    #[test]
    fn picks_nearest_body_within_reach() {
        let mut world = World::new();
        let near = world.spawn_empty().id();
        let far = world.spawn_empty().id();
        let picked = pick_body(
            Vec2::ZERO,
            0.0,
            [
                (far, Vec2::new(12.0, 0.0), 15.0),
                (near, Vec2::new(0.0, 5.0), 15.0),
            ],
        );
        assert_eq!(picked, Some(near));
    }

    #[test]
    fn slack_extends_reach() {
        let mut world = World::new();
        let star = world.spawn_empty().id();
        let candidates = [(star, Vec2::new(22.0, 0.0), 20.0)];
        assert_eq!(pick_body(Vec2::ZERO, 0.0, candidates), None);
        assert_eq!(pick_body(Vec2::ZERO, 6.0, candidates), Some(star));
    }

    #[test]
    fn release_writes_notification_for_held_body() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_message::<SlingReleased>();
        app.init_resource::<ButtonInput<MouseButton>>();
        let star = app.world_mut().spawn_empty().id();
        app.insert_resource(DragState { held: Some(star) });
        app.add_systems(Update, pointer_release_system);

        {
            let mut buttons = app.world_mut().resource_mut::<ButtonInput<MouseButton>>();
            buttons.press(MouseButton::Left);
            buttons.release(MouseButton::Left);
        }
        app.update();

        let messages = app.world().resource::<Messages<SlingReleased>>();
        let mut cursor = messages.get_cursor();
        let written: Vec<_> = cursor.read(messages).copied().collect();
        assert_eq!(written, vec![SlingReleased { body: star }]);
        assert!(app.world().resource::<DragState>().held.is_none());
    }
}
