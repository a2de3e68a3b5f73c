//! World builder: turns a [`LevelSpec`] into labelled Rapier bodies.
//!
//! | Body       | Rigid body                    | Collider            | Label        |
//! |------------|-------------------------------|---------------------|--------------|
//! | Platform   | Fixed (kinematic if moving)   | trapezoid hull      | `Platform`   |
//! | Sensor     | Fixed (kinematic if moving)   | cuboid, `Sensor`    | `Sensor`     |
//! | Target     | Dynamic                       | octagon hull        | `Target`     |
//! | Projectile | Dynamic                       | ball                | `Projectile` |
//! | Anchor     | Fixed                         | none                | none         |
//!
//! Every spawned entity carries [`LevelEntity`] so the whole level can be torn
//! down in one query when the player restarts or leaves.

use crate::config::GameConfig;
use crate::constants::*;
use crate::error::{GameError, GameResult};
use crate::launch::{sling_joint, Attempts, Launcher, Sling};
use crate::level::{
    layout_to_world, polygon_pitch, regular_polygon_vertices, sensor_center, stack_cell_centers,
    trapezoid_vertices, CurrentLevel, LevelSpec,
};
use crate::menu::GameState;
use crate::motion::{HorizontalMotion, MotionAttachments};
use crate::outcome::Outcome;
use crate::pointer::{DragState, Grabbable};
use crate::tracker::SensorTracker;
use bevy::prelude::*;
use bevy_asset::RenderAssetUsages;
use bevy_mesh::{Indices, PrimitiveTopology};
use bevy_rapier2d::prelude::*;

// ── Components ────────────────────────────────────────────────────────────────

/// Semantic label carried by every physical body in a level.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyLabel {
    Platform,
    Projectile,
    Target,
    Sensor,
}

/// Tags everything spawned for the current level.
#[derive(Component)]
pub struct LevelEntity;

/// Marks the sling anchor point.
#[derive(Component)]
pub struct SlingAnchor;

/// A rigid group of targets that moves as a unit with its platform.
#[derive(Component, Debug, Clone)]
pub struct TargetCluster {
    pub label: &'static str,
    pub members: Vec<Entity>,
}

/// Shared visuals for the current level.
#[derive(Resource, Clone)]
pub struct LevelVisuals {
    pub projectile_mesh: Handle<Mesh>,
    pub projectile_material: Handle<ColorMaterial>,
}

fn platform_color() -> Color {
    Color::srgb(0.55, 0.60, 0.68)
}
fn target_color() -> Color {
    Color::srgb(0.35, 0.85, 0.35)
}
fn projectile_color() -> Color {
    Color::srgb(1.0, 0.84, 0.25)
}

// ── Level lifecycle ───────────────────────────────────────────────────────────

/// Despawn every entity belonging to the current level.
pub fn despawn_level(mut commands: Commands, query: Query<Entity, With<LevelEntity>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}

/// `OnEnter(Playing)`: build the selected level and reset per-session state.
///
/// A level that fails validation spawns nothing and sends the player back to
/// the menu.
pub fn spawn_level(
    mut commands: Commands,
    level: Res<CurrentLevel>,
    config: Res<GameConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let spec = level.0.spec(&config);
    if let Err(e) = build_level(&mut commands, &spec, &config, &mut meshes, &mut materials) {
        error!("Failed to build level '{}': {e}", spec.id.name());
        next_state.set(GameState::MainMenu);
    }
}

/// Spawn all bodies of `spec` and insert the session resources.
pub fn build_level(
    commands: &mut Commands,
    spec: &LevelSpec,
    config: &GameConfig,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<ColorMaterial>,
) -> GameResult<()> {
    spec.validate()?;

    // Build every collider up front so a bad shape spawns nothing.
    let target_points = regular_polygon_vertices(spec.target_radius, TARGET_SIDES);
    let target_collider = convex_collider("target", &target_points)?;
    let platform_shapes = spec
        .platforms
        .iter()
        .map(|p| {
            let points = trapezoid_vertices(p.width, PLATFORM_HEIGHT, PLATFORM_SLOPE);
            platform_collider(p.width).map(|c| (points, c))
        })
        .collect::<GameResult<Vec<_>>>()?;

    let platform_material = materials.add(ColorMaterial::from_color(platform_color()));
    let target_material = materials.add(ColorMaterial::from_color(target_color()));
    let target_mesh = meshes.add(convex_fan_mesh(&target_points));

    // ── Platforms + sensors ───────────────────────────────────────────────────
    let mut platforms = Vec::with_capacity(spec.platforms.len());
    let mut sensors = Vec::with_capacity(spec.platforms.len());
    for (platform, (points, collider)) in spec.platforms.iter().zip(platform_shapes) {
        let body = if platform.motion.is_some() {
            RigidBody::KinematicPositionBased
        } else {
            RigidBody::Fixed
        };
        let platform_entity = commands
            .spawn((
                LevelEntity,
                BodyLabel::Platform,
                body,
                collider,
                Friction::coefficient(0.8),
                Mesh2d(meshes.add(convex_fan_mesh(&points))),
                MeshMaterial2d(platform_material.clone()),
                Transform::from_translation(layout_to_world(platform.center).extend(0.0)),
            ))
            .id();

        let sensor_entity = commands
            .spawn((
                LevelEntity,
                BodyLabel::Sensor,
                body,
                Collider::cuboid(platform.width * 0.5, SENSOR_HEIGHT * 0.5),
                Sensor,
                ActiveEvents::COLLISION_EVENTS,
                Transform::from_translation(layout_to_world(sensor_center(platform)).extend(0.0)),
            ))
            .id();

        platforms.push(platform_entity);
        sensors.push(sensor_entity);
    }

    // ── Target clusters ───────────────────────────────────────────────────────
    let pitch = polygon_pitch(spec.target_radius, TARGET_SIDES);
    let mut clusters = Vec::with_capacity(spec.stacks.len());
    for stack in &spec.stacks {
        let members: Vec<Entity> = stack_cell_centers(stack, pitch)
            .into_iter()
            .map(|cell| {
                let mut target = commands.spawn((
                    LevelEntity,
                    BodyLabel::Target,
                    RigidBody::Dynamic,
                    target_collider.clone(),
                    Friction::coefficient(config.target_friction),
                    Restitution::coefficient(0.05),
                    Velocity::zero(),
                    Mesh2d(target_mesh.clone()),
                    MeshMaterial2d(target_material.clone()),
                    Transform::from_translation(layout_to_world(cell).extend(0.1)),
                ));
                if config.freeze_target_rotation {
                    target.insert(LockedAxes::ROTATION_LOCKED);
                }
                target.id()
            })
            .collect();
        let cluster = commands
            .spawn((
                LevelEntity,
                TargetCluster {
                    label: stack.label,
                    members,
                },
            ))
            .id();
        clusters.push((stack.platform, cluster));
    }

    // ── Motorized platforms ───────────────────────────────────────────────────
    for (index, platform) in spec.platforms.iter().enumerate() {
        let Some(motion) = platform.motion else {
            continue;
        };
        // Checked by `LevelSpec::validate`.
        let Some(&(_, cluster)) = clusters.iter().find(|(p, _)| *p == index) else {
            continue;
        };
        commands.entity(platforms[index]).insert((
            HorizontalMotion::new(motion.min_x, motion.max_x, motion.speed),
            MotionAttachments {
                sensor: sensors[index],
                cluster,
            },
        ));
    }

    // ── Sling + first projectile ──────────────────────────────────────────────
    let anchor = layout_to_world(spec.sling_origin);
    let anchor_body = commands
        .spawn((
            LevelEntity,
            SlingAnchor,
            RigidBody::Fixed,
            Transform::from_translation(anchor.extend(0.0)),
        ))
        .id();

    let visuals = LevelVisuals {
        projectile_mesh: meshes.add(Circle::new(spec.projectile_radius)),
        projectile_material: materials.add(ColorMaterial::from_color(projectile_color())),
    };
    let projectile = spawn_projectile(commands, &visuals, anchor, spec.projectile_radius, config);
    commands
        .entity(projectile)
        .insert(sling_joint(anchor_body, config));

    let attempts = match spec.max_tries {
        Some(max) => Attempts::limited(max),
        None => Attempts::Unlimited,
    };
    commands.insert_resource(visuals);
    commands.insert_resource(Sling {
        anchor,
        anchor_body,
        projectile_radius: spec.projectile_radius,
        attached: Some(projectile),
    });
    commands.insert_resource(Launcher::new(projectile, attempts));
    commands.insert_resource(SensorTracker::new(sensors));
    commands.insert_resource(Outcome::default());
    commands.insert_resource(DragState::default());

    info!(
        "Level '{}' spawned: {} platforms, {} targets, tries: {}",
        spec.id.name(),
        spec.platforms.len(),
        spec.target_count(),
        spec.max_tries.map_or_else(|| "unlimited".to_string(), |m| m.to_string()),
    );
    Ok(())
}

/// Spawn a projectile resting at `pos` (world space).
pub fn spawn_projectile(
    commands: &mut Commands,
    visuals: &LevelVisuals,
    pos: Vec2,
    radius: f32,
    config: &GameConfig,
) -> Entity {
    commands
        .spawn((
            LevelEntity,
            BodyLabel::Projectile,
            Grabbable { radius },
            RigidBody::Dynamic,
            Collider::ball(radius),
            Restitution::coefficient(config.projectile_restitution),
            Damping {
                linear_damping: config.sling_damping,
                angular_damping: 0.5,
            },
            Velocity::zero(),
            Ccd::enabled(),
            Mesh2d(visuals.projectile_mesh.clone()),
            MeshMaterial2d(visuals.projectile_material.clone()),
            Transform::from_translation(pos.extend(0.2)),
        ))
        .id()
}

// ── Shape helpers ─────────────────────────────────────────────────────────────

/// Build a convex hull collider, reporting degenerate input as an error.
pub fn convex_collider(label: &'static str, points: &[Vec2]) -> GameResult<Collider> {
    Collider::convex_hull(points).ok_or(GameError::DegenerateShape {
        label,
        vertex_count: points.len(),
    })
}

/// Rounded trapezoid collider whose outer extent matches the drawn platform.
///
/// The hull is inset by [`PLATFORM_CHAMFER`] on every side, then inflated back
/// by the same border radius.
pub fn platform_collider(width: f32) -> GameResult<Collider> {
    let inset = trapezoid_vertices(
        width - 2.0 * PLATFORM_CHAMFER,
        PLATFORM_HEIGHT - 2.0 * PLATFORM_CHAMFER,
        PLATFORM_SLOPE,
    );
    Collider::round_convex_hull(&inset, PLATFORM_CHAMFER).ok_or(GameError::DegenerateShape {
        label: "platform",
        vertex_count: inset.len(),
    })
}

/// Build a filled triangle-fan mesh from convex, counter-clockwise vertices.
pub fn convex_fan_mesh(points: &[Vec2]) -> Mesh {
    let positions: Vec<[f32; 3]> = points.iter().map(|p| [p.x, p.y, 0.0]).collect();
    let mut indices = Vec::with_capacity(points.len().saturating_sub(2) * 3);
    for i in 1..points.len().saturating_sub(1) {
        indices.extend_from_slice(&[0, i as u32, i as u32 + 1]);
    }
    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_indices(Indices::U32(indices));
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fan_mesh_triangulates_convex_polygon() {
        let points = trapezoid_vertices(250.0, PLATFORM_HEIGHT, PLATFORM_SLOPE);
        let mesh = convex_fan_mesh(&points);
        match mesh.indices() {
            Some(Indices::U32(idx)) => assert_eq!(idx, &vec![0, 1, 2, 0, 2, 3]),
            other => panic!("expected u32 indices, got {other:?}"),
        }
        assert_eq!(mesh.count_vertices(), 4);
    }

    #[test]
    fn octagon_and_trapezoid_hulls_build() {
        assert!(convex_collider("target", &regular_polygon_vertices(20.0, 8)).is_ok());
        assert!(convex_collider(
            "platform",
            &trapezoid_vertices(130.0, PLATFORM_HEIGHT, PLATFORM_SLOPE)
        )
        .is_ok());
    }

    #[test]
    fn platform_collider_is_rounded_to_the_drawn_extent() {
        for width in [130.0, 230.0, 250.0] {
            let collider = platform_collider(width).expect("platform hull builds");
            let border = collider.raw.as_round_convex_polygon().map(|r| r.border_radius);
            assert_eq!(border, Some(PLATFORM_CHAMFER));

            let aabb = collider.raw.compute_local_aabb();
            let extent = aabb.maxs - aabb.mins;
            assert!((extent.x - width).abs() < 1e-3, "width {width} → {}", extent.x);
            assert!((extent.y - PLATFORM_HEIGHT).abs() < 1e-3);
        }
    }
}
