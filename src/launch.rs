//! Launch state machine, attempt budget, and the sling joint.
//!
//! ## States
//!
//! | State                   | Meaning                                             |
//! |-------------------------|-----------------------------------------------------|
//! | `Idle { projectile }`   | Projectile resting on the sling, ready to be pulled |
//! | `Firing { projectile }` | Released; still tethered until it passes the origin |
//! | `Spent`                 | Attempts exhausted; no projectile in play           |
//!
//! ## Transitions
//!
//! - **release** (drag released on the attached projectile, attempts left):
//!   `Idle | Firing → Firing`, consuming one attempt from a limited budget.
//! - **settle** (each step, `Firing` and back within tolerance of the origin):
//!   attempts left → spawn a fresh projectile, re-attach the sling, `Idle`;
//!   otherwise → detach the sling, freeze the spent projectile, `Spent`.
//!
//! The sling is a zero-rest-length Rapier spring joint from a fixed anchor body
//! to the attached projectile, so it integrates on the physics step's clock.
//! It stays attached while firing: its pull drags the projectile back through
//! the origin, which is what triggers the hand-off to a new one.  The old
//! projectile then keeps flying on its own momentum.

use crate::config::GameConfig;
use crate::constants::SLING_JOINT_DAMPING;
use crate::pointer::Grabbable;
use crate::world::{spawn_projectile, LevelVisuals};
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use bevy_rapier2d::rapier::prelude::MotorModel;

// ── Attempt budget ────────────────────────────────────────────────────────────

/// How many launches the player has.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attempts {
    Unlimited,
    Limited { max: u32, remaining: u32 },
}

impl Attempts {
    /// A full limited budget.
    pub fn limited(max: u32) -> Self {
        Attempts::Limited {
            max,
            remaining: max,
        }
    }

    /// Whether another release would count.
    pub fn has_remaining(&self) -> bool {
        match self {
            Attempts::Unlimited => true,
            Attempts::Limited { remaining, .. } => *remaining > 0,
        }
    }

    /// `true` only for a limited budget that has reached zero.
    pub fn is_exhausted(&self) -> bool {
        !self.has_remaining()
    }

    /// Use one attempt.  Floors at zero; unlimited budgets are unaffected.
    fn consume(&mut self) {
        if let Attempts::Limited { remaining, .. } = self {
            *remaining = remaining.saturating_sub(1);
        }
    }

    /// `(remaining, max)` for a limited budget.
    pub fn counts(&self) -> Option<(u32, u32)> {
        match self {
            Attempts::Unlimited => None,
            Attempts::Limited { max, remaining } => Some((*remaining, *max)),
        }
    }
}

// ── State machine ─────────────────────────────────────────────────────────────

/// Lifecycle of the projectile on the sling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchState {
    Idle { projectile: Entity },
    Firing { projectile: Entity },
    Spent,
}

/// What a settle step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settled {
    /// A new projectile took the sling; the previous one flies free.
    Respawned { previous: Entity, next: Entity },
    /// No attempts left; the last projectile must be frozen.
    Exhausted { spent: Entity },
}

/// Launch state plus attempt budget for the current level.
#[derive(Resource, Debug, Clone)]
pub struct Launcher {
    state: LaunchState,
    attempts: Attempts,
}

impl Launcher {
    pub fn new(projectile: Entity, attempts: Attempts) -> Self {
        Self {
            state: LaunchState::Idle { projectile },
            attempts,
        }
    }

    pub fn state(&self) -> LaunchState {
        self.state
    }

    pub fn attempts(&self) -> Attempts {
        self.attempts
    }

    /// Projectile currently on the sling, if any.
    pub fn active_projectile(&self) -> Option<Entity> {
        match self.state {
            LaunchState::Idle { projectile } | LaunchState::Firing { projectile } => {
                Some(projectile)
            }
            LaunchState::Spent => None,
        }
    }

    pub fn is_firing(&self) -> bool {
        matches!(self.state, LaunchState::Firing { .. })
    }

    /// Budget used up and nothing left on the sling.
    pub fn out_of_attempts(&self) -> bool {
        self.attempts.is_exhausted() && self.active_projectile().is_none()
    }

    /// A drag on `body` was released.  Returns `true` when it counted as a launch.
    pub fn release(&mut self, body: Entity) -> bool {
        if self.active_projectile() != Some(body) || !self.attempts.has_remaining() {
            return false;
        }
        self.attempts.consume();
        self.state = LaunchState::Firing { projectile: body };
        true
    }

    /// Advance a firing projectile that has come back to the origin.
    ///
    /// `spawn` is only called when a replacement projectile is needed.
    pub fn settle(&mut self, near_origin: bool, spawn: impl FnOnce() -> Entity) -> Option<Settled> {
        let LaunchState::Firing { projectile } = self.state else {
            return None;
        };
        if !near_origin {
            return None;
        }
        if self.attempts.has_remaining() {
            let next = spawn();
            self.state = LaunchState::Idle { projectile: next };
            Some(Settled::Respawned {
                previous: projectile,
                next,
            })
        } else {
            self.state = LaunchState::Spent;
            Some(Settled::Exhausted { spent: projectile })
        }
    }
}

/// `true` when `pos` lies strictly within `tolerance` of `origin` on both axes.
#[inline]
pub fn near_origin(pos: Vec2, origin: Vec2, tolerance: f32) -> bool {
    (pos.x - origin.x).abs() < tolerance && (pos.y - origin.y).abs() < tolerance
}

// ── Sling ─────────────────────────────────────────────────────────────────────

/// Elastic tether from the fixed anchor to the attached projectile.
#[derive(Resource, Debug, Clone)]
pub struct Sling {
    /// Anchor in world space.
    pub anchor: Vec2,
    /// Fixed, collider-less body the joint hangs from.
    pub anchor_body: Entity,
    /// Radius used when spawning replacement projectiles.
    pub projectile_radius: f32,
    pub attached: Option<Entity>,
}

/// Drag-release notification from the pointer.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlingReleased {
    pub body: Entity,
}

// ── Systems ───────────────────────────────────────────────────────────────────

/// Turn drag releases into launches.
pub fn sling_release_system(
    mut releases: MessageReader<SlingReleased>,
    mut launcher: ResMut<Launcher>,
) {
    for SlingReleased { body } in releases.read() {
        if launcher.release(*body) {
            match launcher.attempts().counts() {
                Some((remaining, max)) => info!("Launch! {remaining}/{max} tries left"),
                None => info!("Launch!"),
            }
        }
    }
}

/// Zero-rest-length spring joint from `anchor_body`, stiffness in
/// acceleration units so both projectile sizes launch alike.
pub fn sling_joint(anchor_body: Entity, config: &GameConfig) -> ImpulseJoint {
    let spring = SpringJointBuilder::new(0.0, config.sling_stiffness, SLING_JOINT_DAMPING)
        .spring_model(MotorModel::AccelerationBased);
    ImpulseJoint::new(anchor_body, spring.build())
}

/// After the physics step: hand the sling to a new projectile, or retire the last one.
pub fn launch_settle_system(
    mut commands: Commands,
    mut launcher: ResMut<Launcher>,
    mut sling: ResMut<Sling>,
    visuals: Res<LevelVisuals>,
    config: Res<GameConfig>,
    transforms: Query<&Transform>,
) {
    let Some(projectile) = launcher.active_projectile() else {
        return;
    };
    if !launcher.is_firing() {
        return;
    }
    let Ok(transform) = transforms.get(projectile) else {
        return;
    };
    let returned = near_origin(
        transform.translation.truncate(),
        sling.anchor,
        config.respawn_tolerance,
    );

    let anchor = sling.anchor;
    let radius = sling.projectile_radius;
    let settled = launcher.settle(returned, || {
        spawn_projectile(&mut commands, &visuals, anchor, radius, &config)
    });

    match settled {
        Some(Settled::Respawned { previous, next }) => {
            commands.entity(previous).remove::<ImpulseJoint>();
            commands
                .entity(next)
                .insert(sling_joint(sling.anchor_body, &config));
            sling.attached = Some(next);
            debug!("Projectile {previous:?} released from sling; {next:?} armed");
        }
        Some(Settled::Exhausted { spent }) => {
            sling.attached = None;
            commands
                .entity(spent)
                .insert((
                    RigidBody::Fixed,
                    Velocity::zero(),
                    CollisionGroups::new(Group::GROUP_1, Group::NONE),
                ))
                .remove::<(Grabbable, ImpulseJoint)>();
            info!("Out of tries: sling detached");
        }
        None => {}
    }
}

/// Draw the sling band from the anchor to the attached projectile.
pub fn draw_sling_system(sling: Res<Sling>, transforms: Query<&Transform>, mut gizmos: Gizmos) {
    let Some(attached) = sling.attached else {
        return;
    };
    let Ok(transform) = transforms.get(attached) else {
        return;
    };
    gizmos.line_2d(
        sling.anchor,
        transform.translation.truncate(),
        Color::srgb(0.75, 0.58, 0.32),
    );
}
