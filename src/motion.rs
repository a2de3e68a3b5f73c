//! Horizontal platform motion.
//!
//! A motorized platform sweeps back and forth between `min_x` and `max_x`
//! (layout units), carrying its sensor and its whole target cluster with it.
//! Runs in `Update`, i.e. before the physics step.

use crate::level::world_to_layout;
use crate::world::TargetCluster;
use bevy::prelude::*;

/// Bounded back-and-forth path of one platform.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct HorizontalMotion {
    pub min_x: f32,
    pub max_x: f32,
    pub speed: f32,
    /// `+1.0` (right) or `-1.0` (left).
    pub dir: f32,
}

impl HorizontalMotion {
    /// Start moving right.
    pub fn new(min_x: f32, max_x: f32, speed: f32) -> Self {
        Self {
            min_x,
            max_x,
            speed,
            dir: 1.0,
        }
    }

    /// Advance one step from `x`, flipping direction at the bounds.
    ///
    /// Returns the horizontal delta to apply (zero when pinned at a bound).
    pub fn advance(&mut self, x: f32) -> f32 {
        let mut next = x + self.speed * self.dir;
        if next < self.min_x {
            next = self.min_x;
            self.dir = 1.0;
        }
        if next > self.max_x {
            next = self.max_x;
            self.dir = -1.0;
        }
        next - x
    }
}

/// Bodies that travel rigidly with a motorized platform.
#[derive(Component, Debug, Clone, Copy)]
pub struct MotionAttachments {
    pub sensor: Entity,
    /// Entity carrying a [`TargetCluster`].
    pub cluster: Entity,
}

/// Move every motorized platform one step, dragging its attachments along.
pub fn platform_motion_system(
    mut platforms: Query<(Entity, &mut HorizontalMotion, &MotionAttachments)>,
    clusters: Query<&TargetCluster>,
    mut transforms: Query<&mut Transform>,
) {
    for (platform, mut motion, attachments) in platforms.iter_mut() {
        let Ok(platform_transform) = transforms.get(platform) else {
            continue;
        };
        let x = world_to_layout(platform_transform.translation.truncate()).x;
        let dx = motion.advance(x);
        if dx == 0.0 {
            continue;
        }

        let members = clusters
            .get(attachments.cluster)
            .map(|c| c.members.as_slice())
            .unwrap_or_default();
        let moved = [platform, attachments.sensor]
            .into_iter()
            .chain(members.iter().copied());
        for entity in moved {
            if let Ok(mut transform) = transforms.get_mut(entity) {
                transform.translation.x += dx;
            }
        }
    }
}
