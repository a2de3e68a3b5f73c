//! Sensor overlap tracking.
//!
//! Every platform owns an invisible trigger region.  [`SensorTracker`] keeps,
//! per sensor, the set of targets and the set of projectiles currently
//! overlapping it.
//!
//! ## Flow
//!
//! 1. [`sensor_event_system`] applies Rapier `CollisionEvent::Started` /
//!    `Stopped` pairs to the sets.
//! 2. [`seed_sensor_overlaps_system`] runs once, after the first physics step,
//!    and adds every pre-existing intersection.  Start events only fire on
//!    transitions, so bodies spawned already touching a sensor would otherwise
//!    never be tracked.
//! 3. [`forget_removed_bodies_system`] drops despawned bodies from every set so
//!    a missed `Stopped` event cannot leave a phantom target behind.
//!
//! The outcome evaluator reads the tracker through `Res<SensorTracker>`.

use crate::world::BodyLabel;
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use std::collections::{HashMap, HashSet};

/// Bodies currently overlapping one sensor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SensorOverlap {
    pub targets: HashSet<Entity>,
    pub projectiles: HashSet<Entity>,
}

/// Per-sensor overlap sets for the current level.
#[derive(Resource, Debug, Clone, Default)]
pub struct SensorTracker {
    sensors: HashMap<Entity, SensorOverlap>,
    seeded: bool,
}

impl SensorTracker {
    /// Track the given sensors, all starting empty and unseeded.
    pub fn new(sensors: impl IntoIterator<Item = Entity>) -> Self {
        Self {
            sensors: sensors
                .into_iter()
                .map(|s| (s, SensorOverlap::default()))
                .collect(),
            seeded: false,
        }
    }

    /// Whether `entity` is one of the tracked sensors.
    pub fn is_sensor(&self, entity: Entity) -> bool {
        self.sensors.contains_key(&entity)
    }

    /// Resolve which side of a pair is the sensor.  Pairs where neither or
    /// both bodies are sensors are ignored.
    fn split_pair(&self, a: Entity, b: Entity) -> Option<(Entity, Entity)> {
        match (self.is_sensor(a), self.is_sensor(b)) {
            (true, false) => Some((a, b)),
            (false, true) => Some((b, a)),
            _ => None,
        }
    }

    /// A pair started overlapping.  Returns `true` when a set changed.
    pub fn on_overlap_start(
        &mut self,
        a: Entity,
        b: Entity,
        label_of: impl Fn(Entity) -> Option<BodyLabel>,
    ) -> bool {
        let Some((sensor, other)) = self.split_pair(a, b) else {
            return false;
        };
        let Some(overlap) = self.sensors.get_mut(&sensor) else {
            return false;
        };
        match label_of(other) {
            Some(BodyLabel::Target) => overlap.targets.insert(other),
            Some(BodyLabel::Projectile) => overlap.projectiles.insert(other),
            _ => false,
        }
    }

    /// A pair stopped overlapping.  Returns `true` when a set changed.
    pub fn on_overlap_end(
        &mut self,
        a: Entity,
        b: Entity,
        label_of: impl Fn(Entity) -> Option<BodyLabel>,
    ) -> bool {
        let Some((sensor, other)) = self.split_pair(a, b) else {
            return false;
        };
        let Some(overlap) = self.sensors.get_mut(&sensor) else {
            return false;
        };
        match label_of(other) {
            Some(BodyLabel::Target) => overlap.targets.remove(&other),
            Some(BodyLabel::Projectile) => overlap.projectiles.remove(&other),
            _ => false,
        }
    }

    /// Apply every pre-existing intersection, then mark the tracker seeded.
    ///
    /// Returns how many bodies were newly added.
    pub fn seed(
        &mut self,
        pairs: impl IntoIterator<Item = (Entity, Entity)>,
        label_of: impl Fn(Entity) -> Option<BodyLabel>,
    ) -> usize {
        let added = pairs
            .into_iter()
            .filter(|&(a, b)| self.on_overlap_start(a, b, &label_of))
            .count();
        self.seeded = true;
        added
    }

    pub fn is_seeded(&self) -> bool {
        self.seeded
    }

    /// Remove a (despawned) body from every sensor's sets.
    pub fn forget(&mut self, entity: Entity) -> bool {
        let mut changed = false;
        for overlap in self.sensors.values_mut() {
            changed |= overlap.targets.remove(&entity);
            changed |= overlap.projectiles.remove(&entity);
        }
        changed
    }

    /// `true` when no target overlaps any sensor.
    pub fn targets_cleared(&self) -> bool {
        self.sensors.values().all(|o| o.targets.is_empty())
    }

    /// Number of distinct targets overlapping at least one sensor.
    pub fn tracked_targets(&self) -> usize {
        self.sensors
            .values()
            .flat_map(|o| o.targets.iter())
            .collect::<HashSet<_>>()
            .len()
    }

    /// Number of distinct projectiles overlapping at least one sensor.
    pub fn tracked_projectiles(&self) -> usize {
        self.sensors
            .values()
            .flat_map(|o| o.projectiles.iter())
            .collect::<HashSet<_>>()
            .len()
    }

    /// Number of targets overlapping `sensor` (zero for an unknown sensor).
    pub fn targets_on(&self, sensor: Entity) -> usize {
        self.sensors.get(&sensor).map_or(0, |o| o.targets.len())
    }

    /// Overlap sets of one sensor.
    pub fn overlap(&self, sensor: Entity) -> Option<&SensorOverlap> {
        self.sensors.get(&sensor)
    }

    /// Iterate tracked sensor entities.
    pub fn sensors(&self) -> impl Iterator<Item = Entity> + '_ {
        self.sensors.keys().copied()
    }
}

// ── Systems ───────────────────────────────────────────────────────────────────

/// Run condition: the one-time seeding pass has not happened yet.
pub fn tracker_needs_seed(tracker: Option<Res<SensorTracker>>) -> bool {
    tracker.is_some_and(|t| !t.is_seeded())
}

/// Apply sensor enter / exit events from the physics step.
pub fn sensor_event_system(
    mut collision_events: MessageReader<CollisionEvent>,
    labels: Query<&BodyLabel>,
    mut tracker: ResMut<SensorTracker>,
) {
    let label_of = |e: Entity| labels.get(e).ok().copied();
    for event in collision_events.read() {
        match event {
            CollisionEvent::Started(e1, e2, _) => {
                tracker.on_overlap_start(*e1, *e2, label_of);
            }
            CollisionEvent::Stopped(e1, e2, _) => {
                tracker.on_overlap_end(*e1, *e2, label_of);
            }
        }
    }
}

/// One-time reconciliation against the narrow phase after the first step.
pub fn seed_sensor_overlaps_system(
    rapier_context: ReadRapierContext,
    labels: Query<&BodyLabel>,
    mut tracker: ResMut<SensorTracker>,
) {
    let Ok(rapier) = rapier_context.single() else {
        return;
    };

    let mut pairs = Vec::new();
    for sensor in tracker.sensors() {
        for (e1, e2, intersecting) in rapier.intersection_pairs_with(sensor) {
            if intersecting {
                pairs.push((e1, e2));
            }
        }
    }

    let added = tracker.seed(pairs, |e| labels.get(e).ok().copied());
    info!(
        "Sensor tracker seeded: {} pre-existing overlaps, {} targets on platforms",
        added,
        tracker.tracked_targets()
    );
}

/// Drop despawned bodies from the overlap sets.
pub fn forget_removed_bodies_system(
    mut removed: RemovedComponents<BodyLabel>,
    mut tracker: ResMut<SensorTracker>,
) {
    for entity in removed.read() {
        if tracker.forget(entity) {
            debug!("Forgot despawned body {entity:?} still marked as overlapping");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture {
        world: World,
        labels: HashMap<Entity, BodyLabel>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                world: World::new(),
                labels: HashMap::new(),
            }
        }

        fn body(&mut self, label: BodyLabel) -> Entity {
            let e = self.world.spawn_empty().id();
            self.labels.insert(e, label);
            e
        }

        fn label_of(&self) -> impl Fn(Entity) -> Option<BodyLabel> + '_ {
            |e| self.labels.get(&e).copied()
        }
    }

    #[test]
    fn start_and_end_track_targets_either_pair_order() {
        let mut fx = Fixture::new();
        let sensor = fx.body(BodyLabel::Sensor);
        let target = fx.body(BodyLabel::Target);
        let mut tracker = SensorTracker::new([sensor]);

        assert!(tracker.on_overlap_start(target, sensor, fx.label_of()));
        assert_eq!(tracker.tracked_targets(), 1);
        assert!(!tracker.targets_cleared());

        assert!(tracker.on_overlap_end(sensor, target, fx.label_of()));
        assert!(tracker.targets_cleared());
    }

    #[test]
    fn projectiles_go_to_their_own_set() {
        let mut fx = Fixture::new();
        let sensor = fx.body(BodyLabel::Sensor);
        let star = fx.body(BodyLabel::Projectile);
        let mut tracker = SensorTracker::new([sensor]);

        tracker.on_overlap_start(sensor, star, fx.label_of());
        assert_eq!(tracker.tracked_projectiles(), 1);
        assert_eq!(tracker.tracked_targets(), 0);
        assert!(tracker.targets_cleared(), "projectiles never block the win");
    }

    #[test]
    fn pairs_without_exactly_one_sensor_are_ignored() {
        let mut fx = Fixture::new();
        let s1 = fx.body(BodyLabel::Sensor);
        let s2 = fx.body(BodyLabel::Sensor);
        let platform = fx.body(BodyLabel::Platform);
        let target = fx.body(BodyLabel::Target);
        let mut tracker = SensorTracker::new([s1, s2]);

        assert!(!tracker.on_overlap_start(s1, s2, fx.label_of()));
        assert!(!tracker.on_overlap_start(platform, target, fx.label_of()));
        assert!(!tracker.on_overlap_start(s1, platform, fx.label_of()));
        assert_eq!(tracker.tracked_targets(), 0);
    }

    #[test]
    fn each_sensor_keeps_an_independent_set() {
        let mut fx = Fixture::new();
        let s1 = fx.body(BodyLabel::Sensor);
        let s2 = fx.body(BodyLabel::Sensor);
        let target = fx.body(BodyLabel::Target);
        let mut tracker = SensorTracker::new([s1, s2]);

        tracker.on_overlap_start(s1, target, fx.label_of());
        tracker.on_overlap_start(s2, target, fx.label_of());
        assert_eq!(tracker.tracked_targets(), 1, "union counts the body once");

        tracker.on_overlap_end(s1, target, fx.label_of());
        assert!(!tracker.targets_cleared(), "still on the second sensor");
        assert!(tracker.overlap(s2).unwrap().targets.contains(&target));
        assert_eq!(tracker.targets_on(s1), 0);
        assert_eq!(tracker.targets_on(s2), 1);

        tracker.on_overlap_end(s2, target, fx.label_of());
        assert!(tracker.targets_cleared());
    }

    #[test]
    fn seed_adds_pre_existing_overlaps_once() {
        let mut fx = Fixture::new();
        let sensor = fx.body(BodyLabel::Sensor);
        let a = fx.body(BodyLabel::Target);
        let b = fx.body(BodyLabel::Target);
        let platform = fx.body(BodyLabel::Platform);
        let mut tracker = SensorTracker::new([sensor]);

        // A start event for `a` already arrived during the first step.
        tracker.on_overlap_start(sensor, a, fx.label_of());
        assert!(!tracker.is_seeded());

        let added = tracker.seed(
            [(sensor, a), (b, sensor), (sensor, platform)],
            fx.label_of(),
        );
        assert_eq!(added, 1, "only `b` is new");
        assert!(tracker.is_seeded());
        assert_eq!(tracker.tracked_targets(), 2);
    }

    #[test]
    fn forget_clears_a_body_that_never_sent_an_exit() {
        let mut fx = Fixture::new();
        let s1 = fx.body(BodyLabel::Sensor);
        let s2 = fx.body(BodyLabel::Sensor);
        let target = fx.body(BodyLabel::Target);
        let mut tracker = SensorTracker::new([s1, s2]);
        tracker.on_overlap_start(s1, target, fx.label_of());
        tracker.on_overlap_start(s2, target, fx.label_of());

        assert!(tracker.forget(target));
        assert!(tracker.targets_cleared());
        assert!(!tracker.forget(target), "second forget is a no-op");
    }

    #[test]
    fn sixteen_targets_removed_one_by_one_clear_exactly_at_the_end() {
        let mut fx = Fixture::new();
        let sensor = fx.body(BodyLabel::Sensor);
        let targets: Vec<_> = (0..16).map(|_| fx.body(BodyLabel::Target)).collect();
        let mut tracker = SensorTracker::new([sensor]);
        tracker.seed(targets.iter().map(|&t| (sensor, t)), fx.label_of());
        assert_eq!(tracker.tracked_targets(), 16);

        for (i, &t) in targets.iter().enumerate() {
            assert!(!tracker.targets_cleared(), "cleared too early at {i}");
            tracker.on_overlap_end(t, sensor, fx.label_of());
        }
        assert!(tracker.targets_cleared());
    }
}
