//! Win / loss evaluation.
//!
//! Runs every step after the sensor tracker and the launch settle step.  Each
//! flag flips `false → true` at most once per session; the transition freezes
//! physics and switches to the matching overlay state.

use crate::launch::Launcher;
use crate::menu::GameState;
use crate::tracker::SensorTracker;
use bevy::prelude::*;
use bevy_rapier2d::prelude::RapierConfiguration;

/// Terminal result of a level.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelOutcome {
    Won,
    Lost,
}

/// One-shot outcome flags for the current session.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Outcome {
    has_won: bool,
    has_lost: bool,
}

impl Outcome {
    pub fn has_won(&self) -> bool {
        self.has_won
    }

    pub fn has_lost(&self) -> bool {
        self.has_lost
    }

    /// Check both conditions; returns the outcome that fired this step, if any.
    ///
    /// Win takes precedence when both hold in the same step, and loss can
    /// never follow a win.
    pub fn evaluate(&mut self, targets_cleared: bool, out_of_attempts: bool) -> Option<LevelOutcome> {
        if !self.has_won && targets_cleared {
            self.has_won = true;
            return Some(LevelOutcome::Won);
        }
        if !self.has_won && !self.has_lost && out_of_attempts {
            self.has_lost = true;
            return Some(LevelOutcome::Lost);
        }
        None
    }
}

/// Evaluate win / loss and trigger the terminal transition.
///
/// Nothing is evaluated until the tracker has been seeded; before that the
/// empty overlap sets would read as an instant win.
pub fn outcome_system(
    tracker: Res<SensorTracker>,
    launcher: Res<Launcher>,
    mut outcome: ResMut<Outcome>,
    mut outcomes: MessageWriter<LevelOutcome>,
    mut next_state: ResMut<NextState<GameState>>,
    mut rapier_config: Query<&mut RapierConfiguration>,
) {
    if !tracker.is_seeded() {
        return;
    }
    let Some(result) = outcome.evaluate(tracker.targets_cleared(), launcher.out_of_attempts()) else {
        return;
    };

    for mut cfg in rapier_config.iter_mut() {
        cfg.physics_pipeline_active = false;
    }
    outcomes.write(result);
    match result {
        LevelOutcome::Won => {
            info!("All targets cleared: level won");
            next_state.set(GameState::Won);
        }
        LevelOutcome::Lost => {
            info!("Out of tries with targets remaining: level lost");
            next_state.set(GameState::Lost);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn win_fires_exactly_once() {
        let mut outcome = Outcome::default();
        assert_eq!(outcome.evaluate(false, false), None);
        assert_eq!(outcome.evaluate(true, false), Some(LevelOutcome::Won));
        assert_eq!(outcome.evaluate(true, false), None);
        assert_eq!(outcome.evaluate(true, true), None);
        assert!(outcome.has_won());
        assert!(!outcome.has_lost());
    }

    #[test]
    fn loss_fires_exactly_once() {
        let mut outcome = Outcome::default();
        assert_eq!(outcome.evaluate(false, true), Some(LevelOutcome::Lost));
        assert_eq!(outcome.evaluate(false, true), None);
        assert!(outcome.has_lost());
    }

    #[test]
    fn win_beats_loss_in_the_same_step() {
        let mut outcome = Outcome::default();
        assert_eq!(outcome.evaluate(true, true), Some(LevelOutcome::Won));
        assert!(!outcome.has_lost(), "loss never follows a win");
    }
}
