//! One-way state machines persisted in [`GameState`](super::GameState).
//!
//! Both types only expose forward transitions. There is no write path that
//! moves a milestone back to unearned or a tracker back to an earlier phase.

/// Write-once milestone flag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum MilestoneState {
    #[default]
    Unearned,
    Earned,
}

impl MilestoneState {
    pub const fn is_earned(self) -> bool {
        matches!(self, Self::Earned)
    }

    /// Latches the milestone. Returns `true` only on the transition.
    pub fn earn(&mut self) -> bool {
        let was_unearned = !self.is_earned();
        *self = Self::Earned;
        was_unearned
    }
}

/// Per-layer daily progress phase.
///
/// ```text
/// Locked ──(day reached)──▶ InProgress ──(total ≥ goal)──▶ Completed
/// ```
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum TrackerPhase {
    #[default]
    Locked,
    InProgress,
    Completed,
}

impl TrackerPhase {
    pub const fn is_completed(self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Applies every transition allowed by the inputs, in order.
    ///
    /// Both transitions may fire in the same call when the day is reached
    /// and the goal is already met.
    pub fn advance(self, day_reached: bool, goal_reached: bool) -> Self {
        let mut phase = self;
        if phase == Self::Locked && day_reached {
            phase = Self::InProgress;
        }
        if phase == Self::InProgress && goal_reached {
            phase = Self::Completed;
        }
        phase
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn milestone_earn_reports_transition_once() {
        let mut state = MilestoneState::default();
        assert!(state.earn());
        assert!(!state.earn());
        assert!(state.is_earned());
    }

    #[test]
    fn tracker_waits_for_day_before_goal() {
        let phase = TrackerPhase::Locked.advance(false, true);
        assert_eq!(phase, TrackerPhase::Locked);

        let phase = phase.advance(true, false);
        assert_eq!(phase, TrackerPhase::InProgress);

        let phase = phase.advance(true, true);
        assert_eq!(phase, TrackerPhase::Completed);
    }

    #[test]
    fn tracker_can_unlock_and_complete_in_one_step() {
        assert_eq!(
            TrackerPhase::Locked.advance(true, true),
            TrackerPhase::Completed
        );
    }

    #[test]
    fn completed_tracker_never_regresses() {
        let phase = TrackerPhase::Completed;
        assert_eq!(phase.advance(false, false), TrackerPhase::Completed);
    }
}
