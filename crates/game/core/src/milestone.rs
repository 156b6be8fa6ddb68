//! Threshold achievements that latch once earned.

use std::borrow::Cow;

use crate::formula::Predicate;
use crate::state::MilestoneId;
use crate::view::GameView;

#[derive(Clone, Debug)]
pub struct MilestoneDef {
    pub id: MilestoneId,
    /// Human-readable threshold, e.g. "10 toys".
    pub requirement: Cow<'static, str>,
    pub effect: Cow<'static, str>,
    pub should_earn: Predicate,
}

impl MilestoneDef {
    pub fn new(
        id: MilestoneId,
        requirement: impl Into<Cow<'static, str>>,
        effect: impl Into<Cow<'static, str>>,
        should_earn: impl Fn(&GameView<'_>) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            id,
            requirement: requirement.into(),
            effect: effect.into(),
            should_earn: Predicate::new(should_earn),
        }
    }

    pub fn is_earned(&self, view: &GameView<'_>) -> bool {
        view.milestone_earned(self.id)
    }

    /// True when the milestone is unearned and its condition now holds.
    pub fn is_due(&self, view: &GameView<'_>) -> bool {
        !self.is_earned(view) && self.should_earn.eval(view)
    }
}
