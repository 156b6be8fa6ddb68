//! Modifier pipeline used to compute production and gain rates.
//!
//! A pipeline is an ordered list of steps folded over a caller-supplied base:
//!
//! - **Additive**: `acc + amount`
//! - **Multiplicative**: `acc × amount`
//! - **Exponential**: `acc ^ amount`
//!
//! Steps are applied strictly in insertion order. Additive and multiplicative
//! steps are not reorderable across an exponential step, since
//! `(base + a)^e != base^e + a`, so the order is part of the balance contract.
//! [`ModifierPipeline::evaluate`] and [`ModifierPipeline::describe`] share one
//! fold routine and can never disagree.

use std::borrow::Cow;

use crate::formula::{Formula, Predicate};
use crate::num::Decimal;
use crate::view::GameView;

/// Operation applied by a single step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ModifierKind {
    Additive,
    Multiplicative,
    Exponential,
}

impl ModifierKind {
    fn apply(self, acc: Decimal, amount: Decimal) -> Decimal {
        match self {
            Self::Additive => acc + amount,
            Self::Multiplicative => acc * amount,
            Self::Exponential => acc.pow(amount),
        }
    }
}

/// A single step in a [`ModifierPipeline`].
///
/// Steps without an `enabled` predicate are always active. Conditional steps
/// are typically gated on a milestone or upgrade owned by another layer.
#[derive(Clone, Debug)]
pub struct Modifier {
    pub kind: ModifierKind,
    pub description: Cow<'static, str>,
    pub amount: Formula,
    pub enabled: Option<Predicate>,
}

impl Modifier {
    pub fn new(
        kind: ModifierKind,
        description: impl Into<Cow<'static, str>>,
        amount: impl Into<Formula>,
    ) -> Self {
        Self {
            kind,
            description: description.into(),
            amount: amount.into(),
            enabled: None,
        }
    }

    pub fn additive(description: impl Into<Cow<'static, str>>, amount: impl Into<Formula>) -> Self {
        Self::new(ModifierKind::Additive, description, amount)
    }

    pub fn multiplicative(
        description: impl Into<Cow<'static, str>>,
        amount: impl Into<Formula>,
    ) -> Self {
        Self::new(ModifierKind::Multiplicative, description, amount)
    }

    pub fn exponential(
        description: impl Into<Cow<'static, str>>,
        amount: impl Into<Formula>,
    ) -> Self {
        Self::new(ModifierKind::Exponential, description, amount)
    }

    /// Only applies the step while `condition` holds.
    pub fn when(
        mut self,
        condition: impl Fn(&GameView<'_>) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.enabled = Some(Predicate::new(condition));
        self
    }

    pub fn is_enabled(&self, view: &GameView<'_>) -> bool {
        self.enabled.as_ref().is_none_or(|p| p.eval(view))
    }
}

/// One row of a modifier breakdown.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModifierLine {
    pub description: String,
    pub kind: ModifierKind,
    pub amount: Decimal,
    /// Accumulated value after this step.
    pub value: Decimal,
}

/// Ordered, composable chain of modifiers.
///
/// # Example
/// ```
/// # use game_core::{Catalog, Decimal, ModifierPipeline};
/// let catalog = Catalog::builder().build().unwrap();
/// let state = catalog.initial_state();
/// let view = catalog.view(&state);
///
/// let pipeline = ModifierPipeline::new()
///     .additive("Flat bonus", 2.0)
///     .multiplicative("Doubler", 2.0)
///     .exponential("Squared", 2.0);
///
/// // ((1 + 2) × 2)^2 = 36
/// assert_eq!(pipeline.evaluate(&view, Decimal::ONE), Decimal::from(36u32));
/// ```
#[derive(Clone, Debug, Default)]
pub struct ModifierPipeline {
    steps: Vec<Modifier>,
}

impl ModifierPipeline {
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    pub fn add(&mut self, modifier: Modifier) {
        self.steps.push(modifier);
    }

    /// Add a step (builder pattern)
    pub fn with(mut self, modifier: Modifier) -> Self {
        self.add(modifier);
        self
    }

    /// Add an additive step (builder pattern)
    pub fn additive(self, description: impl Into<Cow<'static, str>>, amount: impl Into<Formula>) -> Self {
        self.with(Modifier::additive(description, amount))
    }

    /// Add a multiplicative step (builder pattern)
    pub fn multiplicative(
        self,
        description: impl Into<Cow<'static, str>>,
        amount: impl Into<Formula>,
    ) -> Self {
        self.with(Modifier::multiplicative(description, amount))
    }

    /// Add an exponential step (builder pattern)
    pub fn exponential(
        self,
        description: impl Into<Cow<'static, str>>,
        amount: impl Into<Formula>,
    ) -> Self {
        self.with(Modifier::exponential(description, amount))
    }

    pub fn steps(&self) -> &[Modifier] {
        &self.steps
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Folds `base` through every enabled step.
    pub fn evaluate(&self, view: &GameView<'_>, base: Decimal) -> Decimal {
        self.fold(view, base, |_, _, _| {})
    }

    /// Replays the same fold as [`evaluate`](Self::evaluate), recording each
    /// enabled step and the value after it.
    pub fn describe(&self, view: &GameView<'_>, base: Decimal) -> Vec<ModifierLine> {
        let mut lines = Vec::with_capacity(self.steps.len());
        self.fold(view, base, |step, amount, value| {
            lines.push(ModifierLine {
                description: step.description.to_string(),
                kind: step.kind,
                amount,
                value,
            });
        });
        lines
    }

    fn fold(
        &self,
        view: &GameView<'_>,
        base: Decimal,
        mut on_step: impl FnMut(&Modifier, Decimal, Decimal),
    ) -> Decimal {
        self.steps
            .iter()
            .filter(|step| step.is_enabled(view))
            .fold(base, |acc, step| {
                let amount = step.amount.eval(view);
                let value = step.kind.apply(acc, amount);
                on_step(step, amount, value);
                value
            })
    }
}

/// A pipeline with the label and base it is displayed with.
#[derive(Clone, Debug)]
pub struct NamedPipeline {
    pub key: &'static str,
    pub title: Cow<'static, str>,
    pub base: Decimal,
    pub pipeline: ModifierPipeline,
}
