//! Pull-based formulas over the current game view.
//!
//! Derived resources, modifier amounts, milestone conditions and buyable
//! costs are all pure functions of a [`GameView`]. They are re-evaluated on
//! every read and never cached across state changes.

use core::fmt;
use std::sync::Arc;

use crate::num::Decimal;
use crate::view::GameView;

/// Numeric formula evaluated against the live view.
#[derive(Clone)]
pub struct Formula(Arc<dyn Fn(&GameView<'_>) -> Decimal + Send + Sync>);

impl Formula {
    pub fn new(f: impl Fn(&GameView<'_>) -> Decimal + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn constant(value: impl Into<Decimal>) -> Self {
        let value = value.into();
        Self::new(move |_| value)
    }

    pub fn eval(&self, view: &GameView<'_>) -> Decimal {
        (self.0)(view)
    }
}

impl From<Decimal> for Formula {
    fn from(value: Decimal) -> Self {
        Self::constant(value)
    }
}

impl From<f64> for Formula {
    fn from(value: f64) -> Self {
        Self::constant(value)
    }
}

impl fmt::Debug for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Formula(..)")
    }
}

/// Boolean condition evaluated against the live view.
#[derive(Clone)]
pub struct Predicate(Arc<dyn Fn(&GameView<'_>) -> bool + Send + Sync>);

impl Predicate {
    pub fn new(f: impl Fn(&GameView<'_>) -> bool + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn eval(&self, view: &GameView<'_>) -> bool {
        (self.0)(view)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Predicate(..)")
    }
}
