//! Purchases, ticks and external writes.
//!
//! The [`GameEngine`] is the only writer of [`GameState`]. It borrows the
//! catalog for definitions and the state for mutation, so every operation
//! runs to completion synchronously and check-then-debit can never race.

mod errors;
mod purchase;
mod tick;

pub use errors::EngineError;
pub use purchase::{Debit, PurchaseOutcome, Receipt, RejectReason};
pub use tick::{Repair, TickReport};

use crate::catalog::Catalog;
use crate::num::Decimal;
use crate::resource::ResourceSource;
use crate::state::{GameState, ResourceId};
use crate::view::GameView;

pub struct GameEngine<'a> {
    catalog: &'a Catalog,
    state: &'a mut GameState,
}

impl<'a> GameEngine<'a> {
    pub fn new(catalog: &'a Catalog, state: &'a mut GameState) -> Self {
        Self { catalog, state }
    }

    pub fn view(&self) -> GameView<'_> {
        self.catalog.view(&*self.state)
    }

    pub fn state(&self) -> &GameState {
        &*self.state
    }

    /// Moves the day counter. Tracker phases follow on the next tick.
    ///
    /// Returns the previous day.
    pub fn set_day(&mut self, day: u32) -> u32 {
        let previous = self.state.day();
        self.state.set_day(day);
        previous
    }

    /// Overwrites a stored resource on behalf of an external collaborator,
    /// such as a reset. Buyables mirrored into the resource are clamped on
    /// the next tick.
    ///
    /// Returns the previous value.
    pub fn set_resource(&mut self, id: ResourceId, value: Decimal) -> Result<Decimal, EngineError> {
        let def = self
            .catalog
            .resource(id)
            .ok_or(EngineError::UnknownResource(id))?;
        let ResourceSource::Stored { initial } = &def.source else {
            return Err(EngineError::DerivedResource(id));
        };
        if value.is_negative() {
            return Err(EngineError::NegativeValue {
                resource: id,
                value,
            });
        }

        let previous = self.state.stored(id).unwrap_or(*initial);
        self.state.set_stored(id, value);
        Ok(previous)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{fixture_catalog, GEARS, TOTAL};

    #[test]
    fn set_resource_rejects_derived_and_negative_values() {
        let catalog = fixture_catalog();
        let mut state = catalog.initial_state();
        let mut engine = GameEngine::new(&catalog, &mut state);

        assert_eq!(
            engine.set_resource(TOTAL, Decimal::ONE),
            Err(EngineError::DerivedResource(TOTAL))
        );
        assert!(matches!(
            engine.set_resource(GEARS, Decimal::new(-1.0)),
            Err(EngineError::NegativeValue { .. })
        ));

        assert_eq!(engine.set_resource(GEARS, Decimal::from(8u32)), Ok(Decimal::ZERO));
        assert_eq!(engine.view().resource(GEARS), Decimal::from(8u32));
    }

    #[test]
    fn set_day_returns_previous_day() {
        let catalog = fixture_catalog();
        let mut state = catalog.initial_state();
        let mut engine = GameEngine::new(&catalog, &mut state);

        assert_eq!(engine.set_day(5), 1);
        assert_eq!(engine.state().day(), 5);
    }
}
