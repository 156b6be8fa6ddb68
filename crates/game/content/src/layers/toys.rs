//! Day 17: toys.
//!
//! Three buyables turn other layers' output into clothes, wooden blocks and
//! trucks. Each buyable mirrors its amount into the resource of the same
//! name, and the toy total is their sum. The upgrades are paid in those
//! mirrored resources, so buying one leaves the matching buyable ahead of
//! its resource until the next tick clamps it.

use game_core::{
    curve, BuyableDef, BuyableId, Cost, Decimal, GameView, LayerDef, LayerId, MilestoneDef,
    MilestoneId, ModifierPipeline, ResourceDef, ResourceId, TrackerDef, UpgradeDef, UpgradeId,
};

use super::{cloth, dyes, metal, plastic, trees, workshop};

pub const ID: LayerId = LayerId("toys");
pub const DAY: u32 = 17;
pub const GOAL: f64 = 500.0;

pub const CLOTHES: ResourceId = ResourceId::new(ID, "clothes");
pub const WOODEN_BLOCKS: ResourceId = ResourceId::new(ID, "wooden_blocks");
pub const TRUCKS: ResourceId = ResourceId::new(ID, "trucks");
pub const TOY_SUM: ResourceId = ResourceId::new(ID, "toy_sum");

pub const CLOTHES_BUYABLE: BuyableId = BuyableId::new(ID, "clothes");
pub const WOODEN_BLOCKS_BUYABLE: BuyableId = BuyableId::new(ID, "wooden_blocks");
pub const TRUCKS_BUYABLE: BuyableId = BuyableId::new(ID, "trucks");

pub const TRUCKS_UPGRADE: UpgradeId = UpgradeId::new(ID, "trucks_upgrade1");
pub const CLOTHES_UPGRADE: UpgradeId = UpgradeId::new(ID, "clothes_upgrade1");
pub const WOODEN_BLOCKS_UPGRADE: UpgradeId = UpgradeId::new(ID, "wooden_blocks_upgrade1");

pub const MILESTONE1: MilestoneId = MilestoneId::new(ID, "milestone1");
pub const MILESTONE2: MilestoneId = MilestoneId::new(ID, "milestone2");
pub const MILESTONE3: MilestoneId = MilestoneId::new(ID, "milestone3");
pub const MILESTONE4: MilestoneId = MilestoneId::new(ID, "milestone4");

/// Cost divisor: complete workshops once milestone 1 is earned.
fn discount(view: &GameView<'_>) -> Decimal {
    if view.milestone_earned(MILESTONE1) {
        curve::whole_divisor(view.resource(workshop::FOUNDATION_PROGRESS), 100.0)
    } else {
        Decimal::ONE
    }
}

fn clothes_cost(view: &GameView<'_>, amount: Decimal) -> Cost {
    let factor = (amount + Decimal::ONE) / discount(view);
    let dye = factor * Decimal::new(2e14);
    Cost::new()
        .spend(cloth::CLOTH, factor * Decimal::new(1e13))
        .hold(dyes::RED, dye)
        .hold(dyes::YELLOW, dye)
        .hold(dyes::BLUE, dye)
}

fn wooden_blocks_cost(view: &GameView<'_>, amount: Decimal) -> Cost {
    Cost::new().spend(
        trees::LOGS,
        curve::polynomial(1e63, 5.0, amount) / discount(view),
    )
}

fn trucks_cost(view: &GameView<'_>, amount: Decimal) -> Cost {
    let discount = discount(view);
    Cost::new()
        .spend(metal::METAL, curve::polynomial(1e43, 3.0, amount) / discount)
        .spend(plastic::PLASTIC, curve::polynomial(1e14, 1.0, amount) / discount)
}

fn toys_at_least(threshold: u32) -> impl Fn(&GameView<'_>) -> bool + Send + Sync + 'static {
    move |view| view.resource(TOY_SUM) >= Decimal::from(threshold)
}

pub fn layer() -> LayerDef {
    LayerDef::builder(ID, "Toys", DAY)
        .color("#4BDC13")
        .resource(ResourceDef::stored(CLOTHES, "clothes"))
        .resource(ResourceDef::stored(WOODEN_BLOCKS, "wooden blocks"))
        .resource(ResourceDef::stored(TRUCKS, "trucks"))
        .resource(ResourceDef::derived(TOY_SUM, "toys", |view| {
            view.resource(CLOTHES) + view.resource(WOODEN_BLOCKS) + view.resource(TRUCKS)
        }))
        .buyable(BuyableDef::new(CLOTHES_BUYABLE, "Make Clothes", clothes_cost).mirrored_into(CLOTHES))
        .buyable(
            BuyableDef::new(WOODEN_BLOCKS_BUYABLE, "Make Wooden Blocks", wooden_blocks_cost)
                .mirrored_into(WOODEN_BLOCKS),
        )
        .buyable(BuyableDef::new(TRUCKS_BUYABLE, "Make Trucks", trucks_cost).mirrored_into(TRUCKS))
        .upgrade(UpgradeDef::new(
            TRUCKS_UPGRADE,
            TRUCKS,
            10.0,
            "Load logs onto trucks",
            "Log gain is doubled.",
        ))
        .upgrade(UpgradeDef::new(
            CLOTHES_UPGRADE,
            CLOTHES,
            30.0,
            "Give elves clothes to wear",
            "Multiply ore per mining operation and auto-smelt purity by the number of clothes you have.",
        ))
        .upgrade(UpgradeDef::new(
            WOODEN_BLOCKS_UPGRADE,
            WOODEN_BLOCKS,
            15.0,
            "Build wooden towers",
            "You can now build 2 extra tall workshops!",
        ))
        .milestone(MilestoneDef::new(
            MILESTONE1,
            "10 toys",
            "The cost of making toys is divided by the number of complete workshops you have.",
            toys_at_least(10),
        ))
        .milestone(MilestoneDef::new(
            MILESTONE2,
            "100 toys",
            "Unlock black dyes.",
            toys_at_least(100),
        ))
        .milestone(MilestoneDef::new(
            MILESTONE3,
            "200 toys",
            "Beach wrapping paper is much more powerful.",
            toys_at_least(200),
        ))
        .milestone(MilestoneDef::new(
            MILESTONE4,
            "350 toys",
            "Gain 50x oil and plastic.",
            toys_at_least(350),
        ))
        .modifiers("toy_gain", "Toy Gain", 1.0, ModifierPipeline::new())
        .depends_on([
            cloth::CLOTH,
            dyes::RED,
            dyes::YELLOW,
            dyes::BLUE,
            trees::LOGS,
            metal::METAL,
            plastic::PLASTIC,
            workshop::FOUNDATION_PROGRESS,
        ])
        .tracker(TrackerDef::new(TOY_SUM, GOAL))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::layers::oil;
    use game_core::{GameConfig, GameEngine, PurchaseOutcome, RejectReason};

    fn day_17() -> (game_core::Catalog, game_core::GameState) {
        let catalog = catalog(GameConfig::new().with_starting_day(DAY)).unwrap();
        let state = catalog.initial_state();
        (catalog, state)
    }

    fn stock_dyes(engine: &mut GameEngine<'_>, amount: f64) {
        for dye in [dyes::RED, dyes::YELLOW, dyes::BLUE] {
            engine.set_resource(dye, Decimal::new(amount)).unwrap();
        }
    }

    #[test]
    fn clothes_purchase_spends_cloth_and_holds_dyes() {
        let (catalog, mut state) = day_17();
        let mut engine = GameEngine::new(&catalog, &mut state);
        stock_dyes(&mut engine, 2e14);
        engine.set_resource(cloth::CLOTH, Decimal::new(1e13)).unwrap();

        assert!(engine.purchase_buyable(CLOTHES_BUYABLE).unwrap().is_purchased());

        let view = engine.view();
        assert_eq!(view.buyable_amount(CLOTHES_BUYABLE), Decimal::ONE);
        assert_eq!(view.resource(cloth::CLOTH), Decimal::ZERO);
        assert_eq!(view.resource(dyes::RED), Decimal::new(2e14));
        assert_eq!(view.resource(TOY_SUM), Decimal::ONE);

        assert_eq!(
            engine.purchase_buyable(CLOTHES_BUYABLE).unwrap().rejection(),
            Some(RejectReason::Unaffordable)
        );
        assert_eq!(engine.view().buyable_amount(CLOTHES_BUYABLE), Decimal::ONE);
    }

    #[test]
    fn milestone1_divides_costs_by_complete_workshops() {
        let (catalog, mut state) = day_17();
        let mut engine = GameEngine::new(&catalog, &mut state);
        engine.set_resource(WOODEN_BLOCKS, Decimal::from(10u32)).unwrap();
        engine.set_resource(workshop::FOUNDATION_PROGRESS, Decimal::from(250u32)).unwrap();

        let before = trucks_cost(&engine.view(), Decimal::ZERO);
        assert_eq!(before.entries()[1].amount, Decimal::new(1e14));

        assert_eq!(engine.tick(0.05).earned, vec![MILESTONE1]);

        let after = trucks_cost(&engine.view(), Decimal::ZERO);
        assert_eq!(after.entries()[1].amount, Decimal::new(5e13));
    }

    #[test]
    fn divisor_never_drops_below_one() {
        let (catalog, mut state) = day_17();
        let mut engine = GameEngine::new(&catalog, &mut state);
        engine.set_resource(CLOTHES, Decimal::from(10u32)).unwrap();
        engine.tick(0.05);

        let cost = clothes_cost(&engine.view(), Decimal::ZERO);
        assert_eq!(cost.entries()[0].amount, Decimal::new(1e13));
    }

    #[test]
    fn upgrade_spend_desync_is_clamped() {
        let (catalog, mut state) = day_17();
        let mut engine = GameEngine::new(&catalog, &mut state);
        engine.set_resource(plastic::PLASTIC, Decimal::new(1e20)).unwrap();
        engine.set_resource(metal::METAL, Decimal::new(1e50)).unwrap();

        for _ in 0..10 {
            assert!(engine.purchase_buyable(TRUCKS_BUYABLE).unwrap().is_purchased());
        }
        assert!(engine.purchase_upgrade(TRUCKS_UPGRADE).unwrap().is_purchased());
        assert_eq!(engine.view().resource(TRUCKS), Decimal::ZERO);
        assert_eq!(engine.view().buyable_amount(TRUCKS_BUYABLE), Decimal::from(10u32));

        let report = engine.tick(0.05);
        assert_eq!(report.repairs.len(), 1);
        assert_eq!(engine.view().buyable_amount(TRUCKS_BUYABLE), Decimal::ZERO);
        assert_eq!(engine.view().modifier(trees::ID, "log_gain"), Some(Decimal::from(2u32)));
    }

    #[test]
    fn purchase_with_stale_amount_overwrites_mirror() {
        let (catalog, mut state) = day_17();
        let mut engine = GameEngine::new(&catalog, &mut state);
        engine.set_resource(plastic::PLASTIC, Decimal::new(1e20)).unwrap();
        engine.set_resource(metal::METAL, Decimal::new(1e50)).unwrap();

        for _ in 0..3 {
            assert!(engine.purchase_buyable(TRUCKS_BUYABLE).unwrap().is_purchased());
        }
        engine.set_resource(TRUCKS, Decimal::ZERO).unwrap();

        let outcome = engine.purchase_buyable(TRUCKS_BUYABLE).unwrap();
        let PurchaseOutcome::Purchased(receipt) = outcome else {
            panic!("expected purchase, got {outcome:?}");
        };
        assert_eq!(receipt.debits[1].resource, plastic::PLASTIC);
        assert_eq!(receipt.debits[1].amount, Decimal::new(4e14));
        assert_eq!(receipt.amount, Decimal::from(4u32));

        let view = engine.view();
        assert_eq!(view.buyable_amount(TRUCKS_BUYABLE), Decimal::from(4u32));
        assert_eq!(view.resource(TRUCKS), Decimal::from(4u32));
    }

    #[test]
    fn milestone_latches_while_toys_are_still_locked() {
        let catalog = catalog(GameConfig::new().with_starting_day(1)).unwrap();
        let mut state = catalog.initial_state();
        let mut engine = GameEngine::new(&catalog, &mut state);

        engine.set_resource(CLOTHES, Decimal::from(10u32)).unwrap();
        let report = engine.tick(0.05);

        assert_eq!(report.earned, vec![MILESTONE1]);
        assert!(!engine.view().is_layer_unlocked(ID));
        assert!(engine.view().milestone_earned(MILESTONE1));
    }

    #[test]
    fn toy_milestones_latch_in_display_order() {
        let (catalog, mut state) = day_17();
        let mut engine = GameEngine::new(&catalog, &mut state);

        engine.set_resource(CLOTHES, Decimal::from(9u32)).unwrap();
        assert!(engine.tick(0.05).earned.is_empty());

        engine.set_resource(CLOTHES, Decimal::from(10u32)).unwrap();
        assert_eq!(engine.tick(0.05).earned, vec![MILESTONE1]);

        engine.set_resource(CLOTHES, Decimal::from(5u32)).unwrap();
        engine.tick(0.05);
        assert!(engine.view().milestone_earned(MILESTONE1));

        engine.set_resource(TRUCKS, Decimal::from(400u32)).unwrap();
        assert_eq!(
            engine.tick(0.05).earned,
            vec![MILESTONE2, MILESTONE3, MILESTONE4]
        );
        assert_eq!(engine.view().modifier(oil::ID, "oil_gain"), Some(Decimal::from(50u32)));
    }
}
