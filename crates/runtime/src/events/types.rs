//! Event types for different topics.
//!
//! Ids are carried as their `layer.key` display strings so events stay
//! serializable.

use serde::{Deserialize, Serialize};

use game_core::{Debit, Decimal, Receipt, Repair, TickReport};

/// A buyable amount clamped down to its backing resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepairRecord {
    pub buyable: String,
    pub from: Decimal,
    pub to: Decimal,
}

impl From<&Repair> for RepairRecord {
    fn from(repair: &Repair) -> Self {
        Self {
            buyable: repair.buyable.to_string(),
            from: repair.from,
            to: repair.to,
        }
    }
}

/// Published once per processed tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickEvent {
    /// Ticks processed since the runtime started, this one included
    pub ticks: u64,
    /// Elapsed seconds reported by the tick source
    pub delta: f64,
    pub repairs: Vec<RepairRecord>,
}

impl TickEvent {
    pub(crate) fn new(ticks: u64, delta: f64, report: &TickReport) -> Self {
        Self {
            ticks,
            delta,
            repairs: report.repairs.iter().map(RepairRecord::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PurchaseKind {
    Buyable,
    Upgrade,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebitRecord {
    pub resource: String,
    pub amount: Decimal,
}

impl From<&Debit> for DebitRecord {
    fn from(debit: &Debit) -> Self {
        Self {
            resource: debit.resource.to_string(),
            amount: debit.amount,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PurchaseEvent {
    Purchased {
        kind: PurchaseKind,
        item: String,
        /// Owned amount after the purchase
        amount: Decimal,
        debits: Vec<DebitRecord>,
    },
    Rejected {
        kind: PurchaseKind,
        item: String,
        reason: String,
    },
}

impl PurchaseEvent {
    pub(crate) fn purchased(kind: PurchaseKind, item: String, receipt: &Receipt) -> Self {
        Self::Purchased {
            kind,
            item,
            amount: receipt.amount,
            debits: receipt.debits.iter().map(DebitRecord::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProgressEvent {
    MilestoneEarned { milestone: String },
    /// The layer's unlock day was reached
    LayerUnlocked { layer: String },
    /// The layer's daily goal was met on or after its day
    LayerCompleted { layer: String },
    DayChanged { from: u32, to: u32 },
}

impl ProgressEvent {
    /// Progress events carried by one tick report, in report order.
    pub(crate) fn from_report(report: &TickReport) -> Vec<Self> {
        let earned = report.earned.iter().map(|id| Self::MilestoneEarned {
            milestone: id.to_string(),
        });
        let unlocked = report.unlocked.iter().map(|id| Self::LayerUnlocked {
            layer: id.to_string(),
        });
        let completed = report.completed.iter().map(|id| Self::LayerCompleted {
            layer: id.to_string(),
        });
        earned.chain(unlocked).chain(completed).collect()
    }
}
