//! # Domain Types
//!
//! Core domain types used throughout Splitbill.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Person      │   │      Dish       │   │      Tax        │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  name           │   │  name           │   │  name           │       │
//! │  │                 │   │  price (f64)    │   │  kind           │       │
//! │  │                 │   │  shared_by ─────┼──►│  value (f64)    │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                              │                                          │
//! │                              └── shared_by holds Person ids (weak      │
//! │                                  references, pruned on cascade)        │
//! │                                                                         │
//! │  Boundary DTOs: SplitEntry, TaxLine, BillSummary                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Every entity has an `id`: a UUID v4 string, immutable once created,
//! globally unique across the ledger. Names, prices, kinds, and sharing
//! assignments are all mutable; identity never is.
//!
//! ## Monetary Values
//! Prices, tax values, and owed amounts are IEEE-754 `f64`. The allocation
//! engine's conservation guarantee is stated up to a floating-point epsilon,
//! so every participating value must be the same double-precision type.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use ts_rs::TS;

// =============================================================================
// Tax Kind
// =============================================================================

/// How a tax interprets its `value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum TaxKind {
    /// `value` is a percent of the bill subtotal (10.0 = 10%).
    /// Unbounded above: a 150% surcharge is legal.
    Percentage,
    /// `value` is an absolute currency amount.
    Fixed,
}

// =============================================================================
// Person
// =============================================================================

/// A participant in the bill.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    /// Unique identifier (UUID v4). Immutable.
    pub id: String,

    /// Display name shown on the summary.
    pub name: String,
}

// =============================================================================
// Dish
// =============================================================================

/// A priced item on the bill, shared by a subset of participants.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Dish {
    /// Unique identifier (UUID v4). Immutable.
    pub id: String,

    /// Display name shown on the summary.
    pub name: String,

    /// Price before tax. Non-negative by boundary validation.
    pub price: f64,

    /// Ids of the people sharing this dish, in toggle order.
    ///
    /// Weak references: a Dish does not own the Persons it names. The
    /// ledger's cascade on person deletion keeps every id here live.
    /// An empty set is legal - the dish still counts toward the subtotal
    /// but is charged to nobody.
    pub shared_by: Vec<String>,
}

impl Dish {
    /// Checks whether a person is currently sharing this dish.
    #[inline]
    pub fn is_shared_by(&self, person_id: &str) -> bool {
        self.shared_by.iter().any(|id| id == person_id)
    }
}

// =============================================================================
// Tax
// =============================================================================

/// A tax or surcharge applied on top of the subtotal.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Tax {
    /// Unique identifier (UUID v4). Immutable.
    pub id: String,

    /// Display name shown on the summary (e.g. "VAT", "Service").
    pub name: String,

    /// How `value` is interpreted.
    pub kind: TaxKind,

    /// Percent of subtotal or absolute amount, depending on `kind`.
    /// Non-negative by boundary validation.
    pub value: f64,
}

// =============================================================================
// Boundary DTOs
// =============================================================================

/// One person's line in the computed split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SplitEntry {
    /// The person's display name, denormalized so the form layer can
    /// render the split without a second lookup.
    pub name: String,

    /// Final owed amount, tax included.
    pub amount: f64,
}

/// The computed split: person id to owed amount.
///
/// ## Invariant
/// The key set always equals the current roster's id set. A person with no
/// dish assignments gets an explicit `0.0` entry, never a missing key.
pub type BillSplit = HashMap<String, SplitEntry>;

/// One tax's contribution to the total, in entry order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TaxLine {
    /// Id of the contributing tax.
    pub tax_id: String,

    /// Computed contribution (percentage taxes resolved against the
    /// subtotal, fixed taxes passed through).
    pub amount: f64,
}

/// Full derived view of the bill, recomputed from the ledger on every read.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BillSummary {
    /// Sum of all dish prices, shared or not.
    pub subtotal: f64,

    /// Per-tax contributions, in tax entry order.
    pub tax_lines: Vec<TaxLine>,

    /// Sum of all tax contributions.
    pub total_tax: f64,

    /// `subtotal + total_tax`.
    pub grand_total: f64,

    /// Per-person owed amounts.
    pub split: BillSplit,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dish_is_shared_by() {
        let dish = Dish {
            id: "d1".to_string(),
            name: "Pizza".to_string(),
            price: 20.0,
            shared_by: vec!["p1".to_string(), "p2".to_string()],
        };
        assert!(dish.is_shared_by("p1"));
        assert!(dish.is_shared_by("p2"));
        assert!(!dish.is_shared_by("p3"));
    }

    #[test]
    fn test_tax_kind_serde_snake_case() {
        assert_eq!(
            serde_json::to_string(&TaxKind::Percentage).unwrap(),
            "\"percentage\""
        );
        assert_eq!(serde_json::to_string(&TaxKind::Fixed).unwrap(), "\"fixed\"");
    }

    #[test]
    fn test_summary_serializes_camel_case() {
        let summary = BillSummary {
            subtotal: 20.0,
            tax_lines: vec![TaxLine {
                tax_id: "t1".to_string(),
                amount: 2.0,
            }],
            total_tax: 2.0,
            grand_total: 22.0,
            split: HashMap::new(),
        };
        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"grandTotal\":22.0"));
        assert!(json.contains("\"taxId\":\"t1\""));
    }
}
