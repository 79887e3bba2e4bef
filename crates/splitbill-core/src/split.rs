//! # Allocation Engine
//!
//! Turns (people, dishes, taxes) into a per-person owed amount.
//!
//! ## Allocation Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Proportional Split                                  │
//! │                                                                         │
//! │  dishes ────► subtotal (Σ price, shared or not)                        │
//! │                    │                                                    │
//! │                    ▼                                                    │
//! │  taxes ─────► compute_taxes(subtotal) ──► grand_total                  │
//! │                                                │                        │
//! │  each shared dish ──► price / |shared_by|      │                        │
//! │          │                                     │                        │
//! │          ▼                                     ▼                        │
//! │  base subtotal per person ──► (base / subtotal) × grand_total          │
//! │                                                                         │
//! │  Special case subtotal == 0: fixed taxes split equally, percentage     │
//! │  taxes are necessarily zero.                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Unassigned Dishes
//! A priced dish nobody shares still inflates the subtotal, and through it
//! every percentage tax and the grand total - yet its cost lands on nobody.
//! In that configuration the split under-sums the grand total. The engine
//! leaves the orphaned cost unallocated rather than redistributing it.

use std::collections::HashMap;

use crate::tax::compute_taxes;
use crate::types::{BillSplit, BillSummary, Dish, Person, SplitEntry, Tax, TaxKind};

// =============================================================================
// Subtotal
// =============================================================================

/// Sums all dish prices, regardless of sharing assignment.
///
/// Negative prices are a boundary-validation concern; if one slips through
/// it is clamped to zero so a bad dish can never shrink the bill.
pub fn subtotal(dishes: &[Dish]) -> f64 {
    dishes.iter().map(|dish| dish.price.max(0.0)).sum()
}

// =============================================================================
// Split
// =============================================================================

/// Computes each person's owed amount.
///
/// ## Guarantees
/// - The returned map's key set equals the roster's id set; a person with
///   no assignments gets an explicit `0.0` entry.
/// - With a positive subtotal and every priced dish shared by someone, the
///   owed amounts sum to the grand total (up to floating-point rounding).
/// - With a zero subtotal and a non-empty roster, fixed taxes are split
///   equally among everyone.
/// - An empty roster yields an empty map, whatever the other inputs.
///
/// ## Example
/// ```rust
/// use splitbill_core::split::compute_split;
/// use splitbill_core::types::{Dish, Person, Tax, TaxKind};
///
/// let people = vec![
///     Person { id: "a".into(), name: "A".into() },
///     Person { id: "b".into(), name: "B".into() },
/// ];
/// let dishes = vec![Dish {
///     id: "d".into(),
///     name: "Pizza".into(),
///     price: 20.0,
///     shared_by: vec!["a".into(), "b".into()],
/// }];
/// let taxes = vec![Tax {
///     id: "t".into(),
///     name: "VAT".into(),
///     kind: TaxKind::Percentage,
///     value: 10.0,
/// }];
///
/// let split = compute_split(&people, &dishes, &taxes);
/// assert_eq!(split["a"].amount, 11.0);
/// assert_eq!(split["b"].amount, 11.0);
/// ```
pub fn compute_split(people: &[Person], dishes: &[Dish], taxes: &[Tax]) -> BillSplit {
    let mut split: BillSplit = HashMap::with_capacity(people.len());
    let mut base_subtotals: HashMap<&str, f64> = HashMap::with_capacity(people.len());

    for person in people {
        split.insert(
            person.id.clone(),
            SplitEntry {
                name: person.name.clone(),
                amount: 0.0,
            },
        );
        base_subtotals.insert(person.id.as_str(), 0.0);
    }

    // Per-person base cost from dishes. Unknown ids in shared_by are skipped:
    // the cascade on person deletion should make them unreachable, but the
    // engine never charges a ghost.
    for dish in dishes {
        let price = dish.price.max(0.0);
        if dish.shared_by.is_empty() || price <= 0.0 {
            continue;
        }
        let share = price / dish.shared_by.len() as f64;
        for person_id in &dish.shared_by {
            if let Some(base) = base_subtotals.get_mut(person_id.as_str()) {
                *base += share;
            }
        }
    }

    let bill_subtotal = subtotal(dishes);

    if bill_subtotal > 0.0 {
        let grand_total = bill_subtotal + compute_taxes(bill_subtotal, taxes).total;
        for person in people {
            let base = base_subtotals.get(person.id.as_str()).copied().unwrap_or(0.0);
            let proportion = base / bill_subtotal;
            if let Some(entry) = split.get_mut(&person.id) {
                entry.amount = proportion * grand_total;
            }
        }
    } else if !people.is_empty() {
        // Zero subtotal: percentage taxes are necessarily zero, so only the
        // fixed ones remain, split equally across the roster.
        let fixed_total: f64 = taxes
            .iter()
            .filter(|tax| tax.kind == TaxKind::Fixed)
            .map(|tax| tax.value.max(0.0))
            .sum();
        let equal_share = fixed_total / people.len() as f64;
        for entry in split.values_mut() {
            entry.amount = equal_share;
        }
    }

    split
}

// =============================================================================
// Summary
// =============================================================================

/// Derives the full bill view in one call: subtotal, per-tax lines, totals,
/// and the split. Everything is recomputed from the inputs; nothing is cached.
pub fn summarize(people: &[Person], dishes: &[Dish], taxes: &[Tax]) -> BillSummary {
    let bill_subtotal = subtotal(dishes);
    let breakdown = compute_taxes(bill_subtotal, taxes);
    let grand_total = bill_subtotal + breakdown.total;

    BillSummary {
        subtotal: bill_subtotal,
        total_tax: breakdown.total,
        tax_lines: breakdown.per_tax,
        grand_total,
        split: compute_split(people, dishes, taxes),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn person(id: &str) -> Person {
        Person {
            id: id.to_string(),
            name: format!("Person {}", id),
        }
    }

    fn dish(id: &str, price: f64, shared_by: &[&str]) -> Dish {
        Dish {
            id: id.to_string(),
            name: format!("Dish {}", id),
            price,
            shared_by: shared_by.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn tax(id: &str, kind: TaxKind, value: f64) -> Tax {
        Tax {
            id: id.to_string(),
            name: format!("Tax {}", id),
            kind,
            value,
        }
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPSILON,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    /// Worked scenario: Pizza 20 shared by A and B, 10% VAT.
    #[test]
    fn test_pizza_with_vat() {
        let people = vec![person("a"), person("b")];
        let dishes = vec![dish("d1", 20.0, &["a", "b"])];
        let taxes = vec![tax("t1", TaxKind::Percentage, 10.0)];

        let split = compute_split(&people, &dishes, &taxes);
        assert_close(split["a"].amount, 11.0);
        assert_close(split["b"].amount, 11.0);
    }

    /// Conservation: with every priced dish shared, the split sums to the
    /// grand total within epsilon.
    #[test]
    fn test_conservation() {
        let people = vec![person("a"), person("b"), person("c")];
        let dishes = vec![
            dish("d1", 17.35, &["a", "b", "c"]),
            dish("d2", 9.10, &["a"]),
            dish("d3", 23.99, &["b", "c"]),
        ];
        let taxes = vec![
            tax("t1", TaxKind::Percentage, 8.25),
            tax("t2", TaxKind::Fixed, 3.50),
        ];

        let summary = summarize(&people, &dishes, &taxes);
        let owed_sum: f64 = summary.split.values().map(|entry| entry.amount).sum();
        assert!(
            (owed_sum - summary.grand_total).abs() < EPSILON * summary.grand_total,
            "Σ owed = {}, grand total = {}",
            owed_sum,
            summary.grand_total
        );
    }

    /// Worked scenario: zero subtotal, fixed Service tax of 6 over 3 people.
    #[test]
    fn test_zero_subtotal_fixed_tax_fallback() {
        let people = vec![person("a"), person("b"), person("c")];
        let dishes = vec![dish("d1", 0.0, &[])];
        let taxes = vec![tax("t1", TaxKind::Fixed, 6.0)];

        let split = compute_split(&people, &dishes, &taxes);
        assert_close(split["a"].amount, 2.0);
        assert_close(split["b"].amount, 2.0);
        assert_close(split["c"].amount, 2.0);
    }

    /// Percentage taxes contribute nothing when the subtotal is zero.
    #[test]
    fn test_zero_subtotal_percentage_contributes_nothing() {
        let people = vec![person("a"), person("b")];
        let taxes = vec![
            tax("t1", TaxKind::Percentage, 25.0),
            tax("t2", TaxKind::Fixed, 10.0),
        ];

        let split = compute_split(&people, &[], &taxes);
        assert_close(split["a"].amount, 5.0);
        assert_close(split["b"].amount, 5.0);
    }

    #[test]
    fn test_empty_people_yields_empty_split() {
        let dishes = vec![dish("d1", 20.0, &[])];
        let taxes = vec![tax("t1", TaxKind::Fixed, 5.0)];

        let split = compute_split(&[], &dishes, &taxes);
        assert!(split.is_empty());
    }

    /// A dish nobody shares inflates the totals but is charged to nobody.
    /// The orphaned, tax-inflated cost is deliberately NOT redistributed.
    #[test]
    fn test_unshared_dish_charged_to_nobody() {
        let people = vec![person("a"), person("b")];
        let dishes = vec![dish("d1", 20.0, &["a", "b"]), dish("d2", 10.0, &[])];
        let taxes = vec![tax("t1", TaxKind::Percentage, 10.0)];

        let summary = summarize(&people, &dishes, &taxes);
        assert_close(summary.subtotal, 30.0);
        assert_close(summary.grand_total, 33.0);

        // Each person: base 10, proportion 10/30, owed = 33 / 3 = 11
        assert_close(summary.split["a"].amount, 11.0);
        assert_close(summary.split["b"].amount, 11.0);

        // The split under-sums the grand total by the orphaned dish's
        // tax-inflated cost (10 * 1.1 = 11).
        let owed_sum: f64 = summary.split.values().map(|entry| entry.amount).sum();
        assert_close(summary.grand_total - owed_sum, 11.0);
    }

    /// A person with no assignments gets an explicit zero entry.
    #[test]
    fn test_person_without_dishes_owes_zero() {
        let people = vec![person("a"), person("b")];
        let dishes = vec![dish("d1", 15.0, &["a"])];

        let split = compute_split(&people, &dishes, &[]);
        assert_close(split["a"].amount, 15.0);
        assert_close(split["b"].amount, 0.0);
        assert_eq!(split.len(), 2);
    }

    /// A zero-priced dish contributes to nobody even when shared.
    #[test]
    fn test_zero_priced_shared_dish_contributes_nothing() {
        let people = vec![person("a"), person("b")];
        let dishes = vec![dish("d1", 0.0, &["a", "b"]), dish("d2", 12.0, &["b"])];

        let split = compute_split(&people, &dishes, &[]);
        assert_close(split["a"].amount, 0.0);
        assert_close(split["b"].amount, 12.0);
    }

    /// Unknown ids inside shared_by are skipped, never charged.
    #[test]
    fn test_unknown_id_in_shared_by_is_skipped() {
        let people = vec![person("a")];
        let dishes = vec![dish("d1", 20.0, &["a", "ghost"])];

        let split = compute_split(&people, &dishes, &[]);
        // The dish still splits two ways; the ghost's half evaporates.
        assert_close(split["a"].amount, 10.0);
        assert!(!split.contains_key("ghost"));
    }

    /// Uneven three-way split conserves the grand total within epsilon.
    #[test]
    fn test_three_way_split_conserves() {
        let people = vec![person("a"), person("b"), person("c")];
        let dishes = vec![dish("d1", 10.0, &["a", "b", "c"])];
        let taxes = vec![tax("t1", TaxKind::Percentage, 15.0)];

        let summary = summarize(&people, &dishes, &taxes);
        let owed_sum: f64 = summary.split.values().map(|entry| entry.amount).sum();
        assert!((owed_sum - 11.5).abs() < EPSILON);
    }

    #[test]
    fn test_subtotal_counts_unshared_dishes() {
        let dishes = vec![dish("d1", 5.0, &["a"]), dish("d2", 7.5, &[])];
        assert_close(subtotal(&dishes), 12.5);
    }

    #[test]
    fn test_subtotal_clamps_negative_price() {
        let dishes = vec![dish("d1", 10.0, &[]), dish("d2", -4.0, &[])];
        assert_close(subtotal(&dishes), 10.0);
    }

    #[test]
    fn test_summarize_tax_lines_in_entry_order() {
        let people = vec![person("a")];
        let dishes = vec![dish("d1", 100.0, &["a"])];
        let taxes = vec![
            tax("t1", TaxKind::Fixed, 2.0),
            tax("t2", TaxKind::Percentage, 10.0),
        ];

        let summary = summarize(&people, &dishes, &taxes);
        assert_eq!(summary.tax_lines[0].tax_id, "t1");
        assert_close(summary.tax_lines[0].amount, 2.0);
        assert_eq!(summary.tax_lines[1].tax_id, "t2");
        assert_close(summary.tax_lines[1].amount, 10.0);
        assert_close(summary.total_tax, 12.0);
        assert_close(summary.grand_total, 112.0);
    }
}
