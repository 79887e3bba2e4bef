//! # Ledger
//!
//! The owned, explicitly-passed mutable collection of bill entities.
//!
//! ## Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Ledger Operations                                  │
//! │                                                                         │
//! │  Form Action              Ledger Method           State Change         │
//! │  ───────────              ─────────────           ────────────         │
//! │                                                                         │
//! │  Add person ─────────────► add_person() ────────► people.push(p)       │
//! │                                                                         │
//! │  Delete person ──────────► remove_person() ─────► people.remove(i)     │
//! │                                          └──────► every dish's         │
//! │                                                   shared_by pruned     │
//! │                                                                         │
//! │  Toggle assignment ──────► toggle_shared() ─────► shared_by ±= id      │
//! │                                                                         │
//! │  View summary ───────────► summary() ───────────► (read only,          │
//! │                                                    recomputed fresh)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Entity ids are unique across the ledger (UUID v4) and immutable.
//! - Every id inside a dish's `shared_by` names a live person. Enforced at
//!   both mutation sites that could break it: person deletion cascades, and
//!   the toggle refuses to add an unknown id.
//! - Derived values are never stored; `summary()` recomputes from scratch.
//!
//! Input validation (non-empty names, non-negative numbers) is the form
//! boundary's precondition, not re-checked here - see [`crate::validation`].

use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::split::summarize;
use crate::types::{BillSummary, Dish, Person, Tax, TaxKind};

/// Owned entity collections plus lifecycle operations.
///
/// Single-threaded by design: every method is a synchronous, locally-mutating
/// computation with no suspension point. Callers own the ledger exclusively
/// and pass it explicitly; nothing in the core holds references across calls.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    people: Vec<Person>,
    dishes: Vec<Dish>,
    taxes: Vec<Tax>,
}

impl Ledger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Ledger::default()
    }

    fn fresh_id() -> String {
        Uuid::new_v4().to_string()
    }

    // =========================================================================
    // People
    // =========================================================================

    /// Adds a person with a fresh id and returns it.
    pub fn add_person(&mut self, name: impl Into<String>) -> &Person {
        self.people.push(Person {
            id: Self::fresh_id(),
            name: name.into(),
        });
        self.people.last().expect("just pushed")
    }

    /// Renames a person. Identity (id) is unchanged.
    pub fn rename_person(&mut self, id: &str, name: impl Into<String>) -> CoreResult<()> {
        let person = self
            .people
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| CoreError::PersonNotFound(id.to_string()))?;
        person.name = name.into();
        Ok(())
    }

    /// Removes a person and cascades: the id is stripped from every dish's
    /// `shared_by`, so no dangling reference survives the deletion.
    pub fn remove_person(&mut self, id: &str) -> CoreResult<()> {
        let initial_len = self.people.len();
        self.people.retain(|p| p.id != id);
        if self.people.len() == initial_len {
            return Err(CoreError::PersonNotFound(id.to_string()));
        }

        for dish in &mut self.dishes {
            dish.shared_by.retain(|person_id| person_id != id);
        }
        Ok(())
    }

    /// Current roster, in entry order.
    pub fn people(&self) -> &[Person] {
        &self.people
    }

    // =========================================================================
    // Dishes
    // =========================================================================

    /// Adds a dish with a fresh id, no sharers yet, and returns it.
    pub fn add_dish(&mut self, name: impl Into<String>, price: f64) -> &Dish {
        self.dishes.push(Dish {
            id: Self::fresh_id(),
            name: name.into(),
            price,
            shared_by: Vec::new(),
        });
        self.dishes.last().expect("just pushed")
    }

    /// Renames a dish. Identity (id) is unchanged.
    pub fn rename_dish(&mut self, id: &str, name: impl Into<String>) -> CoreResult<()> {
        let dish = self.dish_mut(id)?;
        dish.name = name.into();
        Ok(())
    }

    /// Re-prices a dish, leaving its sharing assignments untouched.
    pub fn set_dish_price(&mut self, id: &str, price: f64) -> CoreResult<()> {
        let dish = self.dish_mut(id)?;
        dish.price = price;
        Ok(())
    }

    /// Toggles a person's assignment on a dish (symmetric difference):
    /// present → removed, absent → appended.
    ///
    /// Adding checks the person against the live roster first; a dangling
    /// reference must never be created. The removal direction needs no check.
    pub fn toggle_shared(&mut self, dish_id: &str, person_id: &str) -> CoreResult<()> {
        if !self.dishes.iter().any(|d| d.id == dish_id) {
            return Err(CoreError::DishNotFound(dish_id.to_string()));
        }
        let person_exists = self.people.iter().any(|p| p.id == person_id);

        let dish = self.dish_mut(dish_id)?;
        if dish.is_shared_by(person_id) {
            dish.shared_by.retain(|id| id != person_id);
            return Ok(());
        }
        if !person_exists {
            return Err(CoreError::PersonNotFound(person_id.to_string()));
        }
        dish.shared_by.push(person_id.to_string());
        Ok(())
    }

    /// Removes a dish. No cascade needed: nothing references dish ids.
    pub fn remove_dish(&mut self, id: &str) -> CoreResult<()> {
        let initial_len = self.dishes.len();
        self.dishes.retain(|d| d.id != id);
        if self.dishes.len() == initial_len {
            return Err(CoreError::DishNotFound(id.to_string()));
        }
        Ok(())
    }

    /// Current dishes, in entry order.
    pub fn dishes(&self) -> &[Dish] {
        &self.dishes
    }

    fn dish_mut(&mut self, id: &str) -> CoreResult<&mut Dish> {
        self.dishes
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| CoreError::DishNotFound(id.to_string()))
    }

    // =========================================================================
    // Taxes
    // =========================================================================

    /// Adds a tax with a fresh id and returns it.
    pub fn add_tax(&mut self, name: impl Into<String>, kind: TaxKind, value: f64) -> &Tax {
        self.taxes.push(Tax {
            id: Self::fresh_id(),
            name: name.into(),
            kind,
            value,
        });
        self.taxes.last().expect("just pushed")
    }

    /// Renames a tax. Identity (id) is unchanged.
    pub fn rename_tax(&mut self, id: &str, name: impl Into<String>) -> CoreResult<()> {
        let tax = self.tax_mut(id)?;
        tax.name = name.into();
        Ok(())
    }

    /// Switches a tax between percentage and fixed interpretation.
    pub fn set_tax_kind(&mut self, id: &str, kind: TaxKind) -> CoreResult<()> {
        let tax = self.tax_mut(id)?;
        tax.kind = kind;
        Ok(())
    }

    /// Changes a tax's value under its current kind.
    pub fn set_tax_value(&mut self, id: &str, value: f64) -> CoreResult<()> {
        let tax = self.tax_mut(id)?;
        tax.value = value;
        Ok(())
    }

    /// Removes a tax. No cascade needed: nothing references tax ids.
    pub fn remove_tax(&mut self, id: &str) -> CoreResult<()> {
        let initial_len = self.taxes.len();
        self.taxes.retain(|t| t.id != id);
        if self.taxes.len() == initial_len {
            return Err(CoreError::TaxNotFound(id.to_string()));
        }
        Ok(())
    }

    /// Current taxes, in entry order.
    pub fn taxes(&self) -> &[Tax] {
        &self.taxes
    }

    fn tax_mut(&mut self, id: &str) -> CoreResult<&mut Tax> {
        self.taxes
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| CoreError::TaxNotFound(id.to_string()))
    }

    // =========================================================================
    // Derived View
    // =========================================================================

    /// Recomputes the full bill view from the current collections.
    ///
    /// There is no cached derived state anywhere in the ledger; calling this
    /// twice without a mutation in between returns identical values.
    pub fn summary(&self) -> BillSummary {
        summarize(&self.people, &self.dishes, &self.taxes)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger_with_pizza() -> (Ledger, String, String, String) {
        let mut ledger = Ledger::new();
        let alice = ledger.add_person("Alice").id.clone();
        let bob = ledger.add_person("Bob").id.clone();
        let pizza = ledger.add_dish("Pizza", 20.0).id.clone();
        ledger.toggle_shared(&pizza, &alice).unwrap();
        ledger.toggle_shared(&pizza, &bob).unwrap();
        (ledger, alice, bob, pizza)
    }

    #[test]
    fn test_add_person_generates_unique_ids() {
        let mut ledger = Ledger::new();
        let a = ledger.add_person("Alice").id.clone();
        let b = ledger.add_person("Bob").id.clone();
        assert_ne!(a, b);
        assert_eq!(ledger.people().len(), 2);
    }

    #[test]
    fn test_rename_keeps_id() {
        let mut ledger = Ledger::new();
        let id = ledger.add_person("Alise").id.clone();
        ledger.rename_person(&id, "Alice").unwrap();
        assert_eq!(ledger.people()[0].id, id);
        assert_eq!(ledger.people()[0].name, "Alice");
    }

    #[test]
    fn test_remove_person_cascades_to_dishes() {
        let (mut ledger, alice, bob, pizza) = ledger_with_pizza();

        ledger.remove_person(&alice).unwrap();

        let dish = &ledger.dishes()[0];
        assert_eq!(dish.id, pizza);
        assert!(!dish.is_shared_by(&alice));
        assert!(dish.is_shared_by(&bob));

        // The next split never references the deleted id.
        let summary = ledger.summary();
        assert!(!summary.split.contains_key(&alice));
        assert_eq!(summary.split[&bob].amount, 20.0);
    }

    #[test]
    fn test_remove_unknown_person_errors() {
        let mut ledger = Ledger::new();
        let err = ledger.remove_person("nope").unwrap_err();
        assert!(matches!(err, CoreError::PersonNotFound(_)));
    }

    #[test]
    fn test_toggle_is_symmetric_difference() {
        let mut ledger = Ledger::new();
        let alice = ledger.add_person("Alice").id.clone();
        let dish = ledger.add_dish("Soup", 8.0).id.clone();

        ledger.toggle_shared(&dish, &alice).unwrap();
        assert!(ledger.dishes()[0].is_shared_by(&alice));

        ledger.toggle_shared(&dish, &alice).unwrap();
        assert!(!ledger.dishes()[0].is_shared_by(&alice));
    }

    #[test]
    fn test_toggle_refuses_unknown_person() {
        let mut ledger = Ledger::new();
        let dish = ledger.add_dish("Soup", 8.0).id.clone();

        let err = ledger.toggle_shared(&dish, "ghost").unwrap_err();
        assert!(matches!(err, CoreError::PersonNotFound(_)));
        assert!(ledger.dishes()[0].shared_by.is_empty());
    }

    #[test]
    fn test_toggle_unknown_dish_errors() {
        let mut ledger = Ledger::new();
        let alice = ledger.add_person("Alice").id.clone();
        let err = ledger.toggle_shared("nope", &alice).unwrap_err();
        assert!(matches!(err, CoreError::DishNotFound(_)));
    }

    #[test]
    fn test_set_dish_price_is_idempotent() {
        let (mut ledger, _, _, pizza) = ledger_with_pizza();

        ledger.set_dish_price(&pizza, 24.0).unwrap();
        let once = ledger.summary();
        ledger.set_dish_price(&pizza, 24.0).unwrap();
        let twice = ledger.summary();

        assert_eq!(once.subtotal, twice.subtotal);
        for (id, entry) in &once.split {
            assert_eq!(entry.amount, twice.split[id].amount);
        }
    }

    #[test]
    fn test_set_price_keeps_sharing_assignments() {
        let (mut ledger, alice, bob, pizza) = ledger_with_pizza();
        ledger.set_dish_price(&pizza, 30.0).unwrap();

        let dish = &ledger.dishes()[0];
        assert!(dish.is_shared_by(&alice));
        assert!(dish.is_shared_by(&bob));
        assert_eq!(dish.price, 30.0);
    }

    #[test]
    fn test_tax_edits_keep_id() {
        let mut ledger = Ledger::new();
        let id = ledger.add_tax("VAT", TaxKind::Percentage, 10.0).id.clone();

        ledger.set_tax_kind(&id, TaxKind::Fixed).unwrap();
        ledger.set_tax_value(&id, 5.0).unwrap();
        ledger.rename_tax(&id, "Service").unwrap();

        let tax = &ledger.taxes()[0];
        assert_eq!(tax.id, id);
        assert_eq!(tax.kind, TaxKind::Fixed);
        assert_eq!(tax.value, 5.0);
        assert_eq!(tax.name, "Service");
    }

    #[test]
    fn test_remove_dish_and_tax() {
        let mut ledger = Ledger::new();
        let dish = ledger.add_dish("Soup", 8.0).id.clone();
        let tax = ledger.add_tax("VAT", TaxKind::Percentage, 10.0).id.clone();

        ledger.remove_dish(&dish).unwrap();
        ledger.remove_tax(&tax).unwrap();
        assert!(ledger.dishes().is_empty());
        assert!(ledger.taxes().is_empty());

        assert!(matches!(
            ledger.remove_dish(&dish).unwrap_err(),
            CoreError::DishNotFound(_)
        ));
        assert!(matches!(
            ledger.remove_tax(&tax).unwrap_err(),
            CoreError::TaxNotFound(_)
        ));
    }

    #[test]
    fn test_summary_end_to_end() {
        let (mut ledger, alice, bob, _) = ledger_with_pizza();
        ledger.add_tax("VAT", TaxKind::Percentage, 10.0);

        let summary = ledger.summary();
        assert_eq!(summary.subtotal, 20.0);
        assert_eq!(summary.total_tax, 2.0);
        assert_eq!(summary.grand_total, 22.0);
        assert_eq!(summary.split[&alice].amount, 11.0);
        assert_eq!(summary.split[&bob].amount, 11.0);
        assert_eq!(summary.split[&alice].name, "Alice");
    }
}
