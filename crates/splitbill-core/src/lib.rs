//! # splitbill-core: Pure Business Logic for Splitbill
//!
//! This crate is the **heart** of Splitbill. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Splitbill Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   Form layer (apps/cli)                         │   │
//! │  │    People form ──► Dish form ──► Tax form ──► Summary view     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ validated input / BillSummary          │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ splitbill-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │    tax    │  │   split   │  │  ledger   │  │   │
//! │  │   │  Person   │  │ TaxBreak- │  │ Allocation│  │ lifecycle │  │   │
//! │  │   │ Dish, Tax │  │   down    │  │  engine   │  │ + cascade │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO PERSISTENCE • NO CLOCK • PURE FUNCTIONS          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Person, Dish, Tax) and boundary DTOs
//! - [`tax`] - Tax accumulator (percentage-of-subtotal and fixed taxes)
//! - [`split`] - Proportional allocation engine
//! - [`ledger`] - Owned entity collections with lifecycle operations
//! - [`error`] - Domain error types
//! - [`validation`] - Boundary-side input validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every derived value is recomputed from the current
//!    entity collections on every read - there is no cached state to go stale
//! 2. **No I/O**: Terminal, file system, and network access are FORBIDDEN here
//! 3. **One Numeric Type**: All monetary values are IEEE-754 `f64`; the
//!    conservation property (Σ owed == grand total) is stated up to a
//!    floating-point epsilon, so a single consistent double type is required
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use splitbill_core::{Ledger, TaxKind};
//!
//! let mut ledger = Ledger::new();
//! let alice = ledger.add_person("Alice").id.clone();
//! let bob = ledger.add_person("Bob").id.clone();
//!
//! let pizza = ledger.add_dish("Pizza", 20.0).id.clone();
//! ledger.toggle_shared(&pizza, &alice).unwrap();
//! ledger.toggle_shared(&pizza, &bob).unwrap();
//!
//! ledger.add_tax("VAT", TaxKind::Percentage, 10.0);
//!
//! let summary = ledger.summary();
//! assert_eq!(summary.grand_total, 22.0);
//! assert_eq!(summary.split[&alice].amount, 11.0);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod ledger;
pub mod split;
pub mod tax;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use splitbill_core::Ledger` instead of
// `use splitbill_core::ledger::Ledger`

pub use error::{CoreError, CoreResult, ValidationError};
pub use ledger::Ledger;
pub use split::{compute_split, subtotal, summarize};
pub use tax::{compute_taxes, TaxBreakdown};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a person, dish, or tax name.
///
/// ## Business Reason
/// Names are display labels on a bill summary; anything longer than this is
/// a paste accident, not a name. Enforced at the form boundary, never inside
/// the allocation engine.
pub const MAX_NAME_LEN: usize = 200;
