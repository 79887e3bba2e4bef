//! # Tax Accumulator
//!
//! Reduces a list of taxes plus a subtotal into a total tax amount and a
//! per-tax contribution line.
//!
//! ## Where This Sits
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  dishes ──► subtotal ──► compute_taxes() ──► TaxBreakdown              │
//! │                               │                   │                     │
//! │                               │                   ├── per_tax lines    │
//! │                               │                   │   (summary view)    │
//! │                               │                   │                     │
//! │                               │                   └── total             │
//! │                               │                       │                 │
//! │                               │                       ▼                 │
//! │                               │              grand_total = subtotal     │
//! │                               │                          + total        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Pure function of its inputs: no side effects, no error conditions.
//! Percentage taxes resolve against the subtotal of ALL dishes, including
//! dishes nobody is sharing.

use crate::types::{Tax, TaxKind, TaxLine};

// =============================================================================
// Tax Breakdown
// =============================================================================

/// Result of accumulating taxes over a subtotal.
#[derive(Debug, Clone, PartialEq)]
pub struct TaxBreakdown {
    /// One line per tax, in input order.
    pub per_tax: Vec<TaxLine>,

    /// Sum of all contributions.
    pub total: f64,
}

impl TaxBreakdown {
    /// An empty breakdown (no taxes).
    pub fn empty() -> Self {
        TaxBreakdown {
            per_tax: Vec::new(),
            total: 0.0,
        }
    }
}

// =============================================================================
// Accumulation
// =============================================================================

/// Computes one tax's contribution against a subtotal.
///
/// Negative values are a boundary-validation concern; if one slips through
/// it is clamped to zero rather than producing a negative contribution.
fn contribution(subtotal: f64, tax: &Tax) -> f64 {
    let value = tax.value.max(0.0);
    match tax.kind {
        TaxKind::Percentage => subtotal * value / 100.0,
        TaxKind::Fixed => value,
    }
}

/// Accumulates all taxes over a subtotal.
///
/// ## Example
/// ```rust
/// use splitbill_core::tax::compute_taxes;
/// use splitbill_core::types::{Tax, TaxKind};
///
/// let vat = Tax {
///     id: "t1".to_string(),
///     name: "VAT".to_string(),
///     kind: TaxKind::Percentage,
///     value: 10.0,
/// };
/// let breakdown = compute_taxes(20.0, &[vat]);
/// assert_eq!(breakdown.total, 2.0);
/// ```
pub fn compute_taxes(subtotal: f64, taxes: &[Tax]) -> TaxBreakdown {
    let mut breakdown = TaxBreakdown::empty();
    for tax in taxes {
        let amount = contribution(subtotal, tax);
        breakdown.per_tax.push(TaxLine {
            tax_id: tax.id.clone(),
            amount,
        });
        breakdown.total += amount;
    }
    breakdown
}

// =============================================================================
// Unit Tests
// =============================================================================
