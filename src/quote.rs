//! Quote
//!
//! The evaluated outcome of a cart snapshot: the pre-discount subtotal, one
//! result per promotion, the single applied promotion, and the final total.
//! Recomputed from scratch on every cart change, never persisted.

use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;

use crate::promotions::PromotionResult;

/// Evaluated promotion comparison for one cart snapshot.
#[derive(Debug, Clone)]
pub struct Quote {
    subtotal: Money<'static, Currency>,
    results: SmallVec<[PromotionResult; 3]>,
    applied: Option<usize>,
    total: Money<'static, Currency>,
}

impl Quote {
    /// Select the applied promotion and compute the final total.
    ///
    /// The applied promotion is the one with the strictly largest discount;
    /// a tie keeps the earlier-listed result, and an all-zero comparison
    /// applies nothing. The final total is `subtotal - discount`, clamped at
    /// zero.
    pub fn from_results(
        subtotal: Money<'static, Currency>,
        results: SmallVec<[PromotionResult; 3]>,
    ) -> Self {
        let mut applied = None;
        let mut best_minor = 0_i64;

        for (index, result) in results.iter().enumerate() {
            let discount_minor = result.discount.to_minor_units();

            if discount_minor > best_minor {
                best_minor = discount_minor;
                applied = Some(index);
            }
        }

        let total_minor = subtotal.to_minor_units().saturating_sub(best_minor).max(0);
        let total = Money::from_minor(total_minor, subtotal.currency());

        Quote {
            subtotal,
            results,
            applied,
            total,
        }
    }

    /// Total cost before any promotion is applied.
    pub fn subtotal(&self) -> Money<'static, Currency> {
        self.subtotal
    }

    /// Total cost after the applied promotion, never negative.
    pub fn total(&self) -> Money<'static, Currency> {
        self.total
    }

    /// Every promotion result, in evaluation order.
    pub fn results(&self) -> &[PromotionResult] {
        &self.results
    }

    /// The applied promotion, if any discount was greater than zero.
    pub fn applied(&self) -> Option<&PromotionResult> {
        self.applied.and_then(|index| self.results.get(index))
    }

    /// Position of the applied promotion within [`Quote::results`].
    pub fn applied_index(&self) -> Option<usize> {
        self.applied
    }

    /// The discount taken off the subtotal: the applied promotion's discount,
    /// or zero when nothing applies.
    pub fn savings(&self) -> Money<'static, Currency> {
        self.applied().map_or_else(
            || Money::from_minor(0, self.subtotal.currency()),
            |result| result.discount,
        )
    }
}
