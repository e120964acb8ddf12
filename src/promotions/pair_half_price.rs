//! Pair Half Price
//!
//! "Buy 2, get the second at 50%": for each cart line, every complete pair
//! within that line's own quantity discounts one unit by the configured
//! percentage. Pairing never crosses product boundaries, and the product's
//! eligibility flag plays no part here.

use decimal_percentage::Percentage;
use rusty_money::Money;

use crate::{
    cart::Cart,
    discounts::{DiscountError, percent_of_minor},
    promotions::{PromotionId, PromotionResult},
};

/// A per-pair discount on the second unit of the same product.
#[derive(Debug, Clone, Copy)]
pub struct PairHalfPricePromotion {
    percent: Percentage,
}

impl PairHalfPricePromotion {
    /// Create a promotion discounting the second unit of each pair by `percent`.
    pub fn new(percent: Percentage) -> Self {
        Self { percent }
    }

    /// The standard configuration: second unit at 50% off.
    pub fn standard() -> Self {
        Self::new(Percentage::from(0.5))
    }

    /// Return the discount percentage.
    pub fn percent(&self) -> &Percentage {
        &self.percent
    }

    /// Evaluate the promotion over the cart.
    ///
    /// Sums one unit price per complete pair on each line, then applies the
    /// percentage once so rounding happens a single time at the end.
    ///
    /// # Errors
    ///
    /// Returns a [`DiscountError`] if the arithmetic overflows.
    pub fn evaluate(&self, cart: &Cart) -> Result<PromotionResult, DiscountError> {
        let mut pairable_minor: i64 = 0;

        for line in cart.lines() {
            let pairs = i64::from(line.quantity() / 2);

            let contribution = pairs
                .checked_mul(line.unit_price().to_minor_units())
                .ok_or(DiscountError::Overflow)?;

            pairable_minor = pairable_minor
                .checked_add(contribution)
                .ok_or(DiscountError::Overflow)?;
        }

        let discount_minor = percent_of_minor(&self.percent, pairable_minor)?;

        Ok(PromotionResult {
            id: PromotionId::PairHalfPrice,
            discount: Money::from_minor(discount_minor, cart.currency()),
            message: "Second unit at half price applied on product pairs.".to_string(),
        })
    }
}
