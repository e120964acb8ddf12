//! Spend Threshold
//!
//! "10% over a spend threshold": evaluated once over the cart's pre-discount
//! subtotal rather than per line. The subtotal must be strictly greater than
//! the threshold; a subtotal exactly at the threshold does not qualify.

use decimal_percentage::Percentage;
use rusty_money::{Money, iso::Currency};

use crate::{
    discounts::{DiscountError, percent_of_minor},
    promotions::{PromotionId, PromotionResult},
};

/// Spend threshold for the standard configuration, in currency minor units.
pub const STANDARD_THRESHOLD_MINOR: i64 = 30_000;

/// A whole-cart percentage discount over a spend threshold.
#[derive(Debug, Clone, Copy)]
pub struct SpendThresholdPromotion {
    threshold: Money<'static, Currency>,
    percent: Percentage,
}

impl SpendThresholdPromotion {
    /// Create a promotion discounting totals strictly above `threshold` by `percent`.
    pub fn new(threshold: Money<'static, Currency>, percent: Percentage) -> Self {
        Self { threshold, percent }
    }

    /// The standard configuration: 10% off totals over 30 000 minor units.
    pub fn standard(currency: &'static Currency) -> Self {
        Self::new(
            Money::from_minor(STANDARD_THRESHOLD_MINOR, currency),
            Percentage::from(0.10),
        )
    }

    /// Return the qualifying threshold.
    pub fn threshold(&self) -> &Money<'static, Currency> {
        &self.threshold
    }

    /// Return the discount percentage.
    pub fn percent(&self) -> &Percentage {
        &self.percent
    }

    /// Evaluate the promotion against a pre-discount subtotal.
    ///
    /// # Errors
    ///
    /// Returns a [`DiscountError`] if the percentage calculation fails.
    pub fn evaluate(
        &self,
        subtotal: &Money<'static, Currency>,
    ) -> Result<PromotionResult, DiscountError> {
        let subtotal_minor = subtotal.to_minor_units();

        if subtotal_minor > self.threshold.to_minor_units() {
            let discount_minor = percent_of_minor(&self.percent, subtotal_minor)?;

            return Ok(PromotionResult {
                id: PromotionId::SpendThreshold,
                discount: Money::from_minor(discount_minor, subtotal.currency()),
                message: format!("Spend discount applied for totals over {}.", self.threshold),
            });
        }

        Ok(PromotionResult {
            id: PromotionId::SpendThreshold,
            discount: Money::from_minor(0, subtotal.currency()),
            message: format!("No spend discount (total at or below {}).", self.threshold),
        })
    }
}
