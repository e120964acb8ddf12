//! Promotions
//!
//! The three promotional discount rules, each evaluated independently over
//! every cart snapshot. Evaluation is unconditional so the rules can be
//! compared side by side; selection of the applied rule happens in
//! [`Quote::from_results`](crate::quote::Quote::from_results).

use rusty_money::{Money, iso::Currency};
use smallvec::{SmallVec, smallvec};

use crate::{cart::Cart, discounts::DiscountError, quote::Quote};

pub mod pair_half_price;
pub mod spend_threshold;
pub mod three_for_two;

use pair_half_price::PairHalfPricePromotion;
use spend_threshold::SpendThresholdPromotion;
use three_for_two::ThreeForTwoPromotion;

/// Identifies one of the promotion rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromotionId {
    /// Buy 2, second at a percentage off, paired within each product.
    PairHalfPrice,

    /// 3-for-2 on eligible products.
    ThreeForTwo,

    /// Percentage off the whole cart over a spend threshold.
    SpendThreshold,
}

impl PromotionId {
    /// Short display label for the comparison panel.
    pub fn label(self) -> &'static str {
        match self {
            PromotionId::PairHalfPrice => "Buy 2, second at 50% off",
            PromotionId::ThreeForTwo => "3-for-2 on eligible items",
            PromotionId::SpendThreshold => "10% over spend threshold",
        }
    }
}

/// Result of evaluating a single promotion over a cart snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct PromotionResult {
    /// Which promotion produced this result.
    pub id: PromotionId,

    /// Non-negative discount amount in the cart currency.
    pub discount: Money<'static, Currency>,

    /// Human-readable outcome message.
    pub message: String,
}

/// The ordered promotion set evaluated over every cart snapshot.
///
/// Listing order matters: it is the display order of the comparison panel and
/// the tie-break order when two promotions produce the same discount.
#[derive(Debug)]
pub struct Promotions {
    pair_half_price: PairHalfPricePromotion,
    three_for_two: ThreeForTwoPromotion,
    spend_threshold: SpendThresholdPromotion,
}

impl Promotions {
    /// Create a promotion set from explicitly configured rules.
    pub fn new(
        pair_half_price: PairHalfPricePromotion,
        three_for_two: ThreeForTwoPromotion,
        spend_threshold: SpendThresholdPromotion,
    ) -> Self {
        Self {
            pair_half_price,
            three_for_two,
            spend_threshold,
        }
    }

    /// The standard configuration: second unit at 50% per pair, 3-for-2 on
    /// eligible products, and 10% off totals over 30 000 minor units.
    pub fn standard(currency: &'static Currency) -> Self {
        Self::new(
            PairHalfPricePromotion::standard(),
            ThreeForTwoPromotion::new(),
            SpendThresholdPromotion::standard(currency),
        )
    }

    /// Evaluate every promotion over the cart and build a [`Quote`].
    ///
    /// # Errors
    ///
    /// Returns a [`DiscountError`] if the subtotal or a discount calculation
    /// fails.
    pub fn quote(&self, cart: &Cart) -> Result<Quote, DiscountError> {
        let subtotal = cart.subtotal()?;

        let results: SmallVec<[PromotionResult; 3]> = smallvec![
            self.pair_half_price.evaluate(cart)?,
            self.three_for_two.evaluate(cart)?,
            self.spend_threshold.evaluate(&subtotal)?,
        ];

        Ok(Quote::from_results(subtotal, results))
    }
}
