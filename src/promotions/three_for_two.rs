//! Three For Two
//!
//! "3-for-2 on eligible items": only lines whose product carries the
//! eligibility flag contribute. Every complete group of three units on a line
//! makes one unit free.

use rusty_money::Money;

use crate::{
    cart::Cart,
    discounts::DiscountError,
    promotions::{PromotionId, PromotionResult},
};

/// Every third unit free, on flagged products only.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreeForTwoPromotion;

impl ThreeForTwoPromotion {
    /// Create the promotion.
    pub fn new() -> Self {
        Self
    }

    /// Evaluate the promotion over the cart.
    ///
    /// # Errors
    ///
    /// Returns a [`DiscountError`] if the arithmetic overflows.
    pub fn evaluate(&self, cart: &Cart) -> Result<PromotionResult, DiscountError> {
        let mut discount_minor: i64 = 0;

        for line in cart.lines().iter().filter(|line| line.three_for_two()) {
            let groups = i64::from(line.quantity() / 3);

            let contribution = groups
                .checked_mul(line.unit_price().to_minor_units())
                .ok_or(DiscountError::Overflow)?;

            discount_minor = discount_minor
                .checked_add(contribution)
                .ok_or(DiscountError::Overflow)?;
        }

        Ok(PromotionResult {
            id: PromotionId::ThreeForTwo,
            discount: Money::from_minor(discount_minor, cart.currency()),
            message: "3-for-2 applied on eligible products.".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso;
    use testresult::TestResult;

    use crate::catalog::Product;

    use super::*;

    fn product(id: &str, price_minor: i64, three_for_two: bool) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {id}"),
            price: Money::from_minor(price_minor, iso::ARS),
            three_for_two,
        }
    }

    #[test]
    fn every_complete_group_of_three_frees_one_unit() -> TestResult {
        let mut cart = Cart::new(iso::ARS);
        cart.add_or_increment(&product("a", 10000, true), 3)?;

        let result = ThreeForTwoPromotion::new().evaluate(&cart)?;

        assert_eq!(result.discount, Money::from_minor(10000, iso::ARS));

        Ok(())
    }

    #[test]
    fn ineligible_lines_never_contribute() -> TestResult {
        let mut cart = Cart::new(iso::ARS);
        cart.add_or_increment(&product("a", 10000, false), 5)?;

        let result = ThreeForTwoPromotion::new().evaluate(&cart)?;

        assert_eq!(result.discount, Money::from_minor(0, iso::ARS));

        Ok(())
    }

    #[test]
    fn incomplete_groups_yield_nothing() -> TestResult {
        let mut cart = Cart::new(iso::ARS);
        cart.add_or_increment(&product("a", 10000, true), 2)?;

        let result = ThreeForTwoPromotion::new().evaluate(&cart)?;

        assert_eq!(result.discount, Money::from_minor(0, iso::ARS));

        Ok(())
    }

    #[test]
    fn groups_accumulate_across_eligible_lines() -> TestResult {
        let mut cart = Cart::new(iso::ARS);
        cart.add_or_increment(&product("a", 4000, true), 3)?;
        cart.add_or_increment(&product("b", 10000, true), 3)?;
        cart.add_or_increment(&product("c", 15000, false), 3)?;

        let result = ThreeForTwoPromotion::new().evaluate(&cart)?;

        assert_eq!(result.discount, Money::from_minor(14000, iso::ARS));

        Ok(())
    }
}
