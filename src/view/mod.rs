//! View binding
//!
//! Pure projection of cart and quote state into display form. View models
//! hold pre-formatted strings only; a [`ViewBinder`] implementation decides
//! where they end up. The calculation core never touches a presentation
//! surface, so it can be tested without one.

use std::io;

use thiserror::Error;

use crate::{
    cart::{Cart, SubtotalError},
    catalog::Catalog,
    quote::Quote,
};

pub mod console;

/// Errors raised while rendering a view.
#[derive(Debug, Error)]
pub enum ViewError {
    /// Failed to write rendered output.
    #[error("Failed to write view output: {0}")]
    Io(#[from] io::Error),
}

/// Renders projected cart and quote state.
///
/// Implementations hold no cart state of their own; the full view is
/// recomputed and re-rendered on every mutation.
pub trait ViewBinder {
    /// Render one complete snapshot.
    ///
    /// # Errors
    ///
    /// Returns a [`ViewError`] if the output surface fails.
    fn render(&mut self, cart: &CartView, quote: &QuoteView) -> Result<(), ViewError>;
}

/// One selectable product in the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerOption {
    /// Product id submitted by add actions.
    pub id: String,

    /// Display label: name and unit price.
    pub label: String,
}

/// Build picker options from the catalog, in catalog order.
pub fn picker_options(catalog: &Catalog) -> Vec<PickerOption> {
    catalog
        .products()
        .map(|product| PickerOption {
            id: product.id.clone(),
            label: format!("{} - {}", product.name, product.price),
        })
        .collect()
}

/// Render model for one cart line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartRowView {
    /// Zero-based position, the index a removal targets.
    pub index: usize,

    /// Product display name.
    pub name: String,

    /// Unit price.
    pub unit_price: String,

    /// Quantity on the line.
    pub quantity: u32,

    /// Price × quantity.
    pub line_total: String,
}

/// Render model for the cart table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    /// One row per cart line, in cart order.
    pub rows: Vec<CartRowView>,

    /// Transient limit notice, when one is live.
    pub notice: Option<String>,
}

impl CartView {
    /// Project a cart snapshot into display rows.
    ///
    /// # Errors
    ///
    /// Returns a [`SubtotalError`] if a line total overflows.
    pub fn project(cart: &Cart, notice: Option<&str>) -> Result<Self, SubtotalError> {
        let mut rows = Vec::with_capacity(cart.len());

        for (index, line) in cart.lines().iter().enumerate() {
            rows.push(CartRowView {
                index,
                name: line.name().to_string(),
                unit_price: line.unit_price().to_string(),
                quantity: line.quantity(),
                line_total: line.line_total()?.to_string(),
            });
        }

        Ok(CartView {
            rows,
            notice: notice.map(ToString::to_string),
        })
    }
}

/// Render model for one promotion in the comparison panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromotionLineView {
    /// Promotion display label.
    pub label: String,

    /// Computed discount amount.
    pub discount: String,

    /// Whether this promotion is the applied one.
    pub applied: bool,
}

/// Render model for the quote panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteView {
    /// One line per promotion, in evaluation order.
    pub comparisons: Vec<PromotionLineView>,

    /// Recommendation naming the applied promotion and its saving.
    pub recommendation: String,

    /// Pre-discount subtotal.
    pub subtotal: String,

    /// Discount taken off the subtotal.
    pub discount: String,

    /// Final total after the applied promotion.
    pub total: String,
}

impl QuoteView {
    /// Project a quote into display form.
    pub fn project(quote: &Quote) -> Self {
        let applied_index = quote.applied_index();

        let comparisons = quote
            .results()
            .iter()
            .enumerate()
            .map(|(index, result)| PromotionLineView {
                label: result.id.label().to_string(),
                discount: result.discount.to_string(),
                applied: applied_index == Some(index),
            })
            .collect();

        let recommendation = quote.applied().map_or_else(
            || "No promotion reduces this total.".to_string(),
            |result| format!("Recommended: {} Saving: {}", result.message, result.discount),
        );

        QuoteView {
            comparisons,
            recommendation,
            subtotal: quote.subtotal().to_string(),
            discount: quote.savings().to_string(),
            total: quote.total().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso};
    use testresult::TestResult;

    use crate::{catalog::Product, promotions::Promotions};

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
    fn picker_options_follow_catalog_order() -> TestResult {
        let catalog = Catalog::from_products(
            iso::ARS,
            [product("a", 12000, false), product("b", 4000, true)],
        )?;

        let options = picker_options(&catalog);

        let ids: Vec<&str> = options.iter().map(|option| option.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
        assert!(options[0].label.starts_with("Product a - "));

        Ok(())
    }

    #[test]
    fn cart_view_carries_indices_and_line_totals() -> TestResult {
        let mut cart = Cart::new(iso::ARS);
        cart.add_or_increment(&product("a", 12000, false), 2)?;
        cart.add_or_increment(&product("b", 4000, true), 1)?;

        let view = CartView::project(&cart, None)?;

        assert_eq!(view.rows.len(), 2);
        assert_eq!(view.rows[0].index, 0);
        assert_eq!(view.rows[0].quantity, 2);
        assert_eq!(
            view.rows[0].line_total,
            Money::from_minor(24000, iso::ARS).to_string()
        );
        assert!(view.notice.is_none());

        Ok(())
    }

    #[test]
    fn cart_view_surfaces_the_notice() -> TestResult {
        let cart = Cart::new(iso::ARS);

        let view = CartView::project(&cart, Some("limit reached"))?;

        assert_eq!(view.notice.as_deref(), Some("limit reached"));

        Ok(())
    }

    #[test]
    fn quote_view_flags_the_applied_promotion() -> TestResult {
        let mut cart = Cart::new(iso::ARS);
        cart.add_or_increment(&product("a", 10000, true), 3)?;

        let quote = Promotions::standard(iso::ARS).quote(&cart)?;
        let view = QuoteView::project(&quote);

        let applied: Vec<bool> = view.comparisons.iter().map(|line| line.applied).collect();
        assert_eq!(applied, [false, true, false]);
        assert!(view.recommendation.starts_with("Recommended:"));

        Ok(())
    }

    #[test]
    fn quote_view_reports_no_recommendation_for_empty_cart() -> TestResult {
        let cart = Cart::new(iso::ARS);

        let quote = Promotions::standard(iso::ARS).quote(&cart)?;
        let view = QuoteView::project(&quote);

        assert_eq!(view.recommendation, "No promotion reduces this total.");
        assert_eq!(view.discount, Money::from_minor(0, iso::ARS).to_string());

        Ok(())
    }
}
