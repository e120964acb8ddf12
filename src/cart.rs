//! Cart
//!
//! An ordered collection of cart lines, one per product id. Quantities are
//! capped per product; adding past the cap clamps and reports it so callers
//! can surface a transient notice.

use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::catalog::Product;

/// Maximum quantity a single cart line may hold.
pub const MAX_QTY_PER_PRODUCT: u32 = 5;

/// Errors related to cart mutation.
#[derive(Debug, Error)]
pub enum CartError {
    /// A product's price currency differs from the cart currency.
    #[error("Product {id} has currency {actual}, but cart has currency {expected}")]
    CurrencyMismatch {
        /// Id of the product being added.
        id: String,

        /// Cart currency code.
        expected: &'static str,

        /// The product price's currency code.
        actual: &'static str,
    },
}

/// Errors that can occur while totalling cart lines.
#[derive(Debug, Error, PartialEq)]
pub enum SubtotalError {
    /// A line total exceeded the representable range.
    #[error("Line total for {0} overflowed")]
    Overflow(String),

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Outcome of an add-or-increment operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new line was created.
    Added {
        /// Whether the requested quantity was clamped to the cap.
        clamped: bool,
    },

    /// An existing line's quantity was increased.
    Incremented {
        /// Whether the resulting quantity was clamped to the cap.
        clamped: bool,
    },
}

impl AddOutcome {
    /// Whether the cap forced a smaller quantity than requested.
    pub fn clamped(self) -> bool {
        match self {
            AddOutcome::Added { clamped } | AddOutcome::Incremented { clamped } => clamped,
        }
    }
}

/// Outcome of a positional line removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The line at the given position was removed.
    Removed,

    /// The index was outside the current cart bounds; nothing changed.
    OutOfRange,
}

/// One aggregated cart entry per product.
///
/// Lines copy the product's id, name, price and eligibility flag at add time;
/// they are not live-linked to the catalog.
#[derive(Debug, Clone)]
pub struct CartLine {
    product_id: String,
    name: String,
    unit_price: Money<'static, Currency>,
    three_for_two: bool,
    quantity: u32,
}

impl CartLine {
    /// Id of the product this line aggregates.
    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    /// Product display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit price copied from the catalog at add time.
    pub fn unit_price(&self) -> &Money<'static, Currency> {
        &self.unit_price
    }

    /// Whether the product participates in the 3-for-2 promotion.
    pub fn three_for_two(&self) -> bool {
        self.three_for_two
    }

    /// Quantity on this line, always in `1..=MAX_QTY_PER_PRODUCT`.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Price × quantity for this line.
    ///
    /// # Errors
    ///
    /// Returns a [`SubtotalError`] if the multiplication overflows.
    pub fn line_total(&self) -> Result<Money<'static, Currency>, SubtotalError> {
        let minor = self
            .unit_price
            .to_minor_units()
            .checked_mul(i64::from(self.quantity))
            .ok_or_else(|| SubtotalError::Overflow(self.product_id.clone()))?;

        Ok(Money::from_minor(minor, self.unit_price.currency()))
    }
}

/// Cart
#[derive(Debug)]
pub struct Cart {
    lines: Vec<CartLine>,
    currency: &'static Currency,
}

impl Cart {
    /// Create an empty cart for the given currency.
    pub fn new(currency: &'static Currency) -> Self {
        Cart {
            lines: Vec::new(),
            currency,
        }
    }

    /// Add a product to the cart, or increase its existing line.
    ///
    /// The requested quantity is treated as at least 1. An existing line for
    /// the same product id is incremented; either way the resulting quantity
    /// is clamped to [`MAX_QTY_PER_PRODUCT`] and the outcome reports whether
    /// clamping occurred.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the product's price currency differs from
    /// the cart currency.
    pub fn add_or_increment(
        &mut self,
        product: &Product,
        requested_qty: u32,
    ) -> Result<AddOutcome, CartError> {
        let price_currency = product.price.currency();
        if price_currency != self.currency {
            return Err(CartError::CurrencyMismatch {
                id: product.id.clone(),
                expected: self.currency.iso_alpha_code,
                actual: price_currency.iso_alpha_code,
            });
        }

        let requested_qty = requested_qty.max(1);

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product_id == product.id)
        {
            let desired = line.quantity.saturating_add(requested_qty);
            let clamped = desired > MAX_QTY_PER_PRODUCT;

            line.quantity = desired.min(MAX_QTY_PER_PRODUCT);

            return Ok(AddOutcome::Incremented { clamped });
        }

        let clamped = requested_qty > MAX_QTY_PER_PRODUCT;

        self.lines.push(CartLine {
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit_price: product.price,
            three_for_two: product.three_for_two,
            quantity: requested_qty.min(MAX_QTY_PER_PRODUCT),
        });

        Ok(AddOutcome::Added { clamped })
    }

    /// Remove the line at the given position.
    ///
    /// Indices are positional within the current ordered sequence; removing a
    /// line shifts subsequent indices. An out-of-range index is a no-op.
    pub fn remove_line(&mut self, index: usize) -> RemoveOutcome {
        if index >= self.lines.len() {
            return RemoveOutcome::OutOfRange;
        }

        self.lines.remove(index);

        RemoveOutcome::Removed
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of lines in the cart.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart holds no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Currency of the cart.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Sum of price × quantity across all lines, before any discount.
    ///
    /// # Errors
    ///
    /// Returns a [`SubtotalError`] if a line total overflows or money
    /// arithmetic fails.
    pub fn subtotal(&self) -> Result<Money<'static, Currency>, SubtotalError> {
        self.lines.iter().try_fold(
            Money::from_minor(0, self.currency),
            |acc, line| Ok(acc.add(line.line_total()?)?),
        )
    }
}
