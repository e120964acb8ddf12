//! Session
//!
//! The interaction controller: resolves user input against the catalog,
//! mutates the cart, recomputes the quote and re-renders. Everything is
//! synchronous; the only time-deferred behaviour is the limit notice, which
//! carries its own display deadline instead of scheduling a timer.

use std::time::{Duration, Instant};

use thiserror::Error;

use crate::{
    cart::{AddOutcome, Cart, CartError, MAX_QTY_PER_PRODUCT, RemoveOutcome, SubtotalError},
    catalog::Catalog,
    discounts::DiscountError,
    promotions::Promotions,
    quote::Quote,
    view::{CartView, QuoteView, ViewBinder, ViewError},
};

/// How long a limit notice stays visible.
pub const LIMIT_NOTICE_TTL: Duration = Duration::from_millis(2500);

/// Errors surfaced while recomputing or re-rendering a session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Cart mutation error.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Discount evaluation error.
    #[error(transparent)]
    Discount(#[from] DiscountError),

    /// Line total projection error.
    #[error(transparent)]
    Subtotal(#[from] SubtotalError),

    /// View rendering error.
    #[error(transparent)]
    View(#[from] ViewError),
}

/// Outcome of a session-level add action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddResult {
    /// The cart changed.
    Applied(AddOutcome),

    /// The product id was not in the catalog; the cart is unchanged.
    UnknownProduct,
}

/// A transient, non-blocking notice with a display deadline.
///
/// Purely a display affordance: it never blocks a mutation and expires on
/// its own once the deadline passes.
#[derive(Debug, Clone)]
pub struct Notice {
    message: String,
    raised_at: Instant,
    ttl: Duration,
}

impl Notice {
    fn new(message: String, ttl: Duration) -> Self {
        Self {
            message,
            raised_at: Instant::now(),
            ttl,
        }
    }

    /// The notice text.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether the notice should still be shown at `now`.
    pub fn is_active(&self, now: Instant) -> bool {
        now.duration_since(self.raised_at) < self.ttl
    }
}

/// Normalize raw quantity input to an integer of at least 1.
///
/// Missing, non-numeric, zero or negative input defaults to 1; fractional
/// input is floored.
pub fn normalize_quantity(input: Option<&str>) -> u32 {
    let Some(raw) = input else { return 1 };

    let Ok(value) = raw.trim().parse::<f64>() else {
        return 1;
    };

    if !value.is_finite() || value < 1.0 {
        return 1;
    }

    let floored = value.floor();

    if floored >= f64::from(u32::MAX) {
        return u32::MAX;
    }

    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "bounds checked above"
    )]
    let quantity = floored as u32;

    quantity
}

/// An interactive cart session over a loaded catalog.
#[derive(Debug)]
pub struct Session {
    catalog: Catalog,
    cart: Cart,
    promotions: Promotions,
    notice: Option<Notice>,
    notice_ttl: Duration,
}

impl Session {
    /// Create a session with the standard promotion set.
    pub fn new(catalog: Catalog) -> Self {
        let promotions = Promotions::standard(catalog.currency());

        Self::with_promotions(catalog, promotions)
    }

    /// Create a session with an explicitly configured promotion set.
    pub fn with_promotions(catalog: Catalog, promotions: Promotions) -> Self {
        let cart = Cart::new(catalog.currency());

        Session {
            catalog,
            cart,
            promotions,
            notice: None,
            notice_ttl: LIMIT_NOTICE_TTL,
        }
    }

    /// Override how long limit notices stay visible.
    pub fn with_notice_ttl(mut self, ttl: Duration) -> Self {
        self.notice_ttl = ttl;
        self
    }

    /// The loaded catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The current cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Add a product by id with raw quantity input.
    ///
    /// An unknown id leaves the cart untouched. A clamped add raises the
    /// limit notice.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the product's currency differs from the
    /// cart currency.
    pub fn add(
        &mut self,
        product_id: &str,
        quantity_input: Option<&str>,
    ) -> Result<AddResult, CartError> {
        let Some(product) = self.catalog.get(product_id) else {
            return Ok(AddResult::UnknownProduct);
        };

        let quantity = normalize_quantity(quantity_input);
        let outcome = self.cart.add_or_increment(product, quantity)?;

        if outcome.clamped() {
            self.notice = Some(Notice::new(
                format!("Quantity is capped at {MAX_QTY_PER_PRODUCT} per product."),
                self.notice_ttl,
            ));
        }

        Ok(AddResult::Applied(outcome))
    }

    /// Remove the cart line at the given position; out-of-range is a no-op.
    pub fn remove(&mut self, index: usize) -> RemoveOutcome {
        self.cart.remove_line(index)
    }

    /// Evaluate the promotion set over the current cart.
    ///
    /// # Errors
    ///
    /// Returns a [`DiscountError`] if a discount calculation fails.
    pub fn quote(&self) -> Result<Quote, DiscountError> {
        self.promotions.quote(&self.cart)
    }

    /// The live limit notice, if one is active right now.
    pub fn notice(&self) -> Option<&str> {
        self.notice_at(Instant::now())
    }

    /// The live limit notice as of `now`.
    pub fn notice_at(&self, now: Instant) -> Option<&str> {
        self.notice
            .as_ref()
            .filter(|notice| notice.is_active(now))
            .map(Notice::message)
    }

    /// Drop the limit notice ahead of its deadline.
    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    /// Recompute the quote and render the full view.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] if evaluation or rendering fails.
    pub fn render(&self, binder: &mut impl ViewBinder) -> Result<(), SessionError> {
        let quote = self.quote()?;

        let cart_view = CartView::project(&self.cart, self.notice())?;
        let quote_view = QuoteView::project(&quote);

        binder.render(&cart_view, &quote_view)?;

        Ok(())
    }
}
