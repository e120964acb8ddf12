//! Console view
//!
//! Renders the cart table, the promotion comparison panel and the totals to
//! any [`io::Write`] sink.

use std::io;

use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};

use crate::view::{CartView, QuoteView, ViewBinder, ViewError};

/// A [`ViewBinder`] that writes tables and labels to an output sink.
#[derive(Debug)]
pub struct ConsoleView<W> {
    out: W,
}

impl<W: io::Write> ConsoleView<W> {
    /// Create a console view over the given sink.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Consume the view and return the underlying sink.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_cart_table(&mut self, cart: &CartView) -> Result<(), ViewError> {
        if cart.rows.is_empty() {
            writeln!(self.out, "\nCart is empty.")?;
            return Ok(());
        }

        let mut builder = Builder::default();

        builder.push_record(["#", "Item", "Unit Price", "Qty", "Line Total"]);

        for row in &cart.rows {
            builder.push_record([
                format!("#{}", row.index + 1),
                row.name.clone(),
                row.unit_price.clone(),
                row.quantity.to_string(),
                row.line_total.clone(),
            ]);
        }

        let mut table = builder.build();
        table.with(Style::modern_rounded());
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(2..5), Alignment::right());

        writeln!(self.out, "\n{table}")?;

        Ok(())
    }

    fn write_comparison_table(&mut self, quote: &QuoteView) -> Result<(), ViewError> {
        let mut builder = Builder::default();

        builder.push_record(["Promotion", "Discount"]);

        for line in &quote.comparisons {
            builder.push_record([line.label.clone(), line.discount.clone()]);
        }

        let mut table = builder.build();
        table.with(Style::modern_rounded());
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(1..2), Alignment::right());

        for (index, line) in quote.comparisons.iter().enumerate() {
            if line.applied {
                table.modify((index + 1, 0), Color::FG_GREEN);
                table.modify((index + 1, 1), Color::FG_GREEN);
            }
        }

        writeln!(self.out, "{table}")?;

        Ok(())
    }

    fn write_summary(&mut self, quote: &QuoteView) -> Result<(), ViewError> {
        writeln!(self.out, "{}", quote.recommendation)?;
        writeln!(self.out)?;
        writeln!(self.out, " Subtotal: {}", quote.subtotal)?;
        writeln!(self.out, " Discount: {}", quote.discount)?;
        writeln!(self.out, " \x1b[1mTotal:    {}\x1b[0m", quote.total)?;

        Ok(())
    }
}

impl<W: io::Write> ViewBinder for ConsoleView<W> {
    fn render(&mut self, cart: &CartView, quote: &QuoteView) -> Result<(), ViewError> {
        if let Some(notice) = &cart.notice {
            writeln!(self.out, "\n\x1b[33m{notice}\x1b[0m")?;
        }

        self.write_cart_table(cart)?;
        self.write_comparison_table(quote)?;
        self.write_summary(quote)?;

        Ok(())
    }
}
