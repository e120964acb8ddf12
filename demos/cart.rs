//! Interactive Cart Demo
//!
//! Drives a cart session from stdin, re-rendering the cart, the promotion
//! comparison and the totals after every mutation.
//!
//! Commands:
//!   add <product-id> [qty]   add a product (quantity defaults to 1)
//!   remove <row>             remove the cart row shown as #<row>
//!   list                     re-render without mutating
//!   quit                     exit
//!
//! Use `-f` to load a catalog fixture set by name from `./fixtures`.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::Parser;

use tally::{
    catalog::Catalog,
    session::{AddResult, Session},
    view::{console::ConsoleView, picker_options},
};

/// Arguments for the interactive cart demo
#[derive(Debug, Parser)]
struct Args {
    /// Catalog fixture set to load from `./fixtures`
    #[clap(short, long, default_value = "comics")]
    fixture: String,
}

/// Interactive Cart Demo
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    let args = Args::parse();

    let catalog = Catalog::from_set(&args.fixture)?;
    let mut session = Session::new(catalog);
    let mut view = ConsoleView::new(io::stdout());

    println!("Products:");
    for option in picker_options(session.catalog()) {
        println!("  {:<18} {}", option.id, option.label);
    }
    println!("\nCommands: add <product-id> [qty] | remove <row> | list | quit");

    session.render(&mut view)?;

    let stdin = io::stdin();
    loop {
        print!("\n> ");
        io::stdout().flush()?;

        let Some(line) = stdin.lock().lines().next() else {
            break;
        };
        let line = line?;

        let mut parts = line.split_whitespace();
        match parts.next() {
            Some("add") => {
                let Some(product_id) = parts.next() else {
                    println!("Usage: add <product-id> [qty]");
                    continue;
                };

                if session.add(product_id, parts.next())? == AddResult::UnknownProduct {
                    println!("Unknown product: {product_id}");
                    continue;
                }

                session.render(&mut view)?;
            }
            Some("remove") => {
                let row = parts.next().and_then(|raw| raw.parse::<usize>().ok());

                let Some(row) = row.filter(|row| *row >= 1) else {
                    println!("Usage: remove <row>");
                    continue;
                };

                session.remove(row - 1);
                session.render(&mut view)?;
            }
            Some("list") => session.render(&mut view)?,
            Some("quit" | "exit") => break,
            Some(other) => println!("Unknown command: {other}"),
            None => {}
        }
    }

    Ok(())
}
