//! # Splitbill CLI
//!
//! Interactive terminal form for building a shared bill and viewing the
//! computed split. This is the collaborator boundary: it collects names,
//! prices, taxes, and sharing assignments, validates everything before an
//! entity is constructed, and renders the recomputed summary after every
//! mutation. No allocation semantics live here.
//!
//! ## Session
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  > person add Alice                                                     │
//! │  > person add Bob                                                       │
//! │  > dish add 20 Pizza                                                    │
//! │  > share 1 1          (dish #1 ↔ person #1)                            │
//! │  > share 1 2                                                            │
//! │  > tax add percentage 10 VAT                                            │
//! │  > bill                                                                 │
//! │      Subtotal ......... 20.00                                           │
//! │      VAT (10%) ........  2.00                                           │
//! │      Grand total ...... 22.00                                           │
//! │      Alice ............ 11.00                                           │
//! │      Bob .............. 11.00                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Entities are addressed by their 1-based list position; UUIDs stay an
//! internal concern of the core.

use std::io::{self, BufRead, Write};

use thiserror::Error;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use splitbill_core::validation::{parse_amount, validate_name};
use splitbill_core::{BillSummary, CoreError, Ledger, TaxKind, ValidationError};

// =============================================================================
// Boundary Error
// =============================================================================

/// What the user sees when a command fails. Wraps the core's typed errors
/// plus command-grammar mistakes that never reach the core.
#[derive(Debug, Error)]
enum AppError {
    #[error("{0}")]
    Core(#[from] CoreError),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Usage(String),
}

fn usage(message: impl Into<String>) -> AppError {
    AppError::Usage(message.into())
}

/// What a successfully executed command asks the loop to do next.
enum Outcome {
    /// Nothing changed (help, lists, summary, blank line).
    Continue,
    /// The ledger changed; re-render the summary.
    Mutated,
    /// Leave the loop.
    Quit,
}

// =============================================================================
// Entry Point
// =============================================================================

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut ledger = Ledger::new();

    println!("Splitbill - type 'help' for commands, 'quit' to leave.");

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }

        match execute(&mut ledger, line.trim()) {
            Ok(Outcome::Quit) => break,
            Ok(Outcome::Mutated) => render_summary(&ledger),
            Ok(Outcome::Continue) => {}
            Err(err) => println!("error: {}", err),
        }
    }

    Ok(())
}

// =============================================================================
// Command Dispatch
// =============================================================================

fn execute(ledger: &mut Ledger, line: &str) -> Result<Outcome, AppError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some((&command, args)) = tokens.split_first() else {
        return Ok(Outcome::Continue);
    };
    debug!(command, "executing");

    match command {
        "help" => {
            print_help();
            Ok(Outcome::Continue)
        }
        "quit" | "exit" => Ok(Outcome::Quit),
        "list" => {
            render_lists(ledger);
            Ok(Outcome::Continue)
        }
        "bill" | "summary" => {
            render_summary(ledger);
            Ok(Outcome::Continue)
        }
        "person" => person_command(ledger, args),
        "dish" => dish_command(ledger, args),
        "share" => share_command(ledger, args),
        "tax" => tax_command(ledger, args),
        other => Err(usage(format!(
            "unknown command '{}', type 'help' for the list",
            other
        ))),
    }
}

fn person_command(ledger: &mut Ledger, args: &[&str]) -> Result<Outcome, AppError> {
    match args {
        ["add", name @ ..] => {
            let name = validate_name("person name", &name.join(" "))?;
            let person = ledger.add_person(name);
            println!("added person {}", person.name);
        }
        ["rename", index, name @ ..] => {
            let id = person_id(ledger, index)?;
            let name = validate_name("person name", &name.join(" "))?;
            ledger.rename_person(&id, name)?;
        }
        ["rm", index] => {
            let id = person_id(ledger, index)?;
            ledger.remove_person(&id)?;
        }
        _ => return Err(usage("usage: person add <name> | rename <n> <name> | rm <n>")),
    }
    Ok(Outcome::Mutated)
}

fn dish_command(ledger: &mut Ledger, args: &[&str]) -> Result<Outcome, AppError> {
    match args {
        ["add", price, name @ ..] => {
            let price = parse_amount("price", price)?;
            let name = validate_name("dish name", &name.join(" "))?;
            let dish = ledger.add_dish(name, price);
            println!("added dish {}", dish.name);
        }
        ["rename", index, name @ ..] => {
            let id = dish_id(ledger, index)?;
            let name = validate_name("dish name", &name.join(" "))?;
            ledger.rename_dish(&id, name)?;
        }
        ["price", index, price] => {
            let id = dish_id(ledger, index)?;
            let price = parse_amount("price", price)?;
            ledger.set_dish_price(&id, price)?;
        }
        ["rm", index] => {
            let id = dish_id(ledger, index)?;
            ledger.remove_dish(&id)?;
        }
        _ => {
            return Err(usage(
                "usage: dish add <price> <name> | rename <n> <name> | price <n> <price> | rm <n>",
            ))
        }
    }
    Ok(Outcome::Mutated)
}

fn share_command(ledger: &mut Ledger, args: &[&str]) -> Result<Outcome, AppError> {
    let [dish_index, person_index] = args else {
        return Err(usage("usage: share <dish#> <person#>"));
    };
    let dish = dish_id(ledger, dish_index)?;
    let person = person_id(ledger, person_index)?;
    ledger.toggle_shared(&dish, &person)?;
    Ok(Outcome::Mutated)
}

fn tax_command(ledger: &mut Ledger, args: &[&str]) -> Result<Outcome, AppError> {
    match args {
        ["add", kind, value, name @ ..] => {
            let kind = parse_kind(kind)?;
            let value = parse_amount("tax value", value)?;
            let name = validate_name("tax name", &name.join(" "))?;
            let tax = ledger.add_tax(name, kind, value);
            println!("added tax {}", tax.name);
        }
        ["rename", index, name @ ..] => {
            let id = tax_id(ledger, index)?;
            let name = validate_name("tax name", &name.join(" "))?;
            ledger.rename_tax(&id, name)?;
        }
        ["kind", index, kind] => {
            let id = tax_id(ledger, index)?;
            ledger.set_tax_kind(&id, parse_kind(kind)?)?;
        }
        ["value", index, value] => {
            let id = tax_id(ledger, index)?;
            let value = parse_amount("tax value", value)?;
            ledger.set_tax_value(&id, value)?;
        }
        ["rm", index] => {
            let id = tax_id(ledger, index)?;
            ledger.remove_tax(&id)?;
        }
        _ => {
            return Err(usage(
                "usage: tax add <percentage|fixed> <value> <name> | rename <n> <name> \
                 | kind <n> <percentage|fixed> | value <n> <value> | rm <n>",
            ))
        }
    }
    Ok(Outcome::Mutated)
}

// =============================================================================
// Argument Helpers
// =============================================================================

fn parse_index(arg: &str, what: &str, len: usize) -> Result<usize, AppError> {
    let index: usize = arg
        .parse()
        .map_err(|_| usage(format!("expected a {} number, got '{}'", what, arg)))?;
    if index == 0 || index > len {
        return Err(usage(format!("no {} #{}", what, index)));
    }
    Ok(index - 1)
}

fn person_id(ledger: &Ledger, arg: &str) -> Result<String, AppError> {
    let index = parse_index(arg, "person", ledger.people().len())?;
    Ok(ledger.people()[index].id.clone())
}

fn dish_id(ledger: &Ledger, arg: &str) -> Result<String, AppError> {
    let index = parse_index(arg, "dish", ledger.dishes().len())?;
    Ok(ledger.dishes()[index].id.clone())
}

fn tax_id(ledger: &Ledger, arg: &str) -> Result<String, AppError> {
    let index = parse_index(arg, "tax", ledger.taxes().len())?;
    Ok(ledger.taxes()[index].id.clone())
}

fn parse_kind(arg: &str) -> Result<TaxKind, AppError> {
    match arg {
        "percentage" | "pct" | "%" => Ok(TaxKind::Percentage),
        "fixed" => Ok(TaxKind::Fixed),
        other => Err(usage(format!(
            "unknown tax kind '{}', expected percentage or fixed",
            other
        ))),
    }
}

// =============================================================================
// Rendering
// =============================================================================

fn print_help() {
    println!("commands:");
    println!("  person add <name> | person rename <n> <name> | person rm <n>");
    println!("  dish add <price> <name> | dish rename <n> <name>");
    println!("  dish price <n> <price> | dish rm <n>");
    println!("  share <dish#> <person#>     toggle who shares a dish");
    println!("  tax add <percentage|fixed> <value> <name>");
    println!("  tax rename <n> <name> | tax kind <n> <k> | tax value <n> <v> | tax rm <n>");
    println!("  list | bill | quit");
}

fn render_lists(ledger: &Ledger) {
    println!("people:");
    for (index, person) in ledger.people().iter().enumerate() {
        println!("  {}. {}", index + 1, person.name);
    }

    println!("dishes:");
    for (index, dish) in ledger.dishes().iter().enumerate() {
        let sharers: Vec<&str> = dish
            .shared_by
            .iter()
            .filter_map(|id| {
                ledger
                    .people()
                    .iter()
                    .find(|p| &p.id == id)
                    .map(|p| p.name.as_str())
            })
            .collect();
        let shared = if sharers.is_empty() {
            "nobody".to_string()
        } else {
            sharers.join(", ")
        };
        println!(
            "  {}. {} - {:.2} (shared by {})",
            index + 1,
            dish.name,
            dish.price,
            shared
        );
    }

    println!("taxes:");
    for (index, tax) in ledger.taxes().iter().enumerate() {
        let value = match tax.kind {
            TaxKind::Percentage => format!("{}%", tax.value),
            TaxKind::Fixed => format!("{:.2}", tax.value),
        };
        println!("  {}. {} ({})", index + 1, tax.name, value);
    }
}

fn render_summary(ledger: &Ledger) {
    let summary: BillSummary = ledger.summary();

    println!("────────────────────────────────");
    println!("{:<22}{:>10.2}", "Subtotal", summary.subtotal);

    for line in &summary.tax_lines {
        let tax = ledger.taxes().iter().find(|t| t.id == line.tax_id);
        let label = match tax {
            Some(tax) => match tax.kind {
                TaxKind::Percentage => format!("{} ({}%)", tax.name, tax.value),
                TaxKind::Fixed => tax.name.clone(),
            },
            None => "?".to_string(),
        };
        println!("{:<22}{:>10.2}", label, line.amount);
    }

    println!("{:<22}{:>10.2}", "Total tax", summary.total_tax);
    println!("{:<22}{:>10.2}", "Grand total", summary.grand_total);

    if !summary.split.is_empty() {
        println!("per person:");
        // Roster order, not hash order.
        for person in ledger.people() {
            if let Some(entry) = summary.split.get(&person.id) {
                println!("  {:<20}{:>10.2}", entry.name, entry.amount);
            }
        }
    }
    println!("────────────────────────────────");
}
