use anyhow::{Result, bail};
use clap::Parser;
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

mod config;
mod csv_writer;
mod display;
mod errors;
mod ledger;
mod models;
mod processor;
mod traits;

use config::{Cli, Command};
use errors::LedgerError;
use traits::{Bookkeeping, CSVExport};

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&cli.log_level)?)
        .with_writer(io::stderr)
        .init();

    let mut ledger = ledger::Ledger::new();

    match cli.selected() {
        Command::Menu => {
            let loaded = match ledger.import_from_file(&cli.file) {
                Ok(count) => {
                    if cli.file.exists() {
                        println!("Loaded {count} expenses from {}", cli.file.display());
                    }
                    true
                }
                Err(err) => {
                    println!("Could not load {}: {err}", cli.file.display());
                    println!("The file will not be overwritten on quit.");
                    false
                }
            };

            let stdin = io::stdin();
            let session = processor::Session::new(
                stdin.lock(),
                io::stdout(),
                &mut ledger,
                cli.file.clone(),
                cli.currency.clone(),
            );
            let mut session = if loaded {
                session
            } else {
                session.without_autosave()
            };
            session.run()?;
        }
        Command::Add {
            description,
            amount,
            category,
        } => {
            ledger.import_from_file(&cli.file)?;
            let expense = ledger.add(description, amount, category)?;
            println!(
                "Added: {} - {} ({})",
                expense.description(),
                display::format_amount(expense.amount(), &cli.currency),
                expense.category()
            );
            ledger.export_to_file(&cli.file)?;
        }
        Command::List => {
            ledger.import_from_file(&cli.file)?;
            print!("{}", display::render_table(ledger.list(), &cli.currency));
        }
        Command::Total => {
            ledger.import_from_file(&cli.file)?;
            print!("{}", display::render_total(&ledger.total()?, &cli.currency));
        }
        Command::Export { path } => {
            ledger.import_from_file(&cli.file)?;
            if path.as_os_str() == "-" {
                if ledger.is_empty() {
                    bail!(LedgerError::NoData);
                }
                ledger.export(&mut csv_writer::CSVSink::stdout())?;
            } else {
                let rows = ledger.export_to_file(path)?;
                println!("Exported {rows} expenses to {}", path.display());
            }
        }
    }

    io::stdout().flush()?;
    Ok(())
}
