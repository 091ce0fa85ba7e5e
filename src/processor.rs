use std::{
    io::{BufRead, Write},
    path::{Path, PathBuf},
};

use crate::{
    display,
    errors::LedgerError,
    ledger::Ledger,
    traits::Bookkeeping,
};
use anyhow::Result;
use tracing::debug;

const MENU: &str = "\n--- Expense Tracker ---
1. Add Expense
2. List Expenses
3. Show Total
4. Export to CSV
5. Quit
";

/// Interactive menu loop over a ledger owned by the caller.
pub struct Session<'a, R, W> {
    input: R,
    output: W,
    ledger: &'a mut Ledger,
    ledger_file: PathBuf,
    currency: String,
    save_on_quit: bool,
}

impl<'a, R, W> Session<'a, R, W>
where
    R: BufRead,
    W: Write,
{
    pub fn new(
        input: R,
        output: W,
        ledger: &'a mut Ledger,
        ledger_file: PathBuf,
        currency: String,
    ) -> Self {
        Self {
            input,
            output,
            ledger,
            ledger_file,
            currency,
            save_on_quit: true,
        }
    }

    /// Leaves the ledger file alone on quit. Used when the file could not be
    /// loaded, so writing the session back would drop its records.
    pub fn without_autosave(mut self) -> Self {
        self.save_on_quit = false;
        self
    }

    /// Runs until the user quits or input ends, saving to the ledger file on
    /// the way out.
    pub fn run(&mut self) -> Result<()> {
        loop {
            write!(self.output, "{MENU}")?;
            let Some(choice) = self.prompt("Choose an option (1-5): ")? else {
                break;
            };
            debug!(choice = %choice, "menu selection");

            match choice.as_str() {
                "1" => self.add()?,
                "2" => self.list()?,
                "3" => self.total()?,
                "4" => self.export()?,
                "5" => break,
                _ => writeln!(self.output, "Invalid option. Please try again.")?,
            }
        }

        writeln!(self.output, "Goodbye!")?;
        if self.save_on_quit {
            let ledger_file = self.ledger_file.clone();
            self.save(&ledger_file)?;
        } else {
            writeln!(
                self.output,
                "{} was left untouched.",
                self.ledger_file.display()
            )?;
        }
        self.output.flush()?;
        Ok(())
    }

    /// Reads one trimmed line, `None` once input is exhausted.
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn add(&mut self) -> Result<()> {
        let description = self.prompt("Enter description: ")?.unwrap_or_default();
        let amount = self.prompt("Enter amount: ")?.unwrap_or_default();
        let category = self
            .prompt("Enter category (Food/Travel/Bills/etc.): ")?
            .unwrap_or_default();

        match self.ledger.add(&description, &amount, &category) {
            Ok(expense) => {
                let line = format!(
                    "Added: {} - {} ({})",
                    expense.description(),
                    display::format_amount(expense.amount(), &self.currency),
                    expense.category()
                );
                writeln!(self.output, "{line}")?;
            }
            Err(LedgerError::InvalidAmount(raw)) => {
                writeln!(self.output, "Invalid amount '{raw}'. Please enter a number.")?
            }
            Err(err) => writeln!(self.output, "Could not add expense: {err}")?,
        }
        Ok(())
    }

    fn list(&mut self) -> Result<()> {
        let table = display::render_table(self.ledger.list(), &self.currency);
        write!(self.output, "{table}")?;
        Ok(())
    }

    fn total(&mut self) -> Result<()> {
        match self.ledger.total() {
            Ok(total) => write!(
                self.output,
                "{}",
                display::render_total(&total, &self.currency)
            )?,
            Err(err) => writeln!(self.output, "Could not compute total: {err}")?,
        }
        Ok(())
    }

    fn export(&mut self) -> Result<()> {
        let label = format!(
            "Enter filename (default: {}): ",
            self.ledger_file.display()
        );
        let path = match self.prompt(&label)? {
            Some(name) if !name.is_empty() => PathBuf::from(name),
            _ => self.ledger_file.clone(),
        };
        self.save(&path)
    }

    fn save(&mut self, path: &Path) -> Result<()> {
        match self.ledger.export_to_file(path) {
            Ok(rows) => writeln!(
                self.output,
                "Exported {rows} expenses to {}",
                path.display()
            )?,
            Err(LedgerError::NoData) => writeln!(self.output, "No expenses to export.")?,
            Err(err) => writeln!(
                self.output,
                "Could not export to {}: {err}",
                path.display()
            )?,
        }
        Ok(())
    }
}
