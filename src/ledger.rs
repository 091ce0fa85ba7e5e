use std::{
    fs::File,
    io::{self, Read},
    path::Path,
    slice,
};

use crate::{
    csv_writer::CSVSink,
    errors::{LedgerError, LedgerResult},
    models::{Expense, ExpenseRow},
    traits::{Bookkeeping, CSVExport, CSVImport, CSVWrite},
};
use csv::ReaderBuilder;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

const DEFAULT_HAS_HEADERS: bool = true;

/// The expenses recorded during one session, in insertion order.
#[derive(Debug, Default)]
pub struct Ledger {
    expenses: Vec<Expense>,
}

impl Ledger {
    pub fn new() -> Self {
        Self {
            expenses: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    /// Writes the whole ledger to `path`, replacing whatever was there.
    ///
    /// An empty ledger is refused with `NoData` and leaves the file system
    /// untouched.
    pub fn export_to_file(&self, path: &Path) -> LedgerResult<usize> {
        if self.expenses.is_empty() {
            warn!(path = %path.display(), "nothing to export");
            return Err(LedgerError::NoData);
        }

        let mut sink = CSVSink::create(path)?;
        let written = self.export(&mut sink)?;
        info!(path = %path.display(), rows = written, "exported expenses");

        Ok(written)
    }

    /// Appends every row stored at `path`. A missing file imports nothing.
    pub fn import_from_file(&mut self, path: &Path) -> LedgerResult<usize> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no ledger file, starting empty");
                return Ok(0);
            }
            Err(err) => return Err(err.into()),
        };

        let imported = self.import(file).inspect_err(|err| {
            warn!(path = %path.display(), error = %err, "import rejected");
        })?;
        info!(path = %path.display(), rows = imported, "imported expenses");

        Ok(imported)
    }
}

impl Bookkeeping for Ledger {
    fn add(
        &mut self,
        description: &str,
        raw_amount: &str,
        category: &str,
    ) -> LedgerResult<&Expense> {
        let expense = Expense::new(description, raw_amount, category).inspect_err(|err| {
            warn!(error = %err, "expense rejected");
        })?;
        info!(
            description = %expense.description(),
            amount = %expense.amount(),
            category = %expense.category(),
            "expense added"
        );

        self.expenses.push(expense);
        Ok(&self.expenses[self.expenses.len() - 1])
    }

    fn list(&self) -> Option<slice::Iter<'_, Expense>> {
        debug!(records = self.expenses.len(), "listing expenses");
        if self.expenses.is_empty() {
            return None;
        }
        Some(self.expenses.iter())
    }

    fn total(&self) -> LedgerResult<Decimal> {
        let total = self
            .expenses
            .iter()
            .try_fold(Decimal::ZERO, |acc, expense| acc.checked_add(*expense.amount()))
            .ok_or(LedgerError::ValueOverflow)?;
        debug!(total = %total, "computed total");

        Ok(total)
    }
}

impl CSVExport for Ledger {
    fn export(&self, writer: &mut impl CSVWrite) -> LedgerResult<usize> {
        for expense in &self.expenses {
            writer.write_record(expense)?;
        }
        writer.flush()?;
        Ok(self.len())
    }
}

impl CSVImport for Ledger {
    fn import<R: Read>(&mut self, reader: R) -> LedgerResult<usize> {
        let mut reader = ReaderBuilder::new()
            .has_headers(DEFAULT_HAS_HEADERS)
            .from_reader(reader);
        let headers = reader.headers().map_err(LedgerError::from_csv_read)?.clone();

        let mut staged = Vec::new();
        for rec in reader.records() {
            let record = rec.map_err(LedgerError::from_csv_read)?;
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            let row: ExpenseRow =
                record
                    .deserialize(Some(&headers))
                    .map_err(|err| LedgerError::CorruptData {
                        line,
                        reason: err.to_string(),
                    })?;
            staged.push(row.into_expense(line)?);
        }

        let imported = staged.len();
        self.expenses.append(&mut staged);
        Ok(imported)
    }
}
