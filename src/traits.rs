use std::{io::Read, slice};

use rust_decimal::Decimal;
use serde::Serialize;

use crate::{errors::LedgerResult, models::Expense};

/// CSVWrite trait provides a method to write a record to a CSV sink.
pub trait CSVWrite {
    /// Writes a record to the sink.
    ///
    /// # Arguments
    /// * `record` - The record to write, any Serializable type.
    ///
    /// # Returns
    /// A Result indicating success or failure.
    fn write_record<T: Serialize>(&mut self, record: &T) -> LedgerResult<()>;

    /// Pushes buffered rows down to the underlying writer.
    fn flush(&mut self) -> LedgerResult<()>;
}

/// CSVExport trait provides a method to export records as CSV.
pub trait CSVExport {
    /// Exports every record.
    ///
    /// # Arguments
    /// * `writer` - The sink to write rows to.
    ///
    /// # Returns
    /// The number of rows written.
    fn export(&self, writer: &mut impl CSVWrite) -> LedgerResult<usize>;
}

/// CSVImport trait provides a method to load records from CSV.
pub trait CSVImport {
    /// Imports every row of `reader`, all or nothing.
    ///
    /// # Returns
    /// The number of rows imported.
    fn import<R: Read>(&mut self, reader: R) -> LedgerResult<usize>;
}

/// Bookkeeping is the call surface every front end drives.
pub trait Bookkeeping {
    /// Records an expense, parsing `raw_amount` first.
    fn add(
        &mut self,
        description: &str,
        raw_amount: &str,
        category: &str,
    ) -> LedgerResult<&Expense>;

    /// Records in insertion order, or `None` when nothing is recorded.
    fn list(&self) -> Option<slice::Iter<'_, Expense>>;

    /// Sum of all amounts.
    fn total(&self) -> LedgerResult<Decimal>;
}
