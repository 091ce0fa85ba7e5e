use crate::{errors::LedgerResult, traits::CSVWrite};
use csv::{Writer, WriterBuilder};
use serde::Serialize;
use std::{
    fs::File,
    io::{self, Stdout, Write},
    path::Path,
};

pub struct CSVSink<W: Write> {
    writer: Writer<W>,
}

impl CSVSink<File> {
    /// Creates or truncates the file at `path`.
    pub fn create(path: &Path) -> LedgerResult<Self> {
        let file = File::create(path)?;
        Ok(CSVSink::new(file))
    }
}

impl CSVSink<Stdout> {
    pub fn stdout() -> Self {
        CSVSink::new(io::stdout())
    }
}

impl<W: Write> CSVSink<W> {
    pub fn new(inner: W) -> Self {
        CSVSink {
            writer: WriterBuilder::new().from_writer(inner),
        }
    }
}

impl<W: Write> CSVWrite for CSVSink<W> {
    fn write_record<T: Serialize>(&mut self, record: &T) -> LedgerResult<()> {
        Ok(self.writer.serialize(record)?)
    }

    fn flush(&mut self) -> LedgerResult<()> {
        Ok(self.writer.flush()?)
    }
}
