use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub const DEFAULT_LEDGER_FILE: &str = "expenses.csv";

/// Expense Tracker - record, total and export personal expenses
#[derive(Debug, Parser)]
#[command(name = "expense-tracker")]
#[command(version)]
pub struct Cli {
    /// Ledger file loaded on start and saved on quit
    #[arg(short, long, env = "EXPENSES_FILE", default_value = DEFAULT_LEDGER_FILE)]
    pub file: PathBuf,

    /// Currency symbol shown next to amounts
    #[arg(long, env = "EXPENSES_CURRENCY", default_value = "₹")]
    pub currency: String,

    /// Log filter directive, e.g. "info" or "expense_tracker=debug"
    #[arg(long, env = "EXPENSES_LOG", default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactive menu (default)
    Menu,

    /// Record one expense and save the ledger file
    Add {
        description: String,

        /// Amount, e.g. "12.50"
        #[arg(allow_hyphen_values = true)]
        amount: String,

        #[arg(short, long, default_value = "")]
        category: String,
    },

    /// Print every recorded expense
    List,

    /// Print the sum of all expenses
    Total,

    /// Copy the ledger to another CSV file ("-" for stdout)
    Export { path: PathBuf },
}

impl Cli {
    pub fn selected(&self) -> &Command {
        self.command.as_ref().unwrap_or(&Command::Menu)
    }
}
