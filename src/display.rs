//! Terminal rendering of the ledger.
//!
//! Columns are fixed width, so long text is cut here and only here; the
//! records themselves are never shortened.

use rust_decimal::Decimal;

use crate::models::Expense;

const DESCRIPTION_WIDTH: usize = 15;
const CATEGORY_WIDTH: usize = 10;
const AMOUNT_WIDTH: usize = 10;
const RULE_WIDTH: usize = 60;

pub const EMPTY_NOTICE: &str = "No expenses recorded yet.";

/// Cuts `text` to at most `width` characters.
pub fn truncate(text: &str, width: usize) -> &str {
    match text.char_indices().nth(width) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

pub fn format_amount(amount: &Decimal, currency: &str) -> String {
    format!("{currency}{amount:.2}")
}

pub fn format_row(expense: &Expense, currency: &str) -> String {
    format!(
        "{:<dw$} | {:<cw$} | {:>aw$}",
        truncate(expense.description(), DESCRIPTION_WIDTH),
        truncate(expense.category(), CATEGORY_WIDTH),
        format_amount(expense.amount(), currency),
        dw = DESCRIPTION_WIDTH,
        cw = CATEGORY_WIDTH,
        aw = AMOUNT_WIDTH,
    )
}

/// Renders the expense log as a table, or the empty notice when there is
/// nothing to show.
pub fn render_table<'a, I>(expenses: Option<I>, currency: &str) -> String
where
    I: Iterator<Item = &'a Expense>,
{
    let Some(expenses) = expenses else {
        return format!("{EMPTY_NOTICE}\n");
    };

    let mut output = String::from("--- Expense Log ---\n");
    output.push_str(&format!(
        "{:<dw$} | {:<cw$} | {:>aw$}\n",
        "Description",
        "Category",
        "Amount",
        dw = DESCRIPTION_WIDTH,
        cw = CATEGORY_WIDTH,
        aw = AMOUNT_WIDTH,
    ));
    output.push_str(&"-".repeat(RULE_WIDTH));
    output.push('\n');

    for expense in expenses {
        output.push_str(&format_row(expense, currency));
        output.push('\n');
    }

    output.push_str(&"-".repeat(RULE_WIDTH));
    output.push('\n');
    output
}

pub fn render_total(total: &Decimal, currency: &str) -> String {
    format!("Total expenses: {}\n", format_amount(total, currency))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use rust_decimal::prelude::*;

    #[test]
    fn test_truncate_counts_characters() {
        assert_eq!(truncate("Groceries", 15), "Groceries");
        assert_eq!(truncate("Weekly groceries run", 15), "Weekly grocerie");
        assert_eq!(truncate("₹₹₹₹", 2), "₹₹");
        assert_eq!(truncate("", 3), "");
    }

    #[test]
    fn test_render_table_empty_notice() {
        let none: Option<std::slice::Iter<'_, Expense>> = None;
        assert_eq!(render_table(none, "$"), "No expenses recorded yet.\n");
    }

    #[test]
    fn test_render_table_truncates_without_touching_records() -> Result<()> {
        let expenses = vec![
            Expense::new("Weekly groceries run", "54.3", "Household items")?,
            Expense::new("Tea", "2", "Food")?,
        ];

        let table = render_table(Some(expenses.iter()), "$");
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 6);
        assert_eq!(lines[3], "Weekly grocerie | Household  |     $54.30");
        assert_eq!(lines[4], "Tea             | Food       |      $2.00");
        assert_eq!(expenses[0].description(), "Weekly groceries run");
        Ok(())
    }

    #[test]
    fn test_render_total() {
        assert_eq!(render_total(&dec!(3.5), "₹"), "Total expenses: ₹3.50\n");
        assert_eq!(render_total(&Decimal::ZERO, ""), "Total expenses: 0.00\n");
    }
}
