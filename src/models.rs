use crate::errors::{LedgerError, LedgerResult};
use getset::Getters;
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CATEGORY: &str = "General";

const AMOUNT_SCALE: u32 = 2;

// Past this many places even the largest mantissa rounds to zero cents.
const MAX_DOWN_SHIFT: i64 = 60;

fn round_two_decimals<S>(x: &Decimal, s: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    s.serialize_str(&format!("{x:.2}"))
}

/// Parses user or file supplied text into an amount rounded to cents.
///
/// Accepts plain and scientific notation with an optional sign. Anything that
/// is not a finite number is rejected.
pub fn parse_amount(raw: &str) -> LedgerResult<Decimal> {
    let trimmed = raw.trim();
    let amount = trimmed
        .parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
        .or_else(|| shift_down(trimmed))
        .ok_or_else(|| LedgerError::InvalidAmount(raw.to_string()))?
        .round_dp(AMOUNT_SCALE);

    if amount.is_zero() {
        return Ok(Decimal::ZERO);
    }
    Ok(amount)
}

/// Scientific notation with a negative exponent beyond what `Decimal` can
/// hold as a scale, e.g. `1e-50`. Large positive exponents stay rejected.
fn shift_down(raw: &str) -> Option<Decimal> {
    let (mantissa, exponent) = raw.split_once(|c| c == 'e' || c == 'E')?;
    let mantissa = mantissa.parse::<Decimal>().ok()?;
    let shift = exponent.parse::<i64>().ok()?.checked_neg()?;
    if shift <= 0 {
        return None;
    }
    if shift > MAX_DOWN_SHIFT {
        return Some(Decimal::ZERO);
    }
    Some((0..shift).fold(mantissa, |acc, _| acc / Decimal::TEN))
}

/// Field order here is the column order of the persisted file.
#[derive(Debug, Clone, PartialEq, Serialize, Getters)]
pub struct Expense {
    #[getset(get = "pub")]
    description: String,
    #[getset(get = "pub")]
    category: String,
    #[getset(get = "pub")]
    #[serde(serialize_with = "round_two_decimals")]
    amount: Decimal,
}

impl Expense {
    /// Builds a validated expense.
    ///
    /// # Arguments
    /// * `description` - Free text, stored untouched.
    /// * `raw_amount` - Text to parse as a decimal number.
    /// * `category` - Falls back to `General` when blank.
    ///
    /// # Returns
    /// The expense, or `InvalidAmount` when `raw_amount` is not a number.
    pub fn new(description: &str, raw_amount: &str, category: &str) -> LedgerResult<Self> {
        let amount = parse_amount(raw_amount)?;
        let category = match category.trim() {
            "" => DEFAULT_CATEGORY.to_string(),
            _ => category.to_string(),
        };

        Ok(Expense {
            description: description.to_string(),
            category,
            amount,
        })
    }
}

/// A row as read from disk, before the amount has been validated.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExpenseRow {
    description: String,
    category: String,
    amount: String,
}

impl ExpenseRow {
    pub fn into_expense(self, line: u64) -> LedgerResult<Expense> {
        let amount = parse_amount(&self.amount).map_err(|e| LedgerError::CorruptData {
            line,
            reason: e.to_string(),
        })?;

        Ok(Expense {
            description: self.description,
            category: self.category,
            amount,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result, anyhow};

    #[test]
    fn test_new_rounds_amount_to_cents() -> Result<()> {
        let expense = Expense::new("Coffee", "3.5", "Food")?;
        assert_eq!(*expense.amount(), dec!(3.50));
        assert_eq!(expense.category(), "Food");

        let expense = Expense::new("Taxi", "12.345", "Travel")?;
        assert_eq!(*expense.amount(), dec!(12.34));

        let expense = Expense::new("Taxi", "12.355", "Travel")?;
        assert_eq!(*expense.amount(), dec!(12.36));
        Ok(())
    }

    #[test]
    fn test_new_defaults_blank_category() -> Result<()> {
        assert_eq!(Expense::new("Rent", "900", "")?.category(), DEFAULT_CATEGORY);
        assert_eq!(Expense::new("Rent", "900", "   ")?.category(), DEFAULT_CATEGORY);
        assert_eq!(Expense::new("Rent", "900", "Bills")?.category(), "Bills");
        Ok(())
    }

    #[test]
    fn test_new_keeps_long_description() -> Result<()> {
        let description = "a very long description that no table column would fit";
        let expense = Expense::new(description, "1", "General")?;
        assert_eq!(expense.description(), description);
        Ok(())
    }

    #[test]
    fn test_parse_amount_accepts_numeric_forms() -> Result<()> {
        assert_eq!(parse_amount(" 42 ")?, dec!(42));
        assert_eq!(parse_amount("-7.25")?, dec!(-7.25));
        assert_eq!(parse_amount("+1.5")?, dec!(1.5));
        assert_eq!(parse_amount("1e3")?, dec!(1000));
        Ok(())
    }

    #[test]
    fn test_parse_amount_rounds_tiny_exponents_to_zero() -> Result<()> {
        assert_eq!(parse_amount("1e-50")?, Decimal::ZERO);
        assert_eq!(parse_amount("-4E-30")?, Decimal::ZERO);
        assert_eq!(parse_amount("7e-999999")?, Decimal::ZERO);
        assert_eq!(format!("{:.2}", parse_amount("-1e-50")?), "0.00");
        assert_eq!(parse_amount("-0.001")?, Decimal::ZERO);
        Ok(())
    }

    #[test]
    fn test_parse_amount_rejects_non_numbers() {
        for raw in ["abc", "", "  ", "inf", "NaN", "12.3.4", "1,50", "1e99999999999", "1e-x"] {
            let res = parse_amount(raw);
            assert!(
                matches!(res, Err(LedgerError::InvalidAmount(_))),
                "{raw:?} was accepted"
            );
        }
    }

    #[test]
    fn test_serialize_writes_two_decimals() -> Result<()> {
        let expense = Expense::new("Coffee", "3.5", "Food")?;
        let mut writer = csv::Writer::from_writer(vec![]);
        writer.serialize(&expense)?;
        let bytes = writer.into_inner().map_err(|e| anyhow!("{e}"))?;
        let out = String::from_utf8(bytes)?;
        assert_eq!(out, "description,category,amount\nCoffee,Food,3.50\n");
        Ok(())
    }

    #[test]
    fn test_row_with_bad_amount_is_corrupt() {
        let row = ExpenseRow {
            description: "Lunch".to_string(),
            category: "Food".to_string(),
            amount: "twelve".to_string(),
        };
        match row.into_expense(4) {
            Err(LedgerError::CorruptData { line, .. }) => assert_eq!(line, 4),
            other => panic!("expected corrupt data, got {other:?}"),
        }
    }
}
