use eframe::egui::{RichText, WidgetText};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

pub fn default_currency_value() -> Decimal {
    Decimal::ZERO
}

fn default_currency() -> Currency {
    Currency::Taka
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub(crate) struct CurrencyValue {
    pub(crate) value: Decimal,
    currency: Currency,
    formatted: String,
}

impl CurrencyValue {
    #[cfg(test)]
    pub fn new(num: i64) -> Self {
        Self::new_from_decimal(Decimal::from(num))
    }

    pub fn new_from_decimal(value: Decimal) -> Self {
        let currency = default_currency();
        Self {
            value,
            currency,
            formatted: format!("{} {}", format_amount(&value), currency.to_str()),
        }
    }

    #[cfg(test)]
    pub fn zero() -> Self {
        Self::new_from_decimal(default_currency_value())
    }

    pub fn to_str(&self) -> &str {
        &self.formatted
    }

    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    /// Like `to_str`, but a dash for zero, as used in table cells.
    pub fn to_cell_str(&self) -> &str {
        if self.is_zero() { "-" } else { &self.formatted }
    }
}

impl PartialOrd for CurrencyValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CurrencyValue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

// zero decimal places, thousands grouped with ','
fn format_amount(num: &Decimal) -> String {
    let rounded = num.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let input = rounded.trunc().abs().to_string();
    let with_minus = rounded.is_sign_negative() && !rounded.is_zero();

    let mut result = String::new();
    for (i, c) in input.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    let int_formatted: String = result.chars().rev().collect();

    if with_minus {
        format!("-{}", int_formatted)
    } else {
        int_formatted
    }
}

/// Measures without trailing zeros, a dash for zero.
pub(crate) fn format_measure(num: &Decimal) -> String {
    if num.is_zero() {
        return String::from("-");
    }
    num.normalize().to_string()
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub(crate) enum Currency {
    Taka,
}

impl Currency {
    fn to_str(self) -> &'static str {
        match self {
            Currency::Taka => "Tk",
        }
    }
}

impl From<CurrencyValue> for WidgetText {
    fn from(val: CurrencyValue) -> Self {
        WidgetText::from(val.to_str())
    }
}

impl From<&CurrencyValue> for WidgetText {
    fn from(val: &CurrencyValue) -> Self {
        WidgetText::from(val.to_str())
    }
}

impl From<&CurrencyValue> for RichText {
    fn from(val: &CurrencyValue) -> Self {
        RichText::from(val.to_str())
    }
}

impl std::fmt::Display for CurrencyValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn formats_without_decimals() {
        assert_eq!(CurrencyValue::new(0).to_str(), "0 Tk");
        assert_eq!(CurrencyValue::new(500).to_str(), "500 Tk");
        assert_eq!(
            CurrencyValue::new_from_decimal(Decimal::from_str("1499.5").unwrap()).to_str(),
            "1,500 Tk"
        );
        assert_eq!(
            CurrencyValue::new_from_decimal(Decimal::from_str("12.49").unwrap()).to_str(),
            "12 Tk"
        );
    }

    #[test]
    fn groups_thousands() {
        assert_eq!(CurrencyValue::new(1000).to_str(), "1,000 Tk");
        assert_eq!(CurrencyValue::new(999).to_str(), "999 Tk");
        assert_eq!(CurrencyValue::new(1234567).to_str(), "1,234,567 Tk");
    }

    #[test]
    fn negative_values_keep_their_sign() {
        assert_eq!(CurrencyValue::new(-1500).to_str(), "-1,500 Tk");
        assert_eq!(
            CurrencyValue::new_from_decimal(Decimal::from_str("-0.4").unwrap()).to_str(),
            "0 Tk"
        );
    }

    #[test]
    fn cell_str_uses_dash_for_zero() {
        assert_eq!(CurrencyValue::zero().to_cell_str(), "-");
        assert_eq!(CurrencyValue::new(50).to_cell_str(), "50 Tk");
    }

    #[test]
    fn measures() {
        assert_eq!(format_measure(&Decimal::ZERO), "-");
        assert_eq!(format_measure(&Decimal::from_str("10.50").unwrap()), "10.5");
        assert_eq!(format_measure(&Decimal::from_str("12.00").unwrap()), "12");
    }
}
