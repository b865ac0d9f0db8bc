//! Normalized prices and rupee formatting.
//!
//! Seed data carries both a free-form display string and a normalized
//! `Money` value; `format_inr` produces the display form with Indian digit
//! grouping (`12,34,567.00`), which groups the last three digits and then
//! every two.

use serde::{Deserialize, Serialize};

pub const INR: &str = "INR";
const RUPEE_SIGN: char = '₹';

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Money {
    pub amount: f64,
    /// ISO 4217 code.
    pub currency: String,
    pub display: String,
}

impl Money {
    pub fn inr(amount: f64) -> Self {
        Self {
            amount,
            currency: INR.to_string(),
            display: format_inr(amount),
        }
    }
}

/// Render an amount as rupees with two decimals and Indian digit grouping.
pub fn format_inr(amount: f64) -> String {
    let paise = (amount.abs() * 100.0).round() as u64;
    let rupees = paise / 100;
    let fraction = paise % 100;

    let mut out = String::new();
    if amount < 0.0 && paise > 0 {
        out.push('-');
    }
    out.push(RUPEE_SIGN);
    out.push_str(&group_indian(rupees));
    out.push_str(&format!(".{fraction:02}"));
    out
}

fn group_indian(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    let mut out = groups.join(",");
    out.push(',');
    out.push_str(tail);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_seed_prices() {
        assert_eq!(format_inr(58990.0), "₹58,990.00");
        assert_eq!(format_inr(125.0), "₹125.00");
        assert_eq!(format_inr(4321.0), "₹4,321.00");
    }

    #[test]
    fn groups_lakhs_and_crores_in_twos() {
        assert_eq!(format_inr(1234567.5), "₹12,34,567.50");
        assert_eq!(format_inr(123456789.0), "₹12,34,56,789.00");
        assert_eq!(format_inr(100000.0), "₹1,00,000.00");
    }

    #[test]
    fn rounds_to_paise() {
        assert_eq!(format_inr(0.0), "₹0.00");
        assert_eq!(format_inr(9.999), "₹10.00");
        assert_eq!(format_inr(-5.5), "-₹5.50");
    }

    #[test]
    fn inr_constructor_fills_display() {
        let money = Money::inr(79990.0);
        assert_eq!(money.currency, "INR");
        assert_eq!(money.display, "₹79,990.00");
    }
}
