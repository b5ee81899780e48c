//! Shared type definitions, newtypes, and date helpers

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

/// Fiat amount to spend on a purchase (for clarity in function signatures)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spend(pub f64);

impl Spend {
    pub fn new(amount: f64) -> Self {
        Spend(amount)
    }

    pub fn as_f64(&self) -> f64 {
        self.0
    }

    /// Quantity bought when the full amount is spent at `price`
    pub fn quantity_at(&self, price: UnitPrice) -> Quantity {
        if price.as_f64() == 0.0 {
            return Quantity(0.0);
        }
        Quantity(self.0 / price.as_f64())
    }
}

/// Price of one unit of a crypto (for clarity in function signatures)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitPrice(pub f64);

impl UnitPrice {
    pub fn new(price: f64) -> Self {
        UnitPrice(price)
    }

    pub fn as_f64(&self) -> f64 {
        self.0
    }
}

/// Quantity of a crypto
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quantity(pub f64);

impl Quantity {
    pub fn new(amount: f64) -> Self {
        Quantity(amount)
    }

    pub fn as_f64(&self) -> f64 {
        self.0
    }
}

/// Parse a backend date that may be full ISO-8601 or bare `YYYY-MM-DD`
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .ok()
        .or_else(|| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
}

/// Format a backend date as `YYYY-MM-DD`; unparseable input passes through
pub fn display_date(raw: &str) -> String {
    match parse_date(raw) {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_from_spend() {
        let quantity = Spend::new(150.0).quantity_at(UnitPrice::new(50.0));
        assert_eq!(quantity.as_f64(), 3.0);
    }

    #[test]
    fn test_quantity_at_zero_price() {
        let quantity = Spend::new(150.0).quantity_at(UnitPrice::new(0.0));
        assert_eq!(quantity.as_f64(), 0.0);
    }

    #[test]
    fn test_display_date_from_iso() {
        assert_eq!(display_date("2024-03-17T09:30:00.000Z"), "2024-03-17");
    }

    #[test]
    fn test_display_date_from_plain() {
        assert_eq!(display_date("2024-03-17"), "2024-03-17");
    }

    #[test]
    fn test_display_date_passthrough() {
        assert_eq!(display_date("not a date"), "not a date");
    }
}
