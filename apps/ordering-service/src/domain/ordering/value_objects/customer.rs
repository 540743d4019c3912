//! Customer contact details captured at checkout.

use serde::{Deserialize, Serialize};

/// Minimum number of characters accepted for a phone number.
pub const MIN_PHONE_LEN: usize = 10;

/// Who placed the order and where it goes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Display name.
    pub name: String,
    /// Contact phone.
    pub phone: String,
    /// Delivery address, required for delivery orders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl Customer {
    /// Build a customer, trimming whitespace and dropping blank addresses.
    #[must_use]
    pub fn new(name: &str, phone: &str, address: Option<&str>) -> Self {
        Self {
            name: name.trim().to_string(),
            phone: phone.trim().to_string(),
            address: non_blank(address),
        }
    }
}

/// Trim an optional string, mapping blank values to `None`.
pub(crate) fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_trims_fields() {
        let customer = Customer::new("  Mei  ", " 9876543210 ", Some(" 12 Lotus Rd "));
        assert_eq!(customer.name, "Mei");
        assert_eq!(customer.phone, "9876543210");
        assert_eq!(customer.address.as_deref(), Some("12 Lotus Rd"));
    }

    #[test]
    fn blank_address_becomes_none() {
        let customer = Customer::new("Mei", "9876543210", Some("   "));
        assert!(customer.address.is_none());
    }
}
