//! Currency purchase model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// What the user asked to buy
///
/// Values are sent verbatim; the payment service does all validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseRequest {
    pub amount: String,
    pub payment_method: String,
}

impl PurchaseRequest {
    pub fn new(amount: impl Into<String>, payment_method: impl Into<String>) -> Self {
        Self {
            amount: amount.into(),
            payment_method: payment_method.into(),
        }
    }
}

/// Balance returned by a successful purchase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Balance(
    #[serde(deserialize_with = "super::transaction::deserialize_amount")] pub Decimal,
);

impl std::fmt::Display for Balance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}
