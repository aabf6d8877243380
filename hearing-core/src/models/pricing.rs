use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Price details of the selected hearing aid. `None` means the field is blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingInfo {
    pub mrp: Option<Decimal>,
    pub discount_price: Option<Decimal>,
    pub warranty_years: Option<Decimal>,
}
