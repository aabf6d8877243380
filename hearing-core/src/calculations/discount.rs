use rust_decimal::Decimal;

use crate::calculations::common::round_half_up;

/// Percentage off the MRP, formatted as `"(X.XX% off)"`.
///
/// Shown only when `mrp > 0`, `discount_price >= 0` and
/// `mrp >= discount_price`. A zero discount or invalid input yields an
/// empty string.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use hearing_core::calculations::discount_percent;
///
/// assert_eq!(discount_percent(Some(dec!(1000)), Some(dec!(800))), "(20.00% off)");
/// assert_eq!(discount_percent(Some(dec!(1000)), Some(dec!(1000))), "");
/// ```
pub fn discount_percent(mrp: Option<Decimal>, discount_price: Option<Decimal>) -> String {
    let (Some(mrp), Some(discount_price)) = (mrp, discount_price) else {
        return String::new();
    };
    if mrp <= Decimal::ZERO || discount_price < Decimal::ZERO || mrp < discount_price {
        return String::new();
    }

    let percentage = (mrp - discount_price)
        .checked_div(mrp)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED));
    match percentage {
        Some(percentage) if !percentage.is_zero() => {
            let mut rounded = round_half_up(percentage);
            rounded.rescale(2);
            format!("({rounded}% off)")
        }
        _ => String::new(),
    }
}
