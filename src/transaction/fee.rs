/// Smallest fee a fast transaction can pay
const MIN_FEE: f64 = 1.0;

/// Fee owed by a fast transaction carrying `data`: one token per ten bytes, at least one
pub fn calculate_fee(data: &str) -> f64 {
    let fee = data.len() as f64 / 10.0;
    if fee < MIN_FEE {
        MIN_FEE
    } else {
        fee
    }
}

/// Check a declared fee against the fee rule (exact match)
pub fn is_valid_fee(fee: f64, data: &str) -> bool {
    fee == calculate_fee(data)
}
