/// Converts a currency amount to whole cents.
pub fn to_cents(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

/// Converts whole cents back to a currency amount. Never yields `-0.0`.
pub fn from_cents(cents: i64) -> f64 {
    if cents == 0 {
        return 0.0;
    }
    cents as f64 / 100.0
}

/// Rounds an amount to 2 decimal places.
pub fn round2(amount: f64) -> f64 {
    from_cents(to_cents(amount))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_nearest_cent() {
        assert_eq!(round2(22.224), 22.22);
        assert_eq!(round2(22.226), 22.23);
        assert_eq!(round2(-10.5), -10.5);
    }

    #[test]
    fn half_cent_rounds_away_from_zero() {
        assert_eq!(to_cents(0.125), 13);
        assert_eq!(to_cents(-0.125), -13);
    }

    #[test]
    fn negative_zero_is_normalised() {
        let value = round2(-0.001);
        assert_eq!(value, 0.0);
        assert!(value.is_sign_positive());
    }
}
