//! Presentation Rounding

/// Round to `digits` decimal places, with ties rounding up for positive values
pub fn round_half_up(value: f64, digits: u32) -> f64 {
    let factor = 10f64.powi(digits as i32);
    (value * factor).round() / factor
}

/// Round half-up and print the shortest representation (`100`, `1.33`, `0.01`)
pub fn format_rounded(value: f64, digits: u32) -> String {
    let rounded = round_half_up(value, digits);
    // Avoid printing "-0" for tiny negative values
    if rounded == 0.0 {
        return "0".to_string();
    }
    format!("{}", rounded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(1.3333, 2), 1.33);
        assert_eq!(round_half_up(0.125, 2), 0.13);
        assert_eq!(round_half_up(2.5, 0), 3.0);
        assert_eq!(round_half_up(0.0104, 3), 0.01);
    }

    #[test]
    fn test_format_rounded() {
        assert_eq!(format_rounded(1.0 / 0.75, 2), "1.33");
        assert_eq!(format_rounded(100.0, 2), "100");
        assert_eq!(format_rounded(6.85, 2), "6.85");
        assert_eq!(format_rounded(0.0104, 3), "0.01");
        assert_eq!(format_rounded(0.0, 3), "0");
        assert_eq!(format_rounded(-0.0001, 2), "0");
    }
}
