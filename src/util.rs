pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut formatted = String::with_capacity(digits.len() + (digits.len() / 3));

    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            formatted.push(',');
        }
        formatted.push(digit);
    }

    formatted
}

/// Direction used when two points coincide, spread by the golden angle so
/// different pairs separate along different axes.
pub fn fallback_angle(first: usize, second: usize) -> f32 {
    ((first as f32) * 0.618_034 + (second as f32) * 0.414_214) * std::f32::consts::TAU
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_digits_in_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1_000), "1,000");
        assert_eq!(format_thousands(10_374_822), "10,374,822");
        assert_eq!(format_thousands(1_377_422_166), "1,377,422,166");
    }
}
