//! Mod-10 order number validation
//!
//! Order numbers are Luhn-checked before they are accepted: every second
//! digit from the right is doubled (minus 9 when the doubled value exceeds 9)
//! and the number is valid iff the total is a multiple of 10. Non-digit
//! characters fail immediately.

/// Validate an order number with the mod-10 checksum
pub fn check_order_number(number: &str) -> bool {
    if number.is_empty() {
        return false;
    }

    let mut sum = 0u32;
    for (i, ch) in number.chars().rev().enumerate() {
        let Some(digit) = ch.to_digit(10) else {
            return false;
        };
        let mut value = digit;
        if i % 2 == 1 {
            value *= 2;
            if value > 9 {
                value -= 9;
            }
        }
        sum += value;
    }

    sum % 10 == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_numbers() {
        assert!(check_order_number("4561261212345467"));
        assert!(check_order_number("8841524506523"));
    }

    #[test]
    fn test_invalid_checksum() {
        assert!(!check_order_number("777777"));
        assert!(!check_order_number("55555"));
        assert!(!check_order_number("4561261212345464"));
    }

    #[test]
    fn test_non_digit_rejected() {
        assert!(!check_order_number("1213sdf45678"));
        assert!(!check_order_number("  8841524506523"));
        assert!(!check_order_number(""));
    }

    #[test]
    fn test_digits_zero_and_nine_are_allowed() {
        // "0" and "9" are ordinary digits, not boundary rejects
        assert!(check_order_number("0"));
        assert!(check_order_number("91"));
    }
}
