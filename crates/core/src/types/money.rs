//! Display formatting for amounts.
//!
//! Amounts are stored as plain integers in Chilean pesos (no minor unit).
//! Formatting is output-only and never feeds back into stored data.

/// Format an amount as CLP: a `$` sign and `.` as the thousands separator.
///
/// ```
/// use technova_core::format_clp;
///
/// assert_eq!(format_clp(0), "$0");
/// assert_eq!(format_clp(15_990), "$15.990");
/// assert_eq!(format_clp(1_399_990), "$1.399.990");
/// ```
#[must_use]
pub fn format_clp(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    grouped.push('$');
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i).is_multiple_of(3) {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_amounts_have_no_separator() {
        assert_eq!(format_clp(5), "$5");
        assert_eq!(format_clp(999), "$999");
    }

    #[test]
    fn test_thousands_are_grouped() {
        assert_eq!(format_clp(1_000), "$1.000");
        assert_eq!(format_clp(31_980), "$31.980");
        assert_eq!(format_clp(399_990), "$399.990");
        assert_eq!(format_clp(12_345_678), "$12.345.678");
    }
}
