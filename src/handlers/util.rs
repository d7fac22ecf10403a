//! Shared utilities for handlers.

/// Parse a positive integer query value, falling back to `default`.
///
/// Reads like `parseInt`: leading whitespace and an optional sign, then
/// as many decimal digits as are present; anything after them is ignored
/// (`"2.5"` and `"2abc"` are both 2). No digits, zero and negative values
/// yield `default`, so malformed pagination never becomes a client error.
pub fn parse_or_default(raw: Option<&str>, default: usize) -> usize {
    raw.and_then(leading_integer)
        .filter(|n| *n > 0)
        .unwrap_or(default)
}

/// Leading integer of `raw`, or `None` when it has no digits or is negative.
fn leading_integer(raw: &str) -> Option<usize> {
    let s = raw.trim_start();
    let (negative, rest) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };

    let digits = rest.bytes().take_while(u8::is_ascii_digit);
    if digits.clone().next().is_none() {
        return None;
    }

    let value = digits.fold(0usize, |acc, b| {
        acc.saturating_mul(10).saturating_add(usize::from(b - b'0'))
    });
    if negative && value > 0 {
        return None;
    }
    Some(value)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_positive_integers() {
        assert_eq!(parse_or_default(Some("3"), 1), 3);
        assert_eq!(parse_or_default(Some(" 25 "), 10), 25);
        assert_eq!(parse_or_default(Some("+4"), 10), 4);
    }

    #[test]
    fn test_absent_uses_default() {
        assert_eq!(parse_or_default(None, 10), 10);
        assert_eq!(parse_or_default(Some(""), 10), 10);
        assert_eq!(parse_or_default(Some("   "), 10), 10);
    }

    #[test]
    fn test_trailing_garbage_is_ignored() {
        assert_eq!(parse_or_default(Some("2.5"), 10), 2);
        assert_eq!(parse_or_default(Some("2abc"), 1), 2);
        assert_eq!(parse_or_default(Some("0x10"), 10), 10);
    }

    #[test]
    fn test_no_digits_uses_default() {
        assert_eq!(parse_or_default(Some("abc"), 1), 1);
        assert_eq!(parse_or_default(Some(".5"), 10), 10);
        assert_eq!(parse_or_default(Some("-"), 10), 10);
    }

    #[test]
    fn test_zero_and_negative_use_default() {
        assert_eq!(parse_or_default(Some("0"), 10), 10);
        assert_eq!(parse_or_default(Some("-4"), 10), 10);
        assert_eq!(parse_or_default(Some("-0"), 10), 10);
    }

    #[test]
    fn test_huge_values_saturate() {
        assert_eq!(
            parse_or_default(Some("99999999999999999999999999"), 10),
            usize::MAX
        );
    }
}
