//! Count formatting for log and report messages.

/// Noun suffix for a count: `"1 record"`, `"3 records"`.
#[inline]
pub fn plural_s(count: usize) -> &'static str {
    match count {
        1 => "",
        _ => "s",
    }
}

/// A count with its noun: `plural_count(12, "URL")` -> `"12 URLs"`.
#[inline]
pub fn plural_count(count: usize, noun: &str) -> String {
    format!("{count} {noun}{}", plural_s(count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural_s() {
        assert_eq!(plural_s(0), "s");
        assert_eq!(plural_s(1), "");
        assert_eq!(plural_s(2), "s");
    }

    #[test]
    fn test_plural_count() {
        assert_eq!(plural_count(1, "rule"), "1 rule");
        assert_eq!(plural_count(12, "URL"), "12 URLs");
    }
}
