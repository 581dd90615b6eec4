//! Number formatting for chat replies.
//!
//! Formatting is passed explicitly to the message builders instead of
//! relying on process-wide locale state.

use serde::Deserialize;

/// Number formatting settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct NumberFormat {
    /// Digit group separator (e.g. `,` renders `12,345`). `None` disables grouping.
    #[serde(default)]
    pub thousands_separator: Option<char>,
}

impl NumberFormat {
    /// Format with the given group separator.
    pub const fn grouped(separator: char) -> Self {
        Self {
            thousands_separator: Some(separator),
        }
    }

    /// Render an unsigned count.
    pub fn count(&self, value: u64) -> String {
        let digits = value.to_string();
        let Some(sep) = self.thousands_separator else {
            return digits;
        };

        let mut out = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(sep);
            }
            out.push(ch);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_grouping() {
        assert_eq!(NumberFormat::default().count(1234567), "1234567");
    }

    #[test]
    fn test_grouping() {
        let fmt = NumberFormat::grouped(',');
        assert_eq!(fmt.count(0), "0");
        assert_eq!(fmt.count(999), "999");
        assert_eq!(fmt.count(1000), "1,000");
        assert_eq!(fmt.count(123456), "123,456");
        assert_eq!(fmt.count(1234567), "1,234,567");
    }

    #[test]
    fn test_non_ascii_separator() {
        assert_eq!(NumberFormat::grouped('\u{202F}').count(25565), "25\u{202F}565");
    }
}
