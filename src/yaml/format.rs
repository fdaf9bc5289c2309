//! Scalar rendering.

use crate::values::Scalar;

/// Characters that force a string to be double-quoted.
const QUOTE_TRIGGERS: [char; 3] = [' ', ':', '#'];

/// Render a scalar the way it appears after `key: ` or `- `.
///
/// Strings are quoted only when they contain a space, a colon or `#`, and
/// the content is never escaped.
pub fn format_scalar(scalar: &Scalar) -> String {
    match scalar {
        Scalar::String(s) if needs_quotes(s) => format!("\"{s}\""),
        other => scalar_text(other),
    }
}

pub fn needs_quotes(s: &str) -> bool {
    s.contains(QUOTE_TRIGGERS)
}

/// Unquoted textual form of a scalar.
pub fn scalar_text(scalar: &Scalar) -> String {
    match scalar {
        Scalar::String(s) => s.clone(),
        Scalar::Number(n) => n.to_string(),
        Scalar::Bool(b) => b.to_string(),
        Scalar::Absent => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("hello", "hello")]
    #[case("hello world", "\"hello world\"")]
    #[case("a:b", "\"a:b\"")]
    #[case("a#b", "\"a#b\"")]
    #[case("1.25", "1.25")]
    #[case("https://vault.example.com:8200", "\"https://vault.example.com:8200\"")]
    #[case("say \"hi\"", "\"say \"hi\"\"")]
    fn test_string_quoting(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(format_scalar(&Scalar::String(input.to_string())), expected);
    }

    #[test]
    fn test_non_string_scalars() {
        assert_eq!(format_scalar(&Scalar::Bool(true)), "true");
        assert_eq!(format_scalar(&Scalar::Number(2.into())), "2");
        let half = serde_json::Number::from_f64(0.5).unwrap();
        assert_eq!(format_scalar(&Scalar::Number(half)), "0.5");
        assert_eq!(format_scalar(&Scalar::Absent), "");
    }
}
