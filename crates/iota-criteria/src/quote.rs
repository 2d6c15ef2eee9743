//! MySQL-style value quoting

/// Quote a value as a single-quoted SQL string literal.
///
/// Backslash-escapes NUL, newline, carriage return, backslash, both quote
/// characters and Ctrl-Z, the set escaped by `mysql_real_escape_string`.
///
/// # Examples
/// ```
/// use iota_criteria::quote::quote_value;
///
/// assert_eq!(quote_value("O'Brien"), "'O\\'Brien'");
/// ```
pub fn quote_value(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for c in value.chars() {
        match c {
            '\0' => quoted.push_str("\\000"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\x1a' => quoted.push_str("\\032"),
            '\\' | '\'' | '"' => {
                quoted.push('\\');
                quoted.push(c);
            }
            _ => quoted.push(c),
        }
    }
    quoted.push('\'');
    quoted
}

/// Backslash-escape the `LIKE` wildcards `%` and `_`
pub fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if c == '%' || c == '_' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_value_escapes_control_chars() {
        assert_eq!(
            quote_value("Evil chars: \0\n\r\\'\"\x1a"),
            r#"'Evil chars: \000\n\r\\\'\"\032'"#
        );
    }

    #[test]
    fn test_plain_values_are_only_wrapped() {
        assert_eq!(quote_value("input1"), "'input1'");
        assert_eq!(quote_value(""), "''");
        assert_eq!(quote_value("50% off_now"), "'50% off_now'");
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("A_Value%"), r"A\_Value\%");
        assert_eq!(escape_like("plain"), "plain");
    }
}
