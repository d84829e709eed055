/// Parse a boolean flag from a string value, or return the given default value otherwise.
pub fn parse_boolean_flag(value: Option<String>, default: bool) -> bool {
    let value = match value {
        Some(v) => v,
        None => return default,
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => default,
    }
}

/// Splits a comma-separated list of `key=value` pairs. Whitespace around keys and values is trimmed and empty entries
/// are skipped. Returns the first entry that is not a `key=value` pair as the error value.
pub fn parse_key_value_list(value: &str) -> Result<Vec<(String, String)>, String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| match entry.split_once('=') {
            Some((k, v)) if !k.trim().is_empty() && !v.trim().is_empty() => {
                Ok((k.trim().to_string(), v.trim().to_string()))
            },
            _ => Err(entry.to_string()),
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn boolean_flags() {
        assert!(parse_boolean_flag(Some("YES".into()), false));
        assert!(!parse_boolean_flag(Some(" off ".into()), true));
        assert!(parse_boolean_flag(Some("maybe".into()), true));
        assert!(!parse_boolean_flag(None, false));
    }

    #[test]
    fn key_value_lists() {
        let pairs = parse_key_value_list(" 0xabc = Token A ,, 0xdef=B").unwrap();
        assert_eq!(pairs, vec![("0xabc".to_string(), "Token A".to_string()), ("0xdef".to_string(), "B".to_string())]);
        assert_eq!(parse_key_value_list("0xabc").unwrap_err(), "0xabc");
        assert_eq!(parse_key_value_list("=B").unwrap_err(), "=B");
        assert!(parse_key_value_list("").unwrap().is_empty());
    }
}
