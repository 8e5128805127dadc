//! Shared utilities for argument processing.

/// What: Determine the log level based on command-line arguments.
///
/// Inputs:
/// - `args`: Parsed command-line arguments.
///
/// Output:
/// - Log level string (trace, debug, info, warn, error).
///
/// Details:
/// - Verbose flag overrides the `--log-level` argument.
pub fn determine_log_level(args: &crate::args::Args) -> String {
    if args.verbose {
        "debug".to_string()
    } else {
        args.log_level.clone()
    }
}

/// What: Parse a `NAME=VALUE` variable binding.
///
/// Inputs:
/// - `raw`: Argument text.
///
/// Output:
/// - `(name, value)`; the value may be empty or contain further `=`.
///
/// # Errors
/// - Returns `Err` when there is no `=` or the name is not a placeholder identifier.
pub fn parse_var(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{raw}'"))?;
    let name = name.trim();
    if !is_identifier(name) {
        return Err(format!("'{name}' is not a valid variable name"));
    }
    Ok((name.to_string(), value.to_string()))
}

/// What: Parse a `NAME=JSON` variable binding.
///
/// # Errors
/// - Returns `Err` when the binding is malformed or the value is not valid JSON.
pub fn parse_json_var(raw: &str) -> Result<(String, serde_json::Value), String> {
    let (name, value) = parse_var(raw)?;
    let value = serde_json::from_str(&value)
        .map_err(|e| format!("value of '{name}' is not valid JSON: {e}"))?;
    Ok((name, value))
}

/// Top-level variable names: a letter or underscore, then letters, digits, underscores.
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_var_splits_on_first_equals() {
        assert_eq!(
            parse_var("expr=a=b"),
            Ok(("expr".to_string(), "a=b".to_string()))
        );
        assert_eq!(parse_var("empty="), Ok(("empty".to_string(), String::new())));
    }

    #[test]
    fn parse_var_rejects_bad_names() {
        assert!(parse_var("novalue").is_err());
        assert!(parse_var("=x").is_err());
        assert!(parse_var("1st=x").is_err());
        assert!(parse_var("a.b=x").is_err());
    }

    #[test]
    fn parse_json_var_reads_objects() {
        let (name, value) = parse_json_var(r#"user={"name":"Ann"}"#).expect("valid JSON binding");
        assert_eq!(name, "user");
        assert_eq!(value["name"], "Ann");
        assert!(parse_json_var("user={broken").is_err());
    }
}
