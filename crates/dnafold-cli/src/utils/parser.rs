use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid --set format: '{0}'. Expected KEY=VALUE.")]
    InvalidKeyValue(String),

    #[error("Component '{component}' cannot be empty in '{input}'.")]
    EmptyComponent {
        component: &'static str,
        input: String,
    },

    #[error("Invalid {kind} value for '{key}': '{value}'")]
    InvalidValue {
        kind: &'static str,
        key: String,
        value: String,
    },
}

/// Splits `section.key=value` at the first `=`, trimming both sides.
pub fn parse_key_value(input: &str) -> Result<(&str, &str), ParseError> {
    let (key, value) = input
        .split_once('=')
        .ok_or_else(|| ParseError::InvalidKeyValue(input.to_string()))?;
    let (key, value) = (key.trim(), value.trim());
    if key.is_empty() {
        return Err(ParseError::EmptyComponent {
            component: "key",
            input: input.to_string(),
        });
    }
    if value.is_empty() {
        return Err(ParseError::EmptyComponent {
            component: "value",
            input: input.to_string(),
        });
    }
    Ok((key, value))
}

/// Parses `value` as `T`, naming `kind` and `key` in the error.
pub fn parse_value<T: std::str::FromStr>(
    key: &str,
    value: &str,
    kind: &'static str,
) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue {
        kind,
        key: key.to_string(),
        value: value.to_string(),
    })
}
