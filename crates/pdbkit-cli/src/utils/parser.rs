use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid chain mapping '{0}'. Expected 'OLD=NEW' with single-character chain IDs (e.g., 'A=B').")]
    InvalidChainMapping(String),

    #[error("Expected {expected} comma-separated numbers, found {found} in '{input}'.")]
    WrongCount {
        expected: usize,
        found: usize,
        input: String,
    },

    #[error("Invalid number '{value}' in '{input}'.")]
    InvalidNumber { value: String, input: String },
}

pub fn parse_chain_mapping(s: &str) -> Result<(char, char), ParseError> {
    let invalid = || ParseError::InvalidChainMapping(s.to_string());
    let (old, new) = s.split_once('=').ok_or_else(invalid)?;
    Ok((single_char(old).ok_or_else(invalid)?, single_char(new).ok_or_else(invalid)?))
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

pub fn parse_matrix3(s: &str) -> Result<[f64; 9], ParseError> {
    parse_numbers(s)
}

pub fn parse_vector3(s: &str) -> Result<[f64; 3], ParseError> {
    parse_numbers(s)
}

fn parse_numbers<const N: usize>(s: &str) -> Result<[f64; N], ParseError> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != N {
        return Err(ParseError::WrongCount {
            expected: N,
            found: parts.len(),
            input: s.to_string(),
        });
    }

    let mut values = [0.0; N];
    for (slot, part) in values.iter_mut().zip(&parts) {
        *slot = part.parse().map_err(|_| ParseError::InvalidNumber {
            value: part.to_string(),
            input: s.to_string(),
        })?;
    }
    Ok(values)
}
