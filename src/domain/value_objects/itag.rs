use crate::domain::errors::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identificador numerico de un stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Itag(u32);

impl Itag {
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    /// Interpreta un itag textual.
    /// # Errors
    /// - `DomainError::InvalidItag` si no es un entero positivo.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        raw.trim()
            .parse::<u32>()
            .map(Self)
            .map_err(|_| DomainError::InvalidItag(raw.trim().to_string()))
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl From<u32> for Itag {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl FromStr for Itag {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Itag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_itag_parse_valid() {
        assert_eq!(Itag::parse(" 140 ").unwrap(), Itag::new(140));
    }

    #[test]
    fn test_itag_parse_invalid_fails() {
        for raw in ["", "abc", "-1", "22.5"] {
            let result = Itag::parse(raw);
            assert!(
                matches!(result, Err(DomainError::InvalidItag(_))),
                "Expected {} to fail",
                raw
            );
        }
    }
}
