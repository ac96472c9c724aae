use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

const MAX_SYMBOL_LEN: usize = 15;

/// Uppercase ticker of the security whose history is charted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Trims, uppercases and validates a ticker such as `aapl` or `brk-b`.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let normalized = input.trim().to_ascii_uppercase();

        let Some(first) = normalized.chars().next() else {
            return Err(ValidationError::EmptySymbol);
        };
        if !first.is_ascii_alphabetic() {
            return Err(ValidationError::SymbolInvalidStart { ch: first });
        }

        let len = normalized.chars().count();
        if len > MAX_SYMBOL_LEN {
            return Err(ValidationError::SymbolTooLong {
                len,
                max: MAX_SYMBOL_LEN,
            });
        }

        if let Some((index, ch)) = normalized
            .chars()
            .enumerate()
            .find(|(_, ch)| !(ch.is_ascii_alphanumeric() || *ch == '.' || *ch == '-'))
        {
            return Err(ValidationError::SymbolInvalidChar { ch, index });
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Symbol {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl TryFrom<String> for Symbol {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Symbol> for String {
    fn from(value: Symbol) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_share_class_ticker() {
        let parsed = Symbol::parse(" brk-b ").expect("symbol should parse");
        assert_eq!(parsed.as_str(), "BRK-B");
    }

    #[test]
    fn rejects_blank_input() {
        assert_eq!(Symbol::parse("   "), Err(ValidationError::EmptySymbol));
    }

    #[test]
    fn rejects_leading_digit() {
        let err = Symbol::parse("1AAPL").expect_err("must fail");
        assert!(matches!(err, ValidationError::SymbolInvalidStart { ch: '1' }));
    }

    #[test]
    fn reports_position_of_invalid_char() {
        let err = Symbol::parse("AAPL$").expect_err("must fail");
        assert_eq!(err, ValidationError::SymbolInvalidChar { ch: '$', index: 4 });
    }

    #[test]
    fn deserializes_through_validation() {
        let symbol: Symbol = serde_json::from_str("\"msft\"").expect("valid json symbol");
        assert_eq!(symbol.as_str(), "MSFT");
        assert!(serde_json::from_str::<Symbol>("\"\"").is_err());
    }
}
