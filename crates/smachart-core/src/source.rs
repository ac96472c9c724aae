use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Provider identifiers for price history sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    Yahoo,
}

impl ProviderId {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Yahoo => "yahoo",
        }
    }
}

impl Display for ProviderId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_lowercase_identifier() {
        assert_eq!(ProviderId::Yahoo.to_string(), "yahoo");
        assert_eq!(
            serde_json::to_string(&ProviderId::Yahoo).expect("serializes"),
            "\"yahoo\""
        );
    }
}
