use serde::{Deserialize, Serialize};

/// How a field key is spelled inside a template.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceholderStyle {
    /// `contract_name` → `{{CONTRACT_NAME}}`
    #[default]
    DoubleBraceUpper,
    /// `contract_name` → `{contract_name}`
    SingleBrace,
}

impl PlaceholderStyle {
    /// Placeholder token for a field key.
    pub fn token(self, key: &str) -> String {
        match self {
            Self::DoubleBraceUpper => format!("{{{{{}}}}}", key.to_uppercase()),
            Self::SingleBrace => format!("{{{}}}", key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_spelling() {
        assert_eq!(
            PlaceholderStyle::DoubleBraceUpper.token("contract_name"),
            "{{CONTRACT_NAME}}"
        );
        assert_eq!(
            PlaceholderStyle::SingleBrace.token("contract_name"),
            "{contract_name}"
        );
    }
}
