//! Fabric grades offered on the quote form

use crate::error::{QuoteError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fabric grade selected by the customer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Fabric {
    #[default]
    Standard,
    Premium,
}

impl Fabric {
    /// Form value for this grade
    pub fn as_str(&self) -> &'static str {
        match self {
            Fabric::Standard => "standard",
            Fabric::Premium => "premium",
        }
    }

    /// Parse the form's select value; an empty selection means standard
    pub fn from_form_value(value: &str) -> Result<Self> {
        let value = value.trim();
        if value.is_empty() {
            return Ok(Fabric::Standard);
        }
        value.parse()
    }
}

impl FromStr for Fabric {
    type Err = QuoteError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Ok(Fabric::Standard),
            "premium" => Ok(Fabric::Premium),
            _ => Err(QuoteError::InvalidParameter {
                parameter: "fabric".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Fabric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("Premium".parse::<Fabric>().unwrap(), Fabric::Premium);
        assert_eq!(" STANDARD ".parse::<Fabric>().unwrap(), Fabric::Standard);
    }

    #[test]
    fn test_empty_form_value_defaults_to_standard() {
        assert_eq!(Fabric::from_form_value("").unwrap(), Fabric::Standard);
        assert_eq!(Fabric::from_form_value("   ").unwrap(), Fabric::Standard);
    }

    #[test]
    fn test_unknown_fabric_rejected() {
        match Fabric::from_form_value("velvet") {
            Err(QuoteError::InvalidParameter { parameter, value }) => {
                assert_eq!(parameter, "fabric");
                assert_eq!(value, "velvet");
            }
            other => panic!("Expected InvalidParameter, got: {:?}", other),
        }
    }

    #[test]
    fn test_serde_uses_form_values() {
        assert_eq!(serde_json::to_string(&Fabric::Premium).unwrap(), "\"premium\"");
        assert_eq!(Fabric::Standard.to_string(), "standard");
    }
}
