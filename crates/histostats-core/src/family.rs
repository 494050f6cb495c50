//! Statistical families and effect-size selectors
//!
//! User-facing option tokens are resolved once into closed enums here; every
//! downstream dispatch matches on these enums instead of re-parsing strings.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Family of one-sample location test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum StatsType {
    /// Student's t-test
    #[default]
    Parametric,
    /// Wilcoxon signed-rank test
    Nonparametric,
    /// Trimmed-mean t-test
    Robust,
    /// JZS Bayes factor
    Bayes,
}

impl StatsType {
    /// All families, in canonical order
    pub const ALL: [StatsType; 4] = [
        StatsType::Parametric,
        StatsType::Nonparametric,
        StatsType::Robust,
        StatsType::Bayes,
    ];

    /// Boolean shorthand: `true` is parametric, `false` nonparametric
    pub fn from_parametric(parametric: bool) -> Self {
        if parametric {
            Self::Parametric
        } else {
            Self::Nonparametric
        }
    }

    /// Canonical token
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Parametric => "parametric",
            Self::Nonparametric => "nonparametric",
            Self::Robust => "robust",
            Self::Bayes => "bayes",
        }
    }
}

impl FromStr for StatsType {
    type Err = Error;

    /// Resolve a family token by its first letter ("p", "np", "r", "bf", ...)
    fn from_str(token: &str) -> Result<Self> {
        let lowered = token.trim().to_ascii_lowercase();
        match lowered.chars().next() {
            Some('p') => Ok(Self::Parametric),
            Some('n') => Ok(Self::Nonparametric),
            Some('r') => Ok(Self::Robust),
            Some('b') => Ok(Self::Bayes),
            _ => Err(Error::InvalidParameter(format!(
                "Unknown statistics type '{token}': expected one of parametric, nonparametric, robust, bayes"
            ))),
        }
    }
}

impl TryFrom<String> for StatsType {
    type Error = Error;

    fn try_from(token: String) -> Result<Self> {
        token.parse()
    }
}

impl From<StatsType> for String {
    fn from(value: StatsType) -> Self {
        value.as_str().to_string()
    }
}

impl From<bool> for StatsType {
    fn from(parametric: bool) -> Self {
        Self::from_parametric(parametric)
    }
}

impl fmt::Display for StatsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Standardized effect size reported next to the parametric test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum EffectSizeType {
    /// Bias-corrected standardized mean difference
    #[default]
    HedgesG,
    /// Standardized mean difference without small-sample correction
    CohenD,
}

impl EffectSizeType {
    /// Canonical token
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HedgesG => "g",
            Self::CohenD => "d",
        }
    }
}

impl FromStr for EffectSizeType {
    type Err = Error;

    fn from_str(token: &str) -> Result<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "g" | "unbiased" | "hedges" => Ok(Self::HedgesG),
            "d" | "biased" | "cohen" => Ok(Self::CohenD),
            _ => Err(Error::InvalidParameter(format!(
                "Unknown effect size type '{token}': expected 'g' or 'd'"
            ))),
        }
    }
}

impl TryFrom<String> for EffectSizeType {
    type Error = Error;

    fn try_from(token: String) -> Result<Self> {
        token.parse()
    }
}

impl From<EffectSizeType> for String {
    fn from(value: EffectSizeType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for EffectSizeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_type_tokens() {
        assert_eq!("parametric".parse::<StatsType>().unwrap(), StatsType::Parametric);
        assert_eq!("p".parse::<StatsType>().unwrap(), StatsType::Parametric);
        assert_eq!("np".parse::<StatsType>().unwrap(), StatsType::Nonparametric);
        assert_eq!("nonparametric".parse::<StatsType>().unwrap(), StatsType::Nonparametric);
        assert_eq!("r".parse::<StatsType>().unwrap(), StatsType::Robust);
        assert_eq!("Robust".parse::<StatsType>().unwrap(), StatsType::Robust);
        assert_eq!("bf".parse::<StatsType>().unwrap(), StatsType::Bayes);
        assert_eq!("bayes".parse::<StatsType>().unwrap(), StatsType::Bayes);
    }

    #[test]
    fn test_stats_type_rejects_unknown() {
        for token in ["", "xyz", "t-test", "1"] {
            let err = token.parse::<StatsType>().unwrap_err();
            assert!(matches!(err, Error::InvalidParameter(_)), "{token}");
        }
    }

    #[test]
    fn test_boolean_shorthand() {
        assert_eq!(StatsType::from(true), StatsType::Parametric);
        assert_eq!(StatsType::from(false), StatsType::Nonparametric);
    }

    #[test]
    fn test_effsize_tokens() {
        assert_eq!("g".parse::<EffectSizeType>().unwrap(), EffectSizeType::HedgesG);
        assert_eq!("unbiased".parse::<EffectSizeType>().unwrap(), EffectSizeType::HedgesG);
        assert_eq!("d".parse::<EffectSizeType>().unwrap(), EffectSizeType::CohenD);
        assert_eq!("biased".parse::<EffectSizeType>().unwrap(), EffectSizeType::CohenD);
        assert!("eta".parse::<EffectSizeType>().is_err());
    }

    #[test]
    fn test_serde_tokens() {
        let parsed: StatsType = serde_json::from_str("\"np\"").unwrap();
        assert_eq!(parsed, StatsType::Nonparametric);
        assert_eq!(serde_json::to_string(&StatsType::Robust).unwrap(), "\"robust\"");
        assert!(serde_json::from_str::<StatsType>("\"zzz\"").is_err());

        let parsed: EffectSizeType = serde_json::from_str("\"d\"").unwrap();
        assert_eq!(parsed, EffectSizeType::CohenD);
    }
}
