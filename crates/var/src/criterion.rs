//! Information criteria used for lag-order selection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::VarError;

/// Criterion minimised when choosing the VAR lag order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InfoCriterion {
    /// Akaike: `-2 logL / T + 2K / T`.
    #[default]
    Aic,
    /// Schwarz: `-2 logL / T + K ln T / T`.
    Bic,
    /// Hannan-Quinn: `-2 logL / T + 2K ln ln T / T`.
    Hqic,
    /// Final prediction error.
    Fpe,
}

impl fmt::Display for InfoCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InfoCriterion::Aic => "aic",
            InfoCriterion::Bic => "bic",
            InfoCriterion::Hqic => "hqic",
            InfoCriterion::Fpe => "fpe",
        };
        f.write_str(name)
    }
}

impl FromStr for InfoCriterion {
    type Err = VarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "aic" => Ok(InfoCriterion::Aic),
            "bic" | "sbic" => Ok(InfoCriterion::Bic),
            "hqic" => Ok(InfoCriterion::Hqic),
            "fpe" => Ok(InfoCriterion::Fpe),
            other => Err(VarError::UnknownCriterion {
                name: other.to_string(),
            }),
        }
    }
}
