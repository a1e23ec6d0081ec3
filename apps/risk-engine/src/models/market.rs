//! Market (trading venue) enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DecodeError;

/// Trading venue an order is routed to.
///
/// Wire format is the venue's MIC code. Unknown venues fail at decode time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Market {
    /// Shanghai Stock Exchange.
    Xshg,
    /// Shenzhen Stock Exchange.
    Xshe,
    /// Beijing Stock Exchange.
    Bjse,
}

impl Market {
    /// The MIC code for this venue.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Xshg => "XSHG",
            Self::Xshe => "XSHE",
            Self::Bjse => "BJSE",
        }
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Market {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "XSHG" => Ok(Self::Xshg),
            "XSHE" => Ok(Self::Xshe),
            "BJSE" => Ok(Self::Bjse),
            other => Err(DecodeError::InvalidMarket(other.to_string())),
        }
    }
}
