use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Instrument types accepted in `symbols.query.types`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolType {
    Stock,
    Fund,
    Dr,
    Bond,
    Warrant,
    Structured,
    Right,
    Crypto,
    Index,
    Economic,
    Forex,
    Futures,
    Spread,
    Swap,
}

impl SymbolType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SymbolType::Stock => "stock",
            SymbolType::Fund => "fund",
            SymbolType::Dr => "dr",
            SymbolType::Bond => "bond",
            SymbolType::Warrant => "warrant",
            SymbolType::Structured => "structured",
            SymbolType::Right => "right",
            SymbolType::Crypto => "crypto",
            SymbolType::Index => "index",
            SymbolType::Economic => "economic",
            SymbolType::Forex => "forex",
            SymbolType::Futures => "futures",
            SymbolType::Spread => "spread",
            SymbolType::Swap => "swap",
        }
    }
}

impl fmt::Display for SymbolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SymbolType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stock" => Ok(SymbolType::Stock),
            "fund" => Ok(SymbolType::Fund),
            "dr" => Ok(SymbolType::Dr),
            "bond" => Ok(SymbolType::Bond),
            "warrant" => Ok(SymbolType::Warrant),
            "structured" => Ok(SymbolType::Structured),
            "right" => Ok(SymbolType::Right),
            "crypto" => Ok(SymbolType::Crypto),
            "index" => Ok(SymbolType::Index),
            "economic" => Ok(SymbolType::Economic),
            "forex" => Ok(SymbolType::Forex),
            "futures" => Ok(SymbolType::Futures),
            "spread" => Ok(SymbolType::Spread),
            "swap" => Ok(SymbolType::Swap),
            _ => Err(()),
        }
    }
}

/// Analyst rating labels, usable as filter values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rating {
    #[serde(rename = "Strong Buy")]
    StrongBuy,
    #[serde(rename = "Buy")]
    Buy,
    #[serde(rename = "Neutral")]
    Neutral,
    #[serde(rename = "Sell")]
    Sell,
    #[serde(rename = "Strong Sell")]
    StrongSell,
}

impl Rating {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rating::StrongBuy => "Strong Buy",
            Rating::Buy => "Buy",
            Rating::Neutral => "Neutral",
            Rating::Sell => "Sell",
            Rating::StrongSell => "Strong Sell",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
