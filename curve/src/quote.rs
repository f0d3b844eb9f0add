use alloy_primitives::U256;
use serde::{ Deserialize, Serialize };

use crate::{
    curve::{ sqrt_curve::SqrtCurveCalculator, CurveCalculator, SupplyPolicy, TradeDirection },
    error::Result,
    safe_number::safe_number::SafeNumber,
    utils::{ ensure_fee_percent, ensure_max_supply, ensure_supply_within, Validate },
};

/// Outcome of a batch price computation. Amounts are raw 1e18-scaled
/// integers and serialize as decimal strings.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    pub direction: TradeDirection,
    /// Units requested.
    pub count: u64,
    /// Units actually priced, below `count` only for a truncated sell.
    pub units_priced: u64,
    #[serde(with = "u256_decimal")]
    pub gross: U256,
    #[serde(with = "u256_decimal")]
    pub fee: U256,
    #[serde(with = "u256_decimal")]
    pub total: U256,
}

/// A price request as sent by the frontend, e.g.
///
/// ```json
/// { "maxSupply": "10000", "initialPrice": "1000000000000000",
///   "currentSupply": "100", "count": 5, "feePercent": "50000000000000000",
///   "direction": "buy" }
/// ```
#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    #[serde(with = "u256_decimal")]
    pub max_supply: U256,
    #[serde(with = "u256_decimal")]
    pub initial_price: U256,
    #[serde(with = "u256_decimal")]
    pub current_supply: U256,
    pub count: u64,
    #[serde(default, with = "u256_decimal")]
    pub fee_percent: U256,
    pub direction: TradeDirection,
    #[serde(default)]
    pub policy: SupplyPolicy,
}

impl Validate for QuoteRequest {
    fn validate(&self) -> Result<()> {
        ensure_max_supply(self.max_supply)?;
        ensure_supply_within(self.current_supply, self.max_supply)?;
        ensure_fee_percent(SafeNumber::from_raw(self.fee_percent))
    }
}

impl QuoteRequest {
    pub fn calculator(&self) -> Result<SqrtCurveCalculator> {
        Ok(SqrtCurveCalculator::new(self.max_supply, self.initial_price)?.with_policy(self.policy))
    }

    pub fn quote(&self) -> Result<PriceQuote> {
        self.validate()?;
        self.calculator()?.quote(
            self.current_supply,
            self.count,
            SafeNumber::from_raw(self.fee_percent),
            self.direction
        )
    }
}

/// `U256` as a decimal string on the wire. Accepts decimal or `0x` strings
/// and plain JSON integers on input.
pub mod u256_decimal {
    use std::str::FromStr;

    use alloy_primitives::U256;
    use serde::{ de, Deserialize, Deserializer, Serializer };

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
        match Raw::deserialize(deserializer)? {
            Raw::Number(value) => Ok(U256::from(value)),
            Raw::Text(text) => U256::from_str(text.trim()).map_err(de::Error::custom),
        }
    }
}
