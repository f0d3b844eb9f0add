use alloy_primitives::{ uint, U256 };
use serde::{ Deserialize, Serialize };

use crate::{ error::Result, quote::PriceQuote, safe_number::safe_number::SafeNumber };

pub mod sqrt_curve;

/// Collection size of the default FLIP drop.
pub const DEFAULT_MAX_SUPPLY: u64 = 10_000;
/// 0.001 ether.
pub const DEFAULT_INITIAL_PRICE: U256 = uint!(1_000_000_000_000_000_U256);

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TradeDirection {
    Buy = 0,
    Sell = 1,
}

/// What to do when a batch asks for more units than the curve can provide.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SupplyPolicy {
    /// Same behavior as the deployed contracts: oversized sells are priced
    /// for the units that exist, buys are priced past max supply.
    #[default]
    Reference,
    /// Oversized sells and buys are rejected.
    Strict,
}

pub trait CurveCalculator {
    /// Price of the single unit minted when the supply is `supply`.
    fn unit_price(&self, supply: U256) -> Result<U256>;

    /// Consecutive unit prices starting at `from`.
    fn price_schedule(&self, from: U256, count: u64) -> Result<Vec<U256>>;

    fn quote(
        &self,
        current_supply: U256,
        count: u64,
        fee_percent: SafeNumber,
        direction: TradeDirection
    ) -> Result<PriceQuote>;

    fn batch_buy_price(&self, current_supply: U256, count: u64, fee_percent: SafeNumber) -> Result<U256> {
        Ok(self.quote(current_supply, count, fee_percent, TradeDirection::Buy)?.total)
    }

    fn batch_sell_price(&self, current_supply: U256, count: u64, fee_percent: SafeNumber) -> Result<U256> {
        Ok(self.quote(current_supply, count, fee_percent, TradeDirection::Sell)?.total)
    }
}
