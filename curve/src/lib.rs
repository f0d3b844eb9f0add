//! Off-chain pricing for the FLIP square-root bonding curve.
//!
//! Prices are `U256` values scaled by 1e18 and match the arithmetic of the
//! FLIP contracts exactly, so they can be used to preview a mint, buy or
//! sell before the transaction is sent.

pub mod curve;
pub mod error;
pub mod quote;
pub mod safe_number;
pub mod utils;

pub use curve::{
    sqrt_curve::{ batch_buy_price, batch_sell_price, unit_price, SqrtCurveCalculator },
    CurveCalculator,
    SupplyPolicy,
    TradeDirection,
};
pub use error::{ CurveError, Result };
pub use quote::{ PriceQuote, QuoteRequest };
