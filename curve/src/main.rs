use std::{ env, fs };

use alloy_primitives::U256;
use anyhow::Context;
use flip_curve::{
    curve::{ DEFAULT_INITIAL_PRICE, DEFAULT_MAX_SUPPLY },
    safe_number::safe_number::SafeNumber,
    CurveCalculator,
    QuoteRequest,
    SqrtCurveCalculator,
    TradeDirection,
};
use log::info;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    match env::args().nth(1) {
        Some(path) => quote_request(&path),
        None => demo(),
    }
}

/// Reads a JSON `QuoteRequest` and prints the resulting quote as JSON.
fn quote_request(path: &str) -> anyhow::Result<()> {
    let raw = fs::read_to_string(path).with_context(|| format!("failed to read {path}"))?;
    let request: QuoteRequest = serde_json::from_str(&raw)
        .with_context(|| format!("malformed quote request in {path}"))?;

    info!("quoting {request:?}");
    let quote = request.quote()?;

    println!("{}", serde_json::to_string_pretty(&quote)?);
    Ok(())
}

fn demo() -> anyhow::Result<()> {
    let curve = SqrtCurveCalculator::new(U256::from(DEFAULT_MAX_SUPPLY), DEFAULT_INITIAL_PRICE)?;

    println!("max supply={} initial price={}", curve.max_supply(), SafeNumber::from_raw(curve.initial_price()));

    for supply in [0_u64, 1, 100, 1_000, 5_000, 9_999] {
        let price = curve.unit_price(U256::from(supply))?;
        println!("supply={supply} price={}", SafeNumber::from_raw(price));
    }

    let fee: SafeNumber = "0.05".parse()?;
    for direction in [TradeDirection::Buy, TradeDirection::Sell] {
        let quote = curve.quote(U256::from(100_u64), 5, fee, direction)?;
        println!(
            "{direction:?} 5 at supply 100, fee {fee}: gross={} fee={} total={}",
            SafeNumber::from_raw(quote.gross),
            SafeNumber::from_raw(quote.fee),
            SafeNumber::from_raw(quote.total)
        );
    }

    Ok(())
}
