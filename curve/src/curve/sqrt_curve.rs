use alloy_primitives::U256;
use log::{ debug, trace, warn };

use crate::{
    error::{ CurveError, Result },
    quote::PriceQuote,
    safe_number::{ safe_number::{ Math, SafeNumber }, sqrt::sqrt },
    utils::{ ensure_fee_percent, ensure_max_supply, ensure_supply_within, Validate },
};

use super::{ CurveCalculator, SupplyPolicy, TradeDirection };

const SUPPLY_ROOT_SCALE: u64 = 100;
const SQUARE_ROOT_SCALE: u64 = 10_000;

/// The FLIP square-root bonding curve.
///
/// ```text
/// price(0) = p
/// price(s) = p + p * 2 * isqrt(100 * s * max) * isqrt(10000 * s * s) / (max * max)
/// ```
///
/// Every step is evaluated in the same order as the contract, in checked
/// 256-bit arithmetic. Both square roots are truncated before they are
/// multiplied, so the expression must not be simplified algebraically.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SqrtCurveCalculator {
    max_supply: U256,
    initial_price: U256,
    policy: SupplyPolicy,
}

impl SqrtCurveCalculator {
    pub fn new(max_supply: U256, initial_price: U256) -> Result<SqrtCurveCalculator> {
        let curve = SqrtCurveCalculator {
            max_supply,
            initial_price,
            policy: SupplyPolicy::default(),
        };
        curve.validate()?;
        Ok(curve)
    }

    pub fn with_policy(mut self, policy: SupplyPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn max_supply(&self) -> U256 {
        self.max_supply
    }

    pub fn initial_price(&self) -> U256 {
        self.initial_price
    }

    pub fn policy(&self) -> SupplyPolicy {
        self.policy
    }

    fn sum_buy(&self, current_supply: U256, count: u64) -> Result<(U256, u64)> {
        if self.policy == SupplyPolicy::Strict {
            let available = self.max_supply - current_supply;
            if U256::from(count) > available {
                return Err(CurveError::ExceedsMaxSupply { requested: count, available });
            }
        }

        let mut gross = U256::ZERO;
        for offset in 0..count {
            let supply = current_supply
                .checked_add(U256::from(offset))
                .ok_or(CurveError::MathOverflow)?;
            gross = gross.checked_add(self.unit_price(supply)?).ok_or(CurveError::MathOverflow)?;
        }

        Ok((gross, count))
    }

    /// Selling walks the supply downward, each unit priced at the level it
    /// occupies before it is burned.
    fn sum_sell(&self, current_supply: U256, count: u64) -> Result<(U256, u64)> {
        let units = u64::try_from(current_supply).map_or(count, |available| available.min(count));

        if units < count {
            if self.policy == SupplyPolicy::Strict {
                return Err(CurveError::InsufficientSupplyForSell {
                    requested: count,
                    available: current_supply,
                });
            }
            warn!("sell of {count} units truncated to the {units} units in supply");
        }

        let mut gross = U256::ZERO;
        for offset in 0..units {
            let supply = current_supply - U256::from(offset + 1);
            gross = gross.checked_add(self.unit_price(supply)?).ok_or(CurveError::MathOverflow)?;
        }

        Ok((gross, units))
    }
}

impl Validate for SqrtCurveCalculator {
    fn validate(&self) -> Result<()> {
        ensure_max_supply(self.max_supply)
    }
}

impl CurveCalculator for SqrtCurveCalculator {
    fn unit_price(&self, supply: U256) -> Result<U256> {
        if supply.is_zero() {
            return Ok(self.initial_price);
        }

        let overflow = || CurveError::MathOverflow;

        let supply_root = U256::from(SUPPLY_ROOT_SCALE)
            .checked_mul(supply)
            .and_then(|value| value.checked_mul(self.max_supply))
            .map(sqrt)
            .ok_or_else(overflow)?;
        let square_root = U256::from(SQUARE_ROOT_SCALE)
            .checked_mul(supply)
            .and_then(|value| value.checked_mul(supply))
            .map(sqrt)
            .ok_or_else(overflow)?;

        let numerator = SafeNumber::from_raw(self.initial_price)
            .mul(U256::from(2u64))?
            .mul(supply_root)?
            .mul(square_root)?;
        let denominator = self.max_supply.checked_mul(self.max_supply).ok_or_else(overflow)?;

        let price = self.initial_price
            .checked_add(numerator.value / denominator)
            .ok_or_else(overflow)?;

        trace!("unit price at supply {supply}: {price}");
        Ok(price)
    }

    fn price_schedule(&self, from: U256, count: u64) -> Result<Vec<U256>> {
        ensure_supply_within(from, self.max_supply)?;

        (0..count)
            .map(|offset| {
                let supply = from.checked_add(U256::from(offset)).ok_or(CurveError::MathOverflow)?;
                self.unit_price(supply)
            })
            .collect()
    }

    fn quote(
        &self,
        current_supply: U256,
        count: u64,
        fee_percent: SafeNumber,
        direction: TradeDirection
    ) -> Result<PriceQuote> {
        ensure_supply_within(current_supply, self.max_supply)?;
        ensure_fee_percent(fee_percent)?;

        let (gross, units_priced) = match direction {
            TradeDirection::Buy => self.sum_buy(current_supply, count)?,
            TradeDirection::Sell => self.sum_sell(current_supply, count)?,
        };

        // The fee is taken once from the aggregate, never per unit.
        let fee = SafeNumber::from_raw(gross).mul_wad(fee_percent)?.value;
        let total = match direction {
            TradeDirection::Buy => gross.checked_add(fee),
            TradeDirection::Sell => gross.checked_sub(fee),
        }.ok_or(CurveError::MathOverflow)?;

        debug!(
            "{direction:?} quote: supply={current_supply} count={count} priced={units_priced} gross={gross} fee={fee} total={total}"
        );

        Ok(PriceQuote {
            direction,
            count,
            units_priced,
            gross,
            fee,
            total,
        })
    }
}

/// Single-unit price at `supply`, no fee.
pub fn unit_price(supply: U256, max_supply: U256, initial_price: U256) -> Result<U256> {
    SqrtCurveCalculator::new(max_supply, initial_price)?.unit_price(supply)
}

/// Total paid for `count` units minted from `current_supply`, fee added on top.
pub fn batch_buy_price(
    max_supply: U256,
    current_supply: U256,
    initial_price: U256,
    count: u64,
    fee_percent: U256
) -> Result<U256> {
    SqrtCurveCalculator::new(max_supply, initial_price)?.batch_buy_price(
        current_supply,
        count,
        SafeNumber::from_raw(fee_percent)
    )
}

/// Total received for `count` units sold back from `current_supply`, fee deducted.
pub fn batch_sell_price(
    max_supply: U256,
    current_supply: U256,
    initial_price: U256,
    count: u64,
    fee_percent: U256
) -> Result<U256> {
    SqrtCurveCalculator::new(max_supply, initial_price)?.batch_sell_price(
        current_supply,
        count,
        SafeNumber::from_raw(fee_percent)
    )
}


#[cfg(test)]
mod sqrt_curve_property_test {
    use alloy_primitives::U256;
    use proptest::prelude::*;

    use crate::{
        curve::{ CurveCalculator, TradeDirection },
        safe_number::safe_number::{ SafeNumber, WAD },
    };

    use super::SqrtCurveCalculator;

    const WAD_U64: u64 = 1_000_000_000_000_000_000;

    fn isqrt(value: u128) -> u128 {
        let (mut low, mut high) = (0u128, 1u128 << 64);
        while low + 1 < high {
            let middle = (low + high) / 2;
            if middle * middle <= value {
                low = middle;
            } else {
                high = middle;
            }
        }
        low
    }

    /// Independent u128 evaluation of the contract formula, valid for
    /// max supply up to 1e6 and prices up to 1e18.
    fn reference_unit_price(supply: u128, max_supply: u128, initial_price: u128) -> u128 {
        if supply == 0 {
            return initial_price;
        }
        let supply_root = isqrt(100 * supply * max_supply);
        let square_root = isqrt(10_000 * supply * supply);
        initial_price + (initial_price * 2 * supply_root * square_root) / (max_supply * max_supply)
    }

    fn curve(max_supply: u64, initial_price: u64) -> SqrtCurveCalculator {
        SqrtCurveCalculator::new(U256::from(max_supply), U256::from(initial_price)).unwrap()
    }

    fn sum(prices: Vec<U256>) -> U256 {
        prices.into_iter().fold(U256::ZERO, |total, price| total + price)
    }

    proptest! {
        #[test]
        fn unit_price_matches_reference(
            max_supply in 1u64..=1_000_000,
            seed in any::<u64>(),
            initial_price in 0u64..=WAD_U64,
        ) {
            let supply = seed % (max_supply + 1);
            let expected = reference_unit_price(supply as u128, max_supply as u128, initial_price as u128);

            prop_assert_eq!(
                curve(max_supply, initial_price).unit_price(U256::from(supply)).unwrap(),
                U256::from(expected)
            );
        }

        #[test]
        fn unit_price_is_monotonic(
            max_supply in 1u64..=1_000_000,
            seed in any::<u64>(),
            initial_price in 1u64..=WAD_U64,
        ) {
            let supply = U256::from(seed % max_supply);
            let curve = curve(max_supply, initial_price);

            prop_assert!(
                curve.unit_price(supply + U256::from(1u64)).unwrap() >= curve.unit_price(supply).unwrap()
            );
        }

        #[test]
        fn zero_supply_is_initial_price(max_supply in 1u64..=u64::MAX, initial_price in any::<u64>()) {
            prop_assert_eq!(
                curve(max_supply, initial_price).unit_price(U256::ZERO).unwrap(),
                U256::from(initial_price)
            );
        }

        #[test]
        fn batch_buy_is_sum_of_unit_prices(
            max_supply in 1u64..=100_000,
            seed in any::<u64>(),
            count in 0u64..64,
        ) {
            let curve = curve(max_supply, WAD_U64 / 1_000);
            let current = U256::from(seed % (max_supply + 1));

            prop_assert_eq!(
                curve.batch_buy_price(current, count, SafeNumber::ZERO).unwrap(),
                sum(curve.price_schedule(current, count).unwrap())
            );
        }

        #[test]
        fn fee_is_applied_to_the_aggregate(
            max_supply in 1u64..=100_000,
            seed in any::<u64>(),
            count in 0u64..32,
            fee in 0u64..=WAD_U64,
        ) {
            let curve = curve(max_supply, WAD_U64 / 1_000);
            let current = U256::from(seed % (max_supply + 1));
            let fee = SafeNumber::from_raw(U256::from(fee));

            let buy = curve.batch_buy_price(current, count, SafeNumber::ZERO).unwrap();
            prop_assert_eq!(
                curve.batch_buy_price(current, count, fee).unwrap(),
                buy + buy * fee.value / WAD
            );

            let sell = curve.batch_sell_price(current, count, SafeNumber::ZERO).unwrap();
            prop_assert_eq!(
                curve.batch_sell_price(current, count, fee).unwrap(),
                sell - sell * fee.value / WAD
            );
        }

        #[test]
        fn sell_walks_supply_downward(
            max_supply in 1u64..=100_000,
            seed in any::<u64>(),
            count in 0u64..32,
        ) {
            let curve = curve(max_supply, WAD_U64 / 1_000);
            let current = seed % (max_supply + 1);
            let units = count.min(current);

            let quote = curve
                .quote(U256::from(current), count, SafeNumber::ZERO, TradeDirection::Sell)
                .unwrap();

            prop_assert_eq!(quote.units_priced, units);
            prop_assert_eq!(
                quote.total,
                sum(curve.price_schedule(U256::from(current - units), units).unwrap())
            );
        }

        #[test]
        fn buy_then_sell_one_unit_round_trips(
            max_supply in 1u64..=1_000_000,
            seed in any::<u64>(),
            initial_price in 1u64..=WAD_U64,
        ) {
            let curve = curve(max_supply, initial_price);
            let supply = U256::from(seed % max_supply);

            let paid = curve.batch_buy_price(supply, 1, SafeNumber::ZERO).unwrap();
            let received = curve
                .batch_sell_price(supply + U256::from(1u64), 1, SafeNumber::ZERO)
                .unwrap();

            prop_assert_eq!(paid, received);
        }

        #[test]
        fn zero_count_is_free(
            max_supply in 1u64..=1_000_000,
            seed in any::<u64>(),
            fee in 0u64..=WAD_U64,
        ) {
            let curve = curve(max_supply, WAD_U64 / 1_000);
            let current = U256::from(seed % (max_supply + 1));
            let fee = SafeNumber::from_raw(U256::from(fee));

            prop_assert_eq!(curve.batch_buy_price(current, 0, fee).unwrap(), U256::ZERO);
            prop_assert_eq!(curve.batch_sell_price(current, 0, fee).unwrap(), U256::ZERO);
        }
    }
}
