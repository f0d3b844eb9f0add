use alloy_primitives::U256;

use crate::{
    error::{ CurveError, Result },
    safe_number::safe_number::{ SafeNumber, WAD },
};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn ensure_max_supply(max_supply: U256) -> Result<()> {
    if max_supply.is_zero() {
        return Err(CurveError::InvalidCurveParameters("max supply must be greater than zero".into()));
    }
    Ok(())
}

pub fn ensure_supply_within(current_supply: U256, max_supply: U256) -> Result<()> {
    if current_supply > max_supply {
        return Err(
            CurveError::InvalidCurveParameters(
                format!("current supply {current_supply} exceeds max supply {max_supply}")
            )
        );
    }
    Ok(())
}

/// Fees are 1e18-scaled fractions, anything above 100% would drive sell proceeds negative.
pub fn ensure_fee_percent(fee_percent: SafeNumber) -> Result<()> {
    if fee_percent.value > WAD {
        return Err(CurveError::InvalidFeePercentage(fee_percent.value));
    }
    Ok(())
}
