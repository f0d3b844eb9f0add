use std::{ fmt, str::FromStr };

use alloy_primitives::{ uint, U256 };

use crate::error::{ CurveError, Result };

pub const WAD_DECIMALS: usize = 18;
pub const WAD: U256 = uint!(1_000_000_000_000_000_000_U256);

/// A non-negative fixed-point number stored as a `U256` scaled by 1e18,
/// the same representation the FLIP contracts keep on-chain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SafeNumber {
    pub value: U256,
}

pub trait Math {
    fn mul(&self, other: U256) -> Result<SafeNumber>;
    fn mul_wad(&self, fraction: SafeNumber) -> Result<SafeNumber>;
}

pub trait Unwrap {
    fn unwrap(value: U256) -> Self;
}

pub trait NewSafeNumber {
    fn new(value: Self) -> Result<SafeNumber>;
}

impl Unwrap for U256 {
    fn unwrap(value: U256) -> Self {
        value
    }
}

impl Unwrap for String {
    fn unwrap(value: U256) -> Self {
        SafeNumber::from_raw(value).to_string()
    }
}

/// Whole units, `u64::new(3)` is `3e18`.
impl NewSafeNumber for u64 {
    fn new(value: Self) -> Result<SafeNumber> {
        U256::from(value)
            .checked_mul(WAD)
            .map(SafeNumber::from_raw)
            .ok_or(CurveError::MathOverflow)
    }
}

/// Decimal notation, `"0.001"` is `1e15`.
impl NewSafeNumber for &str {
    fn new(value: Self) -> Result<SafeNumber> {
        let invalid = || CurveError::InvalidNumber(value.to_string());

        let (whole, fraction) = value.split_once('.').unwrap_or((value, ""));
        let is_digits = |part: &str| part.bytes().all(|byte| byte.is_ascii_digit());

        if (whole.is_empty() && fraction.is_empty()) || !is_digits(whole) || !is_digits(fraction) {
            return Err(invalid());
        }
        if fraction.len() > WAD_DECIMALS {
            return Err(invalid());
        }

        let whole = if whole.is_empty() {
            U256::ZERO
        } else {
            U256::from_str_radix(whole, 10).map_err(|_| CurveError::MathOverflow)?
        };
        let fraction = format!("{:0<width$}", fraction, width = WAD_DECIMALS);
        let fraction = U256::from_str_radix(&fraction, 10).map_err(|_| invalid())?;

        whole
            .checked_mul(WAD)
            .and_then(|scaled| scaled.checked_add(fraction))
            .map(SafeNumber::from_raw)
            .ok_or(CurveError::MathOverflow)
    }
}

impl SafeNumber {
    pub const ZERO: SafeNumber = SafeNumber { value: U256::ZERO };
    pub const ONE: SafeNumber = SafeNumber { value: WAD };

    pub const fn from_raw(value: U256) -> Self {
        Self { value }
    }

    pub fn unwrap<U: Unwrap>(&self) -> U {
        U::unwrap(self.value)
    }

    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }
}

impl Math for SafeNumber {
    fn mul(&self, other: U256) -> Result<SafeNumber> {
        self.value.checked_mul(other).map(Self::from_raw).ok_or(CurveError::MathOverflow)
    }

    /// `self * fraction / 1e18`, truncating like Solidity.
    fn mul_wad(&self, fraction: SafeNumber) -> Result<SafeNumber> {
        let product = self.value.checked_mul(fraction.value).ok_or(CurveError::MathOverflow)?;
        Ok(Self::from_raw(product / WAD))
    }
}

impl FromStr for SafeNumber {
    type Err = CurveError;

    fn from_str(value: &str) -> Result<Self> {
        <&str as NewSafeNumber>::new(value)
    }
}

impl From<SafeNumber> for U256 {
    fn from(number: SafeNumber) -> Self {
        number.value
    }
}

impl fmt::Display for SafeNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.value / WAD;
        let fraction = self.value % WAD;

        if fraction.is_zero() {
            return write!(f, "{whole}");
        }

        let fraction = format!("{:0>width$}", fraction.to_string(), width = WAD_DECIMALS);
        write!(f, "{whole}.{}", fraction.trim_end_matches('0'))
    }
}
