// 1.0: all the primitives live here. holders, assets, amounts, prices, values.
// each is a newtype so the compiler catches a price being summed as a balance.

use crate::math::pow10;
use alloy_primitives::{Address, U256};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fractional digits of every amount, price and value (the `ether` convention).
pub const BASE_DECIMALS: u8 = 18;

/// Base units in one whole unit of any asset.
pub const BASE_UNITS_PER_UNIT: u64 = 1_000_000_000_000_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AssetId(pub u32);

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "asset#{}", self.0)
    }
}

// 1.1: holder address. 20 bytes, parsed case-insensitively, shown checksummed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Holder(Address);

impl Holder {
    pub const fn new(address: Address) -> Self {
        Self(address)
    }

    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(Address::new(bytes))
    }

    /// The all-ones address `0xFFfF...FfF`, commonly used for "no one in particular".
    pub fn placeholder() -> Self {
        Self(Address::repeat_byte(0xff))
    }

    pub fn address(&self) -> Address {
        self.0
    }
}

impl FromStr for Holder {
    type Err = HolderParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("0x").ok_or(HolderParseError::MissingPrefix)?;
        if digits.len() != 40 {
            return Err(HolderParseError::InvalidLength(digits.len()));
        }
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(HolderParseError::InvalidHex);
        }
        let address = Address::from_str(digits).map_err(|_| HolderParseError::InvalidHex)?;
        Ok(Self(address))
    }
}

impl fmt::Display for Holder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_checksum(None))
    }
}

impl From<Address> for Holder {
    fn from(address: Address) -> Self {
        Self(address)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HolderParseError {
    #[error("Address must start with 0x")]
    MissingPrefix,

    #[error("Address must have 40 hex digits, got {0}")]
    InvalidLength(usize),

    #[error("Address contains non-hex characters")]
    InvalidHex,
}

// 1.2: asset quantity in base units. unsigned, so never negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Amount(U256);

impl Amount {
    pub const ZERO: Self = Self(U256::ZERO);

    pub const fn from_base_units(raw: U256) -> Self {
        Self(raw)
    }

    /// Whole units, e.g. `from_units(3)` is 3 ether worth of base units.
    pub fn from_units(whole: u64) -> Self {
        // u64 * 1e18 stays below 2^128
        Self(U256::from(whole) * U256::from(BASE_UNITS_PER_UNIT))
    }

    /// Digits past the 18th are truncated. Negative values are rejected.
    pub fn from_decimal(value: Decimal) -> Option<Self> {
        if value.is_sign_negative() && !value.is_zero() {
            return None;
        }
        let truncated = value.round_dp_with_strategy(BASE_DECIMALS as u32, RoundingStrategy::ToZero);
        let mantissa = u128::try_from(truncated.mantissa()).ok()?;
        let shift = BASE_DECIMALS.checked_sub(u8::try_from(truncated.scale()).ok()?)?;
        let raw = U256::from(mantissa).checked_mul(pow10(shift)?)?;
        Some(Self(raw))
    }

    /// Human-readable units. `None` once the value outgrows `Decimal`.
    pub fn to_decimal(&self) -> Option<Decimal> {
        let limbs = self.0.as_limbs();
        if limbs[2] != 0 || limbs[3] != 0 {
            return None;
        }
        let raw = (limbs[0] as u128) | ((limbs[1] as u128) << 64);
        let raw = i128::try_from(raw).ok()?;
        Decimal::try_from_i128_with_scale(raw, BASE_DECIMALS as u32)
            .ok()
            .map(|d| d.normalize())
    }

    pub fn base_units(&self) -> U256 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn checked_add(self, other: Amount) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Amount) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// 1.3: base units of value per one whole unit of an asset. must be positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Price(U256);

impl Price {
    #[must_use]
    pub fn new(value: U256) -> Option<Self> {
        if value.is_zero() {
            None
        } else {
            Some(Self(value))
        }
    }

    pub fn new_unchecked(value: U256) -> Self {
        debug_assert!(!value.is_zero());
        Self(value)
    }

    #[must_use]
    pub fn from_base_units(raw: u128) -> Option<Self> {
        Self::new(U256::from(raw))
    }

    /// `from_decimal(dec!(2000))` prices one unit at 2000 whole units of value.
    #[must_use]
    pub fn from_decimal(value: Decimal) -> Option<Self> {
        Amount::from_decimal(value).and_then(|a| Self::new(a.base_units()))
    }

    pub fn value(&self) -> U256 {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// 1.4: one ledger line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetBalance {
    pub asset: AssetId,
    pub quantity: Amount,
}

impl AssetBalance {
    pub fn new(asset: AssetId, quantity: Amount) -> Self {
        Self { asset, quantity }
    }
}

// 1.5: aggregate worth of a holder's assets, same precision as Amount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CollateralValue(U256);

impl CollateralValue {
    pub const fn zero() -> Self {
        Self(U256::ZERO)
    }

    pub const fn from_base_units(raw: U256) -> Self {
        Self(raw)
    }

    pub fn value(&self) -> U256 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn checked_add(self, other: CollateralValue) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn to_decimal(&self) -> Option<Decimal> {
        Amount::from_base_units(self.0).to_decimal()
    }
}

impl fmt::Display for CollateralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const PLACEHOLDER: &str = "0xFFfFfFffFFfffFFfFFfFFFFFffFFFffffFfFFFfF";

    #[test]
    fn placeholder_address_parses_in_any_case() {
        let mixed: Holder = PLACEHOLDER.parse().unwrap();
        let lower: Holder = PLACEHOLDER.to_lowercase().parse().unwrap();
        assert_eq!(mixed, Holder::placeholder());
        assert_eq!(lower, Holder::placeholder());
    }

    #[test]
    fn holder_displays_checksummed() {
        assert_eq!(Holder::placeholder().to_string(), PLACEHOLDER);
    }

    #[test]
    fn holder_parse_errors() {
        let no_prefix = "FFfFfFffFFfffFFfFFfFFFFFffFFFffffFfFFFfF".parse::<Holder>();
        assert_eq!(no_prefix, Err(HolderParseError::MissingPrefix));

        let upper_prefix = "0XFFfFfFffFFfffFFfFFfFFFFFffFFFffffFfFFFfF".parse::<Holder>();
        assert_eq!(upper_prefix, Err(HolderParseError::MissingPrefix));

        let short = "0xabc".parse::<Holder>();
        assert_eq!(short, Err(HolderParseError::InvalidLength(3)));

        let bad = "0xZZfFfFffFFfffFFfFFfFFFFFffFFFffffFfFFFfF".parse::<Holder>();
        assert_eq!(bad, Err(HolderParseError::InvalidHex));
    }

    #[test]
    fn amount_units() {
        assert_eq!(
            Amount::from_units(2).base_units(),
            U256::from(2_000_000_000_000_000_000u64)
        );
        assert!(Amount::ZERO.is_zero());
    }

    #[test]
    fn amount_from_decimal_truncates() {
        let amount = Amount::from_decimal(dec!(1.5)).unwrap();
        assert_eq!(amount.base_units(), U256::from(1_500_000_000_000_000_000u64));

        // 19th digit dropped, never rounded up
        let tiny = Amount::from_decimal(dec!(0.0000000000000000019)).unwrap();
        assert_eq!(tiny.base_units(), U256::from(1u64));

        assert!(Amount::from_decimal(dec!(-1)).is_none());
    }

    #[test]
    fn amount_to_decimal() {
        let amount = Amount::from_base_units(U256::from(2_500_000_000_000_000_000u64));
        assert_eq!(amount.to_decimal(), Some(dec!(2.5)));
        assert_eq!(Amount::from_base_units(U256::MAX).to_decimal(), None);
    }

    #[test]
    fn amount_checked_math() {
        let one = Amount::from_units(1);
        assert_eq!(one.checked_add(one), Some(Amount::from_units(2)));
        assert_eq!(Amount::ZERO.checked_sub(one), None);
        assert_eq!(Amount::from_base_units(U256::MAX).checked_add(one), None);
    }

    #[test]
    fn price_must_be_positive() {
        assert!(Price::new(U256::ZERO).is_none());
        assert!(Price::from_base_units(0).is_none());
        assert_eq!(Price::from_base_units(2).unwrap().value(), U256::from(2u64));
        assert_eq!(
            Price::from_decimal(dec!(3)).unwrap().value(),
            U256::from(3_000_000_000_000_000_000u64)
        );
    }
}
