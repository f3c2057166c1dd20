//! Collateral valuation.
//!
//! A holder's collateral value is the sum over every asset it holds of
//! `quantity * price / price_denominator`, where the price is quoted per whole
//! unit of the asset. Products are formed in 512 bits and each term is truncated
//! toward zero, so the result never overstates what the holder owns.
//!
//! The engine owns nothing. It borrows a [`BalanceStore`] and a [`PriceOracle`]
//! and recomputes on every call.

use crate::ledger::BalanceStore;
use crate::math::{mul_div_floor, pow10};
use crate::price_feed::{OracleError, PriceOracle};
use crate::types::{Amount, AssetId, CollateralValue, Holder, Price, BASE_DECIMALS, BASE_UNITS_PER_UNIT};
use alloy_primitives::U256;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// One priced line of a holder's collateral.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollateralLine {
    pub asset: AssetId,
    pub quantity: Amount,
    pub price: Price,
    pub value: CollateralValue,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollateralBreakdown {
    pub lines: Vec<CollateralLine>,
    pub total: CollateralValue,
}

/// Value of `quantity` at `price`, truncated. Fails only when the result does
/// not fit in 256 bits.
pub fn asset_value(
    asset: AssetId,
    quantity: Amount,
    price: Price,
    price_denominator: U256,
) -> Result<CollateralValue, ValuationError> {
    mul_div_floor(quantity.base_units(), price.value(), price_denominator)
        .map(CollateralValue::from_base_units)
        .ok_or(ValuationError::ValuationOverflow { asset })
}

pub struct ValuationEngine<'a, S: ?Sized, O: ?Sized> {
    store: &'a S,
    oracle: &'a O,
    price_denominator: U256,
}

impl<'a, S, O> ValuationEngine<'a, S, O>
where
    S: BalanceStore + ?Sized,
    O: PriceOracle + ?Sized,
{
    pub fn new(store: &'a S, oracle: &'a O) -> Self {
        Self {
            store,
            oracle,
            price_denominator: U256::from(BASE_UNITS_PER_UNIT),
        }
    }

    /// Quote prices per `10^decimals` base units instead of the default 18.
    /// Values above 77 digits do not fit and leave the denominator unchanged.
    pub fn with_price_decimals(mut self, decimals: u8) -> Self {
        match pow10(decimals) {
            Some(denominator) => self.price_denominator = denominator,
            None => warn!(decimals, default = BASE_DECIMALS, "price decimals out of range, keeping current denominator"),
        }
        self
    }

    pub fn price_denominator(&self) -> U256 {
        self.price_denominator
    }

    pub fn calc_collateral_value(&self, holder: &Holder) -> Result<CollateralValue, ValuationError> {
        Ok(self.calc_collateral_breakdown(holder)?.total)
    }

    pub fn calc_collateral_breakdown(&self, holder: &Holder) -> Result<CollateralBreakdown, ValuationError> {
        let balances = self.store.balances(holder);
        if balances.is_empty() {
            // nothing held, nothing to price
            return Ok(CollateralBreakdown::default());
        }

        let mut lines = Vec::with_capacity(balances.len());
        let mut total = CollateralValue::zero();

        for balance in balances {
            let price = self
                .oracle
                .get_price(balance.asset)
                .map_err(|source| ValuationError::OraclePriceUnavailable {
                    asset: balance.asset,
                    source,
                })?;

            let value = asset_value(balance.asset, balance.quantity, price, self.price_denominator)?;
            total = total
                .checked_add(value)
                .ok_or(ValuationError::ValuationOverflow { asset: balance.asset })?;

            lines.push(CollateralLine {
                asset: balance.asset,
                quantity: balance.quantity,
                price,
                value,
            });
        }

        debug!(%holder, assets = lines.len(), %total, "collateral valued");
        Ok(CollateralBreakdown { lines, total })
    }

    /// Value of every holder in the store combined.
    pub fn calc_total_collateral_value(&self) -> Result<CollateralValue, ValuationError> {
        let mut total = CollateralValue::zero();
        for holder in self.store.holders() {
            let value = self.calc_collateral_value(&holder)?;
            total = total
                .checked_add(value)
                .ok_or(ValuationError::TotalOverflow)?;
        }
        Ok(total)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValuationError {
    #[error("Cannot value {asset}: {source}")]
    OraclePriceUnavailable {
        asset: AssetId,
        #[source]
        source: OracleError,
    },

    #[error("Collateral value overflows while adding {asset}")]
    ValuationOverflow { asset: AssetId },

    #[error("Pool-wide collateral value overflows")]
    TotalOverflow,
}
