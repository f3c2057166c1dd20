// 8.2 engine/queries.rs: read path. nothing here mutates the pool.

use super::core::LiquidityPool;
use super::results::PoolError;
use crate::ledger::Ledger;
use crate::price_feed::PriceOracle;
use crate::types::{Amount, AssetBalance, AssetId, CollateralValue, Holder};
use crate::valuation::{CollateralBreakdown, ValuationEngine};

impl<O: PriceOracle> LiquidityPool<O> {
    pub fn valuation(&self) -> ValuationEngine<'_, Ledger, O> {
        ValuationEngine::new(&self.ledger, &self.oracle).with_price_decimals(self.config.decimals)
    }

    pub fn calc_collateral_value(&self, holder: &Holder) -> Result<CollateralValue, PoolError> {
        Ok(self.valuation().calc_collateral_value(holder)?)
    }

    /// Same as `calc_collateral_value`, taking a `0x`-prefixed hex address.
    pub fn calc_collateral_value_for(&self, address: &str) -> Result<CollateralValue, PoolError> {
        let holder: Holder = address.parse()?;
        self.calc_collateral_value(&holder)
    }

    pub fn calc_collateral_breakdown(&self, holder: &Holder) -> Result<CollateralBreakdown, PoolError> {
        Ok(self.valuation().calc_collateral_breakdown(holder)?)
    }

    /// Collateral value of every holder combined.
    pub fn total_value_locked(&self) -> Result<CollateralValue, PoolError> {
        Ok(self.valuation().calc_total_collateral_value()?)
    }

    pub fn balances_of(&self, holder: &Holder) -> Vec<AssetBalance> {
        self.ledger.get_balances(holder)
    }

    pub fn balance_of(&self, holder: &Holder, asset: AssetId) -> Amount {
        self.ledger.balance_of(holder, asset)
    }

    pub fn total_supply(&self, asset: AssetId) -> Amount {
        self.ledger.total_supply(asset)
    }
}
