// 8.0 engine/core.rs: main pool struct. config, ledger and oracle live here.

use super::results::{PoolError, TransferKind, TransferResult};
use crate::config::PoolConfig;
use crate::ledger::Ledger;
use crate::price_feed::PriceOracle;
use crate::types::{Amount, AssetId, Holder};
use tracing::{info, warn};

/** 8.1: the pool. every balance change goes through here */
#[derive(Debug)]
pub struct LiquidityPool<O> {
    pub(super) config: PoolConfig,
    pub(super) ledger: Ledger,
    pub(super) oracle: O,
}

impl<O: PriceOracle> LiquidityPool<O> {
    pub fn new(config: PoolConfig, oracle: O) -> Result<Self, PoolError> {
        config.validate()?;
        info!(pool = %config.name, assets = config.assets.len(), "pool created");
        Ok(Self {
            config,
            ledger: Ledger::new(),
            oracle,
        })
    }

    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    pub fn oracle_mut(&mut self) -> &mut O {
        &mut self.oracle
    }

    // only listed, enabled assets take deposits
    pub fn deposit(&mut self, holder: Holder, asset: AssetId, amount: Amount) -> Result<TransferResult, PoolError> {
        if amount.is_zero() {
            return Err(PoolError::InvalidAmount);
        }
        if !self.config.is_supported(asset) {
            warn!(%holder, %asset, "deposit rejected: asset not supported");
            return Err(PoolError::UnsupportedAsset(asset));
        }

        let new_balance = self.ledger.credit(holder, asset, amount)?;
        info!(%holder, %asset, %amount, "deposit");

        Ok(TransferResult {
            kind: TransferKind::Deposit,
            holder,
            asset,
            amount,
            new_balance,
            pool_total: self.ledger.total_supply(asset),
        })
    }

    // allowed for disabled assets so holders can always exit
    pub fn withdraw(&mut self, holder: Holder, asset: AssetId, amount: Amount) -> Result<TransferResult, PoolError> {
        if amount.is_zero() {
            return Err(PoolError::InvalidAmount);
        }

        let new_balance = match self.ledger.debit(holder, asset, amount) {
            Ok(balance) => balance,
            Err(e) => {
                warn!(%holder, %asset, %amount, error = %e, "withdrawal rejected");
                return Err(e.into());
            }
        };
        info!(%holder, %asset, %amount, "withdrawal");

        Ok(TransferResult {
            kind: TransferKind::Withdrawal,
            holder,
            asset,
            amount,
            new_balance,
            pool_total: self.ledger.total_supply(asset),
        })
    }
}
