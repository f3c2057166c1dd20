// 8.0.2: result types and errors for pool operations.

use crate::config::ConfigError;
use crate::ledger::LedgerError;
use crate::types::{Amount, AssetId, Holder, HolderParseError};
use crate::valuation::ValuationError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferKind {
    Deposit,
    Withdrawal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferResult {
    pub kind: TransferKind,
    pub holder: Holder,
    pub asset: AssetId,
    pub amount: Amount,
    pub new_balance: Amount,
    pub pool_total: Amount,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    #[error("Amount must be greater than zero")]
    InvalidAmount,

    #[error("Asset {0} is not accepted by this pool")]
    UnsupportedAsset(AssetId),

    #[error("Invalid holder address: {0}")]
    InvalidHolder(#[from] HolderParseError),

    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("Valuation error: {0}")]
    Valuation(#[from] ValuationError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}
