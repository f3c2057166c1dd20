//! Holder balances of deposited assets.
//!
//! The ledger is the only owner of balance state. Holders appear the first time
//! they are credited and disappear once every balance they hold is back to zero,
//! so an unknown holder and a fully withdrawn one look the same to readers.
//! Per-asset pool totals are kept alongside and move with every credit/debit.

use crate::types::{Amount, AssetBalance, AssetId, Holder};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Read side of a balance store. The valuation engine only ever sees this.
pub trait BalanceStore {
    /// Non-zero balances of `holder`, ordered by asset. Empty for unknown holders.
    fn balances(&self, holder: &Holder) -> Vec<AssetBalance>;

    /// Every holder with at least one non-zero balance.
    fn holders(&self) -> Vec<Holder>;
}

#[derive(Debug, Clone, Default)]
pub struct Ledger {
    entries: HashMap<Holder, BTreeMap<AssetId, Amount>>,
    totals: BTreeMap<AssetId, Amount>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_balances(&self, holder: &Holder) -> Vec<AssetBalance> {
        self.entries
            .get(holder)
            .map(|assets| {
                assets
                    .iter()
                    .map(|(asset, quantity)| AssetBalance::new(*asset, *quantity))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn balance_of(&self, holder: &Holder, asset: AssetId) -> Amount {
        self.entries
            .get(holder)
            .and_then(|assets| assets.get(&asset))
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    /// Adds `amount` and returns the new balance. Nothing changes on error.
    pub fn credit(&mut self, holder: Holder, asset: AssetId, amount: Amount) -> Result<Amount, LedgerError> {
        let current = self.balance_of(&holder, asset);
        if amount.is_zero() {
            return Ok(current);
        }

        // check both sums before touching state
        let new_balance = current
            .checked_add(amount)
            .ok_or(LedgerError::BalanceOverflow { asset })?;
        let new_total = self
            .total_supply(asset)
            .checked_add(amount)
            .ok_or(LedgerError::BalanceOverflow { asset })?;

        self.entries.entry(holder).or_default().insert(asset, new_balance);
        self.totals.insert(asset, new_total);

        debug!(%holder, %asset, %amount, balance = %new_balance, "credited");
        Ok(new_balance)
    }

    /// Subtracts `amount` and returns the new balance. Nothing changes on error.
    pub fn debit(&mut self, holder: Holder, asset: AssetId, amount: Amount) -> Result<Amount, LedgerError> {
        let current = self.balance_of(&holder, asset);
        let new_balance = current
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientBalance {
                requested: amount,
                available: current,
            })?;
        if amount.is_zero() {
            return Ok(current);
        }

        // pool total >= holder balance >= amount
        let new_total = self.total_supply(asset).checked_sub(amount);
        debug_assert!(new_total.is_some(), "pool total of {asset} below a holder balance");
        let new_total = new_total.unwrap_or(Amount::ZERO);

        if let Some(assets) = self.entries.get_mut(&holder) {
            if new_balance.is_zero() {
                assets.remove(&asset);
            } else {
                assets.insert(asset, new_balance);
            }
            if assets.is_empty() {
                self.entries.remove(&holder);
            }
        }
        if new_total.is_zero() {
            self.totals.remove(&asset);
        } else {
            self.totals.insert(asset, new_total);
        }

        debug!(%holder, %asset, %amount, balance = %new_balance, "debited");
        Ok(new_balance)
    }

    /// Sum of every holder's balance of `asset`.
    pub fn total_supply(&self, asset: AssetId) -> Amount {
        self.totals.get(&asset).copied().unwrap_or(Amount::ZERO)
    }

    /// Assets with a non-zero pool total, ordered by id.
    pub fn assets(&self) -> Vec<AssetId> {
        self.totals.keys().copied().collect()
    }

    pub fn holder_count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl BalanceStore for Ledger {
    fn balances(&self, holder: &Holder) -> Vec<AssetBalance> {
        self.get_balances(holder)
    }

    fn holders(&self) -> Vec<Holder> {
        let mut holders: Vec<Holder> = self.entries.keys().copied().collect();
        holders.sort();
        holders
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("Insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance { requested: Amount, available: Amount },

    #[error("Balance of {asset} would exceed the representable range")]
    BalanceOverflow { asset: AssetId },
}
