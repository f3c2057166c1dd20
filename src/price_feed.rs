// Price Oracle Integration
//
// The valuation engine does not care where prices come from. Chainlink, a TWAP,
// a CEX aggregator or a fixed table all sit behind the same trait. Staleness and
// aggregation belong to whoever implements it; this crate only ships an
// in-memory table for tests, simulations and embedding.

use crate::types::{AssetId, Price};
use std::collections::HashMap;

/// Errors an oracle can report
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OracleError {
    #[error("No price available for {0}")]
    PriceNotFound(AssetId),
}

/// Capability consumed by the valuation engine. Implement this to plug in a
/// real price source.
pub trait PriceOracle {
    /// Price of one whole unit of `asset`, in base units of value.
    fn get_price(&self, asset: AssetId) -> Result<Price, OracleError>;
}

impl<T: PriceOracle + ?Sized> PriceOracle for &T {
    fn get_price(&self, asset: AssetId) -> Result<Price, OracleError> {
        (**self).get_price(asset)
    }
}

impl<T: PriceOracle + ?Sized> PriceOracle for Box<T> {
    fn get_price(&self, asset: AssetId) -> Result<Price, OracleError> {
        (**self).get_price(asset)
    }
}

/// Fixed price table. Deterministic, no I/O.
#[derive(Debug, Clone, Default)]
pub struct StaticPriceOracle {
    prices: HashMap<AssetId, Price>,
}

impl StaticPriceOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_price(mut self, asset: AssetId, price: Price) -> Self {
        self.prices.insert(asset, price);
        self
    }

    /// Returns the previous price, if any
    pub fn set_price(&mut self, asset: AssetId, price: Price) -> Option<Price> {
        self.prices.insert(asset, price)
    }

    pub fn remove_price(&mut self, asset: AssetId) -> Option<Price> {
        self.prices.remove(&asset)
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

impl PriceOracle for StaticPriceOracle {
    fn get_price(&self, asset: AssetId) -> Result<Price, OracleError> {
        self.prices
            .get(&asset)
            .copied()
            .ok_or(OracleError::PriceNotFound(asset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ETH: AssetId = AssetId(1);
    const BTC: AssetId = AssetId(2);

    fn price(raw: u128) -> Price {
        Price::from_base_units(raw).unwrap()
    }

    #[test]
    fn test_static_oracle_lookup() {
        let oracle = StaticPriceOracle::new().with_price(ETH, price(2000));

        assert_eq!(oracle.get_price(ETH), Ok(price(2000)));
        assert_eq!(oracle.get_price(BTC), Err(OracleError::PriceNotFound(BTC)));
    }

    #[test]
    fn test_set_and_remove_price() {
        let mut oracle = StaticPriceOracle::new();
        assert!(oracle.is_empty());

        assert_eq!(oracle.set_price(ETH, price(10)), None);
        assert_eq!(oracle.set_price(ETH, price(20)), Some(price(10)));
        assert_eq!(oracle.get_price(ETH), Ok(price(20)));
        assert_eq!(oracle.len(), 1);

        assert_eq!(oracle.remove_price(ETH), Some(price(20)));
        assert!(oracle.get_price(ETH).is_err());
    }

    #[test]
    fn test_borrowed_and_boxed_oracles() {
        let oracle = StaticPriceOracle::new().with_price(ETH, price(5));

        let borrowed = &oracle;
        assert_eq!(borrowed.get_price(ETH), Ok(price(5)));

        let boxed: Box<dyn PriceOracle> = Box::new(oracle.clone());
        assert_eq!(boxed.get_price(ETH), Ok(price(5)));
    }
}
