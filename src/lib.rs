// collateral-pool: liquidity pool accounting and collateral valuation.
// ledger-first architecture: balances are authoritative, values are derived.
// all computation is deterministic with no external I/O.
//
// file map (search X.0 for structs, X.1+ for logic):
//   1.x  types.rs: primitives: Holder, AssetId, Amount, Price, CollateralValue
//   2.x  math.rs: 512-bit mul/div, powers of ten
//   3.x  ledger.rs: holder balances, pool totals, BalanceStore seam
//   4.x  valuation.rs: collateral value per holder and pool-wide
//   7.x  config.rs: pool name, asset registry, JSON loading
//   8.x  engine/: pool facade: deposit, withdraw, queries
//   9.x  price_feed.rs: PriceOracle trait + static table

// core accounting modules
pub mod engine;
pub mod ledger;
pub mod math;
pub mod types;
pub mod valuation;

// integration modules
pub mod config;
pub mod price_feed;

// re exports for convenience
pub use engine::*;
pub use ledger::*;
pub use types::*;
pub use valuation::*;
pub use config::{AssetConfig, ConfigError, PoolConfig};
pub use price_feed::{OracleError, PriceOracle, StaticPriceOracle};
