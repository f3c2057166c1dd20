// 8.0: pool engine. ties the ledger, the asset registry and the oracle together.
// write path goes through deposit/withdraw, read path through the valuation engine.
// deterministic with no external I/O.

mod core;
mod queries;
mod results;

pub use core::LiquidityPool;
pub use results::{PoolError, TransferKind, TransferResult};
