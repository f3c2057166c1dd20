//! Collateral Pool Simulation.
//!
//! Walks a pool through deposits, price moves, withdrawals and the failure
//! paths of valuation. An optional first argument names a JSON pool config.
//! `RUST_LOG=debug` shows every ledger movement.

use collateral_pool::*;
use rust_decimal_macros::dec;
use tracing_subscriber::{fmt, prelude::__tracing_subscriber_SubscriberExt, util::SubscriberInitExt, EnvFilter};

type SimResult = Result<(), Box<dyn std::error::Error>>;

const WETH: AssetId = AssetId(1);
const WBTC: AssetId = AssetId(2);
const USDC: AssetId = AssetId(3);

fn main() -> SimResult {
    init_logging();

    let config = match std::env::args().nth(1) {
        Some(path) => PoolConfig::from_path(&path)?,
        None => PoolConfig::default(),
    };

    println!("Collateral Pool Simulation");
    println!("Pool: {}, {} listed assets\n", config.name, config.assets.len());

    scenario_1_empty_holder(&config)?;
    scenario_2_multi_asset_valuation(&config)?;
    scenario_3_price_movement(&config)?;
    scenario_4_withdrawals(&config)?;
    scenario_5_missing_price(&config)?;

    println!("\nAll simulations completed successfully.");
    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(fmt::layer().without_time())
        .with(filter)
        .init();
}

fn default_oracle() -> Result<StaticPriceOracle, Box<dyn std::error::Error>> {
    let price = |d| Price::from_decimal(d).ok_or("invalid price");
    Ok(StaticPriceOracle::new()
        .with_price(WETH, price(dec!(2000))?)
        .with_price(WBTC, price(dec!(60000))?)
        .with_price(USDC, price(dec!(1))?))
}

fn human(value: CollateralValue) -> String {
    value
        .to_decimal()
        .map(|d| d.to_string())
        .unwrap_or_else(|| format!("{} base units", value))
}

fn units(d: rust_decimal::Decimal) -> Result<Amount, Box<dyn std::error::Error>> {
    Ok(Amount::from_decimal(d).ok_or("invalid amount")?)
}

/// A holder with no history is worth exactly zero.
fn scenario_1_empty_holder(config: &PoolConfig) -> SimResult {
    println!("Scenario 1: Holder With No Deposits\n");

    let pool = LiquidityPool::new(config.clone(), default_oracle()?)?;
    let placeholder = "0xFFfFfFffFFfffFFfFFfFFFFFffFFFffffFfFFFfF";
    let value = pool.calc_collateral_value_for(placeholder)?;

    println!("  calcCollateralValue({}) = {}\n", placeholder, human(value));
    Ok(())
}

/// Several assets, each priced and summed.
fn scenario_2_multi_asset_valuation(config: &PoolConfig) -> SimResult {
    println!("Scenario 2: Multi Asset Valuation\n");

    let mut pool = LiquidityPool::new(config.clone(), default_oracle()?)?;
    let alice = Holder::from_bytes([0xa1; 20]);

    pool.deposit(alice, WETH, units(dec!(1.5))?)?;
    pool.deposit(alice, WBTC, units(dec!(0.1))?)?;
    pool.deposit(alice, USDC, units(dec!(2500))?)?;

    let breakdown = pool.calc_collateral_breakdown(&alice)?;
    for line in &breakdown.lines {
        let symbol = pool.config().symbol(line.asset).unwrap_or("?");
        println!("  {:>5}: {} units -> {}", symbol, line.quantity.to_decimal().unwrap_or_default(), human(line.value));
    }
    println!("  Total collateral for {}: {}\n", alice, human(breakdown.total));
    Ok(())
}

/// Value follows the oracle without touching balances.
fn scenario_3_price_movement(config: &PoolConfig) -> SimResult {
    println!("Scenario 3: Price Movement\n");

    let mut pool = LiquidityPool::new(config.clone(), default_oracle()?)?;
    let bob = Holder::from_bytes([0xb0; 20]);
    pool.deposit(bob, WETH, units(dec!(10))?)?;

    for eth_price in [dec!(2000), dec!(2400), dec!(1600)] {
        let price = Price::from_decimal(eth_price).ok_or("invalid price")?;
        pool.oracle_mut().set_price(WETH, price);
        let value = pool.calc_collateral_value(&bob)?;
        println!("  WETH @ {}: collateral {}", eth_price, human(value));
    }
    println!();
    Ok(())
}

/// Withdrawals reduce value; over-withdrawal is refused and changes nothing.
fn scenario_4_withdrawals(config: &PoolConfig) -> SimResult {
    println!("Scenario 4: Withdrawals\n");

    let mut pool = LiquidityPool::new(config.clone(), default_oracle()?)?;
    let carol = Holder::from_bytes([0xc4; 20]);
    let dave = Holder::from_bytes([0xd4; 20]);

    pool.deposit(carol, USDC, units(dec!(1000))?)?;
    pool.deposit(dave, USDC, units(dec!(500))?)?;
    println!("  TVL after deposits: {}", human(pool.total_value_locked()?));

    let result = pool.withdraw(carol, USDC, units(dec!(400))?)?;
    println!("  Carol withdraws 400, balance now {}", result.new_balance.to_decimal().unwrap_or_default());

    match pool.withdraw(dave, USDC, units(dec!(501))?) {
        Ok(_) => println!("  Dave over-withdrew (unexpected)"),
        Err(e) => println!("  Dave withdraws 501: rejected ({})", e),
    }

    println!("  TVL now: {}\n", human(pool.total_value_locked()?));
    Ok(())
}

/// An unpriced asset aborts the whole valuation.
fn scenario_5_missing_price(config: &PoolConfig) -> SimResult {
    println!("Scenario 5: Missing Price\n");

    let mut pool = LiquidityPool::new(config.clone(), default_oracle()?)?;
    let erin = Holder::from_bytes([0xe1; 20]);
    pool.deposit(erin, WETH, units(dec!(1))?)?;
    pool.deposit(erin, WBTC, units(dec!(1))?)?;

    pool.oracle_mut().remove_price(WBTC);
    match pool.calc_collateral_value(&erin) {
        Ok(value) => println!("  Valued at {} (unexpected)", human(value)),
        Err(e) => println!("  Valuation refused: {}", e),
    }
    println!();
    Ok(())
}
